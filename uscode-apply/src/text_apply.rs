//! C6: pure text application of one amendment operation (spec.md §4.6).

use crate::matching;
use uscode_core::{ChangeType, LawChange};

/// Outcome of applying one [`LawChange`] to a section's `text_content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationResult {
    /// The operation succeeded. `None` means the section was repealed.
    Applied(Option<String>),
    /// A structural operation (`Redesignate`, `Transfer`) that cannot be
    /// applied at the text level; the caller records it without a text
    /// change.
    Skipped,
    /// The operation's target state already matched; nothing to do.
    NoChange,
    /// `old_text` could not be located by any matching tier.
    Failed(String),
}

/// Applies `op` to `text_content` (`None` for a section being newly added).
pub fn apply(text_content: Option<&str>, op: &LawChange) -> ApplicationResult {
    match &op.change_type {
        ChangeType::Modify { .. } => apply_modify(text_content, op.old_text.as_deref(), op.new_text.as_deref()),
        ChangeType::Delete => apply_modify(text_content, op.old_text.as_deref(), Some("")),
        ChangeType::Add => apply_add(text_content, op.new_text.as_deref()),
        ChangeType::Repeal => ApplicationResult::Applied(None),
        ChangeType::Redesignate | ChangeType::Transfer => ApplicationResult::Skipped,
        ChangeType::AddNote => ApplicationResult::NoChange,
    }
}

fn apply_add(text_content: Option<&str>, new_text: Option<&str>) -> ApplicationResult {
    let new_text = new_text.unwrap_or_default();
    match text_content {
        None => ApplicationResult::Applied(Some(new_text.to_string())),
        Some(existing) => {
            let mut combined = existing.to_string();
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(new_text);
            ApplicationResult::Applied(Some(combined))
        }
    }
}

/// The three-tier matching cascade: (1) exact substring; (2)
/// whitespace-normalised; (3) case-insensitive whitespace-normalised.
/// Replaces the first occurrence only.
fn apply_modify(text_content: Option<&str>, old_text: Option<&str>, new_text: Option<&str>) -> ApplicationResult {
    let text = match text_content {
        Some(t) => t,
        None => return ApplicationResult::Failed("no existing text to modify".to_string()),
    };
    let old = match old_text {
        Some(o) if !o.is_empty() => o,
        _ => return ApplicationResult::Failed("operation carries no old_text to locate".to_string()),
    };
    let new = new_text.unwrap_or("");

    match matching::find_and_replace(text, old, new) {
        Some(result) if result == text => ApplicationResult::NoChange,
        Some(result) => ApplicationResult::Applied(Some(result)),
        None => ApplicationResult::Failed(format!("could not locate old_text {old:?} in section text")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uscode_core::EnactedLawRef;

    fn law_change(change_type: ChangeType, old_text: Option<&str>, new_text: Option<&str>) -> LawChange {
        LawChange {
            change_id: 1,
            law: EnactedLawRef {
                congress: 113,
                law_number: 1,
            },
            title_number: 1,
            section_number: "101".into(),
            change_type,
            old_text: old_text.map(String::from),
            new_text: new_text.map(String::from),
            effective_date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
            description: None,
            subsection_path: None,
            position_hint: None,
        }
    }

    #[test]
    fn modify_exact_substring() {
        let op = law_change(ChangeType::Modify { needs_review: false }, Some("5 percent"), Some("10 percent"));
        let result = apply(Some("The rate shall be 5 percent."), &op);
        assert_eq!(result, ApplicationResult::Applied(Some("The rate shall be 10 percent.".to_string())));
    }

    #[test]
    fn modify_whitespace_normalized() {
        let op = law_change(
            ChangeType::Modify { needs_review: false },
            Some("5    percent"),
            Some("10 percent"),
        );
        let result = apply(Some("The rate shall be 5 percent."), &op);
        assert_eq!(result, ApplicationResult::Applied(Some("The rate shall be 10 percent.".to_string())));
    }

    #[test]
    fn modify_case_insensitive_whitespace_normalized() {
        let op = law_change(ChangeType::Modify { needs_review: false }, Some("FIVE PERCENT"), Some("ten percent"));
        let result = apply(Some("The rate shall be five percent."), &op);
        assert_eq!(result, ApplicationResult::Applied(Some("The rate shall be ten percent.".to_string())));
    }

    #[test]
    fn modify_not_found_fails() {
        let op = law_change(ChangeType::Modify { needs_review: false }, Some("nonexistent"), Some("x"));
        let result = apply(Some("The rate shall be 5 percent."), &op);
        assert!(matches!(result, ApplicationResult::Failed(_)));
    }

    #[test]
    fn delete_is_modify_with_empty_replacement() {
        let op = law_change(ChangeType::Delete, Some(" 5 percent"), None);
        let result = apply(Some("The rate shall be 5 percent."), &op);
        assert_eq!(result, ApplicationResult::Applied(Some("The rate shall be.".to_string())));
    }

    #[test]
    fn add_appends_when_text_exists() {
        let op = law_change(ChangeType::Add, None, Some("A new sentence."));
        let result = apply(Some("Existing text."), &op);
        assert_eq!(result, ApplicationResult::Applied(Some("Existing text.\nA new sentence.".to_string())));
    }

    #[test]
    fn add_sets_when_text_is_none() {
        let op = law_change(ChangeType::Add, None, Some("First sentence."));
        let result = apply(None, &op);
        assert_eq!(result, ApplicationResult::Applied(Some("First sentence.".to_string())));
    }

    #[test]
    fn repeal_returns_applied_none() {
        let op = law_change(ChangeType::Repeal, None, None);
        assert_eq!(apply(Some("text"), &op), ApplicationResult::Applied(None));
    }

    #[test]
    fn redesignate_is_skipped() {
        let op = law_change(ChangeType::Redesignate, None, None);
        assert_eq!(apply(Some("text"), &op), ApplicationResult::Skipped);
    }

    #[test]
    fn transfer_is_skipped() {
        let op = law_change(ChangeType::Transfer, None, None);
        assert_eq!(apply(Some("text"), &op), ApplicationResult::Skipped);
    }
}
