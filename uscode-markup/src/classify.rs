//! C3: amendment classifier. Pure function: candidate → `LawChange` (or
//! `None` if the candidate is not actionable), per spec.md §4.3.

use crate::actions::ActionTag;
use crate::candidate::AmendmentCandidate;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use uscode_core::{ChangeType, EnactedLawRef, LawChange};

/// The classifier's full output: the `LawChange` plus the confidence score
/// described in spec.md §4.3. `LawChange` itself does not carry a
/// `confidence` field (it is not part of the persisted data model in
/// spec.md §3), so callers that want it keep this wrapper around.
#[derive(Debug, Clone)]
pub struct Classification {
    pub law_change: LawChange,
    pub confidence: f64,
}

/// Classifies one candidate. Returns `None` when the candidate resolves no
/// section reference at all — without a `(title, section)` key there is no
/// valid `LawChange` to construct (spec.md §3's `LawChange` requires both).
/// `default_title` supplies the title number when a candidate's reference
/// omitted it (a bare `/usc/s106`-style href inheriting the enclosing law's
/// title context).
pub fn classify(
    candidate: &AmendmentCandidate,
    law: EnactedLawRef,
    change_id: u64,
    effective_date: NaiveDate,
    default_title: Option<u32>,
) -> Option<Classification> {
    let section_ref = candidate.section_refs.first()?;
    let title_number = section_ref.title.or(default_title)?;

    let specific = strip_wrapper_amend(&candidate.actions);

    let (change_type, old_text, new_text) = classify_action_set(&specific, &candidate.quoted_texts);

    let has_ref = !candidate.section_refs.is_empty();
    let has_quote = !candidate.quoted_texts.is_empty();
    let confidence = if has_ref && has_quote {
        0.98
    } else if has_ref || has_quote {
        0.95
    } else {
        0.90
    };

    let law_change = LawChange {
        change_id,
        law,
        title_number,
        section_number: section_ref.section.clone(),
        change_type,
        old_text,
        new_text,
        effective_date,
        description: Some(candidate.context.clone()),
        subsection_path: section_ref.subsection_path.clone(),
        position_hint: None,
    };

    Some(Classification {
        law_change,
        confidence,
    })
}

/// Strips the `amend` wrapper tag when a more specific action is also
/// present, per spec.md §4.3 ("the wrapper tag `amend` is stripped when
/// specific sub-actions exist").
fn strip_wrapper_amend(actions: &BTreeSet<ActionTag>) -> BTreeSet<ActionTag> {
    if actions.len() > 1 && actions.contains(&ActionTag::Amend) {
        actions.iter().copied().filter(|a| *a != ActionTag::Amend).collect()
    } else {
        actions.clone()
    }
}

fn set_of(tags: &[ActionTag]) -> BTreeSet<ActionTag> {
    tags.iter().copied().collect()
}

/// The first-match cascade of spec.md §4.3's table, applied in order.
fn classify_action_set(
    specific: &BTreeSet<ActionTag>,
    quoted: &[String],
) -> (ChangeType, Option<String>, Option<String>) {
    if *specific == set_of(&[ActionTag::Delete, ActionTag::Insert]) {
        return (
            ChangeType::Modify { needs_review: false },
            quoted.first().cloned(),
            quoted.get(1).cloned(),
        );
    }
    if *specific == set_of(&[ActionTag::Substitute]) {
        return if quoted.len() >= 2 {
            (
                ChangeType::Modify { needs_review: false },
                quoted.first().cloned(),
                quoted.get(1).cloned(),
            )
        } else {
            (ChangeType::Modify { needs_review: false }, None, quoted.first().cloned())
        };
    }
    if *specific == set_of(&[ActionTag::Delete]) {
        return (ChangeType::Delete, quoted.first().cloned(), None);
    }
    if *specific == set_of(&[ActionTag::Insert]) {
        return (ChangeType::Add, None, quoted.first().cloned());
    }
    if specific.contains(&ActionTag::Add) || specific.contains(&ActionTag::Enact) {
        return (ChangeType::Add, None, quoted.first().cloned());
    }
    if specific.contains(&ActionTag::Repeal) || specific.contains(&ActionTag::RepealAndReserve) {
        return (ChangeType::Repeal, None, None);
    }
    if specific.contains(&ActionTag::Redesignate) {
        return (ChangeType::Redesignate, None, None);
    }
    (ChangeType::Modify { needs_review: true }, None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::SectionRef;

    fn law() -> EnactedLawRef {
        EnactedLawRef {
            congress: 113,
            law_number: 100,
        }
    }

    fn candidate(actions: &[ActionTag], quoted: Vec<&str>, has_ref: bool) -> AmendmentCandidate {
        AmendmentCandidate {
            actions: actions.iter().copied().collect(),
            quoted_texts: quoted.into_iter().map(String::from).collect(),
            section_refs: if has_ref {
                vec![SectionRef {
                    title: Some(1),
                    section: "101".into(),
                    subsection_path: None,
                }]
            } else {
                vec![]
            },
            context: "context".into(),
            char_offset: 0,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()
    }

    #[test]
    fn strike_and_insert_is_modify() {
        let c = candidate(&[ActionTag::Amend, ActionTag::Delete, ActionTag::Insert], vec!["old", "new"], true);
        let out = classify(&c, law(), 1, date(), None).unwrap();
        assert!(matches!(out.law_change.change_type, ChangeType::Modify { needs_review: false }));
        assert_eq!(out.law_change.old_text.as_deref(), Some("old"));
        assert_eq!(out.law_change.new_text.as_deref(), Some("new"));
        assert_eq!(out.confidence, 0.98);
    }

    #[test]
    fn delete_only_is_delete() {
        let c = candidate(&[ActionTag::Delete], vec!["old"], true);
        let out = classify(&c, law(), 1, date(), None).unwrap();
        assert!(matches!(out.law_change.change_type, ChangeType::Delete));
        assert_eq!(out.law_change.old_text.as_deref(), Some("old"));
    }

    #[test]
    fn repeal_has_no_text() {
        let c = candidate(&[ActionTag::Repeal], vec![], true);
        let out = classify(&c, law(), 1, date(), None).unwrap();
        assert!(matches!(out.law_change.change_type, ChangeType::Repeal));
        assert!(out.law_change.old_text.is_none());
        assert!(out.law_change.new_text.is_none());
    }

    #[test]
    fn bare_amend_is_general_modify_needs_review() {
        let c = candidate(&[ActionTag::Amend], vec![], true);
        let out = classify(&c, law(), 1, date(), None).unwrap();
        assert!(matches!(out.law_change.change_type, ChangeType::Modify { needs_review: true }));
    }

    #[test]
    fn no_section_ref_is_not_actionable() {
        let c = candidate(&[ActionTag::Delete, ActionTag::Insert], vec!["old", "new"], false);
        assert!(classify(&c, law(), 1, date(), None).is_none());
    }

    #[test]
    fn default_title_fills_in_missing_title() {
        let mut c = candidate(&[ActionTag::Repeal], vec![], true);
        c.section_refs[0].title = None;
        let out = classify(&c, law(), 1, date(), Some(42)).unwrap();
        assert_eq!(out.law_change.title_number, 42);
    }
}
