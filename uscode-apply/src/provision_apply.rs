//! C6: provision-tree patching (spec.md §4.6 "Provision-tree patching").
//!
//! Runs in parallel with [`crate::text_apply`]: the same `LawChange`
//! operations are replayed over `normalized_provisions` so that structural
//! instructions the plain-text applicator cannot locate (splicing out a
//! named range of subsections, renumbering after a redesignation) still
//! leave the section's structured form consistent. When a structural
//! operation succeeds here but not in plain text, C7 rebuilds `text_content`
//! from the patched provisions (`provisions_to_text`).

use crate::matching;
use regex::Regex;
use std::sync::OnceLock;
use uscode_core::{ChangeType, LawChange, ProvisionLine};

const ORDINALS: &[&str] = &[
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

fn marker_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(([0-9A-Za-z]+)\)").unwrap())
}

fn striking_range_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)striking (?:subsections?|paragraphs?|subparagraphs?|clauses?) ([0-9A-Za-z()\s,]+?) and inserting the following")
            .unwrap()
    })
}

fn redesignation_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)designating the ([a-z,\s]+?) (?:sentences?|subsections?|paragraphs?) as ([0-9A-Za-z()\s,]+)").unwrap()
    })
}

/// Applies `ops` in order to `parent_provisions`, returning the patched
/// provision list.
pub fn patch_provisions(parent_provisions: &[ProvisionLine], ops: &[LawChange]) -> Vec<ProvisionLine> {
    let mut current = parent_provisions.to_vec();
    for op in ops {
        current = match &op.change_type {
            ChangeType::Repeal => return Vec::new(),
            ChangeType::Modify { .. } | ChangeType::Delete => patch_textual(&current, op),
            ChangeType::Add => patch_add(&current, op),
            ChangeType::Redesignate => patch_redesignate(&current, op),
            ChangeType::Transfer | ChangeType::AddNote => current,
        };
    }
    current
}

/// Tries a direct content replacement within each line first; if `old_text`
/// cannot be located in any single line, falls back to a structural splice
/// parsed from the operation's description.
fn patch_textual(provisions: &[ProvisionLine], op: &LawChange) -> Vec<ProvisionLine> {
    let old = op.old_text.as_deref().unwrap_or("");
    let new = op.new_text.as_deref().unwrap_or("");

    if !old.is_empty() {
        let mut patched = provisions.to_vec();
        for line in &mut patched {
            if let Some(replaced) = matching::find_and_replace(&line.content, old, new) {
                line.content = replaced;
                return patched;
            }
        }
    }

    if let Some(description) = &op.description {
        if let Some(spliced) = splice_by_description(provisions, description, new) {
            return spliced;
        }
    }

    provisions.to_vec()
}

/// Parses "striking subsections (a) and (b) ... and inserting the
/// following" out of `description`, removes the named markers, and splices
/// in lines derived from `new_text` at that position.
fn splice_by_description(provisions: &[ProvisionLine], description: &str, new_text: &str) -> Option<Vec<ProvisionLine>> {
    let caps = striking_range_pattern().captures(description)?;
    let marker_list = caps.get(1)?.as_str();
    let markers: Vec<String> = marker_pattern()
        .captures_iter(marker_list)
        .map(|c| format!("({})", &c[1]))
        .collect();
    if markers.is_empty() {
        return None;
    }

    let first_index = provisions.iter().position(|l| markers.contains(&l.marker))?;
    let depth = provisions[first_index].depth;

    let mut out: Vec<ProvisionLine> = provisions[..first_index].to_vec();
    out.extend(lines_from_new_text(new_text, depth));
    out.extend(provisions[first_index..].iter().filter(|l| !markers.contains(&l.marker)).cloned());
    Some(out)
}

/// Splits `new_text` into provision lines, extracting a leading `(x)`
/// marker from each resulting line where present; indent is always reset to
/// `depth` (spec.md §4.6: "indent set to 0").
fn lines_from_new_text(new_text: &str, depth: u32) -> Vec<ProvisionLine> {
    new_text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let trimmed = line.trim();
            if let Some(caps) = marker_pattern().captures(trimmed) {
                if trimmed.starts_with(caps.get(0).unwrap().as_str()) {
                    let marker = caps.get(0).unwrap().as_str().to_string();
                    let content = trimmed[caps.get(0).unwrap().end()..].trim_start().to_string();
                    return ProvisionLine::new(marker, depth, false, content);
                }
            }
            ProvisionLine::body(depth, trimmed.to_string())
        })
        .collect()
}

/// Appends a new line built from `new_text`, at the end unless the
/// operation targets a specific `subsection_path` (not separately handled
/// here; spec.md §9 Open Question (b) — position qualifiers are parsed but
/// not specially honored).
fn patch_add(provisions: &[ProvisionLine], op: &LawChange) -> Vec<ProvisionLine> {
    let new_text = op.new_text.as_deref().unwrap_or("");
    let depth = provisions.last().map(|l| l.depth).unwrap_or(1);
    let mut out = provisions.to_vec();
    out.extend(lines_from_new_text(new_text, depth));
    out
}

/// Parses "designating the first, second, and third sentences as
/// subsections (a), (c), and (d)" into an ordinal→marker map and applies it
/// to the corresponding provision lines (matched by position among the
/// currently unmarked/body lines, in order).
fn patch_redesignate(provisions: &[ProvisionLine], op: &LawChange) -> Vec<ProvisionLine> {
    let description = match &op.description {
        Some(d) => d,
        None => return provisions.to_vec(),
    };
    let caps = match redesignation_pattern().captures(description) {
        Some(c) => c,
        None => return provisions.to_vec(),
    };
    let ordinal_list = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let marker_list = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let ordinal_positions: Vec<usize> = ORDINALS
        .iter()
        .enumerate()
        .filter(|(_, word)| ordinal_list.to_lowercase().contains(*word))
        .map(|(i, _)| i)
        .collect();
    let new_markers: Vec<String> = marker_pattern()
        .captures_iter(marker_list)
        .map(|c| format!("({})", &c[1]))
        .collect();

    let unmarked_indices: Vec<usize> = provisions.iter().enumerate().filter(|(_, l)| l.marker.is_empty()).map(|(i, _)| i).collect();

    let mut out = provisions.to_vec();
    for (ordinal_index, new_marker) in ordinal_positions.iter().zip(new_markers.iter()) {
        if let Some(&line_index) = unmarked_indices.get(*ordinal_index) {
            out[line_index].marker = new_marker.clone();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uscode_core::EnactedLawRef;

    fn op(change_type: ChangeType, old: Option<&str>, new: Option<&str>, description: Option<&str>) -> LawChange {
        LawChange {
            change_id: 1,
            law: EnactedLawRef {
                congress: 113,
                law_number: 1,
            },
            title_number: 1,
            section_number: "101".into(),
            change_type,
            old_text: old.map(String::from),
            new_text: new.map(String::from),
            effective_date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
            description: description.map(String::from),
            subsection_path: None,
            position_hint: None,
        }
    }

    fn lines() -> Vec<ProvisionLine> {
        vec![
            ProvisionLine::new("(a)", 1, false, "In general."),
            ProvisionLine::new("(b)", 1, false, "Exceptions."),
            ProvisionLine::new("(c)", 1, false, "Penalties."),
        ]
    }

    #[test]
    fn direct_content_replacement_in_one_line() {
        let ops = vec![op(ChangeType::Modify { needs_review: false }, Some("Exceptions."), Some("Waivers."), None)];
        let patched = patch_provisions(&lines(), &ops);
        assert_eq!(patched[1].content, "Waivers.");
    }

    #[test]
    fn structural_splice_replaces_named_range() {
        let ops = vec![op(
            ChangeType::Modify { needs_review: false },
            None,
            Some("(b) Revised exceptions."),
            Some("by striking subsections (a) and (b) and inserting the following:"),
        )];
        let patched = patch_provisions(&lines(), &ops);
        assert_eq!(patched.len(), 2);
        assert_eq!(patched[0].marker, "(b)");
        assert_eq!(patched[0].content, "Revised exceptions.");
        assert_eq!(patched[1].marker, "(c)");
    }

    #[test]
    fn add_appends_a_line() {
        let ops = vec![op(ChangeType::Add, None, Some("(d) New penalty tier."), None)];
        let patched = patch_provisions(&lines(), &ops);
        assert_eq!(patched.len(), 4);
        assert_eq!(patched[3].marker, "(d)");
    }

    #[test]
    fn repeal_empties_provisions() {
        let ops = vec![op(ChangeType::Repeal, None, None, None)];
        let patched = patch_provisions(&lines(), &ops);
        assert!(patched.is_empty());
    }

    #[test]
    fn redesignate_renames_markers_by_ordinal_position_among_unmarked_lines() {
        let unmarked = vec![
            ProvisionLine::body(1, "First sentence."),
            ProvisionLine::body(1, "Second sentence."),
        ];
        let ops = vec![op(
            ChangeType::Redesignate,
            None,
            None,
            Some("by designating the first and second sentences as subsections (a) and (b)"),
        )];
        let patched = patch_provisions(&unmarked, &ops);
        assert_eq!(patched[0].marker, "(a)");
        assert_eq!(patched[1].marker, "(b)");
    }

    #[test]
    fn redesignate_skips_already_marked_lines_when_counting_ordinals() {
        let provisions = vec![
            ProvisionLine::new("(a)", 1, false, "Existing paragraph."),
            ProvisionLine::body(1, "First sentence."),
            ProvisionLine::body(1, "Second sentence."),
        ];
        let ops = vec![op(
            ChangeType::Redesignate,
            None,
            None,
            Some("by designating the first and second sentences as subsections (b) and (c)"),
        )];
        let patched = patch_provisions(&provisions, &ops);
        assert_eq!(patched[0].marker, "(a)", "pre-existing marker must be untouched");
        assert_eq!(patched[1].marker, "(b)");
        assert_eq!(patched[2].marker, "(c)");
    }
}
