//! The closed set of action tags an amendment instruction may carry
//! (spec.md §4.2), and the regex-based detector shared by both the
//! enacted-law XML mode and the plain-text fallback mode.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionTag {
    Amend,
    Delete,
    Insert,
    Repeal,
    Substitute,
    Redesignate,
    Add,
    Enact,
    RepealAndReserve,
    NoChange,
    Conform,
}

struct ActionPattern {
    tag: ActionTag,
    regex: Regex,
}

fn patterns() -> &'static Vec<ActionPattern> {
    static PATTERNS: OnceLock<Vec<ActionPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            ActionPattern {
                tag: ActionTag::RepealAndReserve,
                regex: Regex::new(r"(?i)repeal(?:ed|s)? and reserve").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Repeal,
                regex: Regex::new(r"(?i)\bis repealed\b|\brepealing\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Redesignate,
                regex: Regex::new(r"(?i)redesignat(?:e|ing|ed)").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Substitute,
                regex: Regex::new(r"(?i)substitut(?:e|ing|ed)").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Delete,
                regex: Regex::new(r"(?i)\bstrik(?:e|ing)\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Insert,
                regex: Regex::new(r"(?i)\binsert(?:ing)?\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Add,
                regex: Regex::new(r"(?i)\b(?:is amended )?by adding\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Enact,
                regex: Regex::new(r"(?i)\bis enacted\b|\bshall read as follows\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::NoChange,
                regex: Regex::new(r"(?i)\bno change\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Conform,
                regex: Regex::new(r"(?i)\bto conform\b").unwrap(),
            },
            ActionPattern {
                tag: ActionTag::Amend,
                regex: Regex::new(r"(?i)\bis amended\b").unwrap(),
            },
        ]
    })
}

/// Detects the set of action tags present in `text`.
pub fn detect_actions(text: &str) -> BTreeSet<ActionTag> {
    patterns()
        .iter()
        .filter(|p| p.regex.is_match(text))
        .map(|p| p.tag)
        .collect()
}

fn quote_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[\u{201C}\"]([^\u{201D}\"]*)[\u{201D}\"]").unwrap())
}

/// Extracts quoted texts from `text`, in document order, tolerating both
/// straight and curly quotation marks.
pub fn extract_quoted_texts(text: &str) -> Vec<String> {
    quote_pattern()
        .captures_iter(text)
        .map(|c| c.get(1).map(|m| m.as_str().to_string()).unwrap_or_default())
        .collect()
}
