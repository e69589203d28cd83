//! Plain-text fallback scanner (spec.md §4.2): used directly when enacted-law
//! XML is absent or malformed, and internally by the XML mode to turn each
//! instruction block's flattened text into candidates once section
//! references have been resolved from the surrounding markup.

use crate::actions::{detect_actions, extract_quoted_texts};
use crate::candidate::{AmendmentCandidate, SectionRef};
use regex::Regex;
use std::sync::OnceLock;

fn sentence_splitter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `regex` has no lookaround, so sentence boundaries are approximated by
    // a plain terminator-plus-whitespace split — good enough to scope
    // candidate context windows, not used for anything load-bearing.
    RE.get_or_init(|| Regex::new(r"[.;]\s+").unwrap())
}

const CONTEXT_RADIUS: usize = 80;

/// Scans `text` for amendment instructions, splitting on sentence
/// boundaries so each candidate's `context` stays tightly scoped. No
/// section references are resolved from plain text alone (unlike the XML
/// mode, which can recover them from `<ref href="...">` markup); callers of
/// the plain-text fallback get `section_refs: []` on every candidate,
/// pushing classification to the lower `needs_review`/confidence bucket.
pub fn scan_plain_text(text: &str) -> Vec<AmendmentCandidate> {
    let mut candidates = Vec::new();
    let mut offset = 0usize;
    for sentence in sentence_splitter().split(text) {
        let actions = detect_actions(sentence);
        if !actions.is_empty() {
            let quoted_texts = extract_quoted_texts(sentence);
            let context = context_window(text, offset, sentence.len());
            candidates.push(AmendmentCandidate {
                actions,
                quoted_texts,
                section_refs: Vec::new(),
                context,
                char_offset: offset,
            });
        }
        offset += sentence.len() + 1;
    }
    candidates
}

/// Builds one candidate from a pre-isolated instruction block (used by the
/// XML mode, which has already scoped `block_text` to one amending
/// instruction and resolved `section_refs` from the block's `<ref>`
/// elements).
pub fn candidate_from_block(
    block_text: &str,
    section_refs: Vec<SectionRef>,
    char_offset: usize,
) -> Option<AmendmentCandidate> {
    let actions = detect_actions(block_text);
    let quoted_texts = extract_quoted_texts(block_text);
    if actions.is_empty() && quoted_texts.is_empty() && section_refs.is_empty() {
        return None;
    }
    Some(AmendmentCandidate {
        actions,
        quoted_texts,
        section_refs,
        context: block_text.to_string(),
        char_offset,
    })
}

fn context_window(text: &str, offset: usize, len: usize) -> String {
    let start = offset.saturating_sub(CONTEXT_RADIUS);
    let end = (offset + len + CONTEXT_RADIUS).min(text.len());
    text.get(start..end).unwrap_or(text).to_string()
}
