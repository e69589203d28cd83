//! C2 enacted-law mode: parses one enacted law's XML into candidate
//! amendment instructions (spec.md §4.2 point 2).
//!
//! Enacted-law markup does not carry a single authoritative "amending
//! instruction" element name across Congresses, so this walks the document
//! block by block (each direct structural child of the body — a `section`,
//! `subsection`, or `paragraph` of the *bill*, not of the Code) and, within
//! each block, combines two signals the markup does give reliably: `<ref
//! href="...">` elements pointing at `/us/usc/...` targets, and the block's
//! flattened prose (scanned the same way as the plain-text fallback).

use crate::candidate::{AmendmentCandidate, SectionRef};
use crate::error::ParseError;
use crate::plaintext::candidate_from_block;
use crate::xmldom::{parse_xml, XmlNode};

const BLOCK_TAGS: &[&str] = &["section", "subsection", "paragraph", "subparagraph", "clause"];

/// Parses one enacted law's XML into a list of candidate amendment
/// instructions, in document order.
pub fn parse_enacted_law_xml(xml: &[u8]) -> Result<Vec<AmendmentCandidate>, ParseError> {
    let root = parse_xml(xml)?;
    let mut candidates = Vec::new();
    let mut offset = 0usize;
    walk_blocks(&root, &mut candidates, &mut offset);
    Ok(candidates)
}

fn walk_blocks(node: &XmlNode, out: &mut Vec<AmendmentCandidate>, offset: &mut usize) {
    if BLOCK_TAGS.contains(&node.tag.as_str()) && has_own_prose(node) {
        let text = node.flatten_text();
        let refs = collect_refs(node);
        if let Some(candidate) = candidate_from_block(&text, refs, *offset) {
            out.push(candidate);
        }
        *offset += text.len();
        return;
    }
    for child in node.elements() {
        walk_blocks(child, out, offset);
    }
}

/// A block "has its own prose" if it carries direct text content rather
/// than being a pure container of further nested blocks — avoids emitting
/// one candidate for an outer `<section>` and a duplicate for each nested
/// `<subsection>` it contains.
fn has_own_prose(node: &XmlNode) -> bool {
    if node.elements().any(|c| BLOCK_TAGS.contains(&c.tag.as_str())) {
        return false;
    }
    !node.flatten_text().trim().is_empty()
}

fn collect_refs(node: &XmlNode) -> Vec<SectionRef> {
    let mut refs = Vec::new();
    collect_refs_rec(node, &mut refs);
    refs
}

fn collect_refs_rec(node: &XmlNode, out: &mut Vec<SectionRef>) {
    if let Some(href) = node.attrs.get("href") {
        if let Some(r) = SectionRef::parse_href(href) {
            out.push(r);
        }
    }
    for child in node.elements() {
        collect_refs_rec(child, out);
    }
}
