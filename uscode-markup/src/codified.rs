//! C2 codified-text mode: parses one title's authoritative legal-markup XML
//! into an ordered list of sections plus the surrounding structural-group
//! tree (spec.md §4.2 point 1).

use crate::error::ParseError;
use crate::xmldom::{parse_xml, XmlNode};
use uscode_core::{full_citation, NormalizedNotes, ProvisionLine};

const PROVISION_TAGS: &[(&str, u32)] = &[
    ("subsection", 1),
    ("paragraph", 2),
    ("subparagraph", 3),
    ("clause", 4),
    ("subclause", 5),
];

const STRUCTURAL_TAGS: &[&str] = &[
    "title", "subtitle", "chapter", "subchapter", "part", "subpart",
];

/// One parsed section of codified text.
#[derive(Debug, Clone)]
pub struct ParsedSection {
    pub section_number: String,
    pub heading: String,
    pub text_content: String,
    pub normalized_provisions: Vec<ProvisionLine>,
    pub notes: String,
    pub normalized_notes: NormalizedNotes,
    pub full_citation: String,
}

/// A node of the navigation tree (title → chapter → subchapter → …). Not
/// relied on for correctness — spec.md §4.2: "the core does not rely on
/// group structure for correctness."
#[derive(Debug, Clone)]
pub struct StructuralGroup {
    pub label: String,
    pub identifier: String,
    pub heading: String,
    pub children: Vec<StructuralGroup>,
}

#[derive(Debug, Clone)]
pub struct ParsedTitle {
    pub title_number: u32,
    pub sections: Vec<ParsedSection>,
    pub groups: Vec<StructuralGroup>,
}

/// Parses a title's XML in codified-text mode.
pub fn parse_codified_title(xml: &[u8]) -> Result<ParsedTitle, ParseError> {
    let root = parse_xml(xml)?;
    let title_number = resolve_title_number(&root).ok_or(ParseError::MissingTitle)?;

    let mut sections = Vec::new();
    collect_sections(&root, title_number, &mut sections);

    let groups = root
        .elements()
        .filter_map(|c| build_group(c))
        .collect();

    Ok(ParsedTitle {
        title_number,
        sections,
        groups,
    })
}

fn resolve_title_number(root: &XmlNode) -> Option<u32> {
    if root.tag == "title" {
        if let Some(n) = root.attrs.get("identifier").and_then(|id| parse_title_identifier(id)) {
            return Some(n);
        }
        if let Some(num) = root.child("num") {
            if let Some(n) = parse_title_identifier(&num.flatten_text()) {
                return Some(n);
            }
        }
    }
    root.elements().find_map(resolve_title_number)
}

fn parse_title_identifier(s: &str) -> Option<u32> {
    // accepts "/us/usc/t17" or "Title 17" or bare "17"
    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    let digits: String = digits.chars().rev().collect();
    if digits.is_empty() {
        s.trim().parse().ok()
    } else {
        digits.parse().ok()
    }
}

fn build_group(node: &XmlNode) -> Option<StructuralGroup> {
    if !STRUCTURAL_TAGS.contains(&node.tag.as_str()) {
        return None;
    }
    let identifier = node.attrs.get("identifier").cloned().unwrap_or_default();
    let heading = node.child("heading").map(|h| h.flatten_text()).unwrap_or_default();
    let children = node.elements().filter_map(build_group).collect();
    Some(StructuralGroup {
        label: node.tag.clone(),
        identifier,
        heading,
        children,
    })
}

fn collect_sections(node: &XmlNode, title_number: u32, out: &mut Vec<ParsedSection>) {
    if node.tag == "section" {
        out.push(parse_section(node, title_number));
        return;
    }
    for child in node.elements() {
        collect_sections(child, title_number, out);
    }
}

fn parse_section(node: &XmlNode, title_number: u32) -> ParsedSection {
    let section_number = node
        .child("num")
        .map(|n| n.flatten_text())
        .or_else(|| node.attrs.get("identifier").map(|id| section_suffix(id)))
        .unwrap_or_default();
    let heading = node.child("heading").map(|h| h.flatten_text()).unwrap_or_default();
    let notes = node.child("notes").map(|n| n.flatten_text()).unwrap_or_default();

    let mut provisions = Vec::new();
    collect_provisions(node, 0, &mut provisions);

    let text_content = uscode_core::provision::provisions_to_text(&provisions);

    ParsedSection {
        full_citation: full_citation(title_number, &section_number),
        section_number,
        heading,
        text_content,
        normalized_provisions: provisions,
        notes,
        normalized_notes: NormalizedNotes::default(),
    }
}

fn section_suffix(identifier: &str) -> String {
    identifier
        .rsplit('/')
        .next()
        .map(|s| s.trim_start_matches('s').to_string())
        .unwrap_or_default()
}

fn collect_provisions(node: &XmlNode, depth: u32, out: &mut Vec<ProvisionLine>) {
    let marker = node.child("num").map(|n| n.flatten_text()).unwrap_or_default();

    if let Some(heading) = node.child("heading") {
        if depth > 0 {
            out.push(ProvisionLine::new(marker.clone(), depth, true, heading.flatten_text()));
        }
    }

    let own_text = direct_prose(node);
    if !own_text.trim().is_empty() {
        out.push(ProvisionLine::new(marker, depth, false, own_text));
    }

    for child in node.elements() {
        if let Some((_, child_depth)) = PROVISION_TAGS.iter().find(|(tag, _)| *tag == child.tag) {
            collect_provisions(child, *child_depth, out);
        }
    }
}

/// Text belonging directly to this provision node: its own direct text
/// children plus any non-metadata inline element (e.g. a `<text>` wrapper),
/// but not text that belongs to a nested provision (subsection/paragraph/...).
fn direct_prose(node: &XmlNode) -> String {
    use crate::xmldom::XmlChild;
    let mut out = String::new();
    for child in &node.children {
        match child {
            XmlChild::Text(t) => {
                out.push_str(t);
                out.push(' ');
            }
            XmlChild::Element(e) => {
                let is_nested_provision = PROVISION_TAGS.iter().any(|(tag, _)| *tag == e.tag);
                let is_metadata = matches!(e.tag.as_str(), "num" | "heading" | "notes");
                if !is_nested_provision && !is_metadata {
                    out.push_str(&e.flatten_text());
                    out.push(' ');
                }
            }
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
