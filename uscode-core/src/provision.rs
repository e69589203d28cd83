use serde::{Deserialize, Serialize};

/// One line of a section's structured provision tree.
///
/// `normalized_provisions` (spec.md §3) is an ordered sequence of these;
/// `marker` carries the leading designator such as `"(a)"`, `"(1)"`,
/// `"(A)"` (empty for a bare heading line), `depth` is the indentation level
/// implied by `<subsection>/<paragraph>/<subparagraph>/<clause>/<subclause>`
/// nesting, and `is_header` distinguishes a heading line from a body line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionLine {
    pub marker: String,
    pub depth: u32,
    pub is_header: bool,
    pub content: String,
}

impl ProvisionLine {
    pub fn new(marker: impl Into<String>, depth: u32, is_header: bool, content: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            depth,
            is_header,
            content: content.into(),
        }
    }

    pub fn body(depth: u32, content: impl Into<String>) -> Self {
        Self::new(String::new(), depth, false, content)
    }
}

/// Concatenates provision line contents with newlines, per spec.md §4.6
/// ("C7 rebuilds `text_content` by concatenating provision contents with
/// newlines") and the round-trip law P8.
pub fn provisions_to_text(lines: &[ProvisionLine]) -> String {
    lines
        .iter()
        .map(|l| l.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Category of one entry in a section's structured notes (§4.7.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteCategory {
    Amendment,
    Statutory,
}

/// Relationship a citation entry carries to the amended section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationRelationship {
    Amendment,
}

/// One structured note entry: an amendment record or a freestanding
/// statutory note (from an `AddNote` operation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub category: NoteCategory,
    pub year: i32,
    pub law: crate::EnactedLawRef,
    pub relationship: CitationRelationship,
    pub description: String,
}

/// Structured analogue of the plain-text `notes` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedNotes {
    pub entries: Vec<NoteEntry>,
}

impl NormalizedNotes {
    pub fn push_amendment(&mut self, year: i32, law: crate::EnactedLawRef, description: impl Into<String>) {
        self.entries.push(NoteEntry {
            category: NoteCategory::Amendment,
            year,
            law,
            relationship: CitationRelationship::Amendment,
            description: description.into(),
        });
    }

    pub fn push_statutory(&mut self, year: i32, law: crate::EnactedLawRef, text: impl Into<String>) {
        self.entries.push(NoteEntry {
            category: NoteCategory::Statutory,
            year,
            law,
            relationship: CitationRelationship::Amendment,
            description: text.into(),
        });
    }

    /// Renders the plain-text `notes` line added by an amendment, per
    /// spec.md §4.7.1: `"<year>—Pub. L. <congress>-<law_number> <description>\n"`.
    pub fn render_line(entry: &NoteEntry) -> String {
        format!("{}—{} {}\n", entry.year, entry.law, entry.description)
    }
}
