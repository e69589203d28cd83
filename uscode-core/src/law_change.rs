use crate::EnactedLawRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A position qualifier parsed from amendment prose ("at the end", "each
/// place such term appears"). Parsed but, per spec.md §9 Open Question (b),
/// not specially honored by the applicator — `Modify` always does a
/// first-occurrence replacement regardless of this hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionHint {
    AtTheEnd,
    EveryOccurrence,
}

/// The closed set of amendment operation variants (spec.md §3, §9: "model
/// LawChange as a single record plus a tagged variant ... and exhaustively
/// match on it in C6 and C7").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    Modify { needs_review: bool },
    Delete,
    Add,
    Repeal,
    Redesignate,
    Transfer,
    AddNote,
}

impl ChangeType {
    pub fn is_structural(&self) -> bool {
        matches!(self, ChangeType::Redesignate | ChangeType::Transfer)
    }
}

/// One amendment operation scoped to one section, produced by the
/// classifier (C3) and consumed by the revision builder (C7).
///
/// `change_id` gives operations within one section a stable total order;
/// C7 folds a section's operations in `change_id` order (spec.md §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawChange {
    pub change_id: u64,
    pub law: EnactedLawRef,
    pub title_number: u32,
    pub section_number: String,
    pub change_type: ChangeType,
    pub old_text: Option<String>,
    pub new_text: Option<String>,
    pub effective_date: NaiveDate,
    pub description: Option<String>,
    pub subsection_path: Option<String>,
    pub position_hint: Option<PositionHint>,
}

impl LawChange {
    pub fn section_key(&self) -> (u32, String) {
        (self.title_number, self.section_number.clone())
    }
}
