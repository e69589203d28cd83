use crate::error::{CoreError, CoreResult};
use crate::hashing::{sha256_hex, HashHex};
use crate::ids::{RevisionId, SnapshotId};
use crate::provision::{NormalizedNotes, ProvisionLine};
use serde::{Deserialize, Serialize};

/// The content of one section at one revision (spec.md §3), keyed by
/// `(revision, title_number, section_number)`.
///
/// Snapshots are written **only** for sections that changed at the owning
/// revision (except ground-truth ingests, which snapshot every section of
/// every processed title — spec.md §4.9). Unchanged sections are resolved
/// by walking parents (C4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSnapshot {
    pub id: SnapshotId,
    pub revision: RevisionId,
    pub title_number: u32,
    pub section_number: String,
    pub heading: String,
    pub text_content: Option<String>,
    pub normalized_provisions: Vec<ProvisionLine>,
    pub notes: String,
    pub normalized_notes: NormalizedNotes,
    pub text_hash: Option<HashHex>,
    pub notes_hash: HashHex,
    pub full_citation: String,
    pub is_deleted: bool,
}

impl SectionSnapshot {
    /// Builds a live snapshot, computing `text_hash`/`notes_hash` from the
    /// supplied content (invariant R3).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        revision: RevisionId,
        title_number: u32,
        section_number: impl Into<String>,
        heading: impl Into<String>,
        text_content: impl Into<String>,
        normalized_provisions: Vec<ProvisionLine>,
        notes: impl Into<String>,
        normalized_notes: NormalizedNotes,
        full_citation: impl Into<String>,
    ) -> Self {
        let text_content = text_content.into();
        let notes = notes.into();
        let text_hash = sha256_hex(&text_content);
        let notes_hash = sha256_hex(&notes);
        Self {
            id: SnapshotId::new(),
            revision,
            title_number,
            section_number: section_number.into(),
            heading: heading.into(),
            text_content: Some(text_content),
            normalized_provisions,
            notes,
            normalized_notes,
            text_hash: Some(text_hash),
            notes_hash,
            full_citation: full_citation.into(),
            is_deleted: false,
        }
    }

    /// Builds a tombstone snapshot: `text_content = None`, `text_hash =
    /// None`, `is_deleted = true` (invariant R4). `notes`/`notes_hash` are
    /// still populated, since a repeal still appends an amendment note.
    pub fn deleted(
        revision: RevisionId,
        title_number: u32,
        section_number: impl Into<String>,
        heading: impl Into<String>,
        notes: impl Into<String>,
        normalized_notes: NormalizedNotes,
        full_citation: impl Into<String>,
    ) -> Self {
        let notes = notes.into();
        let notes_hash = sha256_hex(&notes);
        Self {
            id: SnapshotId::new(),
            revision,
            title_number,
            section_number: section_number.into(),
            heading: heading.into(),
            text_content: None,
            normalized_provisions: Vec::new(),
            notes,
            normalized_notes,
            text_hash: None,
            notes_hash,
            full_citation: full_citation.into(),
            is_deleted: true,
        }
    }

    pub fn key(&self) -> (u32, String) {
        (self.title_number, self.section_number.clone())
    }

    /// Validates invariants R3 and R4 against the snapshot's current
    /// content. Used by tests and by the store before a write is accepted.
    pub fn check_invariants(&self) -> CoreResult<()> {
        if self.is_deleted {
            if self.text_content.is_some() || self.text_hash.is_some() {
                return Err(CoreError::TombstoneHasContent);
            }
        } else {
            match (&self.text_content, &self.text_hash) {
                (Some(text), Some(hash)) => {
                    if sha256_hex(text) != *hash {
                        return Err(CoreError::HashMismatch);
                    }
                }
                (None, _) => return Err(CoreError::LiveSnapshotMissingContent),
                (Some(_), None) => return Err(CoreError::HashMismatch),
            }
        }
        Ok(())
    }
}
