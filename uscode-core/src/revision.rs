use crate::ids::{EnactedLawRef, ReleasePointTag, RevisionId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GroundTruth` or `Derived`, per spec.md §3. Redundant with
/// [`Revision::is_ground_truth`] but kept as a distinct, matched-on field —
/// the store indexes on the boolean, call sites match on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevisionVariant {
    GroundTruth,
    Derived,
}

/// Lifecycle status of a revision (spec.md §3 "Lifecycle").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevisionStatus {
    Pending,
    Ingesting,
    Ingested,
    Failed,
}

/// A node in the append-only revision graph (C5).
///
/// Invariants enforced by callers (the store, not this type, since
/// enforcement requires knowledge of sibling revisions):
/// - (R1) `parent_revision.is_some()` for every `Derived` revision.
/// - (R2) `sequence_number` strictly increases along any parent chain.
/// - Exactly one revision has `sequence_number == 0` and no parent (the
///   bootstrap).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub id: RevisionId,
    pub variant: RevisionVariant,
    pub sequence_number: u64,
    pub parent_revision: Option<RevisionId>,
    pub effective_date: NaiveDate,
    pub status: RevisionStatus,
    pub summary: String,
    pub release_point_ref: Option<ReleasePointTag>,
    pub law_ref: Option<EnactedLawRef>,
}

impl Revision {
    pub fn is_ground_truth(&self) -> bool {
        matches!(self.variant, RevisionVariant::GroundTruth)
    }

    /// Builds the bootstrap revision: `sequence_number = 0`, no parent.
    pub fn bootstrap(effective_date: NaiveDate, summary: impl Into<String>) -> Self {
        Self {
            id: RevisionId::new(),
            variant: RevisionVariant::GroundTruth,
            sequence_number: 0,
            parent_revision: None,
            effective_date,
            status: RevisionStatus::Pending,
            summary: summary.into(),
            release_point_ref: None,
            law_ref: None,
        }
    }

    pub fn new_ground_truth(
        sequence_number: u64,
        parent: RevisionId,
        effective_date: NaiveDate,
        tag: ReleasePointTag,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: RevisionId::new(),
            variant: RevisionVariant::GroundTruth,
            sequence_number,
            parent_revision: Some(parent),
            effective_date,
            status: RevisionStatus::Pending,
            summary: summary.into(),
            release_point_ref: Some(tag),
            law_ref: None,
        }
    }

    pub fn new_derived(
        sequence_number: u64,
        parent: RevisionId,
        effective_date: NaiveDate,
        law: EnactedLawRef,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: RevisionId::new(),
            variant: RevisionVariant::Derived,
            sequence_number,
            parent_revision: Some(parent),
            effective_date,
            status: RevisionStatus::Pending,
            summary: summary.into(),
            release_point_ref: None,
            law_ref: Some(law),
        }
    }
}
