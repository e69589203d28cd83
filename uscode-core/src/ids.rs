use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier for a [`crate::Revision`].
///
/// Wrapping `Uuid` (rather than exposing it directly) keeps every
/// cross-crate reference to a revision a plain, `Copy`, hashable value —
/// breaking the revision/law/note reference cycle noted in the design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RevisionId(pub Uuid);

impl RevisionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RevisionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier for a [`crate::SectionSnapshot`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque ground-truth release-point tag, `"<congress>-<primary_law>"`
/// (e.g. `"113-21"`), optionally carrying a deferred-laws suffix such as
/// `"118-47not60"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReleasePointTag(pub String);

impl ReleasePointTag {
    pub fn new(congress: u32, primary_law_number: u32) -> Self {
        Self(format!("{congress}-{primary_law_number}"))
    }
}

impl fmt::Display for ReleasePointTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to one enacted law, `(congress, law_number)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnactedLawRef {
    pub congress: u32,
    pub law_number: u32,
}

impl fmt::Display for EnactedLawRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pub. L. {}-{}", self.congress, self.law_number)
    }
}
