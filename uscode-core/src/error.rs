use thiserror::Error;

/// Errors raised by core invariant checks (hash/content agreement, tombstone
/// shape). See spec invariants R3 and R4.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("text_hash does not match sha256(text_content)")]
    HashMismatch,

    #[error("a deleted snapshot must have text_content = None and text_hash = None")]
    TombstoneHasContent,

    #[error("a live snapshot must have text_content = Some(..)")]
    LiveSnapshotMissingContent,
}

pub type CoreResult<T> = Result<T, CoreError>;
