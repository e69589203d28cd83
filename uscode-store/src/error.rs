use thiserror::Error;
use uscode_core::RevisionId;

/// Errors from the revision graph (C5) and snapshot store (C4).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("revision {0} not found")]
    RevisionNotFound(RevisionId),

    #[error("revision {revision} is already Ingested for this law or release point")]
    AlreadyIngested { revision: RevisionId },

    #[error("duplicate snapshot at (revision {revision}, title {title}, section {section})")]
    DuplicateSnapshot {
        revision: RevisionId,
        title: u32,
        section: String,
    },

    #[error("bootstrap revision already exists")]
    BootstrapAlreadyExists,

    #[error("parent revision {0} not found")]
    ParentNotFound(RevisionId),

    #[error("core invariant violated: {0}")]
    Core(#[from] uscode_core::CoreError),

    #[error("persisted state I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("persisted state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
