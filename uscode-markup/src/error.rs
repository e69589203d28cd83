use thiserror::Error;

/// Errors from C2 (spec.md §4.2 "Fails with").
#[derive(Debug, Error, Clone)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("codified-text input has no resolvable title number")]
    MissingTitle,
}

/// Errors from C3 classification. The classifier is total over its input
/// shape (spec.md §4.3's cascade always terminates in the general `Modify`
/// row), so this is reserved for candidates that are structurally empty.
#[derive(Debug, Error, Clone)]
pub enum ClassifyError {
    #[error("candidate has no action tags and no quoted text; not actionable")]
    NotActionable,
}

/// Errors from the external fetcher collaborators (spec.md §7 FetchError).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network or transport error fetching {resource}: {source}")]
    Transport {
        resource: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("cache I/O error for {path}: {source}")]
    Cache {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected response status {status} fetching {resource}")]
    BadStatus { resource: String, status: u16 },
}
