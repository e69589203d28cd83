use thiserror::Error;
use uscode_core::{ReleasePointTag, RevisionId};

/// Errors from the pipeline crate. Most of the taxonomy in spec.md §7
/// (FetchError, ParseError, ApplyError, DivergenceWarning) is policy the
/// caller absorbs — logged and counted, never propagated as an `Err` here.
/// What remains `Err`-worthy is the §7 "Fatal" kind: invariant violations the
/// store itself refuses, and idempotency/parent-lookup failures a caller
/// made by constructing a malformed request.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("store error: {0}")]
    Store(#[from] uscode_store::StoreError),

    #[error("parent revision {0} is not Ingested")]
    ParentNotIngested(RevisionId),

    #[error("revision {0} has no underlying release point or law reference")]
    RevisionNotAnchored(RevisionId),

    #[error("fetch error: {0}")]
    Fetch(#[from] uscode_markup::FetchError),

    #[error("no head revision: the graph has not been bootstrapped")]
    NoHead,

    #[error("release point {0} is not a known ground-truth revision")]
    UnknownReleasePoint(ReleasePointTag),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
