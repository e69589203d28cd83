//! Orchestration layer: turns the raw collaborators (`uscode-markup`'s
//! fetchers/parser/classifier, `uscode-store`'s graph/snapshot store,
//! `uscode-apply`'s text/provision patcher, `uscode-diff`'s pairwise diff)
//! into the chronological reconstruction engine itself.
//!
//! - **C7** ([`revision_builder`]): folds one law's `LawChange`s into a
//!   derived revision.
//! - **C8** ([`timeline`]): merges release-point and enacted-law events.
//! - **C9** ([`ingestor`]): ingests one ground-truth release point.
//! - **C10** ([`playforward`]): the orchestrator driving C7/C9/C11 across
//!   the timeline.
//! - **C11** ([`checkpoint`]): validates a derived revision against the
//!   ground truth that follows it.
//!
//! [`law_changes`] bridges C2/C3 (in `uscode-markup`) into the `[LawChange]`
//! list C7 consumes; [`law_source`] is the external enacted-law directory
//! C8 merges against the release-point registry.
//!
//! [`engine::Engine`] bundles graph/store/timeline behind the read/advance
//! surface a front end consumes directly.

pub mod checkpoint;
pub mod engine;
pub mod error;
pub mod ingestor;
pub mod law_changes;
pub mod law_source;
pub mod playforward;
pub mod revision_builder;
pub mod timeline;

pub use checkpoint::{validate, CheckpointResult};
pub use engine::Engine;
pub use error::{PipelineError, PipelineResult};
pub use ingestor::{ingest_release_point, IngestOutcome};
pub use law_changes::gather_law_changes;
pub use law_source::{EnactedLawDirectory, FixedLawDirectory};
pub use playforward::{advance, AdvanceResult, AdvanceTarget};
pub use revision_builder::{build_revision, RevisionBuildOutcome};
pub use timeline::{EnactedLawEvent, Event, TimelineBuilder};
