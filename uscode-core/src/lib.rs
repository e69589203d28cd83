//! Core types for the US Code chronological reconstruction engine.
//!
//! This crate defines the foundational data model shared by every other
//! `uscode-*` crate: [`Revision`] (a node in the append-only revision graph),
//! [`SectionSnapshot`] (the content of one section at one revision), and
//! [`LawChange`] (one amendment operation produced by the classifier and
//! consumed by the revision builder).
//!
//! ## Design Philosophy
//!
//! ### Numeric keys break reference cycles
//!
//! The notes schema references laws, which reference revisions, which
//! reference laws. Rather than storing `Rc`/`Arc` graphs, every
//! cross-reference here is a plain identifier ([`RevisionId`], a
//! `(title, section)` pair, or an enacted-law reference) resolved only at
//! read time by the store.
//!
//! ### Hashes are the change-detection primitive
//!
//! [`SectionSnapshot::text_hash`] and [`SectionSnapshot::notes_hash`] are
//! lowercase-hex SHA-256 digests over the canonical UTF-8 bytes of their
//! respective fields. A re-snapshot with identical hashes is not a real
//! change; this is what lets the store's "most recent revision at which a
//! section actually changed" query (C4) and the checkpoint validator (C11)
//! work without re-parsing text.
//!
//! ### Validation over panics
//!
//! Invariants are checked, not assumed: [`SectionSnapshot::check_invariants`]
//! verifies R3/R4 (hash-content agreement, tombstone shape) and returns
//! `Result` rather than panicking. The store calls it before accepting a
//! write.

pub mod citation;
pub mod error;
pub mod hashing;
pub mod ids;
pub mod law_change;
pub mod provision;
pub mod revision;
pub mod snapshot;

pub use citation::full_citation;
pub use error::CoreError;
pub use hashing::{sha256_hex, HashHex};
pub use ids::{EnactedLawRef, ReleasePointTag, RevisionId, SnapshotId};
pub use law_change::{ChangeType, LawChange, PositionHint};
pub use provision::{NoteEntry, NoteCategory, NormalizedNotes, ProvisionLine};
pub use revision::{Revision, RevisionStatus, RevisionVariant};
pub use snapshot::SectionSnapshot;

/// A section's address within the Code: `(title_number, section_number)`.
///
/// `section_number` is a string because section numbers carry alphanumeric
/// suffixes (`"80a-3a"`, `"1395w-3a"`) that do not round-trip through an
/// integer type.
pub type SectionKey = (u32, String);
