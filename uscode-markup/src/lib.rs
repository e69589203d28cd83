//! Markup ingestion: turns raw release-point and enacted-law documents into
//! the structured inputs the rest of the pipeline consumes.
//!
//! - **C1** ([`registry`]): enumerates known release points.
//! - **C2** ([`codified`], [`enacted`], [`plaintext`]): parses codified-text
//!   XML into sections, and enacted-law text (XML or plain) into candidate
//!   amendment instructions.
//! - **C3** ([`classify`]): turns a candidate into a classified `LawChange`.
//!
//! [`fetch`] and [`cache`] describe and cache the external documents this
//! crate parses; [`xmldom`] is the shared minimal XML DOM both parser modes
//! walk; [`http`] wires those traits to a real `reqwest` client.

pub mod actions;
pub mod cache;
pub mod candidate;
pub mod classify;
pub mod codified;
pub mod enacted;
pub mod error;
pub mod fetch;
pub mod fixtures;
pub mod http;
pub mod plaintext;
pub mod registry;
pub mod xmldom;

pub use actions::{detect_actions, extract_quoted_texts, ActionTag};
pub use cache::FsCache;
pub use candidate::{AmendmentCandidate, SectionRef};
pub use classify::{classify, Classification};
pub use codified::{parse_codified_title, ParsedSection, ParsedTitle, StructuralGroup};
pub use enacted::parse_enacted_law_xml;
pub use error::{ClassifyError, FetchError, ParseError};
pub use fetch::{CodifiedTextFetcher, EnactedLawFetcher, LawTextFormat, ReleasePointDirectory, ReleasePointMeta};
pub use http::{HttpCodifiedFetcher, HttpEnactedLawFetcher, HttpReleasePointDirectory};
pub use plaintext::{candidate_from_block, scan_plain_text};
pub use registry::{DeferredSource, ReleasePointEntry, ReleasePointRegistry};
