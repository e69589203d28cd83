//! External interfaces consumed by the core (spec.md §6 "Downstream").
//!
//! These traits describe collaborators that live outside this system's
//! scope (the legal-markup fetcher, the enacted-law fetcher, the
//! release-point directory). Only the interface is specified here; a real
//! deployment supplies its own implementation backed by whatever crawler
//! and cache the records office integration uses. [`FsCache`] offers a
//! read-through local-disk cache suitable for wrapping either fetcher, and
//! [`fixtures`] offers in-memory fakes for tests.

use crate::error::FetchError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// One row of the release-point directory listing (spec.md §4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePointMeta {
    pub full_identifier: String,
    pub congress: u32,
    pub primary_law_number: u32,
    pub publication_date: Option<NaiveDate>,
    pub deferred_laws: Vec<u32>,
}

/// Requested representation of an enacted law's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LawTextFormat {
    Xml,
    Htm,
}

/// Downloads one title's authoritative legal-markup XML at a given
/// release-point tag. `Ok(None)` means "not published at this tag" (a 404),
/// which is a skip, not an error (spec.md §4.9 step 3a, §7 FetchError
/// policy).
#[async_trait]
pub trait CodifiedTextFetcher: Send + Sync {
    async fn fetch_title_xml(&self, title: u32, release_tag: &str) -> Result<Option<Vec<u8>>, FetchError>;
}

/// Downloads the text of one enacted law. `Ok(None)` means not yet
/// published in the requested format.
#[async_trait]
pub trait EnactedLawFetcher: Send + Sync {
    async fn fetch_law_text(
        &self,
        congress: u32,
        law_number: u32,
        format: LawTextFormat,
    ) -> Result<Option<String>, FetchError>;
}

/// Lists known release points, ordered by publication date.
#[async_trait]
pub trait ReleasePointDirectory: Send + Sync {
    async fn list_release_points(&self) -> Result<Vec<ReleasePointMeta>, FetchError>;
}
