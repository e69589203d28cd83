//! In-memory fakes for the three fetcher traits (spec.md §6), used by this
//! crate's own tests and by `uscode-pipeline`'s end-to-end scenario tests.
//! Not compiled into release builds of a dependent binary unless the
//! `test-fixtures` feature is enabled.

use crate::error::FetchError;
use crate::fetch::{CodifiedTextFetcher, EnactedLawFetcher, LawTextFormat, ReleasePointDirectory, ReleasePointMeta};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A fixed, in-memory release-point directory.
#[derive(Default)]
pub struct FixedDirectory {
    entries: Vec<ReleasePointMeta>,
}

impl FixedDirectory {
    pub fn new(entries: Vec<ReleasePointMeta>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ReleasePointDirectory for FixedDirectory {
    async fn list_release_points(&self) -> Result<Vec<ReleasePointMeta>, FetchError> {
        Ok(self.entries.clone())
    }
}

/// An in-memory codified-text fetcher keyed by `(title, release_tag)`.
/// Missing entries report as `Ok(None)` (not published at this tag), the
/// same contract a real fetcher uses for a 404.
#[derive(Default)]
pub struct InMemoryCodifiedFetcher {
    titles: HashMap<(u32, String), Vec<u8>>,
}

impl InMemoryCodifiedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: u32, release_tag: impl Into<String>, xml: impl Into<Vec<u8>>) {
        self.titles.insert((title, release_tag.into()), xml.into());
    }
}

#[async_trait]
impl CodifiedTextFetcher for InMemoryCodifiedFetcher {
    async fn fetch_title_xml(&self, title: u32, release_tag: &str) -> Result<Option<Vec<u8>>, FetchError> {
        Ok(self.titles.get(&(title, release_tag.to_string())).cloned())
    }
}

/// An in-memory enacted-law fetcher keyed by `(congress, law_number, format)`.
#[derive(Default)]
pub struct InMemoryLawFetcher {
    laws: Mutex<HashMap<(u32, u32, u8), String>>,
}

impl InMemoryLawFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, congress: u32, law_number: u32, format: LawTextFormat, text: impl Into<String>) {
        self.laws
            .lock()
            .expect("fixture mutex is never poisoned")
            .insert((congress, law_number, format_key(format)), text.into());
    }
}

#[async_trait]
impl EnactedLawFetcher for InMemoryLawFetcher {
    async fn fetch_law_text(
        &self,
        congress: u32,
        law_number: u32,
        format: LawTextFormat,
    ) -> Result<Option<String>, FetchError> {
        Ok(self
            .laws
            .lock()
            .expect("fixture mutex is never poisoned")
            .get(&(congress, law_number, format_key(format)))
            .cloned())
    }
}

fn format_key(format: LawTextFormat) -> u8 {
    match format {
        LawTextFormat::Xml => 0,
        LawTextFormat::Htm => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn codified_fetcher_returns_none_for_unknown_tag() {
        let fetcher = InMemoryCodifiedFetcher::new();
        let result = fetcher.fetch_title_xml(1, "113-21").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn codified_fetcher_returns_inserted_xml() {
        let mut fetcher = InMemoryCodifiedFetcher::new();
        fetcher.insert(1, "113-21", b"<title/>".to_vec());
        let result = fetcher.fetch_title_xml(1, "113-21").await.unwrap();
        assert_eq!(result.as_deref(), Some(&b"<title/>"[..]));
    }

    #[tokio::test]
    async fn law_fetcher_distinguishes_formats() {
        let fetcher = InMemoryLawFetcher::new();
        fetcher.insert(113, 21, LawTextFormat::Xml, "<law/>");
        assert!(fetcher.fetch_law_text(113, 21, LawTextFormat::Htm).await.unwrap().is_none());
        assert_eq!(
            fetcher.fetch_law_text(113, 21, LawTextFormat::Xml).await.unwrap().as_deref(),
            Some("<law/>")
        );
    }
}
