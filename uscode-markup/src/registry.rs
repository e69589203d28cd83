//! C1: Release-point registry.

use crate::error::FetchError;
use crate::fetch::{ReleasePointDirectory, ReleasePointMeta};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use uscode_core::ReleasePointTag;

fn deferred_note_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)does not (?:yet )?include (?:changes made by|the amendments made by) Public Law \d+-(\d+)")
            .expect("static regex is valid")
    })
}

/// Provenance of a [`ReleasePointMeta::deferred_laws`] entry. Non-load-bearing:
/// the play-forward engine only consumes the plain `Vec<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredSource {
    Structured,
    ParsedFromNotes,
}

/// One known ground-truth snapshot tag (spec.md §4.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePointEntry {
    pub tag: ReleasePointTag,
    pub meta: ReleasePointMeta,
}

/// Enumerates known release-point tags, publication-ordered.
pub struct ReleasePointRegistry {
    directory: Box<dyn ReleasePointDirectory>,
}

impl ReleasePointRegistry {
    pub fn new(directory: Box<dyn ReleasePointDirectory>) -> Self {
        Self { directory }
    }

    /// Returns every known release point, in publication order. Entries
    /// with no publication date sort last, stably, after those that have
    /// one.
    pub async fn all(&self) -> Result<Vec<ReleasePointEntry>, FetchError> {
        let mut metas = self.directory.list_release_points().await?;
        metas.sort_by_key(|m| (m.publication_date.is_none(), m.publication_date));
        Ok(metas
            .into_iter()
            .map(|meta| ReleasePointEntry {
                tag: ReleasePointTag::new(meta.congress, meta.primary_law_number),
                meta,
            })
            .collect())
    }

    /// Recovers deferred-law numbers from a legacy free-text notes field,
    /// for directory entries that predate the structured
    /// `deferred_laws` column (grounded in `original_source/`'s
    /// `release_point.py` notes convention).
    pub fn parse_deferred_from_notes(notes: &str) -> Vec<u32> {
        deferred_note_pattern()
            .captures_iter(notes)
            .filter_map(|c| c.get(1)?.as_str().parse::<u32>().ok())
            .collect()
    }

    /// Parses a tag string of the form `"<congress>-<primary_law>[notNN...]"`
    /// (spec.md §6) into congress, primary law number, and any deferred law
    /// numbers encoded in the `notNN` suffix.
    pub fn parse_tag(tag: &str) -> Option<(u32, u32, Vec<u32>)> {
        let (head, rest) = match tag.split_once("not") {
            Some((h, r)) => (h, Some(r)),
            None => (tag, None),
        };
        let (congress_str, law_str) = head.split_once('-')?;
        let congress = congress_str.parse().ok()?;
        let law_number = law_str.parse().ok()?;
        let deferred = match rest {
            Some(r) => r
                .split(|c: char| !c.is_ascii_digit())
                .filter(|s| !s.is_empty())
                .filter_map(|s| s.parse::<u32>().ok())
                .collect(),
            None => Vec::new(),
        };
        Some((congress, law_number, deferred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedDirectory(Vec<ReleasePointMeta>);

    #[async_trait]
    impl ReleasePointDirectory for FixedDirectory {
        async fn list_release_points(&self) -> Result<Vec<ReleasePointMeta>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn meta(congress: u32, law: u32, date: Option<NaiveDate>) -> ReleasePointMeta {
        ReleasePointMeta {
            full_identifier: format!("{congress}-{law}"),
            congress,
            primary_law_number: law,
            publication_date: date,
            deferred_laws: vec![],
        }
    }

    #[tokio::test]
    async fn all_is_publication_ordered() {
        let d = FixedDirectory(vec![
            meta(113, 22, NaiveDate::from_ymd_opt(2014, 1, 1)),
            meta(113, 21, NaiveDate::from_ymd_opt(2013, 1, 1)),
        ]);
        let registry = ReleasePointRegistry::new(Box::new(d));
        let all = registry.all().await.unwrap();
        assert_eq!(all[0].tag.0, "113-21");
        assert_eq!(all[1].tag.0, "113-22");
    }

    #[test]
    fn parses_deferred_suffix() {
        let (congress, law, deferred) = ReleasePointRegistry::parse_tag("118-47not60").unwrap();
        assert_eq!(congress, 118);
        assert_eq!(law, 47);
        assert_eq!(deferred, vec![60]);
    }

    #[test]
    fn parses_deferred_from_notes() {
        let deferred = ReleasePointRegistry::parse_deferred_from_notes(
            "This release point does not include changes made by Public Law 113-20.",
        );
        assert_eq!(deferred, vec![20]);
    }
}
