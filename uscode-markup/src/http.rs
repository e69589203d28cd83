//! Production-shaped fetcher implementations: an HTTP client wrapping
//! [`FsCache`] for each of the three external-interface traits (spec.md §6).
//! The crawling/endpoint logic itself is out of scope (spec.md §1
//! Non-goals); this is the thin, generic "GET, cache, parse" shape every
//! deployment of these traits shares.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::cache::FsCache;
use crate::error::FetchError;
use crate::fetch::{CodifiedTextFetcher, EnactedLawFetcher, LawTextFormat, ReleasePointDirectory, ReleasePointMeta};
use crate::registry::ReleasePointRegistry;

async fn get_bytes(client: &reqwest::Client, url: &str) -> Result<Option<Vec<u8>>, FetchError> {
    let response = client.get(url).send().await.map_err(|source| FetchError::Transport {
        resource: url.to_string(),
        source,
    })?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(FetchError::BadStatus {
            resource: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let bytes = response.bytes().await.map_err(|source| FetchError::Transport {
        resource: url.to_string(),
        source,
    })?;
    Ok(Some(bytes.to_vec()))
}

/// Fetches one title's codified-text XML at a release-point tag, through a
/// read-through disk cache keyed `codified/<title>-<tag>.xml`.
pub struct HttpCodifiedFetcher {
    client: reqwest::Client,
    base_url: String,
    cache: FsCache,
}

impl HttpCodifiedFetcher {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, cache: FsCache) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cache,
        }
    }
}

#[async_trait]
impl CodifiedTextFetcher for HttpCodifiedFetcher {
    async fn fetch_title_xml(&self, title: u32, release_tag: &str) -> Result<Option<Vec<u8>>, FetchError> {
        let filename = format!("{title}-{release_tag}.xml");
        let client = &self.client;
        let url = format!("{}/title/{}/{}.xml", self.base_url, title, release_tag);
        self.cache.get_or_fetch("codified", &filename, || get_bytes(client, &url)).await
    }
}

/// Fetches one enacted law's text in the requested format, through a
/// read-through disk cache keyed `enacted-law/<congress>-<law_number>.<ext>`.
pub struct HttpEnactedLawFetcher {
    client: reqwest::Client,
    base_url: String,
    cache: FsCache,
}

impl HttpEnactedLawFetcher {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, cache: FsCache) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            cache,
        }
    }
}

#[async_trait]
impl EnactedLawFetcher for HttpEnactedLawFetcher {
    async fn fetch_law_text(&self, congress: u32, law_number: u32, format: LawTextFormat) -> Result<Option<String>, FetchError> {
        let ext = match format {
            LawTextFormat::Xml => "xml",
            LawTextFormat::Htm => "htm",
        };
        let filename = format!("{congress}-{law_number}.{ext}");
        let client = &self.client;
        let url = format!("{}/bills/{}/{}.{}", self.base_url, congress, law_number, ext);
        let bytes = self.cache.get_or_fetch("enacted-law", &filename, || get_bytes(client, &url)).await?;
        Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
    }
}

/// One raw record of the release-point directory listing, as published by
/// the records office (`original_source/release_point.py`'s scraped JSON
/// shape): `{"release_point": "113-21", "raw_id": ..., "notes": "..."}`.
/// There is no structured `deferred_laws` column in this format; deferred
/// laws are recovered from free text in `notes` when present.
#[derive(Debug, Deserialize)]
struct RawReleasePointRecord {
    release_point: String,
    publication_date: Option<NaiveDate>,
    #[serde(default)]
    notes: String,
}

/// Lists release points by fetching and parsing the records office's flat
/// JSON directory listing.
pub struct HttpReleasePointDirectory {
    client: reqwest::Client,
    listing_url: String,
}

impl HttpReleasePointDirectory {
    pub fn new(client: reqwest::Client, listing_url: impl Into<String>) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
        }
    }
}

#[async_trait]
impl ReleasePointDirectory for HttpReleasePointDirectory {
    async fn list_release_points(&self) -> Result<Vec<ReleasePointMeta>, FetchError> {
        let bytes = get_bytes(&self.client, &self.listing_url)
            .await?
            .ok_or_else(|| FetchError::BadStatus {
                resource: self.listing_url.clone(),
                status: 404,
            })?;
        let records: Vec<RawReleasePointRecord> = serde_json::from_slice(&bytes).map_err(|e| FetchError::BadStatus {
            resource: format!("{}: malformed JSON ({e})", self.listing_url),
            status: 0,
        })?;

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let (congress, primary_law_number, _) = ReleasePointRegistry::parse_tag(&record.release_point)?;
                let deferred_laws = ReleasePointRegistry::parse_deferred_from_notes(&record.notes);
                Some(ReleasePointMeta {
                    full_identifier: record.release_point,
                    congress,
                    primary_law_number,
                    publication_date: record.publication_date,
                    deferred_laws,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_raw_release_point_record_with_legacy_notes() {
        let json = br#"[{"release_point": "113-21", "raw_id": 1, "publication_date": "2014-01-01", "notes": "does not include changes made by Public Law 113-20"}]"#;
        let records: Vec<RawReleasePointRecord> = serde_json::from_slice(json).unwrap();
        assert_eq!(records.len(), 1);
        let (congress, law, _) = ReleasePointRegistry::parse_tag(&records[0].release_point).unwrap();
        assert_eq!((congress, law), (113, 21));
        let deferred = ReleasePointRegistry::parse_deferred_from_notes(&records[0].notes);
        assert_eq!(deferred, vec![20]);
    }
}
