//! C9: snapshot ingestor. Ingests one ground-truth release-point tag by
//! fetching and parsing every title's codified-text XML (spec.md §4.9).

use futures::stream::{self, StreamExt};
use uscode_core::{Revision, RevisionId, SectionSnapshot};
use uscode_markup::{parse_codified_title, CodifiedTextFetcher, FetchError};
use uscode_store::{RevisionGraph, SnapshotStore};

use crate::error::{PipelineError, PipelineResult};

/// Tally of one [`ingest_release_point`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    pub revision: Option<RevisionId>,
    pub titles_ingested: usize,
    pub titles_skipped: usize,
    pub sections_written: usize,
    pub was_idempotent: bool,
}

/// Ingests `tag` as a ground-truth revision. `titles` is the target set
/// (spec.md §4.9: "typically all 1..54"); a 404 for a given title is a skip,
/// not an error. Title XMLs are fetched concurrently, bounded by
/// `pool_size` (spec.md §5: "bounded by a small connection pool"); parsing
/// and snapshot writes then run sequentially, in title order, since the
/// store only takes `&mut` access.
pub async fn ingest_release_point(
    graph: &mut RevisionGraph,
    store: &mut SnapshotStore,
    parent: RevisionId,
    tag: uscode_core::ReleasePointTag,
    effective_date: chrono::NaiveDate,
    summary: impl Into<String>,
    titles: &[u32],
    fetcher: &dyn CodifiedTextFetcher,
    pool_size: usize,
) -> PipelineResult<IngestOutcome> {
    if let Some(existing) = graph.by_release_point(&tag) {
        return Ok(IngestOutcome {
            revision: Some(existing),
            was_idempotent: true,
            ..Default::default()
        });
    }

    let parent_status = graph.get(parent).ok_or(uscode_store::StoreError::RevisionNotFound(parent))?.status;
    if parent_status != uscode_core::RevisionStatus::Ingested {
        return Err(PipelineError::ParentNotIngested(parent));
    }

    let sequence_number = graph.next_sequence_number();
    let revision = Revision::new_ground_truth(sequence_number, parent, effective_date, tag.clone(), summary);
    let revision_id = revision.id;
    graph.insert(revision)?;

    let mut outcome = IngestOutcome {
        revision: Some(revision_id),
        ..Default::default()
    };

    let mut fetched: Vec<(u32, Result<Option<Vec<u8>>, FetchError>)> = stream::iter(titles.iter().copied())
        .map(|title_number| {
            let fetcher = fetcher;
            let release_tag = tag.0.clone();
            async move {
                let result = fetcher.fetch_title_xml(title_number, &release_tag).await;
                (title_number, result)
            }
        })
        .buffer_unordered(pool_size.max(1))
        .collect()
        .await;
    fetched.sort_by_key(|(title_number, _)| *title_number);

    for (title_number, xml) in fetched {
        let xml = xml?;
        let Some(xml) = xml else {
            outcome.titles_skipped += 1;
            continue;
        };

        let Ok(parsed) = parse_codified_title(&xml) else {
            outcome.titles_skipped += 1;
            continue;
        };

        for section in parsed.sections {
            let snapshot = SectionSnapshot::new(
                revision_id,
                title_number,
                section.section_number,
                section.heading,
                section.text_content,
                section.normalized_provisions,
                section.notes,
                section.normalized_notes,
                section.full_citation,
            );
            store.write_snapshot(snapshot)?;
            outcome.sections_written += 1;
        }
        outcome.titles_ingested += 1;
    }

    graph.mark_ingested(revision_id)?;
    Ok(outcome)
}
