//! C10: play-forward engine. The orchestrator that drives C7/C9/C11 across
//! the merged timeline (spec.md §4.10).

use std::collections::HashSet;
use uscode_core::{EnactedLawRef, ReleasePointTag, RevisionId};
use uscode_markup::{CodifiedTextFetcher, EnactedLawFetcher};
use uscode_store::{RevisionGraph, SnapshotStore};

use crate::checkpoint::{self, CheckpointResult};
use crate::error::PipelineResult;
use crate::ingestor::{self, IngestOutcome};
use crate::law_changes::gather_law_changes;
use crate::revision_builder::{self, RevisionBuildOutcome};
use crate::timeline::{Event, TimelineBuilder};

const MAX_RECORDED_FAILURES: usize = 20;

/// How far one [`advance`] call should walk the timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceTarget {
    Count(usize),
    UntilTag(ReleasePointTag),
}

/// Tally of one [`advance`] call (spec.md §6 "advance(count | until_tag) →
/// AdvanceResult").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdvanceResult {
    pub events_processed: usize,
    pub laws_applied: usize,
    pub laws_skipped_deferred: usize,
    pub release_points_ingested: usize,
    pub sections_applied: usize,
    pub sections_failed: usize,
    pub structural_sections: usize,
    pub checkpoints: Vec<(ReleasePointTag, CheckpointResult)>,
    pub failures: Vec<String>,
}

impl AdvanceResult {
    fn record_failure(&mut self, description: String) {
        if self.failures.len() < MAX_RECORDED_FAILURES {
            self.failures.push(description);
        }
    }
}

/// Drives the pipeline forward from the current `head()` across the merged
/// timeline, per `target`.
#[allow(clippy::too_many_arguments)]
pub async fn advance(
    graph: &mut RevisionGraph,
    store: &mut SnapshotStore,
    timeline: &TimelineBuilder,
    titles: &[u32],
    target: AdvanceTarget,
    codified_fetcher: &dyn CodifiedTextFetcher,
    enacted_fetcher: &dyn EnactedLawFetcher,
    pool_size: usize,
) -> PipelineResult<AdvanceResult> {
    let events = timeline.build(0, None);
    let mut cursor_index = locate_cursor(graph, &events);
    let deferred: HashSet<u32> = TimelineBuilder::deferred_law_numbers(&events[cursor_index..]);

    let mut result = AdvanceResult::default();
    let mut current_head = graph.head().map(|r| r.id);

    while cursor_index < events.len() {
        if let AdvanceTarget::Count(n) = &target {
            if result.events_processed >= *n {
                break;
            }
        }
        let Some(parent) = current_head else {
            break;
        };

        let event = &events[cursor_index];
        match event {
            Event::Enacted { congress, law_number, date } => {
                if deferred.contains(law_number) {
                    result.laws_skipped_deferred += 1;
                } else {
                    let law = EnactedLawRef {
                        congress: *congress,
                        law_number: *law_number,
                    };
                    let changes = gather_law_changes(law, *date, enacted_fetcher).await;
                    match revision_builder::build_revision(graph, store, parent, law, *date, format!("Pub. L. {congress}-{law_number}"), &changes) {
                        Ok(outcome) => {
                            apply_revision_outcome(&outcome, &mut result);
                            current_head = outcome.revision;
                        }
                        Err(e) => {
                            result.record_failure(format!("law {congress}-{law_number}: {e}"));
                            break;
                        }
                    }
                }
                result.events_processed += 1;
                cursor_index += 1;
            }
            Event::GroundTruth {
                tag,
                date,
                ..
            } => {
                let tag = tag.clone();
                let date = *date;
                let preceding_derived = parent;
                match ingestor::ingest_release_point(graph, store, parent, tag.clone(), date, format!("release point {tag}"), titles, codified_fetcher, pool_size).await {
                    Ok(outcome) => {
                        apply_ingest_outcome(&outcome, &mut result);
                        if let Some(ground_truth) = outcome.revision {
                            current_head = Some(ground_truth);
                            if let Ok(checkpoint) = checkpoint::validate(store, graph, preceding_derived, ground_truth) {
                                result.checkpoints.push((tag.clone(), checkpoint));
                            }
                        }
                    }
                    Err(e) => {
                        result.record_failure(format!("release point {tag}: {e}"));
                        break;
                    }
                }
                result.events_processed += 1;
                cursor_index += 1;
                if let AdvanceTarget::UntilTag(target_tag) = &target {
                    if *target_tag == tag {
                        break;
                    }
                }
            }
        }
    }

    Ok(result)
}

fn apply_revision_outcome(outcome: &RevisionBuildOutcome, result: &mut AdvanceResult) {
    if !outcome.was_idempotent {
        result.laws_applied += 1;
    }
    result.sections_applied += outcome.sections_applied;
    result.sections_failed += outcome.sections_failed;
    result.structural_sections += outcome.structural_sections;
}

fn apply_ingest_outcome(outcome: &IngestOutcome, result: &mut AdvanceResult) {
    if !outcome.was_idempotent {
        result.release_points_ingested += 1;
    }
}

/// Locates the cursor's position in `events` by matching `head()`'s
/// underlying tag (ground-truth) or law reference (derived). A bootstrap
/// head (neither) or an empty graph starts at the beginning of the stream.
fn locate_cursor(graph: &RevisionGraph, events: &[Event]) -> usize {
    let Some(head) = graph.head() else {
        return 0;
    };
    if let Some(tag) = &head.release_point_ref {
        if let Some(pos) = events.iter().position(|e| matches!(e, Event::GroundTruth { tag: t, .. } if t == tag)) {
            return pos + 1;
        }
    }
    if let Some(law) = head.law_ref {
        if let Some(pos) = events
            .iter()
            .position(|e| matches!(e, Event::Enacted { congress, law_number, .. } if *congress == law.congress && *law_number == law.law_number))
        {
            return pos + 1;
        }
    }
    0
}
