//! C11: checkpoint validator. Compares a derived revision's materialised
//! section set against a ground-truth revision's (spec.md §4.11).

use std::collections::HashMap;
use uscode_core::{RevisionId, SectionKey, SectionSnapshot};
use uscode_store::{RevisionGraph, SnapshotStore, StoreResult};

/// The outcome of one [`validate`] call (spec.md §4.11 step 4).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckpointResult {
    pub matches: usize,
    pub mismatches: Vec<(SectionSnapshot, SectionSnapshot)>,
    pub only_in_derived: Vec<SectionSnapshot>,
    pub only_in_ground_truth: Vec<SectionSnapshot>,
}

impl CheckpointResult {
    /// Zero mismatches, zero only-in-derived, zero only-in-ground-truth.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty() && self.only_in_derived.is_empty() && self.only_in_ground_truth.is_empty()
    }
}

/// Validates a ground-truth revision `ground_truth` against the most recent
/// derived revision preceding it, `derived`. Read-only: never mutates the
/// store or graph (spec.md P6 "Checkpoint determinism").
pub fn validate(
    store: &SnapshotStore,
    graph: &RevisionGraph,
    derived: RevisionId,
    ground_truth: RevisionId,
) -> StoreResult<CheckpointResult> {
    let derived_sections = index_by_key(store.get_all_sections_at(graph, derived)?);
    let ground_truth_sections = index_by_key(store.get_all_sections_at(graph, ground_truth)?);

    let mut keys: Vec<SectionKey> = derived_sections.keys().chain(ground_truth_sections.keys()).cloned().collect();
    keys.sort();
    keys.dedup();

    let mut result = CheckpointResult::default();
    for key in keys {
        match (derived_sections.get(&key), ground_truth_sections.get(&key)) {
            (Some(d), Some(g)) => {
                if d.text_hash == g.text_hash && d.notes_hash == g.notes_hash {
                    result.matches += 1;
                } else {
                    result.mismatches.push((d.clone(), g.clone()));
                }
            }
            (Some(d), None) => result.only_in_derived.push(d.clone()),
            (None, Some(g)) => result.only_in_ground_truth.push(g.clone()),
            (None, None) => unreachable!("key collected from one of the two maps"),
        }
    }
    Ok(result)
}

fn index_by_key(sections: Vec<SectionSnapshot>) -> HashMap<SectionKey, SectionSnapshot> {
    sections.into_iter().map(|s| (s.key(), s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uscode_core::{EnactedLawRef, NormalizedNotes, Revision};

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn classifies_all_four_outcomes() {
        let mut graph = RevisionGraph::new();
        let mut store = SnapshotStore::new();
        let root = graph.insert_bootstrap(Revision::bootstrap(date(2013), "bootstrap")).unwrap();
        store
            .write_snapshot(SectionSnapshot::new(root, 1, "100", "Match", "same", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(root, 1, "200", "Mismatch", "derived text", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(root, 1, "300", "OnlyDerived", "text", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(root).unwrap();

        let law = EnactedLawRef {
            congress: 113,
            law_number: 1,
        };
        let derived_seq = graph.next_sequence_number();
        let derived = graph.insert(Revision::new_derived(derived_seq, root, date(2014), law, "law")).unwrap();
        graph.mark_ingested(derived).unwrap();

        let gt_seq = graph.next_sequence_number();
        let ground_truth = graph
            .insert(Revision::new_ground_truth(gt_seq, derived, date(2015), uscode_core::ReleasePointTag::new(113, 22), "gt"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(ground_truth, 1, "100", "Match", "same", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(ground_truth, 1, "200", "Mismatch", "ground truth text", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(ground_truth, 1, "400", "OnlyGroundTruth", "text", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(ground_truth).unwrap();

        let result = validate(&store, &graph, derived, ground_truth).unwrap();
        assert_eq!(result.matches, 1);
        assert_eq!(result.mismatches.len(), 1);
        assert_eq!(result.only_in_derived.len(), 1);
        assert_eq!(result.only_in_ground_truth.len(), 1);
        assert!(!result.is_clean());
    }

    #[test]
    fn identical_sections_are_clean() {
        let mut graph = RevisionGraph::new();
        let mut store = SnapshotStore::new();
        let root = graph.insert_bootstrap(Revision::bootstrap(date(2013), "bootstrap")).unwrap();
        store
            .write_snapshot(SectionSnapshot::new(root, 1, "101", "Rate", "10 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(root).unwrap();

        let gt_seq = graph.next_sequence_number();
        let ground_truth = graph
            .insert(Revision::new_ground_truth(gt_seq, root, date(2014), uscode_core::ReleasePointTag::new(113, 22), "gt"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(ground_truth, 1, "101", "Rate", "10 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(ground_truth).unwrap();

        let result = validate(&store, &graph, root, ground_truth).unwrap();
        assert!(result.is_clean());
    }
}
