//! C12: pairwise section-level diff between two revisions (spec.md §4.12).
//!
//! Used (a) by the snapshot ingestor to report how many sections a release
//! point changed relative to its parent, and (b) by any blame-style view
//! over two arbitrary revisions.

use std::collections::HashMap;
use uscode_core::{SectionKey, SectionSnapshot};
use uscode_store::{RevisionGraph, SnapshotStore, StoreResult};

/// The classification of one section between an "old" and "new" revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionDiff {
    Added(SectionSnapshot),
    Modified { old: SectionSnapshot, new: SectionSnapshot },
    Deleted(SectionSnapshot),
    Unchanged(SectionSnapshot),
}

impl SectionDiff {
    pub fn key(&self) -> SectionKey {
        match self {
            SectionDiff::Added(s) | SectionDiff::Deleted(s) | SectionDiff::Unchanged(s) => s.key(),
            SectionDiff::Modified { new, .. } => new.key(),
        }
    }
}

/// Tally of a [`diff`] call, used for the "this release point changed N
/// sections" summary (spec.md §4.12 use (a)).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub unchanged: usize,
}

impl DiffSummary {
    pub fn total_changed(&self) -> usize {
        self.added + self.modified + self.deleted
    }
}

/// Computes the pairwise diff of every section present in at least one of
/// `old` or `new`. "Modified" is defined by hash inequality
/// (`text_hash`/`notes_hash`), not text comparison.
pub fn diff(store: &SnapshotStore, graph: &RevisionGraph, old: uscode_core::RevisionId, new: uscode_core::RevisionId) -> StoreResult<Vec<SectionDiff>> {
    let old_sections = index_by_key(store.get_all_sections_at(graph, old)?);
    let new_sections = index_by_key(store.get_all_sections_at(graph, new)?);

    let mut keys: Vec<SectionKey> = old_sections.keys().chain(new_sections.keys()).cloned().collect();
    keys.sort();
    keys.dedup();

    let mut out = Vec::with_capacity(keys.len());
    for key in keys {
        let result = match (old_sections.get(&key), new_sections.get(&key)) {
            (None, Some(new_snap)) => SectionDiff::Added(new_snap.clone()),
            (Some(old_snap), None) => SectionDiff::Deleted(old_snap.clone()),
            (Some(old_snap), Some(new_snap)) => {
                if old_snap.text_hash == new_snap.text_hash && old_snap.notes_hash == new_snap.notes_hash {
                    SectionDiff::Unchanged(new_snap.clone())
                } else {
                    SectionDiff::Modified {
                        old: old_snap.clone(),
                        new: new_snap.clone(),
                    }
                }
            }
            (None, None) => unreachable!("key collected from one of the two maps"),
        };
        out.push(result);
    }
    Ok(out)
}

/// Summarizes a diff list's counts.
pub fn summarize(diffs: &[SectionDiff]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for d in diffs {
        match d {
            SectionDiff::Added(_) => summary.added += 1,
            SectionDiff::Modified { .. } => summary.modified += 1,
            SectionDiff::Deleted(_) => summary.deleted += 1,
            SectionDiff::Unchanged(_) => summary.unchanged += 1,
        }
    }
    summary
}

fn index_by_key(sections: Vec<SectionSnapshot>) -> HashMap<SectionKey, SectionSnapshot> {
    sections.into_iter().map(|s| (s.key(), s)).collect()
}
