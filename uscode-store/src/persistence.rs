//! `serde_json`-backed durability for the in-memory graph/store pair
//! (spec.md §6): a flat `{revisions, snapshots}` document mirroring the
//! `code_revision` / `section_snapshot` tables a SQL-backed deployment would
//! use instead, without this crate taking on a database dependency.

use serde::{Deserialize, Serialize};
use std::path::Path;
use uscode_core::{Revision, SectionSnapshot};

use crate::error::{StoreError, StoreResult};
use crate::revision_graph::RevisionGraph;
use crate::snapshot_store::SnapshotStore;

#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    revisions: Vec<Revision>,
    snapshots: Vec<SectionSnapshot>,
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Writes the full graph and store to one JSON document at `path`.
pub fn save_to_path(graph: &RevisionGraph, store: &SnapshotStore, path: &Path) -> StoreResult<()> {
    let state = PersistedState {
        revisions: graph.all_revisions_by_sequence(),
        snapshots: store.all_snapshots(),
    };
    let json = serde_json::to_vec_pretty(&state)?;
    std::fs::write(path, json).map_err(|source| io_error(path, source))
}

/// Rebuilds a graph and store from a document written by [`save_to_path`].
/// Revisions are replayed in `sequence_number` order so parent lookups
/// resolve; each revision's persisted `status` is preserved as-is.
pub fn load_from_path(path: &Path) -> StoreResult<(RevisionGraph, SnapshotStore)> {
    let bytes = std::fs::read(path).map_err(|source| io_error(path, source))?;
    let mut state: PersistedState = serde_json::from_slice(&bytes)?;
    state.revisions.sort_by_key(|r| r.sequence_number);

    let mut graph = RevisionGraph::new();
    for revision in state.revisions {
        if revision.sequence_number == 0 {
            graph.insert_bootstrap(revision)?;
        } else {
            graph.insert(revision)?;
        }
    }

    let mut store = SnapshotStore::new();
    for snapshot in state.snapshots {
        store.write_snapshot(snapshot)?;
    }

    Ok((graph, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uscode_core::{EnactedLawRef, NormalizedNotes};

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn round_trips_graph_and_store_through_a_file() {
        let mut graph = RevisionGraph::new();
        let mut store = SnapshotStore::new();
        let root = graph.insert_bootstrap(Revision::bootstrap(date(2013), "bootstrap")).unwrap();
        store
            .write_snapshot(SectionSnapshot::new(root, 1, "101", "Rate", "5 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(root).unwrap();

        let law = EnactedLawRef { congress: 113, law_number: 1 };
        let seq = graph.next_sequence_number();
        let child = graph.insert(Revision::new_derived(seq, root, date(2014), law, "law")).unwrap();
        store
            .write_snapshot(SectionSnapshot::new(child, 1, "101", "Rate", "10 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        graph.mark_ingested(child).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        save_to_path(&graph, &store, &path).unwrap();

        let (loaded_graph, loaded_store) = load_from_path(&path).unwrap();
        assert_eq!(loaded_graph.len(), 2);
        assert_eq!(loaded_graph.head().unwrap().sequence_number, 1);
        let resolved = loaded_store.get_section_at(&loaded_graph, 1, "101", loaded_graph.head().unwrap().id).unwrap();
        assert_eq!(resolved.unwrap().text_content.as_deref(), Some("10 percent"));
    }
}
