//! C4: section-snapshot store with parent-chain resolution.

use crate::error::{StoreError, StoreResult};
use crate::revision_graph::RevisionGraph;
use indexmap::IndexMap;
use std::collections::HashMap;
use uscode_core::{RevisionId, SectionKey, SectionSnapshot};

/// Persists [`SectionSnapshot`] rows, keyed uniquely by `(revision, title,
/// section)`, and resolves section state across the revision graph.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: IndexMap<(RevisionId, SectionKey), SectionSnapshot>,
    by_revision: HashMap<RevisionId, Vec<SectionKey>>,
    by_section: HashMap<SectionKey, Vec<RevisionId>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one snapshot row at `snapshot.revision`. Rejects a duplicate
    /// `(revision, title, section)` key and any snapshot that fails its own
    /// R3/R4 invariant check.
    pub fn write_snapshot(&mut self, snapshot: SectionSnapshot) -> StoreResult<()> {
        snapshot.check_invariants()?;
        let key = (snapshot.revision, snapshot.key());
        if self.snapshots.contains_key(&key) {
            return Err(StoreError::DuplicateSnapshot {
                revision: snapshot.revision,
                title: key.1 .0,
                section: key.1 .1.clone(),
            });
        }
        self.by_revision.entry(snapshot.revision).or_default().push(key.1.clone());
        self.by_section.entry(key.1.clone()).or_default().push(snapshot.revision);
        self.snapshots.insert(key, snapshot);
        Ok(())
    }

    /// C4's core read primitive: walks the parent chain from `revision`
    /// toward the root, returning the first snapshot found for
    /// `(title, section)`. A tombstone resolves to `None` (the section is
    /// dead at that point); an empty chain also resolves to `None`.
    pub fn get_section_at(
        &self,
        graph: &RevisionGraph,
        title: u32,
        section: &str,
        revision: RevisionId,
    ) -> StoreResult<Option<SectionSnapshot>> {
        let key: SectionKey = (title, section.to_string());
        for id in graph.chain(revision)? {
            if let Some(snap) = self.snapshots.get(&(id, key.clone())) {
                return Ok(if snap.is_deleted { None } else { Some(snap.clone()) });
            }
        }
        Ok(None)
    }

    /// The full live set of sections visible at `revision`: walk the parent
    /// chain oldest→newest, folding each revision's directly-written
    /// snapshots into a map (later overrides earlier), then drop tombstones.
    pub fn get_all_sections_at(
        &self,
        graph: &RevisionGraph,
        revision: RevisionId,
    ) -> StoreResult<Vec<SectionSnapshot>> {
        let mut chain = graph.chain(revision)?;
        chain.reverse();

        let mut accumulated: IndexMap<SectionKey, SectionSnapshot> = IndexMap::new();
        for id in chain {
            for key in self.by_revision.get(&id).cloned().unwrap_or_default() {
                if let Some(snap) = self.snapshots.get(&(id, key.clone())) {
                    accumulated.insert(key, snap.clone());
                }
            }
        }

        Ok(accumulated.into_values().filter(|s| !s.is_deleted).collect())
    }

    /// The set written directly at `revision` (no chain walk).
    pub fn get_changed_sections_at(&self, revision: RevisionId) -> Vec<SectionSnapshot> {
        self.by_revision
            .get(&revision)
            .into_iter()
            .flatten()
            .filter_map(|key| self.snapshots.get(&(revision, key.clone())))
            .cloned()
            .collect()
    }

    /// Every snapshot ever written for `(title, section)`, across every
    /// revision that touched it, newest first (spec.md §6 `section_history`).
    pub fn section_history(&self, graph: &RevisionGraph, title: u32, section: &str) -> Vec<SectionSnapshot> {
        let key: SectionKey = (title, section.to_string());
        let mut revisions: Vec<RevisionId> = self.by_section.get(&key).cloned().unwrap_or_default();
        revisions.sort_by_key(|id| std::cmp::Reverse(graph.get(*id).map(|r| r.sequence_number).unwrap_or(0)));
        revisions
            .into_iter()
            .filter_map(|id| self.snapshots.get(&(id, key.clone())))
            .cloned()
            .collect()
    }

    /// The most recent revision at or before `revision` at which
    /// `(title, section)` actually changed content — a re-snapshot with
    /// identical `text_hash`/`notes_hash` is not a real change (spec.md
    /// §4.4). Used by the checkpoint validator (C11).
    pub fn most_recent_real_change_at_or_before(
        &self,
        graph: &RevisionGraph,
        title: u32,
        section: &str,
        revision: RevisionId,
    ) -> StoreResult<Option<RevisionId>> {
        let key: SectionKey = (title, section.to_string());
        let real_changes = self.real_change_revisions(graph, &key)?;
        for id in graph.chain(revision)? {
            if real_changes.contains(&id) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Every revision at which `key` was written with a hash differing from
    /// its chronologically preceding snapshot (or the first snapshot ever
    /// written for `key`).
    fn real_change_revisions(&self, graph: &RevisionGraph, key: &SectionKey) -> StoreResult<Vec<RevisionId>> {
        let mut revisions: Vec<RevisionId> = self.by_section.get(key).cloned().unwrap_or_default();
        revisions.sort_by_key(|id| graph.get(*id).map(|r| r.sequence_number).unwrap_or(u64::MAX));

        let mut out = Vec::new();
        let mut previous: Option<&SectionSnapshot> = None;
        for id in &revisions {
            let snap = self
                .snapshots
                .get(&(*id, key.clone()))
                .ok_or(StoreError::RevisionNotFound(*id))?;
            let changed = match previous {
                None => true,
                Some(prev) => prev.text_hash != snap.text_hash || prev.notes_hash != snap.notes_hash,
            };
            if changed {
                out.push(*id);
            }
            previous = Some(snap);
        }
        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Every snapshot row, for persistence (spec.md §6 `section_snapshot` table).
    pub fn all_snapshots(&self) -> Vec<SectionSnapshot> {
        self.snapshots.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revision_graph::RevisionGraph;
    use chrono::NaiveDate;
    use uscode_core::{EnactedLawRef, NormalizedNotes, Revision};

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn setup_chain(n: usize) -> (RevisionGraph, Vec<RevisionId>) {
        let mut graph = RevisionGraph::new();
        let mut ids = Vec::new();
        let root_id = graph.insert_bootstrap(Revision::bootstrap(date(2010), "bootstrap")).unwrap();
        ids.push(root_id);
        let mut parent = root_id;
        for i in 0..n {
            let law = EnactedLawRef {
                congress: 113,
                law_number: i as u32 + 1,
            };
            let seq = graph.next_sequence_number();
            let rev = Revision::new_derived(seq, parent, date(2011 + i as i32), law, format!("law {i}"));
            let id = graph.insert(rev).unwrap();
            graph.mark_ingested(id).unwrap();
            ids.push(id);
            parent = id;
        }
        (graph, ids)
    }

    #[test]
    fn resolves_across_many_intervening_revisions() {
        let (graph, ids) = setup_chain(10);
        let mut store = SnapshotStore::new();
        let snap = SectionSnapshot::new(
            ids[2],
            1,
            "101",
            "Rate",
            "5 percent",
            vec![],
            "",
            NormalizedNotes::default(),
            "1 U.S.C. § 101",
        );
        store.write_snapshot(snap).unwrap();

        let resolved = store.get_section_at(&graph, 1, "101", *ids.last().unwrap()).unwrap();
        assert_eq!(resolved.unwrap().text_content.as_deref(), Some("5 percent"));
    }

    #[test]
    fn tombstone_resolves_to_none() {
        let (graph, ids) = setup_chain(3);
        let mut store = SnapshotStore::new();
        let snap = SectionSnapshot::new(ids[1], 1, "101", "Rate", "text", vec![], "", NormalizedNotes::default(), "c");
        store.write_snapshot(snap).unwrap();
        let tombstone = SectionSnapshot::deleted(ids[2], 1, "101", "Repealed", "note", NormalizedNotes::default(), "c");
        store.write_snapshot(tombstone).unwrap();

        let resolved = store.get_section_at(&graph, 1, "101", *ids.last().unwrap()).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn rejects_duplicate_key() {
        let (_graph, ids) = setup_chain(1);
        let mut store = SnapshotStore::new();
        let snap = SectionSnapshot::new(ids[1], 1, "101", "Rate", "text", vec![], "", NormalizedNotes::default(), "c");
        store.write_snapshot(snap.clone()).unwrap();
        assert!(matches!(store.write_snapshot(snap), Err(StoreError::DuplicateSnapshot { .. })));
    }

    #[test]
    fn get_all_sections_at_accumulates_and_overrides() {
        let (graph, ids) = setup_chain(3);
        let mut store = SnapshotStore::new();
        store
            .write_snapshot(SectionSnapshot::new(
                ids[1],
                1,
                "101",
                "Rate",
                "5 percent",
                vec![],
                "",
                NormalizedNotes::default(),
                "c",
            ))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(
                ids[2],
                1,
                "101",
                "Rate",
                "10 percent",
                vec![],
                "",
                NormalizedNotes::default(),
                "c",
            ))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(
                ids[2],
                1,
                "200",
                "Other",
                "unchanged",
                vec![],
                "",
                NormalizedNotes::default(),
                "c",
            ))
            .unwrap();

        let all = store.get_all_sections_at(&graph, *ids.last().unwrap()).unwrap();
        assert_eq!(all.len(), 2);
        let s101 = all.iter().find(|s| s.section_number == "101").unwrap();
        assert_eq!(s101.text_content.as_deref(), Some("10 percent"));
    }

    #[test]
    fn real_change_detection_skips_identical_resnapshots() {
        let (graph, ids) = setup_chain(3);
        let mut store = SnapshotStore::new();
        store
            .write_snapshot(SectionSnapshot::new(
                ids[1],
                1,
                "101",
                "Rate",
                "5 percent",
                vec![],
                "",
                NormalizedNotes::default(),
                "c",
            ))
            .unwrap();
        // A ground-truth re-snapshot with identical content: not a real change.
        store
            .write_snapshot(SectionSnapshot::new(
                ids[2],
                1,
                "101",
                "Rate",
                "5 percent",
                vec![],
                "",
                NormalizedNotes::default(),
                "c",
            ))
            .unwrap();

        let last_real = store
            .most_recent_real_change_at_or_before(&graph, 1, "101", *ids.last().unwrap())
            .unwrap();
        assert_eq!(last_real, Some(ids[1]));
    }

    #[test]
    fn section_history_returns_newest_first() {
        let (graph, ids) = setup_chain(3);
        let mut store = SnapshotStore::new();
        store
            .write_snapshot(SectionSnapshot::new(ids[1], 1, "101", "Rate", "5 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();
        store
            .write_snapshot(SectionSnapshot::new(ids[2], 1, "101", "Rate", "10 percent", vec![], "", NormalizedNotes::default(), "c"))
            .unwrap();

        let history = store.section_history(&graph, 1, "101");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].text_content.as_deref(), Some("10 percent"));
        assert_eq!(history[1].text_content.as_deref(), Some("5 percent"));
    }
}
