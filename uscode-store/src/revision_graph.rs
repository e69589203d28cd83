//! C5: append-only revision graph.

use crate::error::{StoreError, StoreResult};
use indexmap::IndexMap;
use uscode_core::{EnactedLawRef, ReleasePointTag, Revision, RevisionId, RevisionStatus};

/// Append-only store of [`Revision`] nodes, indexed by ID and by the
/// ground-truth tag / enacted-law reference each revision carries.
#[derive(Debug, Default)]
pub struct RevisionGraph {
    revisions: IndexMap<RevisionId, Revision>,
    by_release_point: IndexMap<ReleasePointTag, RevisionId>,
    by_law: IndexMap<EnactedLawRef, RevisionId>,
}

impl RevisionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the bootstrap revision (spec.md §3: "Exactly one revision has
    /// `sequence_number = 0`"). Fails if one already exists.
    pub fn insert_bootstrap(&mut self, revision: Revision) -> StoreResult<RevisionId> {
        if self.revisions.values().any(|r| r.sequence_number == 0) {
            return Err(StoreError::BootstrapAlreadyExists);
        }
        let id = revision.id;
        self.revisions.insert(id, revision);
        Ok(id)
    }

    /// Inserts a new non-bootstrap revision. The caller is responsible for
    /// allocating the next `sequence_number` (see [`RevisionGraph::next_sequence_number`])
    /// and for ensuring `parent_revision` resolves (R1/R2).
    pub fn insert(&mut self, revision: Revision) -> StoreResult<RevisionId> {
        if let Some(parent) = revision.parent_revision {
            if !self.revisions.contains_key(&parent) {
                return Err(StoreError::ParentNotFound(parent));
            }
        }
        let id = revision.id;
        if let Some(tag) = &revision.release_point_ref {
            if self.by_release_point.contains_key(tag) {
                return Err(StoreError::AlreadyIngested { revision: id });
            }
            self.by_release_point.insert(tag.clone(), id);
        }
        if let Some(law) = revision.law_ref {
            if self.by_law.contains_key(&law) {
                return Err(StoreError::AlreadyIngested { revision: id });
            }
            self.by_law.insert(law, id);
        }
        self.revisions.insert(id, revision);
        Ok(id)
    }

    pub fn get(&self, id: RevisionId) -> Option<&Revision> {
        self.revisions.get(&id)
    }

    pub fn get_mut(&mut self, id: RevisionId) -> Option<&mut Revision> {
        self.revisions.get_mut(&id)
    }

    /// Marks `id` `Ingested`. Idempotency (C7 step 1, C9 step 1) relies on
    /// callers checking status before re-deriving; this just performs the
    /// transition.
    pub fn mark_ingested(&mut self, id: RevisionId) -> StoreResult<()> {
        let revision = self.revisions.get_mut(&id).ok_or(StoreError::RevisionNotFound(id))?;
        revision.status = RevisionStatus::Ingested;
        Ok(())
    }

    pub fn mark_failed(&mut self, id: RevisionId) -> StoreResult<()> {
        let revision = self.revisions.get_mut(&id).ok_or(StoreError::RevisionNotFound(id))?;
        revision.status = RevisionStatus::Failed;
        Ok(())
    }

    pub fn next_sequence_number(&self) -> u64 {
        self.revisions
            .values()
            .map(|r| r.sequence_number)
            .max()
            .map(|n| n + 1)
            .unwrap_or(0)
    }

    /// The most recent `Ingested` revision by `sequence_number`.
    pub fn head(&self) -> Option<&Revision> {
        self.revisions
            .values()
            .filter(|r| matches!(r.status, RevisionStatus::Ingested))
            .max_by_key(|r| r.sequence_number)
    }

    /// The ordered list of revision IDs from `r` back to the root,
    /// inclusive, root last.
    pub fn chain(&self, r: RevisionId) -> StoreResult<Vec<RevisionId>> {
        let mut out = Vec::new();
        let mut cursor = Some(r);
        while let Some(id) = cursor {
            let revision = self.revisions.get(&id).ok_or(StoreError::RevisionNotFound(id))?;
            out.push(id);
            cursor = revision.parent_revision;
        }
        Ok(out)
    }

    pub fn by_release_point(&self, tag: &ReleasePointTag) -> Option<RevisionId> {
        self.by_release_point.get(tag).copied()
    }

    pub fn by_law(&self, law: &EnactedLawRef) -> Option<RevisionId> {
        self.by_law.get(&law).copied()
    }

    /// Looks up a revision by its human-referenceable `sequence_number`
    /// (the CLI's `--revision` selector, since a raw [`RevisionId`] UUID is
    /// not something an operator types from memory).
    pub fn by_sequence_number(&self, sequence_number: u64) -> Option<RevisionId> {
        self.revisions.values().find(|r| r.sequence_number == sequence_number).map(|r| r.id)
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Every revision, oldest first, for persistence (spec.md §6 `code_revision` table).
    pub fn all_revisions_by_sequence(&self) -> Vec<Revision> {
        let mut revisions: Vec<Revision> = self.revisions.values().cloned().collect();
        revisions.sort_by_key(|r| r.sequence_number);
        revisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    #[test]
    fn bootstrap_then_chain_walks_to_root() {
        let mut graph = RevisionGraph::new();
        let root = Revision::bootstrap(date(2010), "bootstrap");
        let root_id = graph.insert_bootstrap(root).unwrap();

        let law = EnactedLawRef {
            congress: 113,
            law_number: 1,
        };
        let seq = graph.next_sequence_number();
        let child = Revision::new_derived(seq, root_id, date(2013), law, "law 113-1");
        let child_id = graph.insert(child).unwrap();

        let chain = graph.chain(child_id).unwrap();
        assert_eq!(chain, vec![child_id, root_id]);
    }

    #[test]
    fn head_is_most_recent_ingested() {
        let mut graph = RevisionGraph::new();
        let root = Revision::bootstrap(date(2010), "bootstrap");
        let root_id = graph.insert_bootstrap(root).unwrap();
        graph.mark_ingested(root_id).unwrap();
        assert_eq!(graph.head().unwrap().id, root_id);

        let law = EnactedLawRef {
            congress: 113,
            law_number: 1,
        };
        let seq = graph.next_sequence_number();
        let child = Revision::new_derived(seq, root_id, date(2013), law, "law 113-1");
        let child_id = graph.insert(child).unwrap();
        assert_eq!(graph.head().unwrap().id, root_id);
        graph.mark_ingested(child_id).unwrap();
        assert_eq!(graph.head().unwrap().id, child_id);
    }

    #[test]
    fn rejects_duplicate_law_revision() {
        let mut graph = RevisionGraph::new();
        let root_id = graph.insert_bootstrap(Revision::bootstrap(date(2010), "bootstrap")).unwrap();
        let law = EnactedLawRef {
            congress: 113,
            law_number: 1,
        };
        let seq = graph.next_sequence_number();
        graph.insert(Revision::new_derived(seq, root_id, date(2013), law, "first")).unwrap();

        let seq2 = graph.next_sequence_number();
        let dup = Revision::new_derived(seq2, root_id, date(2013), law, "dup");
        assert!(matches!(graph.insert(dup), Err(StoreError::AlreadyIngested { .. })));
    }
}
