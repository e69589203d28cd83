//! The upstream-facing API surface of spec.md §6: `head`, `section_at`,
//! `section_history`, `all_sections_at`, `advance`, `validate_at`, bundled
//! over one graph/store/timeline so a caller (the CLI, or an embedding
//! application) does not have to thread the three collaborators by hand.

use uscode_core::{ReleasePointTag, Revision, RevisionId, SectionSnapshot};
use uscode_markup::{CodifiedTextFetcher, EnactedLawFetcher};
use uscode_store::{RevisionGraph, SnapshotStore};
use uscode_diff::SectionDiff;

use crate::checkpoint::{self, CheckpointResult};
use crate::error::{PipelineError, PipelineResult};
use crate::playforward::{self, AdvanceResult, AdvanceTarget};
use crate::timeline::TimelineBuilder;

/// Owns the revision graph, snapshot store, and merged timeline for one
/// running reconstruction, and exposes the read/advance operations a front
/// end (CLI or embedder) needs.
pub struct Engine {
    pub graph: RevisionGraph,
    pub store: SnapshotStore,
    pub timeline: TimelineBuilder,
    pub titles: Vec<u32>,
}

impl Engine {
    pub fn new(graph: RevisionGraph, store: SnapshotStore, timeline: TimelineBuilder, titles: Vec<u32>) -> Self {
        Self { graph, store, timeline, titles }
    }

    /// Latest ingested revision.
    pub fn head(&self) -> PipelineResult<&Revision> {
        self.graph.head().ok_or(PipelineError::NoHead)
    }

    /// C4's primary read, resolved against the current head.
    pub fn section_at(&self, title: u32, section: &str) -> PipelineResult<Option<SectionSnapshot>> {
        let head = self.head()?;
        Ok(self.store.get_section_at(&self.graph, title, section, head.id)?)
    }

    /// C4's primary read, resolved against an arbitrary revision.
    pub fn section_at_revision(&self, title: u32, section: &str, revision: RevisionId) -> PipelineResult<Option<SectionSnapshot>> {
        Ok(self.store.get_section_at(&self.graph, title, section, revision)?)
    }

    /// All snapshots of this section across every revision that touched it,
    /// newest first.
    pub fn section_history(&self, title: u32, section: &str) -> Vec<SectionSnapshot> {
        self.store.section_history(&self.graph, title, section)
    }

    /// Full materialisation at the current head.
    pub fn all_sections_at_head(&self) -> PipelineResult<Vec<SectionSnapshot>> {
        let head = self.head()?;
        Ok(self.store.get_all_sections_at(&self.graph, head.id)?)
    }

    /// Full materialisation at an arbitrary revision.
    pub fn all_sections_at(&self, revision: RevisionId) -> PipelineResult<Vec<SectionSnapshot>> {
        Ok(self.store.get_all_sections_at(&self.graph, revision)?)
    }

    /// Drives the play-forward engine (C10) forward from the current head.
    /// `pool_size` bounds concurrent title-XML fetches during any
    /// ground-truth ingest this call triggers (spec.md §5).
    pub async fn advance(
        &mut self,
        target: AdvanceTarget,
        codified_fetcher: &dyn CodifiedTextFetcher,
        enacted_fetcher: &dyn EnactedLawFetcher,
        pool_size: usize,
    ) -> PipelineResult<AdvanceResult> {
        playforward::advance(
            &mut self.graph,
            &mut self.store,
            &self.timeline,
            &self.titles,
            target,
            codified_fetcher,
            enacted_fetcher,
            pool_size,
        )
        .await
    }

    /// Looks up a revision by its human-referenceable sequence number
    /// (the CLI's `--revision` selector).
    pub fn revision_by_sequence(&self, sequence_number: u64) -> Option<RevisionId> {
        self.graph.by_sequence_number(sequence_number)
    }

    /// Pairwise section diff between two revisions (C12).
    pub fn diff(&self, old: RevisionId, new: RevisionId) -> PipelineResult<Vec<SectionDiff>> {
        Ok(uscode_diff::diff(&self.store, &self.graph, old, new)?)
    }

    /// Read-only recomputation of the checkpoint for an already-ingested
    /// ground-truth tag, against the derived revision that preceded it —
    /// without ingesting anything new (spec.md §6 `validate_at`).
    pub fn validate_at(&self, tag: &ReleasePointTag) -> PipelineResult<CheckpointResult> {
        let ground_truth = self.graph.by_release_point(tag).ok_or_else(|| PipelineError::UnknownReleasePoint(tag.clone()))?;
        let derived = self
            .graph
            .get(ground_truth)
            .and_then(|r| r.parent_revision)
            .ok_or(PipelineError::RevisionNotAnchored(ground_truth))?;
        Ok(checkpoint::validate(&self.store, &self.graph, derived, ground_truth)?)
    }

    /// Persists the graph and store to `path` (spec.md §6 durability pair).
    /// The merged timeline and title list are reconstruction inputs, not
    /// state, and are not part of this document.
    pub fn save_to_path(&self, path: &std::path::Path) -> PipelineResult<()> {
        Ok(uscode_store::save_to_path(&self.graph, &self.store, path)?)
    }

    /// Rebuilds the graph and store from a document written by
    /// [`Engine::save_to_path`], keeping the caller-supplied timeline/titles.
    pub fn load_from_path(path: &std::path::Path, timeline: TimelineBuilder, titles: Vec<u32>) -> PipelineResult<Self> {
        let (graph, store) = uscode_store::load_from_path(path)?;
        Ok(Self::new(graph, store, timeline, titles))
    }
}
