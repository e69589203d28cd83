//! C7: revision builder. Folds one enacted law's `LawChange`s into a new
//! derived revision (spec.md §4.7).

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use uscode_apply::{apply, patch_provisions, ApplicationResult};
use uscode_core::{full_citation, ChangeType, EnactedLawRef, LawChange, Revision, RevisionId, SectionKey, SectionSnapshot};
use uscode_store::{RevisionGraph, SnapshotStore};

use crate::error::{PipelineError, PipelineResult};

/// Tally of one [`build_revision`] call (feeds `AdvanceResult`'s per-event
/// counts).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevisionBuildOutcome {
    pub revision: Option<RevisionId>,
    pub sections_applied: usize,
    pub sections_failed: usize,
    pub structural_sections: usize,
    /// `true` if an `Ingested` revision for this law already existed and no
    /// work was performed (spec.md §4.7 step 1).
    pub was_idempotent: bool,
}

/// Builds (or returns the existing) derived revision for `law`, folding
/// `changes` through C6 section by section.
///
/// `changes` need not be pre-sorted; they are grouped by `(title, section)`
/// and, within a group, folded in ascending `change_id` order (spec.md §3).
pub fn build_revision(
    graph: &mut RevisionGraph,
    store: &mut SnapshotStore,
    parent: RevisionId,
    law: EnactedLawRef,
    effective_date: NaiveDate,
    summary: impl Into<String>,
    changes: &[LawChange],
) -> PipelineResult<RevisionBuildOutcome> {
    if let Some(existing) = graph.by_law(&law) {
        return Ok(RevisionBuildOutcome {
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
    let revision = Revision::new_derived(sequence_number, parent, effective_date, law, summary);
    let revision_id = revision.id;
    graph.insert(revision)?;

    let mut grouped: BTreeMap<SectionKey, Vec<&LawChange>> = BTreeMap::new();
    for change in changes {
        grouped.entry(change.section_key()).or_default().push(change);
    }
    for ops in grouped.values_mut() {
        ops.sort_by_key(|c| c.change_id);
    }

    let mut outcome = RevisionBuildOutcome {
        revision: Some(revision_id),
        ..Default::default()
    };

    for ((title_number, section_number), ops) in grouped {
        let parent_snapshot = store.get_section_at(graph, title_number, &section_number, parent)?;

        let mut current_text = parent_snapshot.as_ref().and_then(|s| s.text_content.clone());
        let mut any_applied = false;
        let mut any_structural = false;
        let mut repealed = false;

        for op in &ops {
            match apply(current_text.as_deref(), op) {
                ApplicationResult::Applied(new_text) => {
                    any_applied = true;
                    if matches!(op.change_type, ChangeType::Repeal) {
                        repealed = true;
                        current_text = None;
                        break;
                    }
                    current_text = new_text;
                }
                ApplicationResult::Skipped => {
                    any_structural = true;
                }
                ApplicationResult::NoChange => {}
                ApplicationResult::Failed(_) => {}
            }
        }

        let parent_provisions = parent_snapshot.as_ref().map(|s| s.normalized_provisions.clone()).unwrap_or_default();
        let owned_ops: Vec<LawChange> = ops.iter().map(|c| (*c).clone()).collect();
        let patched_provisions = patch_provisions(&parent_provisions, &owned_ops);
        let provisions_changed = patched_provisions != parent_provisions;

        if !any_applied && !any_structural && !provisions_changed {
            outcome.sections_failed += 1;
            continue;
        }

        if any_structural || provisions_changed {
            outcome.structural_sections += 1;
        }

        let heading = parent_snapshot
            .as_ref()
            .map(|s| s.heading.clone())
            .unwrap_or_else(|| section_number.clone());
        let citation = parent_snapshot
            .as_ref()
            .map(|s| s.full_citation.clone())
            .unwrap_or_else(|| full_citation(title_number, &section_number));

        let mut normalized_notes = parent_snapshot.as_ref().map(|s| s.normalized_notes.clone()).unwrap_or_default();
        let mut notes = parent_snapshot.as_ref().map(|s| s.notes.clone()).unwrap_or_default();
        push_amendment_notes(&mut normalized_notes, &mut notes, &owned_ops, effective_date);

        let snapshot = if repealed {
            SectionSnapshot::deleted(revision_id, title_number, section_number.clone(), heading, notes, normalized_notes, citation)
        } else {
            let text_content = if provisions_changed {
                uscode_core::provision::provisions_to_text(&patched_provisions)
            } else {
                current_text.clone().unwrap_or_default()
            };
            SectionSnapshot::new(
                revision_id,
                title_number,
                section_number.clone(),
                heading,
                text_content,
                patched_provisions,
                notes,
                normalized_notes,
                citation,
            )
        };

        store.write_snapshot(snapshot)?;
        outcome.sections_applied += 1;
    }

    graph.mark_ingested(revision_id)?;
    Ok(outcome)
}

/// C7.1 — after a section is touched by a law, append a citation and
/// amendment note entry for every operation that targeted it, plus any
/// `AddNote` statutory entries (spec.md §4.7.1).
fn push_amendment_notes(
    normalized_notes: &mut uscode_core::NormalizedNotes,
    notes: &mut String,
    ops: &[LawChange],
    effective_date: NaiveDate,
) {
    let year = effective_date.year();
    for op in ops {
        let description = op.description.clone().unwrap_or_else(|| "amended".to_string());
        if matches!(op.change_type, ChangeType::AddNote) {
            let text = op.new_text.clone().unwrap_or_default();
            normalized_notes.push_statutory(year, op.law, text.clone());
            notes.push_str(&uscode_core::NormalizedNotes::render_line(normalized_notes.entries.last().unwrap()));
            continue;
        }
        normalized_notes.push_amendment(year, op.law, description);
        notes.push_str(&uscode_core::NormalizedNotes::render_line(normalized_notes.entries.last().unwrap()));
    }
}
