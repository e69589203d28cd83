use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use uscode_core::{ChangeType, EnactedLawRef, LawChange, NormalizedNotes, Revision, SectionSnapshot};
use uscode_pipeline::build_revision;
use uscode_store::{RevisionGraph, SnapshotStore};

fn date(y: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
}

fn bootstrap_with_sections(sections: usize) -> (RevisionGraph, SnapshotStore, uscode_core::RevisionId) {
    let mut graph = RevisionGraph::new();
    let mut store = SnapshotStore::new();
    let root = graph.insert_bootstrap(Revision::bootstrap(date(2000), "bootstrap")).unwrap();
    for i in 0..sections {
        store
            .write_snapshot(SectionSnapshot::new(
                root,
                1,
                i.to_string(),
                "Heading",
                "The rate shall be 5 percent.",
                vec![],
                "",
                NormalizedNotes::default(),
                "citation",
            ))
            .unwrap();
    }
    graph.mark_ingested(root).unwrap();
    (graph, store, root)
}

fn changes_touching(sections: usize, law: EnactedLawRef) -> Vec<LawChange> {
    (0..sections)
        .map(|i| LawChange {
            change_id: 1,
            law,
            title_number: 1,
            section_number: i.to_string(),
            change_type: ChangeType::Modify { needs_review: false },
            old_text: Some("5 percent".to_string()),
            new_text: Some("10 percent".to_string()),
            effective_date: date(2014),
            description: Some("striking \"5 percent\" and inserting \"10 percent\"".to_string()),
            subsection_path: None,
            position_hint: None,
        })
        .collect()
}

fn bench_build_revision(c: &mut Criterion) {
    let law = EnactedLawRef {
        congress: 113,
        law_number: 21,
    };
    let changes = changes_touching(100, law);

    c.bench_function("build_revision 1000 sections, 100 touched", |b| {
        b.iter_batched(
            || bootstrap_with_sections(1000),
            |(mut graph, mut store, root)| build_revision(&mut graph, &mut store, root, law, date(2014), "law", black_box(&changes)).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build_revision);
criterion_main!(benches);
