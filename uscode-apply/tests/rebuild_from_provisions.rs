use chrono::NaiveDate;
use uscode_apply::{apply, patch_provisions, ApplicationResult};
use uscode_core::{provision::provisions_to_text, ChangeType, EnactedLawRef, LawChange, ProvisionLine};

fn op(change_type: ChangeType, old: Option<&str>, new: Option<&str>, description: Option<&str>) -> LawChange {
    LawChange {
        change_id: 1,
        law: EnactedLawRef {
            congress: 113,
            law_number: 5,
        },
        title_number: 1,
        section_number: "101".into(),
        change_type,
        old_text: old.map(String::from),
        new_text: new.map(String::from),
        effective_date: NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
        description: description.map(String::from),
        subsection_path: None,
        position_hint: None,
    }
}

#[test]
fn structural_splice_not_found_in_flat_text_is_recovered_from_provisions() {
    let provisions = vec![
        ProvisionLine::new("(a)", 1, false, "In general."),
        ProvisionLine::new("(b)", 1, false, "Exceptions."),
    ];
    let flat_text = provisions_to_text(&provisions);

    let change = op(
        ChangeType::Modify { needs_review: true },
        None,
        Some("(b) Revised exceptions, narrowly construed."),
        Some("by striking subsection (b) and inserting the following:"),
    );

    let text_result = apply(Some(&flat_text), &change);
    assert!(matches!(text_result, ApplicationResult::Failed(_)));

    let patched = patch_provisions(&provisions, std::slice::from_ref(&change));
    assert_eq!(patched.len(), 2);
    assert_eq!(patched[1].content, "Revised exceptions, narrowly construed.");

    let rebuilt_text = provisions_to_text(&patched);
    assert_eq!(rebuilt_text, "In general.\nRevised exceptions, narrowly construed.");
}
