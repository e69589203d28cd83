use chrono::NaiveDate;
use uscode_core::{ChangeType, EnactedLawRef};
use uscode_markup::{classify, parse_codified_title, parse_enacted_law_xml};

#[test]
fn strike_and_insert_round_trips_from_enacted_xml_to_classified_change() {
    let codified_xml = br#"<title identifier="/us/usc/t1">
        <num>1</num>
        <section identifier="/us/usc/t1/s101">
            <num>101</num>
            <heading>Rate</heading>
            <text>The rate shall be 5 percent.</text>
        </section>
    </title>"#;
    let parsed = parse_codified_title(codified_xml).unwrap();
    assert_eq!(parsed.sections[0].text_content, "The rate shall be 5 percent.");

    let enacted_xml = br#"<bill>
        <section>
            <text>Section <ref href="/us/usc/t1/s101">101 of title 1</ref> is amended by striking "5 percent" and inserting "10 percent".</text>
        </section>
    </bill>"#;
    let candidates = parse_enacted_law_xml(enacted_xml).unwrap();
    assert_eq!(candidates.len(), 1);

    let law = EnactedLawRef {
        congress: 113,
        law_number: 200,
    };
    let date = NaiveDate::from_ymd_opt(2014, 6, 1).unwrap();
    let classification = classify(&candidates[0], law, 1, date, None).unwrap();

    assert_eq!(classification.law_change.title_number, 1);
    assert_eq!(classification.law_change.section_number, "101");
    assert!(matches!(
        classification.law_change.change_type,
        ChangeType::Modify { needs_review: false }
    ));
    assert_eq!(classification.law_change.old_text.as_deref(), Some("5 percent"));
    assert_eq!(classification.law_change.new_text.as_deref(), Some("10 percent"));
    assert_eq!(classification.confidence, 0.98);
}

#[test]
fn repeal_instruction_produces_repeal_change_with_no_text() {
    let enacted_xml = br#"<bill>
        <section>
            <text>Section <ref href="/us/usc/t2/s5">5 of title 2</ref> is repealed.</text>
        </section>
    </bill>"#;
    let candidates = parse_enacted_law_xml(enacted_xml).unwrap();
    let law = EnactedLawRef {
        congress: 114,
        law_number: 10,
    };
    let date = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
    let classification = classify(&candidates[0], law, 1, date, None).unwrap();

    assert!(matches!(classification.law_change.change_type, ChangeType::Repeal));
    assert_eq!(classification.law_change.section_number, "5");
    assert!(classification.law_change.old_text.is_none());
}
