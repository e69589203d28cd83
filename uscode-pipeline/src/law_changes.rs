//! Bridges the enacted-law fetcher/parser/classifier (`uscode-markup`, C2–C3)
//! into the `[LawChange]` list C7 consumes (spec.md §4.10 step 3, "Enacted-law
//! event": "ensure LawChange records exist for this law (trigger external
//! parsing pipeline if absent; tolerate failure — continue with whatever
//! LawChanges exist)").

use chrono::NaiveDate;
use uscode_core::{EnactedLawRef, LawChange};
use uscode_markup::{classify, parse_enacted_law_xml, scan_plain_text, EnactedLawFetcher, LawTextFormat};

/// Fetches and classifies one enacted law's text into `LawChange`s. A
/// missing or malformed document yields an empty list rather than an error
/// — per spec.md §7's `ParseError` policy, the core continues with whatever
/// was produced, never aborting the event over a parse failure.
pub async fn gather_law_changes(
    law: EnactedLawRef,
    effective_date: NaiveDate,
    fetcher: &dyn EnactedLawFetcher,
) -> Vec<LawChange> {
    let candidates = match fetcher.fetch_law_text(law.congress, law.law_number, LawTextFormat::Xml).await {
        Ok(Some(text)) => match parse_enacted_law_xml(text.as_bytes()) {
            Ok(candidates) => candidates,
            Err(_) => scan_plain_text(&text),
        },
        Ok(None) => match fetcher.fetch_law_text(law.congress, law.law_number, LawTextFormat::Htm).await {
            Ok(Some(text)) => scan_plain_text(&text),
            Ok(None) => return Vec::new(),
            Err(_) => return Vec::new(),
        },
        Err(_) => return Vec::new(),
    };

    candidates
        .iter()
        .enumerate()
        .filter_map(|(i, candidate)| {
            classify(candidate, law, i as u64 + 1, effective_date, None).map(|c| c.law_change)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uscode_markup::fixtures::InMemoryLawFetcher;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()
    }

    fn law() -> EnactedLawRef {
        EnactedLawRef {
            congress: 113,
            law_number: 21,
        }
    }

    #[tokio::test]
    async fn parses_and_classifies_xml_law_text() {
        let fetcher = InMemoryLawFetcher::new();
        fetcher.insert(
            113,
            21,
            LawTextFormat::Xml,
            r#"<bill><section><text>Section <ref href="/us/usc/t1/s101">101 of title 1</ref> is amended by striking "5 percent" and inserting "10 percent".</text></section></bill>"#,
        );
        let changes = gather_law_changes(law(), date(), &fetcher).await;
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].title_number, 1);
        assert_eq!(changes[0].section_number, "101");
    }

    #[tokio::test]
    async fn falls_back_to_htm_when_xml_absent() {
        let fetcher = InMemoryLawFetcher::new();
        fetcher.insert(113, 21, LawTextFormat::Htm, "Section 101 is repealed.");
        let changes = gather_law_changes(law(), date(), &fetcher).await;
        // plain-text scanning resolves no section_refs, so classify() drops it.
        assert!(changes.is_empty());
    }

    #[tokio::test]
    async fn unpublished_law_yields_no_changes() {
        let fetcher = InMemoryLawFetcher::new();
        let changes = gather_law_changes(law(), date(), &fetcher).await;
        assert!(changes.is_empty());
    }
}
