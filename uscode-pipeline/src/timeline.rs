//! C8: merges release-point and enacted-law events into one chronological
//! stream (spec.md §4.8).

use chrono::NaiveDate;
use uscode_core::{EnactedLawRef, ReleasePointTag};
use uscode_markup::ReleasePointEntry;

/// One row of an external enacted-law directory: a law's existence and its
/// enactment date, independent of whether C3 has produced `LawChange`s for
/// it yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnactedLawEvent {
    pub congress: u32,
    pub law_number: u32,
    pub date: NaiveDate,
}

impl EnactedLawEvent {
    pub fn law_ref(&self) -> EnactedLawRef {
        EnactedLawRef {
            congress: self.congress,
            law_number: self.law_number,
        }
    }
}

/// One entry in the merged timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Enacted {
        congress: u32,
        law_number: u32,
        date: NaiveDate,
    },
    GroundTruth {
        tag: ReleasePointTag,
        congress: u32,
        primary_law_number: u32,
        date: NaiveDate,
        deferred_laws: Vec<u32>,
    },
}

impl Event {
    pub fn date(&self) -> NaiveDate {
        match self {
            Event::Enacted { date, .. } => *date,
            Event::GroundTruth { date, .. } => *date,
        }
    }

    fn type_order(&self) -> u8 {
        match self {
            Event::Enacted { .. } => 0,
            Event::GroundTruth { .. } => 1,
        }
    }

    fn congress(&self) -> u32 {
        match self {
            Event::Enacted { congress, .. } => *congress,
            Event::GroundTruth { congress, .. } => *congress,
        }
    }

    fn law_number_sort_key(&self) -> u32 {
        match self {
            Event::Enacted { law_number, .. } => *law_number,
            Event::GroundTruth { primary_law_number, .. } => *primary_law_number,
        }
    }

    fn sort_key(&self) -> (NaiveDate, u8, u32, u32) {
        (self.date(), self.type_order(), self.congress(), self.law_number_sort_key())
    }
}

/// Builds the merged, sorted event stream from a release-point registry
/// listing and an enacted-law directory listing.
pub struct TimelineBuilder {
    release_points: Vec<ReleasePointEntry>,
    laws: Vec<EnactedLawEvent>,
}

impl TimelineBuilder {
    pub fn new(release_points: Vec<ReleasePointEntry>, laws: Vec<EnactedLawEvent>) -> Self {
        Self { release_points, laws }
    }

    /// Builds the full merged event stream, optionally bounded to
    /// `[start_congress, end_congress]` (inclusive; `end_congress = None`
    /// means unbounded above).
    pub fn build(&self, start_congress: u32, end_congress: Option<u32>) -> Vec<Event> {
        let mut events: Vec<Event> = Vec::new();

        for entry in &self.release_points {
            if entry.meta.congress < start_congress || end_congress.is_some_and(|end| entry.meta.congress > end) {
                continue;
            }
            let Some(date) = entry.meta.publication_date else {
                continue;
            };
            events.push(Event::GroundTruth {
                tag: entry.tag.clone(),
                congress: entry.meta.congress,
                primary_law_number: entry.meta.primary_law_number,
                date,
                deferred_laws: entry.meta.deferred_laws.clone(),
            });
        }

        for law in &self.laws {
            if law.congress < start_congress || end_congress.is_some_and(|end| law.congress > end) {
                continue;
            }
            events.push(Event::Enacted {
                congress: law.congress,
                law_number: law.law_number,
                date: law.date,
            });
        }

        events.sort_by_key(|e| e.sort_key());
        events
    }

    /// Events from `tag_a` inclusive through `tag_b` inclusive, in timeline
    /// order. Returns an empty list if either tag is unknown.
    pub fn between(&self, tag_a: &ReleasePointTag, tag_b: &ReleasePointTag) -> Vec<Event> {
        let full = self.build(0, None);
        let start = full.iter().position(|e| matches!(e, Event::GroundTruth { tag, .. } if tag == tag_a));
        let end = full.iter().position(|e| matches!(e, Event::GroundTruth { tag, .. } if tag == tag_b));
        match (start, end) {
            (Some(s), Some(e)) if s <= e => full[s..=e].to_vec(),
            _ => Vec::new(),
        }
    }

    /// Every `(congress, law_number)` named in any upcoming release point's
    /// `deferred_laws`, used by the play-forward engine to skip events
    /// (spec.md §4.10 step 2).
    pub fn deferred_law_numbers(events: &[Event]) -> std::collections::HashSet<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::GroundTruth { deferred_laws, .. } => Some(deferred_laws.iter().copied()),
                Event::Enacted { .. } => None,
            })
            .flatten()
            .collect()
    }
}
