//! The raw candidate tuple produced by C2 (both XML modes and the
//! plain-text fallback), consumed only by C3. The parser never classifies
//! (spec.md §4.2): it records what action tags, quoted texts, and section
//! references it found, nothing more.

use crate::actions::ActionTag;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// A reference to a US Code section, optionally scoped to a subsection
/// path, parsed from an `/us/usc/t<N>/s<S>[/path]` href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRef {
    pub title: Option<u32>,
    pub section: String,
    pub subsection_path: Option<String>,
}

fn href_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/us/usc/t(\d+)/s([0-9A-Za-z-]+)((?:/[0-9A-Za-z]+)*)").unwrap())
}

impl SectionRef {
    /// Parses a `/us/usc/t<N>/s<S>[/path]` href, as emitted by `<ref>`
    /// elements in enacted-law markup.
    pub fn parse_href(href: &str) -> Option<SectionRef> {
        let caps = href_pattern().captures(href)?;
        let title = caps.get(1)?.as_str().parse().ok();
        let section = caps.get(2)?.as_str().to_string();
        let path = caps.get(3).map(|m| m.as_str()).unwrap_or("");
        let subsection_path = if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        };
        Some(SectionRef {
            title,
            section,
            subsection_path,
        })
    }
}

/// One candidate amendment instruction: a raw tuple of action tags, quoted
/// texts (document order), section references, surrounding context, and a
/// character offset into the source (spec.md §4.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendmentCandidate {
    pub actions: BTreeSet<ActionTag>,
    pub quoted_texts: Vec<String>,
    pub section_refs: Vec<SectionRef>,
    pub context: String,
    pub char_offset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_href_with_subsection() {
        let r = SectionRef::parse_href("/us/usc/t17/s106/a/1").unwrap();
        assert_eq!(r.title, Some(17));
        assert_eq!(r.section, "106");
        assert_eq!(r.subsection_path.as_deref(), Some("/a/1"));
    }

    #[test]
    fn parses_href_without_subsection() {
        let r = SectionRef::parse_href("/us/usc/t1/s101").unwrap();
        assert_eq!(r.title, Some(1));
        assert_eq!(r.section, "101");
        assert_eq!(r.subsection_path, None);
    }
}
