//! The three-tier text-matching cascade shared by [`crate::text_apply`] and
//! [`crate::provision_apply`] (spec.md §4.6): exact substring, then
//! whitespace-normalised, then case-insensitive whitespace-normalised.
//! Replaces the first occurrence only.

use regex::RegexBuilder;

/// Finds and replaces the first occurrence of `old` in `haystack`, trying
/// each tier in turn. Returns `None` if no tier matches.
pub fn find_and_replace(haystack: &str, old: &str, new: &str) -> Option<String> {
    if old.is_empty() {
        return None;
    }
    if let Some(pos) = haystack.find(old) {
        let mut result = String::with_capacity(haystack.len() - old.len() + new.len());
        result.push_str(&haystack[..pos]);
        result.push_str(new);
        result.push_str(&haystack[pos + old.len()..]);
        return Some(result);
    }
    whitespace_normalized_replace(haystack, old, new, false).or_else(|| whitespace_normalized_replace(haystack, old, new, true))
}

/// `true` if `old` can be located in `haystack` by any tier, without
/// performing the replacement.
pub fn contains(haystack: &str, old: &str) -> bool {
    !old.is_empty() && find_and_replace(haystack, old, "").is_some()
}

fn whitespace_normalized_replace(haystack: &str, needle: &str, replacement: &str, case_insensitive: bool) -> Option<String> {
    let pattern = whitespace_tolerant_pattern(needle);
    let re = RegexBuilder::new(&pattern).case_insensitive(case_insensitive).build().ok()?;
    let m = re.find(haystack)?;
    let mut result = String::with_capacity(haystack.len());
    result.push_str(&haystack[..m.start()]);
    result.push_str(replacement);
    result.push_str(&haystack[m.end()..]);
    Some(result)
}

fn whitespace_tolerant_pattern(needle: &str) -> String {
    needle.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+")
}
