/// Synthesizes a `full_citation` for a new section from its title and
/// section number, used by C7 when no parent snapshot exists to inherit
/// a citation from.
pub fn full_citation(title_number: u32, section_number: &str) -> String {
    format!("{title_number} U.S.C. § {section_number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_title_and_section() {
        assert_eq!(full_citation(42, "1395w-3a"), "42 U.S.C. § 1395w-3a");
    }
}
