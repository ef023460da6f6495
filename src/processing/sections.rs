//! Resume section types and header detection

use log::debug;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named resume division. Declaration order is the reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Summary,
    Experience,
    Education,
    Projects,
    Certifications,
    Skills,
    Achievements,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
        Section::Skills,
        Section::Achievements,
    ];

    /// Sections whose headers the detector looks for
    pub const DETECTABLE: [Section; 5] = [
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Skills => "skills",
            Section::Achievements => "achievements",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }

    /// Header pattern, anchored at line start with optional indentation
    fn header_pattern(&self) -> Option<&'static str> {
        match self {
            Section::Summary => Some(r"^\s*(professional\s+)?summary\b"),
            Section::Experience => {
                Some(r"^\s*(work\s+)?experience\b|^\s*professional\s+experience\b")
            }
            Section::Education => Some(r"^\s*education\b"),
            Section::Projects => Some(r"^\s*projects\b"),
            Section::Certifications => {
                Some(r"^\s*certifications\b|^\s*licenses\s*(?:&\s*certifications)?\b")
            }
            Section::Skills | Section::Achievements => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Summary => write!(f, "Summary"),
            Section::Experience => write!(f, "Experience"),
            Section::Education => write!(f, "Education"),
            Section::Projects => write!(f, "Projects"),
            Section::Certifications => write!(f, "Certifications"),
            Section::Skills => write!(f, "Skills"),
            Section::Achievements => write!(f, "Achievements"),
        }
    }
}

/// Which sections a resume contains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionPresenceMap(BTreeMap<Section, bool>);

impl SectionPresenceMap {
    /// Every detectable section, all absent
    pub fn empty() -> Self {
        Self(Section::DETECTABLE.iter().map(|s| (*s, false)).collect())
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Section, bool)>,
    {
        Self(entries.into_iter().collect())
    }

    /// Untracked sections count as absent
    pub fn is_present(&self, section: Section) -> bool {
        self.0.get(&section).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, bool)> + '_ {
        self.0.iter().map(|(section, present)| (*section, *present))
    }

    pub fn present(&self) -> impl Iterator<Item = Section> + '_ {
        self.iter().filter(|(_, present)| *present).map(|(section, _)| section)
    }

    pub fn count_present(&self, sections: &[Section]) -> usize {
        sections.iter().filter(|s| self.is_present(**s)).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Line-anchored header matcher
pub struct SectionDetector {
    patterns: Vec<(Section, Regex)>,
}

impl Default for SectionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDetector {
    pub fn new() -> Self {
        let patterns = Section::DETECTABLE
            .iter()
            .filter_map(|section| section.header_pattern().map(|p| (*section, p)))
            .map(|(section, pattern)| {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .multi_line(true)
                    .build()
                    .expect("Invalid section header regex");
                (section, regex)
            })
            .collect();

        Self { patterns }
    }

    /// Presence detection only: no ordering, counting or boundaries
    pub fn detect(&self, text: &str) -> SectionPresenceMap {
        let map = SectionPresenceMap::from_entries(
            self.patterns
                .iter()
                .map(|(section, regex)| (*section, regex.is_match(text))),
        );
        debug!(
            "Sections detected: {:?}",
            map.present().map(|s| s.key()).collect::<Vec<_>>()
        );
        map
    }
}

/// Convenience wrapper around a default [`SectionDetector`]
pub fn detect_sections(text: &str) -> SectionPresenceMap {
    SectionDetector::new().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_sections() {
        let map = detect_sections("");
        assert_eq!(map.len(), 5);
        assert!(map.iter().all(|(_, present)| !present));
    }

    #[test]
    fn test_section_detection() {
        let text = "John Doe\n\nProfessional Summary\nBackend engineer\n\n  Work Experience\nAcme Corp\n\nEDUCATION\nBSc";
        let map = detect_sections(text);

        assert!(map.is_present(Section::Summary));
        assert!(map.is_present(Section::Experience));
        assert!(map.is_present(Section::Education));
        assert!(!map.is_present(Section::Projects));
        assert!(!map.is_present(Section::Certifications));
    }

    #[test]
    fn test_headers_must_start_the_line() {
        let text = "I have ten years of experience\nMy education was great";
        let map = detect_sections(text);

        assert!(!map.is_present(Section::Experience));
        assert!(!map.is_present(Section::Education));
    }

    #[test]
    fn test_licenses_count_as_certifications() {
        let map = detect_sections("Licenses & Certifications\nAWS SAA");
        assert!(map.is_present(Section::Certifications));
    }

    #[test]
    fn test_untracked_sections_are_absent() {
        let map = detect_sections("Skills\nRust");
        assert!(!map.is_present(Section::Skills));
        assert!(!map.is_present(Section::Achievements));
    }

    #[test]
    fn test_iteration_follows_section_order() {
        let map = detect_sections("Projects\nSummary");
        let order: Vec<Section> = map.iter().map(|(s, _)| s).collect();
        assert_eq!(order, Section::DETECTABLE.to_vec());
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Section::from_key("Experience"), Some(Section::Experience));
        assert_eq!(Section::from_key("hobbies"), None);
    }
}
