//! Candidate profile extraction: contact details, name, education lines
//! and basic text statistics

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const NAME_SCAN_LINES: usize = 10;
const PROMINENT_LINE_SCAN_LINES: usize = 15;
const MAX_NAME_LENGTH: usize = 50;

const NAME_SKIP_WORDS: &[&str] = &["resume", "cv", "phone", "email", "@", "www", "http"];
const PROMINENT_LINE_SKIP_WORDS: &[&str] = &["objective", "summary"];
const NON_PERSONAL_SITES: &[&str] = &["linkedin.com", "github.com", "gmail.com", "yahoo.com"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactLinks {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    pub character_count: usize,
    pub average_words_per_sentence: f64,
    pub has_email: bool,
    pub has_phone: bool,
    pub has_links: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contact: ContactLinks,
    pub education: Vec<String>,
    pub statistics: TextStatistics,
}

pub struct ProfileExtractor {
    email_regex: Regex,
    phone_regexes: Vec<Regex>,
    name_regexes: Vec<Regex>,
    linkedin_regex: Regex,
    github_regex: Regex,
    website_regex: Regex,
    link_regex: Regex,
    education_keyword_regex: Regex,
    education_indicator_regexes: Vec<Regex>,
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileExtractor {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
            .expect("Invalid email regex");

        // US, international, then bare US
        let phone_regexes = [
            r"\+?1?[-.\s]?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
            r"\+?[0-9]{1,3}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,4}[-.\s]?[0-9]{1,4}",
            r"\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid phone regex"))
        .collect();

        let name_regexes = [
            r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$",
            r"^[A-Z][a-z]+\s+[A-Z]\.?\s*[A-Z][a-z]+$",
            r"^[A-Z][a-z]+\s+[A-Z][a-z]+$",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid name regex"))
        .collect();

        let linkedin_regex = Regex::new(r"(?:linkedin\.com/in/|linkedin\.com/company/)[a-zA-Z0-9-]+")
            .expect("Invalid LinkedIn regex");
        let github_regex = Regex::new(r"github\.com/[a-zA-Z0-9-]+").expect("Invalid GitHub regex");
        let website_regex = Regex::new(r"(?:https?://)?(?:www\.)?[a-zA-Z0-9-]+\.[a-zA-Z]{2,}(?:/\S*)?")
            .expect("Invalid website regex");
        let link_regex = Regex::new(r"https?://").expect("Invalid URL regex");

        let education_keyword_regex = Regex::new(
            r"(?i)education|degree|bachelor|master|phd|doctorate|university|college|school|institute|academy",
        )
        .expect("Invalid education keyword regex");

        let education_indicator_regexes = [
            r"(?i)(?:Bachelor|Master|PhD|Doctorate|Associate)\s+(?:of|in)\s+[A-Za-z\s]+",
            r"(?i)[A-Za-z]+\s+(?:University|College|Institute|School)",
            r"\d{4}",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid education regex"))
        .collect();

        Self {
            email_regex,
            phone_regexes,
            name_regexes,
            linkedin_regex,
            github_regex,
            website_regex,
            link_regex,
            education_keyword_regex,
            education_indicator_regexes,
        }
    }

    pub fn extract(&self, text: &str) -> CandidateProfile {
        if text.is_empty() {
            return CandidateProfile::default();
        }

        let profile = CandidateProfile {
            name: self.extract_name(text),
            email: self.email_regex.find(text).map(|m| m.as_str().to_string()),
            phone: self.extract_phone(text),
            contact: self.extract_contact_links(text),
            education: self.extract_education(text),
            statistics: self.text_statistics(text),
        };
        debug!(
            "Profile: name={:?}, email={:?}, {} education lines",
            profile.name,
            profile.email,
            profile.education.len()
        );
        profile
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regexes
            .iter()
            .find_map(|regex| regex.find(text))
            .map(|m| m.as_str().trim().to_string())
    }

    /// Capitalized-name lines first, then the most prominent short title-case line
    pub fn extract_name(&self, text: &str) -> Option<String> {
        let candidate_lines = |limit: usize| {
            text.split('\n')
                .take(limit)
                .map(str::trim)
                .filter(|line| line.chars().count() >= 3)
        };

        let by_pattern = candidate_lines(NAME_SCAN_LINES)
            .filter(|line| !contains_any(&line.to_lowercase(), NAME_SKIP_WORDS))
            .find_map(|line| {
                self.name_regexes
                    .iter()
                    .filter_map(|regex| regex.find(line))
                    .map(|m| m.as_str())
                    .find(|name| name.split_whitespace().count() >= 2 && name.len() < MAX_NAME_LENGTH)
            });
        if let Some(name) = by_pattern {
            return Some(name.trim().to_string());
        }

        candidate_lines(PROMINENT_LINE_SCAN_LINES)
            .filter(|line| {
                let lower = line.to_lowercase();
                !contains_any(&lower, NAME_SKIP_WORDS) && !contains_any(&lower, PROMINENT_LINE_SKIP_WORDS)
            })
            .find(|line| {
                let words: Vec<&str> = line.split_whitespace().collect();
                let capitalized = words
                    .iter()
                    .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
                    .count();
                (2..=4).contains(&words.len()) && capitalized as f64 >= words.len() as f64 * 0.8
            })
            .map(str::to_string)
    }

    pub fn extract_contact_links(&self, text: &str) -> ContactLinks {
        let website = self
            .website_regex
            .find_iter(text)
            // Domain fragments of an email address are not websites
            .filter(|m| !text[..m.start()].ends_with('@') && !text[m.end()..].starts_with('@'))
            .map(|m| m.as_str())
            .find(|site| !contains_any(&site.to_lowercase(), NON_PERSONAL_SITES))
            .map(str::to_string);

        ContactLinks {
            linkedin: self.linkedin_regex.find(text).map(|m| m.as_str().to_string()),
            github: self.github_regex.find(text).map(|m| m.as_str().to_string()),
            website,
        }
    }

    /// Lines after the first education keyword that carry at least two of:
    /// a degree phrase, an institution phrase, a year
    pub fn extract_education(&self, text: &str) -> Vec<String> {
        let mut in_section = false;
        let mut lines = Vec::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let indicators = self
                .education_indicator_regexes
                .iter()
                .filter(|regex| regex.is_match(line))
                .count();

            if self.education_keyword_regex.is_match(line) {
                in_section = true;
                // A bare heading opens the section; a detailed line is also an entry
                if indicators < 2 {
                    continue;
                }
            }
            if in_section && indicators >= 2 {
                lines.push(line.to_string());
            }
        }
        lines
    }

    pub fn text_statistics(&self, text: &str) -> TextStatistics {
        if text.is_empty() {
            return TextStatistics::default();
        }

        let word_count = text.split_whitespace().count();
        let sentence_count = text
            .unicode_sentences()
            .filter(|s| s.chars().any(char::is_alphanumeric))
            .count();
        let average_words_per_sentence = if sentence_count > 0 {
            word_count as f64 / sentence_count as f64
        } else {
            0.0
        };

        TextStatistics {
            word_count,
            sentence_count,
            character_count: text.chars().count(),
            average_words_per_sentence,
            has_email: self.email_regex.is_match(text),
            has_phone: self.phone_regexes[0].is_match(text),
            has_links: self.link_regex.is_match(text),
        }
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
