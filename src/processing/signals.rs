//! Keyword and pattern counts over resume text
//!
//! Term lists count distinct terms present anywhere in the text, substrings
//! included ("led" is present in "filed"). Pattern lists count every
//! non-overlapping match of every pattern.

use aho_corasick::AhoCorasick;
use log::warn;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const ACTION_VERBS: &[&str] = &[
    "developed", "implemented", "managed", "led", "created", "designed", "built", "improved",
    "increased", "decreased", "optimized", "streamlined", "coordinated", "delivered", "achieved",
    "established", "launched", "maintained", "performed", "produced", "reduced", "resolved",
    "supervised", "trained", "upgraded",
];

pub const PROFESSIONAL_KEYWORDS: &[&str] = &[
    "experience", "skills", "project", "team", "leadership", "management", "development",
    "analysis", "design", "implementation", "strategy", "collaboration", "communication",
    "problem-solving", "innovation",
];

pub const RESULTS_TERMS: &[&str] = &[
    "resulted in", "led to", "achieved", "accomplished", "delivered", "generated", "produced",
    "created", "established", "launched", "successfully", "effectively", "efficiently",
    "significantly",
];

pub const LEADERSHIP_TERMS: &[&str] = &[
    "led", "managed", "supervised", "directed", "coordinated", "oversaw", "mentored", "trained",
    "guided", "facilitated", "orchestrated",
];

pub const TECHNICAL_KEYWORDS: &[&str] = &[
    "python", "java", "javascript", "react", "node.js", "aws", "docker", "kubernetes", "sql",
    "mongodb", "machine learning", "ai", "data science", "agile", "scrum", "git", "ci/cd",
    "microservices", "api",
];

const QUANTIFIABLE_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\d+\s*percent",
    r"\$\d+",
    r"\d+\s*dollars",
    r"\d+\s*users",
    r"\d+\s*customers",
    r"\d+\s*team\s*members",
    r"\d+\s*projects",
    r"increased\s+by\s+\d+",
    r"decreased\s+by\s+\d+",
    r"reduced\s+by\s+\d+",
    r"improved\s+by\s+\d+",
    r"grew\s+by\s+\d+",
    r"expanded\s+by\s+\d+",
];

const METRIC_PATTERNS: &[&str] = &[
    r"\d+%",
    r"\$\d+",
    r"\d+\s*people",
    r"\d+\s*users",
    r"\d+\s*customers",
    r"\d+\s*projects",
    r"\d+\s*team\s*members",
    r"\d+\s*months",
    r"\d+\s*years",
];

const PERCENTAGE_PATTERN: &str = r"\d+%";
const LEADERSHIP_WORD_PATTERN: &str = r"\b(led|managed|supervised)\b";
const CORE_ACTION_WORD_PATTERN: &str = r"\b(developed|implemented|created)\b";

/// Counts derived from one resume text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSignals {
    pub word_count: usize,
    pub action_verbs: usize,
    pub quantifiable_achievements: usize,
    pub professional_keywords: usize,
    pub results_terms: usize,
    pub metrics: usize,
    pub leadership_indicators: usize,
    pub technical_keywords: usize,
    pub percentages: usize,
    pub leadership_words: usize,
    pub core_action_words: usize,
}

impl ContentSignals {
    /// Improvement priorities for thin content, most impactful first
    pub fn improvement_priorities(&self) -> Vec<&'static str> {
        let mut priorities = Vec::new();
        if self.action_verbs < 5 {
            priorities.push("Add more action verbs to make your experience more impactful");
        }
        if self.quantifiable_achievements < 3 {
            priorities.push("Include more quantifiable achievements with specific numbers");
        }
        if self.leadership_indicators < 2 {
            priorities.push("Highlight more leadership and management experience");
        }
        priorities
    }
}

/// Distinct-term presence counter
struct TermSet {
    matcher: Option<AhoCorasick>,
    len: usize,
}

impl TermSet {
    fn new(terms: &[&str]) -> Self {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(terms)
            .map_err(|e| warn!("Failed to build term matcher: {}", e))
            .ok();
        Self {
            matcher,
            len: terms.len(),
        }
    }

    fn count_present(&self, text: &str) -> usize {
        let Some(matcher) = &self.matcher else {
            return 0;
        };
        let mut seen = vec![false; self.len];
        for mat in matcher.find_overlapping_iter(text) {
            seen[mat.pattern().as_usize()] = true;
        }
        seen.into_iter().filter(|present| *present).count()
    }
}

/// Total-match counter over a list of regexes
struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    fn new(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!("Skipping content pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();
        Self { patterns }
    }

    fn count_matches(&self, text: &str) -> usize {
        self.patterns.iter().map(|p| p.find_iter(text).count()).sum()
    }
}

/// Compiled term and pattern lists, built once and reused
pub struct SignalExtractor {
    action_verbs: TermSet,
    professional_keywords: TermSet,
    results_terms: TermSet,
    leadership_terms: TermSet,
    technical_keywords: TermSet,
    quantifiable: PatternSet,
    metrics: PatternSet,
    percentages: PatternSet,
    leadership_words: PatternSet,
    core_action_words: PatternSet,
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalExtractor {
    pub fn new() -> Self {
        Self {
            action_verbs: TermSet::new(ACTION_VERBS),
            professional_keywords: TermSet::new(PROFESSIONAL_KEYWORDS),
            results_terms: TermSet::new(RESULTS_TERMS),
            leadership_terms: TermSet::new(LEADERSHIP_TERMS),
            technical_keywords: TermSet::new(TECHNICAL_KEYWORDS),
            quantifiable: PatternSet::new(QUANTIFIABLE_PATTERNS),
            metrics: PatternSet::new(METRIC_PATTERNS),
            percentages: PatternSet::new(&[PERCENTAGE_PATTERN]),
            leadership_words: PatternSet::new(&[LEADERSHIP_WORD_PATTERN]),
            core_action_words: PatternSet::new(&[CORE_ACTION_WORD_PATTERN]),
        }
    }

    pub fn extract(&self, text: &str) -> ContentSignals {
        if text.is_empty() {
            return ContentSignals::default();
        }
        let lower = text.to_lowercase();

        ContentSignals {
            word_count: text.split_whitespace().count(),
            action_verbs: self.action_verbs.count_present(&lower),
            quantifiable_achievements: self.quantifiable.count_matches(&lower),
            professional_keywords: self.professional_keywords.count_present(&lower),
            results_terms: self.results_terms.count_present(&lower),
            metrics: self.metrics.count_matches(&lower),
            leadership_indicators: self.leadership_terms.count_present(&lower),
            technical_keywords: self.technical_keywords.count_present(&lower),
            percentages: self.percentages.count_matches(&lower),
            leadership_words: self.leadership_words.count_matches(&lower),
            core_action_words: self.core_action_words.count_matches(&lower),
        }
    }
}
