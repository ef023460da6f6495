//! Context-derived confidence for skill mentions
//!
//! A mention starts at a neutral baseline and every context rule whose
//! pattern occurs near the mention nudges it up or down. Rules are applied
//! in table order and the running value is clamped to `[0, 1]` after each
//! individual adjustment, so the order of the table is part of the result.

use log::warn;
use regex::Regex;
use std::collections::HashMap;

/// Confidence before any context is considered
pub const BASELINE_CONFIDENCE: f64 = 0.5;

/// Characters inspected on either side of a mention
pub const CONTEXT_RADIUS: usize = 100;

/// Characters kept on either side of a mention as evidence
pub const SNIPPET_RADIUS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStrength {
    High,
    Medium,
    Low,
}

impl ContextStrength {
    pub fn adjustment(&self) -> f64 {
        match self {
            ContextStrength::High => 0.3,
            ContextStrength::Medium => 0.1,
            ContextStrength::Low => -0.2,
        }
    }
}

/// Ordered: every high rule, then medium, then low
const CONTEXT_RULES: &[(ContextStrength, &str)] = &[
    (ContextStrength::High, r"\b(proficient|expert|advanced|skilled|experienced)\s+(in|with)\b"),
    (ContextStrength::High, r"\b(developed|built|created|implemented)\s+(using|with)\b"),
    (ContextStrength::High, r"\b(worked\s+with|used|applied)\b"),
    (ContextStrength::High, r"\b(years?\s+of\s+experience)\s+(in|with)\b"),
    (ContextStrength::Medium, r"\b(familiar|basic|intermediate|knowledge)\s+(of|with)\b"),
    (ContextStrength::Medium, r"\b(learned|studied|trained)\s+(in|on)\b"),
    (ContextStrength::Medium, r"\b(used|utilized)\b"),
    (ContextStrength::Low, r"\b(heard\s+of|aware\s+of|know\s+about)\b"),
    (ContextStrength::Low, r"\b(maybe|possibly|might)\b"),
];

/// Bonus for each collocation of a specific skill found in the window
pub const COLLOCATION_BONUS: f64 = 0.2;

const SKILL_COLLOCATIONS: &[(&str, &[&str])] = &[
    ("python", &[r"python\s+script", r"python\s+application", r"python\s+framework"]),
    ("react", &[r"react\s+component", r"react\s+application", r"react\s+hooks"]),
    ("aws", &[r"aws\s+service", r"aws\s+cloud", r"aws\s+deployment"]),
    ("docker", &[r"docker\s+container", r"docker\s+image", r"docker\s+compose"]),
    ("sql", &[r"sql\s+query", r"sql\s+database", r"sql\s+optimization"]),
];

struct ContextRule {
    pattern: Regex,
    adjustment: f64,
}

/// Compiled context rules, shareable across threads
pub struct ConfidenceScorer {
    rules: Vec<ContextRule>,
    collocations: HashMap<&'static str, Vec<Regex>>,
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceScorer {
    pub fn new() -> Self {
        let rules = CONTEXT_RULES
            .iter()
            .filter_map(|(strength, pattern)| {
                compile(pattern).map(|pattern| ContextRule {
                    pattern,
                    adjustment: strength.adjustment(),
                })
            })
            .collect();

        let collocations = SKILL_COLLOCATIONS
            .iter()
            .map(|(skill, patterns)| {
                (*skill, patterns.iter().filter_map(|p| compile(p)).collect())
            })
            .collect();

        Self { rules, collocations }
    }

    /// Confidence for a mention of `skill` starting at byte offset `position`
    pub fn score(&self, text: &str, skill: &str, position: usize) -> f64 {
        let window = char_window(text, position, position, CONTEXT_RADIUS, CONTEXT_RADIUS);
        self.score_context(&window.to_lowercase(), skill)
    }

    /// Fold every matching rule over the baseline; `context` must be lower-case
    pub fn score_context(&self, context: &str, skill: &str) -> f64 {
        let after_rules = self
            .rules
            .iter()
            .filter(|rule| rule.pattern.is_match(context))
            .fold(BASELINE_CONFIDENCE, |confidence, rule| {
                (confidence + rule.adjustment).clamp(0.0, 1.0)
            });

        match self.collocations.get(skill.to_lowercase().as_str()) {
            Some(patterns) => patterns
                .iter()
                .filter(|p| p.is_match(context))
                .fold(after_rules, |confidence, _| {
                    (confidence + COLLOCATION_BONUS).clamp(0.0, 1.0)
                }),
            None => after_rules,
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping context pattern '{}': {}", pattern, e);
            None
        }
    }
}

/// Lower-case `text` without moving any byte offset.
///
/// Characters whose lower-case form has a different UTF-8 length (or
/// expands to several characters) are left untouched, so offsets found in
/// the result are valid in the input text too.
pub fn lowercase_aligned(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}

/// Slice of `text` from `before` characters ahead of `start` to `after`
/// characters past `end`, clamped to the text bounds. Offsets are byte
/// offsets on character boundaries.
pub fn char_window(text: &str, start: usize, end: usize, before: usize, after: usize) -> &str {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .nth(before.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let window_start = if before == 0 { start } else { window_start };

    let window_end = text[end..]
        .char_indices()
        .nth(after)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    &text[window_start..window_end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_without_context() {
        let scorer = ConfidenceScorer::new();
        assert_eq!(scorer.score_context("rust", "rust"), BASELINE_CONFIDENCE);
    }

    #[test]
    fn test_high_confidence_context() {
        let scorer = ConfidenceScorer::new();
        let confidence = scorer.score_context("proficient in rust", "rust");
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_used_fires_high_and_medium_rules() {
        let scorer = ConfidenceScorer::new();
        // +0.3 (used) then +0.1 (used)
        let confidence = scorer.score_context("used kotlin daily", "kotlin");
        assert!((confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_clamping_happens_after_each_step() {
        let scorer = ConfidenceScorer::new();
        // Three high rules saturate at 1.0, the medium "used" rule stays at
        // 1.0, then one low rule takes it to 0.8.
        let context = "expert in go, built with go, used go, maybe";
        let confidence = scorer.score_context(context, "go");
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_low_confidence_context() {
        let scorer = ConfidenceScorer::new();
        let confidence = scorer.score_context("i have heard of haskell", "haskell");
        assert!((confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_skill_collocation_bonus() {
        let scorer = ConfidenceScorer::new();
        let confidence = scorer.score_context("wrote a python script and a python application", "Python");
        assert!((confidence - 0.9).abs() < 1e-9);
        // Collocations only apply to their own skill
        assert_eq!(scorer.score_context("python script", "ruby"), BASELINE_CONFIDENCE);
    }

    #[test]
    fn test_confidence_stays_in_bounds() {
        let scorer = ConfidenceScorer::new();
        let texts = [
            "heard of aware of know about maybe possibly might",
            "proficient in built with worked with 5 years of experience in used utilized python script python framework python application",
            "",
        ];
        for text in texts {
            let confidence = scorer.score_context(text, "python");
            assert!((0.0..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn test_char_window_clamps_to_bounds() {
        let text = "abcdefghij";
        assert_eq!(char_window(text, 5, 5, 2, 2), "defg");
        assert_eq!(char_window(text, 1, 2, 50, 50), text);
        assert_eq!(char_window(text, 3, 4, 0, 0), "d");
    }

    #[test]
    fn test_lowercase_aligned_keeps_offsets() {
        let text = "Senior RUST Dev \u{212A}elvin İstanbul";
        let lower = lowercase_aligned(text);
        assert_eq!(lower.len(), text.len());
        assert!(lower.starts_with("senior rust dev"));
        assert_eq!(&text[text.find("RUST").unwrap()..][..4], "RUST");
        assert_eq!(&lower[text.find("RUST").unwrap()..][..4], "rust");
    }

    #[test]
    fn test_char_window_respects_multibyte_chars() {
        let text = "résumé: rust";
        let position = text.find("rust").unwrap();
        assert_eq!(char_window(text, position, position + 4, 2, 0), ": rust");
    }
}
