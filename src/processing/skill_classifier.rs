//! Skill classification against a taxonomy with context-derived confidence
//!
//! Classification runs two passes over the lower-cased text. The literal
//! pass looks for every taxonomy skill as a whole word; the pattern pass
//! runs a broader table of category patterns that also catches aliases and
//! phrases ("typescript", "deployed on aws"). Each candidate mention gets a
//! confidence from [`ConfidenceScorer`] and is kept only above the pass
//! threshold, at most once per category.

use crate::processing::confidence::{
    char_window, lowercase_aligned, ConfidenceScorer, SNIPPET_RADIUS,
};
use crate::processing::taxonomy::{CategoryMap, SkillTaxonomy};
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minimum confidence for a literal taxonomy mention
pub const LITERAL_THRESHOLD: f64 = 0.6;

/// Minimum confidence for a pattern-table mention
pub const PATTERN_THRESHOLD: f64 = 0.5;

const MAX_GAPS_PER_CATEGORY: usize = 5;
const WEAK_CATEGORY_SIZE: usize = 3;

const PATTERN_TABLE: &[(&str, &[&str])] = &[
    (
        "Programming Languages",
        &[
            r"\b(python|java|javascript|js|c\+\+|c#|golang|go|rust|swift|kotlin|php|ruby|scala|typescript|ts)\b",
            r"\b(programming|coding|development)\s+(in\s+)?(python|java|javascript|js|c\+\+|c#|golang|go|rust|swift|kotlin|php|ruby|scala|typescript|ts)\b",
            r"\b(wrote|developed|built|created)\s+(in\s+)?(python|java|javascript|js|c\+\+|c#|golang|go|rust|swift|kotlin|php|ruby|scala|typescript|ts)\b",
        ],
    ),
    (
        "Web & Frontend",
        &[
            r"\b(html|css|sass|scss|less|react|angular|vue|next\.js|jquery|bootstrap|tailwind|material-ui|mui)\b",
            r"\b(frontend|front-end|front\s+end|web\s+development|ui/ux|user\s+interface)\b",
            r"\b(built|developed|created)\s+(web|frontend|ui)\s+(using\s+)?(html|css|react|angular|vue)\b",
        ],
    ),
    (
        "Backend & Frameworks",
        &[
            r"\b(node\.js|nodejs|express|django|flask|spring|ruby\s+on\s+rails|rails|\.net|fastapi|laravel|asp\.net)\b",
            r"\b(backend|back-end|back\s+end|api\s+development|server-side|server\s+side)\b",
            r"\b(developed|built|created)\s+(api|backend|server)\s+(using\s+)?(node|express|django|flask|spring)\b",
        ],
    ),
    (
        "Databases",
        &[
            r"\b(sql|mysql|postgresql|postgres|mongodb|redis|sqlite|oracle|cassandra|dynamodb|nosql|database)\b",
            r"\b(database\s+design|data\s+modeling|db\s+administration|data\s+management)\b",
            r"\b(worked\s+with|used|implemented)\s+(sql|mysql|postgresql|mongodb|redis)\b",
        ],
    ),
    (
        "Cloud & DevOps",
        &[
            r"\b(aws|amazon\s+web\s+services|azure|gcp|google\s+cloud|docker|kubernetes|k8s|terraform|ansible|jenkins|ci/cd|git|github|gitlab)\b",
            r"\b(devops|cloud\s+computing|infrastructure|deployment|automation|containerization)\b",
            r"\b(deployed|hosted|managed)\s+(on\s+)?(aws|azure|gcp|cloud)\b",
        ],
    ),
    (
        "Data Science & ML",
        &[
            r"\b(pandas|numpy|scikit-learn|sklearn|tensorflow|pytorch|keras|matplotlib|seaborn|jupyter|apache\s+spark|spark)\b",
            r"\b(machine\s+learning|ml|data\s+science|artificial\s+intelligence|ai|deep\s+learning|data\s+analysis)\b",
            r"\b(built|developed|trained)\s+(ml|machine\s+learning|ai|data\s+science)\s+(models|algorithms)\b",
        ],
    ),
    (
        "Software & Tools",
        &[
            r"\b(jira|confluence|figma|postman|linux|bash|powershell|vscode|visual\s+studio|intellij|eclipse)\b",
            r"\b(project\s+management|agile|scrum|version\s+control|ide|development\s+tools)\b",
            r"\b(used|worked\s+with|managed)\s+(jira|confluence|figma|postman)\b",
        ],
    ),
];

const HIGH_VALUE_SKILLS: &[(&str, &[&str])] = &[
    ("Programming Languages", &["python", "javascript", "java"]),
    ("Cloud & DevOps", &["aws", "docker", "git"]),
    ("Data Science & ML", &["python", "pandas", "scikit-learn"]),
    ("Web & Frontend", &["html", "css", "javascript"]),
];

/// A recorded skill mention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub category: String,
    pub confidence: f64,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillStatistics {
    pub total_skills: usize,
    pub average_confidence: f64,
    pub categories_with_skills: usize,
    pub high_confidence_skills: usize,
    pub medium_confidence_skills: usize,
    pub low_confidence_skills: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAnalysisResult {
    /// Every taxonomy category, in taxonomy order, with its detected skills
    pub skills_by_category: CategoryMap<Vec<String>>,
    /// Keyed by skill; a skill found in two categories keeps the later value
    pub confidence_scores: BTreeMap<String, f64>,
    pub skill_contexts: BTreeMap<String, String>,
    pub matches: Vec<SkillMatch>,
    pub statistics: SkillStatistics,
    pub skill_gaps: CategoryMap<Vec<String>>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub total_skills: usize,
    pub categories_with_skills: usize,
    pub coverage_percentage: f64,
}

struct LiteralRule {
    category: String,
    skill: String,
    pattern: Regex,
}

struct CategoryPatterns {
    category: String,
    patterns: Vec<Regex>,
}

/// Skill classifier bound to one taxonomy
pub struct SkillClassifier {
    taxonomy: SkillTaxonomy,
    literal_rules: Vec<LiteralRule>,
    category_patterns: Vec<CategoryPatterns>,
    scorer: ConfidenceScorer,
}

impl Default for SkillClassifier {
    fn default() -> Self {
        Self::new(SkillTaxonomy::builtin())
    }
}

impl SkillClassifier {
    pub fn new(taxonomy: SkillTaxonomy) -> Self {
        let literal_rules = taxonomy
            .iter()
            .flat_map(|(category, skills)| skills.iter().map(move |skill| (category, skill)))
            .filter_map(|(category, skill)| {
                let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
                compile(&pattern).map(|pattern| LiteralRule {
                    category: category.to_string(),
                    skill: skill.clone(),
                    pattern,
                })
            })
            .collect();

        // Pattern categories the taxonomy doesn't know are skipped
        let category_patterns = PATTERN_TABLE
            .iter()
            .filter(|(category, _)| taxonomy.contains_category(category))
            .map(|(category, patterns)| CategoryPatterns {
                category: category.to_string(),
                patterns: patterns.iter().filter_map(|p| compile(p)).collect(),
            })
            .collect();

        Self {
            taxonomy,
            literal_rules,
            category_patterns,
            scorer: ConfidenceScorer::new(),
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn classify(&self, text: &str) -> SkillAnalysisResult {
        let lower = lowercase_aligned(text);
        let mut recorder = MatchRecorder::new(&self.taxonomy);

        for rule in &self.literal_rules {
            for m in rule.pattern.find_iter(&lower) {
                if recorder.contains(&rule.category, &rule.skill) {
                    break;
                }
                let confidence = self.scorer.score(&lower, &rule.skill, m.start());
                if confidence >= LITERAL_THRESHOLD {
                    let context = char_window(text, m.start(), m.end(), SNIPPET_RADIUS, SNIPPET_RADIUS);
                    recorder.record(&rule.category, &rule.skill, confidence, context);
                }
            }
        }

        for group in &self.category_patterns {
            for pattern in &group.patterns {
                for m in pattern.find_iter(&lower) {
                    let matched = m.as_str().trim().to_lowercase();
                    if matched.chars().count() <= 2 || recorder.contains(&group.category, &matched) {
                        continue;
                    }
                    let confidence = self.scorer.score(&lower, &matched, m.start());
                    if confidence >= PATTERN_THRESHOLD {
                        let context = char_window(text, m.start(), m.end(), SNIPPET_RADIUS, SNIPPET_RADIUS);
                        recorder.record(&group.category, &matched, confidence, context);
                    }
                }
            }
        }

        let statistics = recorder.statistics();
        let skill_gaps = self.skill_gaps(&recorder.skills_by_category);
        let recommendations = recommendations(&recorder.skills_by_category);

        debug!(
            "Classified {} skills across {} categories",
            statistics.total_skills, statistics.categories_with_skills
        );

        SkillAnalysisResult {
            skills_by_category: recorder.skills_by_category,
            confidence_scores: recorder.confidence_scores,
            skill_contexts: recorder.skill_contexts,
            matches: recorder.matches,
            statistics,
            skill_gaps,
            recommendations,
        }
    }

    /// Detected skills only, without statistics or advice
    pub fn classify_simple(&self, text: &str) -> CategoryMap<Vec<String>> {
        self.classify(text).skills_by_category
    }

    /// First few taxonomy skills per category that were not detected
    pub fn skill_gaps(&self, found: &CategoryMap<Vec<String>>) -> CategoryMap<Vec<String>> {
        self.taxonomy
            .iter()
            .filter_map(|(category, skills)| {
                let found_here = found.get(category);
                let missing: Vec<String> = skills
                    .iter()
                    .filter(|skill| !found_here.is_some_and(|f| f.contains(skill)))
                    .take(MAX_GAPS_PER_CATEGORY)
                    .cloned()
                    .collect();
                (!missing.is_empty()).then(|| (category.to_string(), missing))
            })
            .collect()
    }
}

/// Advice derived from the detected skills
pub fn recommendations(found: &CategoryMap<Vec<String>>) -> Vec<String> {
    let mut recommendations = Vec::new();

    let weak: Vec<&str> = found
        .iter()
        .filter(|(_, skills)| skills.len() < WEAK_CATEGORY_SIZE)
        .map(|(category, _)| category)
        .collect();
    if !weak.is_empty() {
        recommendations.push(format!("Consider adding more skills in: {}", weak.join(", ")));
    }

    for (category, valuable) in HIGH_VALUE_SKILLS {
        let found_here = found.get(category);
        let missing: Vec<&str> = valuable
            .iter()
            .copied()
            .filter(|skill| !found_here.is_some_and(|f| f.iter().any(|s| s == skill)))
            .collect();
        if !missing.is_empty() {
            recommendations.push(format!(
                "Consider adding {} to strengthen your {} profile",
                missing.join(", "),
                category
            ));
        }
    }

    recommendations
}

pub fn skill_summary(skills_by_category: &CategoryMap<Vec<String>>) -> SkillSummary {
    let total_skills = skills_by_category.values().map(|s| s.len()).sum();
    let categories_with_skills = skills_by_category.values().filter(|s| !s.is_empty()).count();
    let coverage_percentage = if skills_by_category.is_empty() {
        0.0
    } else {
        categories_with_skills as f64 / skills_by_category.len() as f64 * 100.0
    };

    SkillSummary {
        total_skills,
        categories_with_skills,
        coverage_percentage,
    }
}

struct MatchRecorder {
    skills_by_category: CategoryMap<Vec<String>>,
    confidence_scores: BTreeMap<String, f64>,
    skill_contexts: BTreeMap<String, String>,
    matches: Vec<SkillMatch>,
}

impl MatchRecorder {
    fn new(taxonomy: &SkillTaxonomy) -> Self {
        Self {
            skills_by_category: taxonomy.categories().map(|c| (c.to_string(), Vec::new())).collect(),
            confidence_scores: BTreeMap::new(),
            skill_contexts: BTreeMap::new(),
            matches: Vec::new(),
        }
    }

    fn contains(&self, category: &str, skill: &str) -> bool {
        self.skills_by_category
            .get(category)
            .is_some_and(|skills| skills.iter().any(|s| s == skill))
    }

    fn record(&mut self, category: &str, skill: &str, confidence: f64, context: &str) {
        match self.skills_by_category.get_mut(category) {
            Some(skills) => skills.push(skill.to_string()),
            None => self.skills_by_category.insert(category, vec![skill.to_string()]),
        }
        self.confidence_scores.insert(skill.to_string(), confidence);
        self.skill_contexts.insert(skill.to_string(), context.to_string());
        self.matches.push(SkillMatch {
            skill: skill.to_string(),
            category: category.to_string(),
            confidence,
            context: context.to_string(),
        });
    }

    fn statistics(&self) -> SkillStatistics {
        let confidences: Vec<f64> = self.confidence_scores.values().copied().collect();
        let average = if confidences.is_empty() {
            0.0
        } else {
            confidences.iter().sum::<f64>() / confidences.len() as f64
        };

        SkillStatistics {
            total_skills: self.skills_by_category.values().map(|s| s.len()).sum(),
            average_confidence: (average * 100.0).round() / 100.0,
            categories_with_skills: self.skills_by_category.values().filter(|s| !s.is_empty()).count(),
            high_confidence_skills: confidences.iter().filter(|c| **c >= 0.8).count(),
            medium_confidence_skills: confidences.iter().filter(|c| (0.6..0.8).contains(*c)).count(),
            low_confidence_skills: confidences.iter().filter(|c| **c < 0.6).count(),
        }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Skipping skill pattern '{}': {}", pattern, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn skills_in<'a>(result: &'a SkillAnalysisResult, category: &str) -> &'a [String] {
        result.skills_by_category.get(category).map(|s| s.as_slice()).unwrap_or(&[])
    }

    #[test]
    fn test_empty_text() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("");

        assert_eq!(result.statistics, SkillStatistics::default());
        assert_eq!(result.skills_by_category.len(), 7);
        assert!(result.confidence_scores.is_empty());
    }

    #[test]
    fn test_default_taxonomy_fallback_classification() {
        let taxonomy = SkillTaxonomy::load_or_default(Path::new("missing/skills.json"));
        let classifier = SkillClassifier::new(taxonomy);
        let result = classifier.classify("Proficient in Python and Docker.");

        assert!(skills_in(&result, "Programming Languages").contains(&"python".to_string()));
        assert!(skills_in(&result, "Cloud & DevOps").contains(&"docker".to_string()));
        assert!((result.confidence_scores["python"] - 0.8).abs() < 1e-9);
        assert!(result.skill_contexts["python"].contains("Python"));
    }

    #[test]
    fn test_bare_mention_below_literal_threshold() {
        let taxonomy = SkillTaxonomy::from_json_str(r#"{"Languages": ["zig"]}"#).unwrap();
        let classifier = SkillClassifier::new(taxonomy);
        let result = classifier.classify("Zig");

        assert!(skills_in(&result, "Languages").is_empty());
        assert_eq!(result.statistics.total_skills, 0);
    }

    #[test]
    fn test_bare_mention_recorded_by_pattern_pass() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("Rust");

        assert_eq!(skills_in(&result, "Programming Languages"), ["rust".to_string()]);
        assert!((result.confidence_scores["rust"] - 0.5).abs() < 1e-9);
        assert_eq!(result.statistics.low_confidence_skills, 1);
        assert_eq!(result.statistics.total_skills, 1);

        // no pattern table covers a custom category
        let taxonomy = SkillTaxonomy::from_json_str(r#"{"Languages": ["rust"]}"#).unwrap();
        let result = SkillClassifier::new(taxonomy).classify("Rust");
        assert!(skills_in(&result, "Languages").is_empty());
        assert_eq!(result.statistics.low_confidence_skills, 0);
    }

    #[test]
    fn test_low_confidence_mentions_are_excluded() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("I have heard of rust");

        assert!(skills_in(&result, "Programming Languages").is_empty());
    }

    #[test]
    fn test_pattern_pass_finds_aliases() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("Experienced with TypeScript");

        assert!(skills_in(&result, "Programming Languages").contains(&"typescript".to_string()));
    }

    #[test]
    fn test_short_pattern_matches_are_discarded() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("Worked with JS and ML");

        assert!(!skills_in(&result, "Programming Languages").contains(&"js".to_string()));
        assert!(!skills_in(&result, "Data Science & ML").contains(&"ml".to_string()));
    }

    #[test]
    fn test_skills_recorded_once_per_category() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("Used Python daily. Python script work. More python.");

        let languages = skills_in(&result, "Programming Languages");
        assert_eq!(languages.iter().filter(|s| *s == "python").count(), 1);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = SkillClassifier::default();
        let text = "Built with React and Node.js. Deployed on AWS. Worked with PostgreSQL.";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_statistics_are_consistent() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify(
            "Expert in Java and Kotlin. Used Docker and Kubernetes for deployment. Familiar with pandas.",
        );
        let stats = &result.statistics;

        let total: usize = result.skills_by_category.values().map(|s| s.len()).sum();
        assert_eq!(stats.total_skills, total);
        assert_eq!(
            stats.high_confidence_skills + stats.medium_confidence_skills + stats.low_confidence_skills,
            result.confidence_scores.len()
        );
        assert!(result.confidence_scores.values().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn test_gaps_and_recommendations_for_empty_resume() {
        let classifier = SkillClassifier::default();
        let result = classifier.classify("");

        assert_eq!(
            result.skill_gaps.get("Programming Languages").unwrap(),
            &vec!["python", "java", "javascript", "c++", "c#"]
        );
        assert_eq!(result.skill_gaps.len(), 7);
        assert_eq!(result.recommendations.len(), 5);
        assert_eq!(
            result.recommendations[0],
            "Consider adding more skills in: Programming Languages, Web & Frontend, \
             Backend & Frameworks, Databases, Cloud & DevOps, Data Science & ML, Software & Tools"
        );
        assert_eq!(
            result.recommendations[1],
            "Consider adding python, javascript, java to strengthen your Programming Languages profile"
        );
    }

    #[test]
    fn test_complete_category_has_no_gap() {
        let taxonomy = SkillTaxonomy::from_json_str(r#"{"Languages": ["rust"], "Tools": ["jira"]}"#).unwrap();
        let classifier = SkillClassifier::new(taxonomy);
        let result = classifier.classify("Proficient in Rust");

        assert!(result.skill_gaps.get("Languages").is_none());
        assert_eq!(result.skill_gaps.get("Tools").unwrap(), &vec!["jira".to_string()]);
    }

    #[test]
    fn test_classify_simple_and_summary() {
        let classifier = SkillClassifier::default();
        let skills = classifier.classify_simple("Proficient in Python, SQL and Figma");
        let summary = skill_summary(&skills);

        assert_eq!(summary.categories_with_skills, 3);
        assert!(summary.total_skills >= 3);
        assert!((summary.coverage_percentage - 300.0 / 7.0).abs() < 1e-9);

        let empty = skill_summary(&CategoryMap::new());
        assert_eq!(empty.coverage_percentage, 0.0);
    }
}
