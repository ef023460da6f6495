//! Multi-dimensional resume scoring
//!
//! Four sub-scores, each in `[0, 100]`:
//! - section: configured weights of the sections present
//! - structure: essential and valuable section coverage
//! - content: length, action verbs, quantified results and vocabulary
//! - impact: results language, metrics and leadership
//!
//! The overall score is a weighted blend of the four.

use crate::processing::sections::{Section, SectionPresenceMap};
use crate::processing::signals::{ContentSignals, SignalExtractor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ESSENTIAL_SECTIONS: [Section; 3] = [Section::Summary, Section::Experience, Section::Education];

const VALUABLE_SECTIONS: [Section; 4] = [
    Section::Projects,
    Section::Certifications,
    Section::Skills,
    Section::Achievements,
];

/// Points per section when present
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTable {
    pub summary: u32,
    pub experience: u32,
    pub education: u32,
    pub projects: u32,
    pub certifications: u32,
    pub skills: u32,
    pub achievements: u32,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            summary: 15,
            experience: 30,
            education: 20,
            projects: 20,
            certifications: 15,
            skills: 10,
            achievements: 10,
        }
    }
}

impl WeightTable {
    pub fn weight(&self, section: Section) -> u32 {
        match section {
            Section::Summary => self.summary,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Projects => self.projects,
            Section::Certifications => self.certifications,
            Section::Skills => self.skills,
            Section::Achievements => self.achievements,
        }
    }
}

/// Blend of the sub-scores into the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreCoefficients {
    pub section: f64,
    pub structure: f64,
    pub content: f64,
    pub impact: f64,
}

impl Default for ScoreCoefficients {
    fn default() -> Self {
        Self {
            section: 0.3,
            structure: 0.25,
            content: 0.25,
            impact: 0.2,
        }
    }
}

impl ScoreCoefficients {
    pub fn coefficient(&self, component: ScoreComponent) -> f64 {
        match component {
            ScoreComponent::Section => self.section,
            ScoreComponent::Structure => self.structure,
            ScoreComponent::Content => self.content,
            ScoreComponent::Impact => self.impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreComponent {
    #[serde(rename = "section_score")]
    Section,
    #[serde(rename = "structure_score")]
    Structure,
    #[serde(rename = "content_score")]
    Content,
    #[serde(rename = "impact_score")]
    Impact,
}

impl ScoreComponent {
    pub const ALL: [ScoreComponent; 4] = [
        ScoreComponent::Section,
        ScoreComponent::Structure,
        ScoreComponent::Content,
        ScoreComponent::Impact,
    ];
}

impl std::fmt::Display for ScoreComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreComponent::Section => write!(f, "Section Score"),
            ScoreComponent::Structure => write!(f, "Structure Score"),
            ScoreComponent::Content => write!(f, "Content Score"),
            ScoreComponent::Impact => write!(f, "Impact Score"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
}

impl Grade {
    /// Step function with inclusive lower bounds
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::APlus,
            s if s >= 85.0 => Grade::A,
            s if s >= 80.0 => Grade::AMinus,
            s if s >= 75.0 => Grade::BPlus,
            s if s >= 70.0 => Grade::B,
            s if s >= 65.0 => Grade::BMinus,
            s if s >= 60.0 => Grade::CPlus,
            s if s >= 55.0 => Grade::C,
            s if s >= 50.0 => Grade::CMinus,
            _ => Grade::D,
        }
    }

    /// Coarse four-step scale used by the legacy feedback path
    pub fn from_score_coarse(score: f64) -> Self {
        match score {
            s if s >= 90.0 => Grade::A,
            s if s >= 80.0 => Grade::B,
            s if s >= 70.0 => Grade::C,
            _ => Grade::D,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall_score: f64,
    pub breakdown: BTreeMap<ScoreComponent, f64>,
    pub grade: Grade,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl ScoreBreakdown {
    pub fn component(&self, component: ScoreComponent) -> Option<f64> {
        self.breakdown.get(&component).copied()
    }
}

/// Scores sections and text with a fixed weight table and blend
pub struct ScoringEngine {
    weights: WeightTable,
    coefficients: ScoreCoefficients,
    signals: SignalExtractor,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(WeightTable::default(), ScoreCoefficients::default())
    }
}

impl ScoringEngine {
    pub fn new(weights: WeightTable, coefficients: ScoreCoefficients) -> Self {
        Self {
            weights,
            coefficients,
            signals: SignalExtractor::new(),
        }
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn coefficients(&self) -> &ScoreCoefficients {
        &self.coefficients
    }

    pub fn score(&self, sections: &SectionPresenceMap, text: &str) -> ScoreBreakdown {
        let signals = (!text.is_empty()).then(|| self.signals.extract(text));

        let mut breakdown = BTreeMap::new();
        breakdown.insert(ScoreComponent::Section, section_score(sections, &self.weights));
        breakdown.insert(ScoreComponent::Structure, structure_score(sections));
        breakdown.insert(ScoreComponent::Content, signals.as_ref().map_or(0.0, content_score));
        breakdown.insert(ScoreComponent::Impact, signals.as_ref().map_or(0.0, impact_score));

        let overall = breakdown
            .iter()
            .map(|(component, value)| self.coefficients.coefficient(*component) * value)
            .sum::<f64>()
            .clamp(0.0, 100.0);

        ScoreBreakdown {
            overall_score: round1(overall),
            breakdown: breakdown.into_iter().map(|(c, v)| (c, round1(v))).collect(),
            grade: Grade::from_score(overall),
            strengths: strengths(sections, signals.as_ref()),
            weaknesses: weaknesses(sections, signals.as_ref()),
        }
    }
}

/// Score with explicit weights and the default blend
pub fn score_with(sections: &SectionPresenceMap, weights: &WeightTable, text: &str) -> ScoreBreakdown {
    ScoringEngine::new(*weights, ScoreCoefficients::default()).score(sections, text)
}

/// Overall score of the sections alone
pub fn score_simple(sections: &SectionPresenceMap, weights: &WeightTable) -> f64 {
    score_with(sections, weights, "").overall_score
}

pub fn section_score(sections: &SectionPresenceMap, weights: &WeightTable) -> f64 {
    let total: u32 = sections.present().map(|s| weights.weight(s)).sum();
    (total as f64).clamp(0.0, 100.0)
}

pub fn structure_score(sections: &SectionPresenceMap) -> f64 {
    let essentials = match sections.count_present(&ESSENTIAL_SECTIONS) {
        3 => 30.0,
        2 => 20.0,
        1 => 10.0,
        _ => 0.0,
    };
    let valuable = match sections.count_present(&VALUABLE_SECTIONS) {
        n if n >= 3 => 20.0,
        2 => 15.0,
        1 => 10.0,
        _ => 0.0,
    };

    let mut score: f64 = essentials + valuable;
    if sections.is_present(Section::Summary) {
        score += 10.0;
    }
    if sections.is_present(Section::Experience) {
        score += 15.0;
    }
    if sections.is_present(Section::Education) {
        score += 10.0;
    }
    score.min(100.0)
}

pub fn content_score(signals: &ContentSignals) -> f64 {
    let length = match signals.word_count {
        200..=800 => 15.0,
        100..=199 | 801..=1200 => 10.0,
        _ => 5.0,
    };
    let verbs = tier(signals.action_verbs, &[(8, 20.0), (5, 15.0), (3, 10.0)], 5.0);
    let quantified = tier(signals.quantifiable_achievements, &[(5, 20.0), (3, 15.0), (1, 10.0)], 5.0);
    let keywords = tier(signals.professional_keywords, &[(10, 15.0), (7, 12.0), (5, 10.0)], 5.0);

    (length + verbs + quantified + keywords).min(100.0)
}

pub fn impact_score(signals: &ContentSignals) -> f64 {
    let results = tier(signals.results_terms, &[(8, 25.0), (5, 20.0), (3, 15.0)], 5.0);
    let metrics = tier(signals.metrics, &[(10, 30.0), (7, 25.0), (5, 20.0), (3, 15.0)], 5.0);
    let leadership = tier(signals.leadership_indicators, &[(5, 25.0), (3, 20.0), (1, 15.0)], 5.0);

    (results + metrics + leadership).min(100.0)
}

/// Points for the first threshold `count` reaches, highest threshold first
fn tier(count: usize, tiers: &[(usize, f64)], fallback: f64) -> f64 {
    tiers
        .iter()
        .find(|(threshold, _)| count >= *threshold)
        .map_or(fallback, |(_, points)| *points)
}

fn strengths(sections: &SectionPresenceMap, signals: Option<&ContentSignals>) -> Vec<String> {
    let mut strengths = Vec::new();
    if sections.is_present(Section::Experience) {
        strengths.push("Strong work experience section");
    }
    if sections.is_present(Section::Projects) {
        strengths.push("Includes project portfolio");
    }
    if sections.is_present(Section::Certifications) {
        strengths.push("Professional certifications listed");
    }
    if let Some(signals) = signals {
        if signals.percentages >= 3 {
            strengths.push("Quantifiable achievements present");
        }
        if signals.leadership_words >= 2 {
            strengths.push("Leadership experience demonstrated");
        }
    }
    strengths.into_iter().map(String::from).collect()
}

fn weaknesses(sections: &SectionPresenceMap, signals: Option<&ContentSignals>) -> Vec<String> {
    let mut weaknesses = Vec::new();
    if !sections.is_present(Section::Summary) {
        weaknesses.push("Missing professional summary");
    }
    if !sections.is_present(Section::Experience) {
        weaknesses.push("Missing work experience section");
    }
    if !sections.is_present(Section::Education) {
        weaknesses.push("Missing education section");
    }
    if let Some(signals) = signals {
        if signals.percentages < 2 {
            weaknesses.push("Limited quantifiable achievements");
        }
        if signals.core_action_words < 3 {
            weaknesses.push("Few action verbs used");
        }
    }
    weaknesses.into_iter().map(String::from).collect()
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sections::detect_sections;

    fn all_sections() -> SectionPresenceMap {
        SectionPresenceMap::from_entries(Section::ALL.iter().map(|s| (*s, true)))
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let engine = ScoringEngine::default();
        let sections = detect_sections("");
        let score = engine.score(&sections, "");

        assert_eq!(score.overall_score, 0.0);
        assert_eq!(score.grade, Grade::D);
        assert_eq!(score.component(ScoreComponent::Content), Some(0.0));
        assert_eq!(score.component(ScoreComponent::Impact), Some(0.0));
        assert_eq!(score.component(ScoreComponent::Structure), Some(0.0));
        assert!(score.strengths.is_empty());
        assert_eq!(score.weaknesses.len(), 3);
    }

    #[test]
    fn test_well_structured_resume() {
        let verbs = "developed led implemented managed created designed built improved optimized delivered";
        let metrics = "increased by 20% ".repeat(5);
        let filler = "word ".repeat(280);
        let text = format!("Summary\n{}\nExperience\n{}\nEducation\n{}", verbs, metrics, filler);

        let engine = ScoringEngine::default();
        let sections = detect_sections(&text);
        let signals = SignalExtractor::new().extract(&text);
        let score = engine.score(&sections, &text);

        assert!(score.component(ScoreComponent::Structure).unwrap() >= 65.0);
        assert!(signals.action_verbs >= 8);
        assert!(signals.quantifiable_achievements >= 5);
        // word band 15 + verbs 20 + quantified 20 + keywords 5
        assert_eq!(score.component(ScoreComponent::Content), Some(60.0));
        assert!(score.strengths.contains(&"Quantifiable achievements present".to_string()));
    }

    #[test]
    fn test_section_score_is_clamped() {
        assert_eq!(section_score(&all_sections(), &WeightTable::default()), 100.0);
    }

    #[test]
    fn test_structure_score_tiers() {
        // every essential and valuable section present
        assert_eq!(structure_score(&all_sections()), 85.0);

        let essentials_only = SectionPresenceMap::from_entries([
            (Section::Summary, true),
            (Section::Experience, true),
            (Section::Education, true),
        ]);
        assert_eq!(structure_score(&essentials_only), 65.0);

        let projects_only = SectionPresenceMap::from_entries([(Section::Projects, true)]);
        assert_eq!(structure_score(&projects_only), 10.0);
    }

    #[test]
    fn test_content_and_impact_tiers() {
        let rich = ContentSignals {
            word_count: 500,
            action_verbs: 25,
            quantifiable_achievements: 50,
            professional_keywords: 15,
            results_terms: 14,
            metrics: 40,
            leadership_indicators: 11,
            ..Default::default()
        };
        assert_eq!(content_score(&rich), 70.0);
        assert_eq!(impact_score(&rich), 80.0);
        assert_eq!(content_score(&ContentSignals::default()), 20.0);
        assert_eq!(impact_score(&ContentSignals::default()), 15.0);
    }

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_score(89.9), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::APlus);
        assert_eq!(Grade::from_score(50.0), Grade::CMinus);
        assert_eq!(Grade::from_score(49.99), Grade::D);
        assert_eq!(Grade::from_score(0.0), Grade::D);
        assert_eq!(Grade::from_score_coarse(85.0), Grade::B);
    }

    #[test]
    fn test_grade_is_monotonic() {
        let grades: Vec<Grade> = (0..=1000).map(|i| Grade::from_score(i as f64 / 10.0)).collect();
        // Declaration order runs best to worst
        assert!(grades.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_overall_stays_in_bounds() {
        let heavy = WeightTable {
            summary: 500,
            ..Default::default()
        };
        let sections = all_sections();
        let overall = score_simple(&sections, &heavy);
        assert!((0.0..=100.0).contains(&overall));
    }

    #[test]
    fn test_score_simple_matches_sections_only() {
        let sections = SectionPresenceMap::from_entries([
            (Section::Summary, true),
            (Section::Experience, true),
            (Section::Education, true),
        ]);
        // 65 * 0.3 + 65 * 0.25
        assert_eq!(score_simple(&sections, &WeightTable::default()), 35.8);
    }

    #[test]
    fn test_breakdown_serializes_with_component_keys() {
        let score = ScoringEngine::default().score(&detect_sections(""), "");
        let json = serde_json::to_value(&score).unwrap();
        assert_eq!(json["breakdown"]["section_score"], 0.0);
        assert_eq!(json["grade"], "D");
    }
}
