//! Main analysis engine combining section detection, skill classification,
//! scoring and feedback

use crate::config::Config;
use crate::input::ExtractedDocument;
use crate::processing::feedback::FeedbackGenerator;
use crate::processing::profile::{CandidateProfile, ProfileExtractor};
use crate::processing::scoring::{ScoreBreakdown, ScoreCoefficients, ScoringEngine, WeightTable};
use crate::processing::sections::{SectionDetector, SectionPresenceMap};
use crate::processing::skill_classifier::{SkillAnalysisResult, SkillClassifier};
use crate::processing::taxonomy::{CategoryMap, SkillTaxonomy};
use chrono::{DateTime, Local};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Main analysis engine that coordinates all analysis components.
///
/// Everything inside is immutable after construction, so one engine can be
/// shared across tasks behind an `Arc`.
pub struct AnalysisEngine {
    detector: SectionDetector,
    classifier: SkillClassifier,
    scoring: ScoringEngine,
    feedback: FeedbackGenerator,
    profiles: ProfileExtractor,
}

/// Result of running the pipeline over raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sections: SectionPresenceMap,
    pub skill_analysis: SkillAnalysisResult,
    pub score: ScoreBreakdown,
    pub feedback: Vec<String>,
    pub profile: CandidateProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub file_name: String,
    pub file_size: u64,
    /// Characters, not bytes
    pub text_length: usize,
    /// Seconds
    pub processing_time: f64,
    pub timestamp: DateTime<Local>,
}

/// Payload for a single analysed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub skills: CategoryMap<Vec<String>>,
    pub score: f64,
    pub feedback: Vec<String>,
    pub sections_found: SectionPresenceMap,
    pub skill_analysis: SkillAnalysisResult,
    pub score_breakdown: ScoreBreakdown,
    pub profile: CandidateProfile,
    pub analysis_metadata: AnalysisMetadata,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Self {
        let taxonomy = SkillTaxonomy::load_or_default(&config.taxonomy.path);
        Self::with_components(taxonomy, config.scoring.weights, config.scoring.coefficients)
    }

    pub fn with_components(
        taxonomy: SkillTaxonomy,
        weights: WeightTable,
        coefficients: ScoreCoefficients,
    ) -> Self {
        info!(
            "Initializing analysis engine ({} categories, {} skills)",
            taxonomy.category_count(),
            taxonomy.skill_count()
        );

        Self {
            detector: SectionDetector::new(),
            classifier: SkillClassifier::new(taxonomy),
            scoring: ScoringEngine::new(weights, coefficients),
            feedback: FeedbackGenerator::new(),
            profiles: ProfileExtractor::new(),
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        self.classifier.taxonomy()
    }

    pub fn weights(&self) -> &WeightTable {
        self.scoring.weights()
    }

    pub fn analyze_text(&self, text: &str) -> Analysis {
        let skill_analysis = self.classifier.classify(text);
        debug!(
            "Classified {} skills (avg confidence {:.2})",
            skill_analysis.statistics.total_skills, skill_analysis.statistics.average_confidence
        );

        let sections = self.detector.detect(text);
        debug!("Sections found: {:?}", sections.present().collect::<Vec<_>>());

        let score = self.scoring.score(&sections, text);
        debug!("Score calculated: {} (Grade: {})", score.overall_score, score.grade);

        let feedback = self.feedback.generate(&sections, &score, text);
        let profile = self.profiles.extract(text);

        Analysis {
            sections,
            skill_analysis,
            score,
            feedback,
            profile,
        }
    }

    pub fn analyze_document(&self, document: &ExtractedDocument) -> AnalysisReport {
        let start_time = Instant::now();
        info!("Analyzing {} ({} bytes)", document.file_name, document.file_size);

        let analysis = self.analyze_text(&document.text);

        let processing_time = start_time.elapsed().as_secs_f64();
        info!(
            "Analysis of {} completed: {} ({}) in {:.3}s",
            document.file_name, analysis.score.overall_score, analysis.score.grade, processing_time
        );

        AnalysisReport {
            skills: analysis.skill_analysis.skills_by_category.clone(),
            score: analysis.score.overall_score,
            feedback: analysis.feedback,
            sections_found: analysis.sections,
            skill_analysis: analysis.skill_analysis,
            score_breakdown: analysis.score,
            profile: analysis.profile,
            analysis_metadata: AnalysisMetadata {
                file_name: document.file_name.clone(),
                file_size: document.file_size,
                text_length: document.text.chars().count(),
                processing_time,
                timestamp: Local::now(),
            },
        }
    }
}
