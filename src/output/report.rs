//! Presentation model derived from an analysis report
//!
//! Every formatter renders the same `ReportSummary`, so labels, feedback
//! classification and metadata wording stay identical across console,
//! Markdown, HTML and PDF output.

use crate::processing::analyzer::AnalysisReport;
use crate::processing::feedback::{classify_line, format_points, FeedbackKind};
use crate::processing::scoring::{Grade, ScoreComponent};
use crate::processing::sections::Section;
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub file_name: String,
    pub overall_score: f64,
    pub grade: Grade,
    pub score_label: &'static str,
    pub components: Vec<ComponentRow>,
    pub sections: Vec<SectionRow>,
    pub feedback: Vec<FeedbackItem>,
    pub skills: Vec<SkillGroup>,
    pub skill_recommendations: Vec<String>,
    pub profile: Vec<(&'static str, String)>,
    pub metadata: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRow {
    pub component: ScoreComponent,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRow {
    pub section: Section,
    pub present: bool,
}

/// One feedback line with markup removed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub kind: FeedbackKind,
    pub text: String,
    /// Lines that open a new feedback block
    pub heading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

impl ReportSummary {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let components = report
            .score_breakdown
            .breakdown
            .iter()
            .map(|(component, score)| ComponentRow {
                component: *component,
                score: *score,
            })
            .collect();

        let sections = report
            .sections_found
            .iter()
            .map(|(section, present)| SectionRow { section, present })
            .collect();

        let skills = report
            .skills
            .iter()
            .filter(|(_, skills)| !skills.is_empty())
            .map(|(category, skills)| SkillGroup {
                category: category.to_string(),
                skills: skills.clone(),
            })
            .collect();

        Self {
            file_name: report.analysis_metadata.file_name.clone(),
            overall_score: report.score,
            grade: report.score_breakdown.grade,
            score_label: score_label(report.score),
            components,
            sections,
            feedback: report.feedback.iter().map(|line| FeedbackItem::from_line(line)).collect(),
            skills,
            skill_recommendations: report.skill_analysis.recommendations.clone(),
            profile: profile_rows(report),
            metadata: metadata_rows(report),
        }
    }

    pub fn detected_skill_count(&self) -> usize {
        self.skills.iter().map(|group| group.skills.len()).sum()
    }
}

impl FeedbackItem {
    pub fn from_line(line: &str) -> Self {
        Self {
            kind: classify_line(line),
            text: strip_markup(line),
            heading: line.starts_with('\n'),
        }
    }
}

/// Drops `**` emphasis and surrounding whitespace from a feedback line
pub fn strip_markup(line: &str) -> String {
    line.replace("**", "").trim().to_string()
}

pub fn score_label(score: f64) -> &'static str {
    match score {
        s if s >= 90.0 => "Excellent",
        s if s >= 80.0 => "Very Good",
        s if s >= 70.0 => "Good",
        s if s >= 60.0 => "Fair",
        s if s >= 50.0 => "Below Average",
        _ => "Poor",
    }
}

pub fn format_score(score: f64) -> String {
    format!("{}/100", format_points(score))
}

fn profile_rows(report: &AnalysisReport) -> Vec<(&'static str, String)> {
    let profile = &report.profile;
    let or_missing = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_FOUND.to_string());

    let education = if profile.education.is_empty() {
        NOT_FOUND.to_string()
    } else {
        profile.education.join("; ")
    };

    vec![
        ("Name", or_missing(&profile.name)),
        ("Email", or_missing(&profile.email)),
        ("Phone", or_missing(&profile.phone)),
        ("LinkedIn", or_missing(&profile.contact.linkedin)),
        ("GitHub", or_missing(&profile.contact.github)),
        ("Website", or_missing(&profile.contact.website)),
        ("Education", education),
        ("Words", profile.statistics.word_count.to_string()),
        ("Sentences", profile.statistics.sentence_count.to_string()),
    ]
}

fn metadata_rows(report: &AnalysisReport) -> Vec<(&'static str, String)> {
    let meta = &report.analysis_metadata;
    vec![
        ("File Size", format!("{:.2} KB", meta.file_size as f64 / 1024.0)),
        ("Text Length", format!("{} characters", meta.text_length)),
        ("Processing Time", format!("{:.2} seconds", meta.processing_time)),
        ("Timestamp", meta.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::input::{ExtractedDocument, FileType};
    use crate::processing::analyzer::AnalysisEngine;
    use crate::processing::scoring::{ScoreCoefficients, WeightTable};
    use crate::processing::taxonomy::SkillTaxonomy;
    use std::path::PathBuf;

    pub(crate) fn sample_report() -> AnalysisReport {
        let text = "Jane Doe\n\
            jane.doe@example.com\n\
            Summary\n\
            Software engineer. Proficient in Python and Docker.\n\
            Experience\n\
            Developed APIs serving 2 million users and reduced costs by 30%.\n\
            Education\n\
            B.S. Computer Science, State University, 2018\n";
        let document = ExtractedDocument {
            path: PathBuf::from("jane_doe.txt"),
            file_name: "jane_doe.txt".to_string(),
            file_size: 2048,
            file_type: FileType::Text,
            text: text.to_string(),
        };
        AnalysisEngine::with_components(
            SkillTaxonomy::builtin(),
            WeightTable::default(),
            ScoreCoefficients::default(),
        )
        .analyze_document(&document)
    }

    #[test]
    fn test_feedback_items() {
        let item = FeedbackItem::from_line("\n❌ **Missing Projects Section:**");
        assert_eq!(item.kind, FeedbackKind::Critical);
        assert_eq!(item.text, "❌ Missing Projects Section:");
        assert!(item.heading);

        let item = FeedbackItem::from_line("  • Use industry-specific keywords and terminology");
        assert_eq!(item.kind, FeedbackKind::Info);
        assert!(!item.heading);
    }

    #[test]
    fn test_score_labels() {
        assert_eq!(score_label(95.0), "Excellent");
        assert_eq!(score_label(80.0), "Very Good");
        assert_eq!(score_label(49.9), "Poor");
        assert_eq!(format_score(72.0), "72/100");
        assert_eq!(format_score(72.5), "72.5/100");
    }

    #[test]
    fn test_summary_from_report() {
        let report = sample_report();
        let summary = ReportSummary::from_report(&report);

        assert_eq!(summary.file_name, "jane_doe.txt");
        assert_eq!(summary.components.len(), 4);
        assert_eq!(summary.feedback.len(), report.feedback.len());
        assert!(summary.skills.iter().all(|group| !group.skills.is_empty()));
        assert!(summary.detected_skill_count() >= 2);
        assert_eq!(summary.metadata[0], ("File Size", "2.00 KB".to_string()));
        assert!(summary
            .profile
            .iter()
            .any(|(label, value)| *label == "Email" && value == "jane.doe@example.com"));
        assert!(summary
            .profile
            .iter()
            .any(|(label, value)| *label == "LinkedIn" && value == NOT_FOUND));
    }
}
