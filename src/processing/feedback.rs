//! Human-readable feedback assembled from the score and section map

use crate::processing::scoring::{Grade, ScoreBreakdown, ScoreComponent, WeightTable};
use crate::processing::sections::{Section, SectionPresenceMap};
use crate::processing::signals::SignalExtractor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const TIPS_PER_SECTION: usize = 3;

const BEST_PRACTICES: [&str; 5] = [
    "Use industry-specific keywords and terminology",
    "Include relevant certifications and training",
    "Highlight quantifiable achievements and metrics",
    "Demonstrate continuous learning and skill development",
    "Show progression and career growth",
];

/// How a feedback line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackKind {
    Strength,
    Critical,
    Suggestion,
    Info,
}

/// Keyword-based line classification; the first matching group wins
pub fn classify_line(line: &str) -> FeedbackKind {
    const STRENGTH: [&str; 4] = ["Excellent", "strong", "Strength", "Good"];
    const CRITICAL: [&str; 4] = ["Missing", "weakness", "Critical", "Consider"];

    if STRENGTH.iter().any(|k| line.contains(k)) {
        FeedbackKind::Strength
    } else if CRITICAL.iter().any(|k| line.contains(k)) {
        FeedbackKind::Critical
    } else if line.contains("Suggestion") {
        FeedbackKind::Suggestion
    } else {
        FeedbackKind::Info
    }
}

fn missing_section_message(section: Section) -> &'static str {
    match section {
        Section::Experience => "Experience: This is the most critical section. Detail your work history with quantifiable achievements and impact metrics.",
        Section::Projects => "Projects: A projects section is crucial for demonstrating practical skills. Include GitHub links, technologies used, and outcomes.",
        Section::Education => "Education: Clearly list your academic background with relevant coursework and achievements.",
        Section::Summary => "Summary: A professional summary helps recruiters understand your profile quickly. Keep it concise and impactful.",
        Section::Certifications => "Certifications: Mention any certifications to highlight specialized knowledge and continuous learning.",
        Section::Skills => "Skills: Organize skills by category and include proficiency levels where appropriate.",
        Section::Achievements => "Achievements: Highlight awards, recognitions, and notable accomplishments.",
    }
}

/// Improvement tips for a present section, most useful first
pub fn section_tips(section: Section) -> &'static [&'static str] {
    match section {
        Section::Experience => &[
            "Use action verbs to start each bullet point (e.g., 'Developed', 'Implemented', 'Led')",
            "Include quantifiable achievements (e.g., 'Increased sales by 25%', 'Reduced costs by $50K')",
            "Focus on impact and results, not just responsibilities",
            "Use industry-specific keywords and terminology",
            "Include team size and project scope where relevant",
            "Mention technologies, tools, and methodologies used",
        ],
        Section::Projects => &[
            "Include live links to deployed projects and GitHub repositories",
            "Mention the complete tech stack and architecture",
            "Describe the problem solved and your unique approach",
            "Highlight any awards, recognition, or user adoption metrics",
            "Include collaboration details and team roles",
            "Mention scalability and performance optimizations",
        ],
        Section::Education => &[
            "Include relevant coursework if you're a recent graduate",
            "Mention GPA if it's above 3.5/4.0 or equivalent",
            "List academic achievements, honors, and scholarships",
            "Include relevant certifications and training programs",
            "Mention thesis topics or research projects",
            "Include study abroad or exchange programs if relevant",
        ],
        Section::Summary => &[
            "Keep it to 2-3 sentences maximum (30-50 words)",
            "Mention years of experience and key skills upfront",
            "Tailor it to the specific job you're applying for",
            "Avoid generic statements and buzzwords",
            "Include your career objective or target role",
            "Mention unique value proposition or specialization",
        ],
        Section::Certifications => &[
            "Include certification dates and expiry if applicable",
            "Mention the issuing organization and credential ID",
            "Focus on industry-recognized certifications",
            "Keep them relevant to your target role",
            "Include ongoing certifications or courses",
            "Mention certification levels or specializations",
        ],
        Section::Skills => &[
            "Organize skills by category (Technical, Soft Skills, Tools)",
            "Include proficiency levels (Beginner, Intermediate, Advanced)",
            "Mention years of experience with each skill",
            "Include emerging technologies and trends",
            "Add relevant industry-specific skills",
            "Keep skills current and remove outdated ones",
        ],
        Section::Achievements => &[
            "Include specific awards and recognition dates",
            "Mention the awarding organization and criteria",
            "Quantify the impact or significance of achievements",
            "Include industry-specific accolades",
            "Mention leadership awards and team achievements",
            "Include patents, publications, or speaking engagements",
        ],
    }
}

/// Builds the ordered feedback list
pub struct FeedbackGenerator {
    signals: SignalExtractor,
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackGenerator {
    pub fn new() -> Self {
        Self {
            signals: SignalExtractor::new(),
        }
    }

    pub fn generate(&self, sections: &SectionPresenceMap, score: &ScoreBreakdown, text: &str) -> Vec<String> {
        let mut feedback = Vec::new();

        feedback.push(format!(
            "🎯 **Overall Assessment: {} ({:.1}/100)**",
            score.grade, score.overall_score
        ));
        feedback.push(narrative(score.overall_score).to_string());

        feedback.push("\n📊 **Score Breakdown:**".to_string());
        for (component, value) in &score.breakdown {
            feedback.push(breakdown_line(*component, *value));
        }

        if !score.strengths.is_empty() {
            feedback.push("\n💪 **Key Strengths:**".to_string());
            feedback.extend(score.strengths.iter().map(|s| format!("  • {}", s)));
        }
        if !score.weaknesses.is_empty() {
            feedback.push("\n🔧 **Areas for Improvement:**".to_string());
            feedback.extend(score.weaknesses.iter().map(|w| format!("  • {}", w)));
        }

        feedback.push("\n📋 **Section-by-Section Analysis:**".to_string());
        for (section, present) in sections.iter() {
            if present {
                feedback.push(format!("\n✅ **{} Section:**", section));
                feedback.extend(
                    section_tips(section)
                        .iter()
                        .take(TIPS_PER_SECTION)
                        .map(|tip| format!("  💡 {}", tip)),
                );
            } else {
                feedback.push(format!("\n❌ **Missing {} Section:**", section));
                feedback.push(format!("  ⚠️ {}", missing_section_message(section)));
            }
        }

        if !text.is_empty() {
            self.content_analysis(text, &mut feedback);
        }

        feedback.push("\n🏭 **Industry Best Practices:**".to_string());
        feedback.extend(BEST_PRACTICES.iter().map(|p| format!("  • {}", p)));

        feedback.push("\n📈 **Recommended Action Plan:**".to_string());
        if score.overall_score < 70.0 {
            feedback.push("  1. **Immediate (Week 1):** Restructure missing sections and add basic content".to_string());
            feedback.push("  2. **Short-term (Week 2-3):** Enhance content with quantifiable achievements".to_string());
            feedback.push("  3. **Medium-term (Week 4-6):** Optimize for ATS and industry-specific keywords".to_string());
        } else {
            feedback.push("  1. **Fine-tune:** Optimize existing content for better impact".to_string());
            feedback.push("  2. **Enhance:** Add more quantifiable achievements and metrics".to_string());
            feedback.push("  3. **Polish:** Ensure ATS optimization and industry alignment".to_string());
        }

        feedback
    }

    /// Feedback from a bare section score, without text or sub-scores
    pub fn generate_legacy(&self, sections: &SectionPresenceMap, raw_score: f64, _weights: &WeightTable) -> Vec<String> {
        let score = ScoreBreakdown {
            overall_score: raw_score,
            breakdown: BTreeMap::from([(ScoreComponent::Section, raw_score)]),
            grade: Grade::from_score_coarse(raw_score),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        };
        self.generate(sections, &score, "")
    }

    fn content_analysis(&self, text: &str, feedback: &mut Vec<String>) {
        let signals = self.signals.extract(text);

        feedback.push("\n📝 **Content Quality Analysis:**".to_string());
        feedback.push(counted_line(
            signals.action_verbs,
            "Action Verbs Found",
            "No action verbs detected",
        ));
        feedback.push(counted_line(
            signals.quantifiable_achievements,
            "Quantifiable Achievements",
            "No quantifiable achievements found",
        ));
        feedback.push(counted_line(
            signals.leadership_indicators,
            "Leadership Indicators",
            "Limited leadership experience shown",
        ));
        feedback.push(counted_line(
            signals.technical_keywords,
            "Technical Keywords",
            "No technical keywords detected",
        ));

        let priorities = signals.improvement_priorities();
        if !priorities.is_empty() {
            feedback.push("\n🎯 **Content Improvement Priorities:**".to_string());
            feedback.extend(priorities.iter().map(|p| format!("  • {}", p)));
        }
    }
}

fn narrative(overall: f64) -> &'static str {
    match overall {
        s if s >= 85.0 => "🏆 **Excellent!** Your resume demonstrates strong professional presentation and comprehensive coverage of key areas.",
        s if s >= 75.0 => "🚀 **Very Good!** Your resume has a solid foundation with room for strategic improvements.",
        s if s >= 65.0 => "👍 **Good!** Your resume shows potential but needs targeted enhancements to stand out.",
        s if s >= 55.0 => "⚠️ **Needs Improvement.** Your resume requires significant work to be competitive.",
        _ => "🚨 **Major Improvements Needed.** Your resume needs substantial restructuring and content enhancement.",
    }
}

fn breakdown_line(component: ScoreComponent, value: f64) -> String {
    let (icon, label) = match value {
        v if v >= 80.0 => ("✅", "Excellent"),
        v if v >= 65.0 => ("👍", "Good"),
        v if v >= 50.0 => ("⚠️", "Needs Improvement"),
        _ => ("❌", "Poor"),
    };
    format!("  {} {}: {}/100 ({})", icon, component, format_points(value), label)
}

fn counted_line(count: usize, label: &str, absent: &str) -> String {
    if count > 0 {
        format!("  ✅ {}: {}", label, count)
    } else {
        format!("  ❌ {}", absent)
    }
}

/// Whole numbers without a decimal point, others to one decimal
pub fn format_points(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scoring::ScoringEngine;
    use crate::processing::sections::detect_sections;

    fn feedback_for(text: &str) -> Vec<String> {
        let sections = detect_sections(text);
        let score = ScoringEngine::default().score(&sections, text);
        FeedbackGenerator::new().generate(&sections, &score, text)
    }

    #[test]
    fn test_first_line_has_grade_and_score() {
        let feedback = feedback_for("");
        assert_eq!(feedback[0], "🎯 **Overall Assessment: D (0.0/100)**");
        assert!(feedback[1].starts_with("🚨"));
    }

    #[test]
    fn test_best_practices_always_present() {
        for text in ["", "Experience\nLed a team of 5 people"] {
            let feedback = feedback_for(text);
            let header = feedback
                .iter()
                .position(|l| l == "\n🏭 **Industry Best Practices:**")
                .unwrap();
            assert_eq!(feedback[header + 1], "  • Use industry-specific keywords and terminology");
            assert_eq!(feedback[header + 5], "  • Show progression and career growth");
        }
    }

    #[test]
    fn test_content_analysis_only_with_text() {
        assert!(!feedback_for("").iter().any(|l| l.contains("Content Quality Analysis")));

        let feedback = feedback_for("Summary\nManaged budgets and led the platform team.");
        assert!(feedback.iter().any(|l| l.contains("Content Quality Analysis")));
        assert!(feedback.contains(&"  ✅ Leadership Indicators: 2".to_string()));
        assert!(feedback.contains(&"  ❌ No quantifiable achievements found".to_string()));
        assert!(feedback.contains(&"  ❌ No technical keywords detected".to_string()));
        assert!(feedback.contains(&"\n🎯 **Content Improvement Priorities:**".to_string()));
    }

    #[test]
    fn test_section_lines_follow_presence() {
        let feedback = feedback_for("Experience\nAcme");
        let experience = feedback.iter().position(|l| l == "\n✅ **Experience Section:**").unwrap();
        assert!(feedback[experience + 1].starts_with("  💡 Use action verbs"));
        assert!(feedback[experience + 3].starts_with("  💡 Focus on impact"));
        assert!(feedback.contains(&"\n❌ **Missing Projects Section:**".to_string()));
        assert!(feedback.iter().any(|l| l.starts_with("  ⚠️ Summary: A professional summary")));
    }

    #[test]
    fn test_legacy_feedback() {
        let sections = detect_sections("Summary\nExperience\n");
        let feedback = FeedbackGenerator::new().generate_legacy(&sections, 85.0, &WeightTable::default());

        assert_eq!(feedback[0], "🎯 **Overall Assessment: B (85.0/100)**");
        let breakdown: Vec<&String> = feedback.iter().filter(|l| l.contains("/100 (")).collect();
        assert_eq!(breakdown, vec!["  ✅ Section Score: 85/100 (Excellent)"]);
        assert!(!feedback.iter().any(|l| l.contains("Key Strengths")));
        assert!(feedback.contains(&"  1. **Fine-tune:** Optimize existing content for better impact".to_string()));
    }

    #[test]
    fn test_action_plan_threshold() {
        let sections = detect_sections("");
        let generator = FeedbackGenerator::new();
        let low = generator.generate_legacy(&sections, 69.9, &WeightTable::default());
        assert!(low.last().unwrap().contains("Medium-term"));
        let high = generator.generate_legacy(&sections, 70.0, &WeightTable::default());
        assert!(high.last().unwrap().contains("Polish"));
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line("  • Strong work experience section"), FeedbackKind::Info);
        assert_eq!(classify_line("  👍 Content Score: 70/100 (Good)"), FeedbackKind::Strength);
        assert_eq!(classify_line("  • Missing professional summary"), FeedbackKind::Critical);
        assert_eq!(classify_line("Suggestion: add links"), FeedbackKind::Suggestion);
        assert_eq!(classify_line("plain line"), FeedbackKind::Info);
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(75.0), "75");
        assert_eq!(format_points(37.5), "37.5");
    }
}
