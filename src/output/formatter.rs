//! Output formatters - console, JSON, Markdown, HTML and PDF

use crate::config::OutputFormat;
use crate::error::{AnalyzerError, Result};
use crate::output::pdf::render_pdf;
use crate::output::report::{format_score, ReportSummary};
use crate::processing::analyzer::AnalysisReport;
use crate::processing::feedback::{format_points, FeedbackKind};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports as text
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    include_profile: bool,
}

/// JSON formatter; emits the full report payload
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    /// Console layout without ANSI colors, for saved reports
    file_console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Askama template for HTML output
#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report - {{ file_name }}</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .score-breakdown {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 15px;
            margin: 20px 0;
        }
        .score-item {
            background: #f8f9fa;
            padding: 15px;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .skill-tag {
            display: inline-block;
            background: #e9ecef;
            border-radius: 12px;
            padding: 2px 10px;
            margin: 3px;
        }
        .feedback-strength { color: #228b22; }
        .feedback-critical { color: #dc143c; }
        .feedback-suggestion { color: #ff8c00; }
        .feedback-heading { margin-top: 15px; font-weight: bold; list-style: none; }
        ul { margin: 10px 0; }
        li { margin: 5px 0; }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>📊 Resume Analysis Report</h1>
            <p>{{ file_name }} | Generated: {{ generated_at }}</p>
        </div>

        <div class="section">
            <h2>Overall Score</h2>
            <h3>{{ overall_score }} - Grade {{ grade }} <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <div class="score-breakdown">
                {{ components_html | safe }}
            </div>
        </div>

        <div class="section">
            <h2>📋 Sections</h2>
            {{ sections_html | safe }}
        </div>

        <div class="section">
            <h2>🛠️ Detected Skills ({{ skill_count }})</h2>
            {{ skills_html | safe }}
            {% if has_skill_recommendations %}
            <h3>Skill Recommendations</h3>
            {{ skill_recommendations_html | safe }}
            {% endif %}
        </div>

        {% if has_profile %}
        <div class="section">
            <h2>👤 Candidate Profile</h2>
            {{ profile_html | safe }}
        </div>
        {% endif %}

        <div class="section">
            <h2>💬 Feedback</h2>
            {{ feedback_html | safe }}
        </div>

        <div class="metadata">
            {{ metadata_html | safe }}
            <p><strong>ℹ️ Generated by resume-analyzer v{{ version }}</strong></p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    file_name: String,
    generated_at: String,
    overall_score: String,
    grade: String,
    score_class: String,
    score_label: String,
    components_html: String,
    sections_html: String,
    skill_count: usize,
    skills_html: String,
    skill_recommendations_html: String,
    has_skill_recommendations: bool,
    profile_html: String,
    has_profile: bool,
    feedback_html: String,
    metadata_html: String,
    version: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool, include_profile: bool) -> Self {
        Self {
            use_colors,
            detailed,
            include_profile,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64, label: &str) -> String {
        let color = match score {
            s if s >= 90.0 => Color::Green,
            s if s >= 80.0 => Color::BrightGreen,
            s if s >= 70.0 => Color::Yellow,
            s if s >= 60.0 => Color::BrightYellow,
            s if s >= 50.0 => Color::Red,
            _ => Color::BrightRed,
        };

        let badge = label.to_uppercase();
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_feedback_line(&self, kind: FeedbackKind, line: &str) -> String {
        let color = match kind {
            FeedbackKind::Strength => Color::Green,
            FeedbackKind::Critical => Color::Red,
            FeedbackKind::Suggestion => Color::Yellow,
            FeedbackKind::Info => return line.to_string(),
        };
        self.colorize(line, color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let summary = ReportSummary::from_report(report);
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📊 RESUME ANALYSIS: {}", summary.file_name), 1));
        output.push_str(&format!(
            "Overall Score: {} | Grade: {} {}\n",
            format_score(summary.overall_score),
            self.colorize(summary.grade.as_str(), Color::Cyan),
            self.format_score_badge(summary.overall_score, summary.score_label)
        ));
        for row in &summary.components {
            output.push_str(&format!("  • {}: {}/100\n", row.component, format_points(row.score)));
        }

        output.push_str(&self.format_header("Sections", 3));
        for row in &summary.sections {
            let mark = if row.present {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("✗", Color::Red)
            };
            output.push_str(&format!("  {} {}\n", mark, row.section));
        }

        output.push_str(&self.format_header(
            &format!("🛠️ Detected Skills ({})", summary.detected_skill_count()),
            2,
        ));
        if summary.skills.is_empty() {
            output.push_str("  No skills were detected.\n");
        }
        for group in &summary.skills {
            output.push_str(&format!(
                "  {}: {}\n",
                self.colorize(&group.category, Color::Cyan),
                group.skills.join(", ")
            ));
        }
        if !summary.skill_recommendations.is_empty() {
            output.push('\n');
            for recommendation in &summary.skill_recommendations {
                output.push_str(&format!("  💡 {}\n", self.colorize(recommendation, Color::Yellow)));
            }
        }

        if self.detailed {
            let analysis = &report.skill_analysis;
            output.push_str(&self.format_header("Skill Confidence", 3));
            for (skill, confidence) in &analysis.confidence_scores {
                output.push_str(&format!("  {:<20} {:.2}\n", skill, confidence));
                if let Some(context) = analysis.skill_contexts.get(skill) {
                    output.push_str(&format!(
                        "    {}\n",
                        self.colorize(&format!("\"{}\"", context.replace('\n', " ")), Color::BrightBlack)
                    ));
                }
            }
            output.push_str(&format!(
                "  High: {} | Medium: {} | Low: {} | Average: {:.2}\n",
                analysis.statistics.high_confidence_skills,
                analysis.statistics.medium_confidence_skills,
                analysis.statistics.low_confidence_skills,
                analysis.statistics.average_confidence
            ));

            if !analysis.skill_gaps.is_empty() {
                output.push_str(&self.format_header("Skill Gaps", 3));
                for (category, missing) in analysis.skill_gaps.iter() {
                    output.push_str(&format!("  {}: {}\n", category, missing.join(", ")));
                }
            }
        }

        if self.include_profile {
            output.push_str(&self.format_header("👤 Candidate Profile", 2));
            for (label, value) in &summary.profile {
                output.push_str(&format!("  {:<10} {}\n", format!("{}:", label), value));
            }
        }

        output.push_str(&self.format_header("💬 Feedback", 2));
        for (item, line) in summary.feedback.iter().zip(&report.feedback) {
            let line = line.replace("**", "");
            let line = if item.heading && self.use_colors {
                line.bold().to_string()
            } else {
                line
            };
            output.push_str(&self.format_feedback_line(item.kind, &line));
            output.push('\n');
        }

        if self.detailed {
            output.push_str(&self.format_header("Analysis Metadata", 3));
            for (label, value) in &summary.metadata {
                output.push_str(&format!("  {}: {}\n", label, value));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match score {
            s if s >= 90.0 => "🟢",
            s if s >= 80.0 => "🟡",
            s if s >= 70.0 => "🟠",
            _ => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let summary = ReportSummary::from_report(report);
        let mut output = String::new();

        output.push_str(&format!("# 📊 Resume Analysis: {}\n\n", summary.file_name));
        output.push_str(&format!(
            "**Overall Score:** {} | **Grade:** {} {} {}\n\n",
            format_score(summary.overall_score),
            summary.grade,
            Self::markdown_score_badge(summary.overall_score),
            summary.score_label
        ));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        for row in &summary.components {
            output.push_str(&format!("| {} | {}/100 |\n", row.component, format_points(row.score)));
        }
        output.push('\n');

        output.push_str("## Sections\n\n");
        for row in &summary.sections {
            output.push_str(&format!("- [{}] {}\n", if row.present { "x" } else { " " }, row.section));
        }
        output.push('\n');

        output.push_str(&format!("## 🛠️ Detected Skills ({})\n\n", summary.detected_skill_count()));
        if summary.skills.is_empty() {
            output.push_str("No skills were detected.\n\n");
        }
        for group in &summary.skills {
            output.push_str(&format!("- **{}:** {}\n", group.category, group.skills.join(", ")));
        }
        if !summary.skill_recommendations.is_empty() {
            output.push('\n');
            for recommendation in &summary.skill_recommendations {
                output.push_str(&format!("> 💡 {}\n>\n", recommendation));
            }
        }
        output.push('\n');

        output.push_str("## 👤 Candidate Profile\n\n");
        for (label, value) in &summary.profile {
            output.push_str(&format!("- **{}:** {}\n", label, value));
        }
        output.push('\n');

        output.push_str("## 💬 Feedback\n");
        for (item, line) in summary.feedback.iter().zip(&report.feedback) {
            if item.heading {
                output.push_str(&format!("\n### {}\n\n", item.text));
            } else {
                output.push_str(&format!("- {}\n", line.trim()));
            }
        }

        if self.include_metadata {
            output.push_str("\n---\n\n");
            for (label, value) in &summary.metadata {
                output.push_str(&format!("*{}: {}*  \n", label, value));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let summary = ReportSummary::from_report(report);

        let score_class = match summary.overall_score {
            s if s >= 90.0 => "score-excellent",
            s if s >= 70.0 => "score-good",
            s if s >= 60.0 => "score-fair",
            _ => "score-poor",
        };

        let components_html = summary
            .components
            .iter()
            .map(|row| {
                format!(
                    "<div class=\"score-item\"><h4>{}</h4><p><strong>{}/100</strong></p></div>",
                    row.component,
                    format_points(row.score)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let sections_html = html_list(summary.sections.iter().map(|row| {
            format!("{} {}", if row.present { "✅" } else { "❌" }, row.section)
        }));

        let skills_html = if summary.skills.is_empty() {
            "<p>No skills were detected.</p>".to_string()
        } else {
            summary
                .skills
                .iter()
                .map(|group| {
                    let tags = group
                        .skills
                        .iter()
                        .map(|skill| format!("<span class=\"skill-tag\">{}</span>", escape_html(skill)))
                        .collect::<Vec<_>>()
                        .join("");
                    format!("<h4>{}</h4>\n<div>{}</div>", escape_html(&group.category), tags)
                })
                .collect::<Vec<_>>()
                .join("\n")
        };

        let skill_recommendations_html = html_list(summary.skill_recommendations.iter().map(|r| escape_html(r)));

        let profile_html = html_list(
            summary
                .profile
                .iter()
                .map(|(label, value)| format!("<strong>{}:</strong> {}", label, escape_html(value))),
        );

        let feedback_html = format!(
            "<ul>\n{}\n</ul>",
            summary
                .feedback
                .iter()
                .map(|item| {
                    let class = match (item.heading, item.kind) {
                        (true, _) => "feedback-heading",
                        (false, FeedbackKind::Strength) => "feedback-strength",
                        (false, FeedbackKind::Critical) => "feedback-critical",
                        (false, FeedbackKind::Suggestion) => "feedback-suggestion",
                        (false, FeedbackKind::Info) => "feedback-info",
                    };
                    format!("  <li class=\"{}\">{}</li>", class, escape_html(&item.text))
                })
                .collect::<Vec<_>>()
                .join("\n")
        );

        let metadata_html = summary
            .metadata
            .iter()
            .map(|(label, value)| format!("<p><strong>{}:</strong> {}</p>", label, escape_html(value)))
            .collect::<Vec<_>>()
            .join("\n");

        HtmlTemplate {
            include_styles: self.include_styles,
            file_name: summary.file_name.clone(),
            generated_at: report.analysis_metadata.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            overall_score: format_score(summary.overall_score),
            grade: summary.grade.to_string(),
            score_class: score_class.to_string(),
            score_label: summary.score_label.to_string(),
            components_html,
            sections_html,
            skill_count: summary.detected_skill_count(),
            skills_html,
            has_skill_recommendations: !summary.skill_recommendations.is_empty(),
            skill_recommendations_html,
            has_profile: !summary.profile.is_empty(),
            profile_html,
            feedback_html,
            metadata_html,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let template_data = self.create_template_data(report);
        template_data
            .render()
            .map_err(|e| AnalyzerError::Report(format!("Failed to render HTML: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

fn html_list(items: impl Iterator<Item = String>) -> String {
    let items: Vec<String> = items.map(|item| format!("  <li>{}</li>", item)).collect();
    if items.is_empty() {
        String::new()
    } else {
        format!("<ul>\n{}\n</ul>", items.join("\n"))
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, include_profile: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed, include_profile),
            file_console_formatter: ConsoleFormatter::new(false, detailed, include_profile),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    /// Text rendering; PDF is binary and goes through `render`
    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
            OutputFormat::Pdf => Err(AnalyzerError::InvalidInput(
                "PDF output is binary; save it to a file instead".to_string(),
            )),
        }
    }

    /// File rendering; console output is written without colors
    pub fn render(&self, report: &AnalysisReport, format: OutputFormat) -> Result<Vec<u8>> {
        match format {
            OutputFormat::Pdf => render_pdf(report),
            OutputFormat::Console => Ok(self.file_console_formatter.format_report(report)?.into_bytes()),
            text_format => Ok(self.generate_report(report, text_format)?.into_bytes()),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: impl AsRef<[u8]>, file_path: &Path) -> Result<()> {
    use std::fs;

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };
    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_plain_console_output() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true, true).format_report(&report).unwrap();

        assert!(output.contains("RESUME ANALYSIS: jane_doe.txt"));
        assert!(output.contains(&format!("Grade: {}", report.score_breakdown.grade)));
        assert!(output.contains("✗ Projects"));
        assert!(output.contains("Skill Confidence"));
        assert!(output.contains("jane.doe@example.com"));
        assert!(!output.contains("**"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_output_is_payload() {
        let report = sample_report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["score"], serde_json::json!(report.score));
        assert_eq!(value["analysis_metadata"]["file_name"], "jane_doe.txt");
        assert_eq!(value["feedback"].as_array().unwrap().len(), report.feedback.len());
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# 📊 Resume Analysis: jane_doe.txt"));
        assert!(output.contains("| Component | Score |"));
        assert!(output.contains("- [x] Experience"));
        assert!(output.contains("- [ ] Projects"));
        assert!(output.contains("### 📊 Score Breakdown:"));
        assert!(output.contains("*File Size: 2.00 KB*"));
    }

    #[test]
    fn test_html_output_escapes_content() {
        let mut report = sample_report();
        report.analysis_metadata.file_name = "<script>.txt".to_string();
        let html = HtmlFormatter::new(false).format_report(&report).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<style>"));
        assert!(html.contains("feedback-heading"));
        assert!(html.contains("feedback-strength"));
        assert!(html.contains("skill-tag"));
    }

    #[test]
    fn test_generator_dispatch() {
        let report = sample_report();
        let generator = ReportGenerator::with_options(false, false, false);
        assert_eq!(generator.html_formatter.supports_format(), OutputFormat::Html);
        assert_eq!(generator.markdown_formatter.supports_format(), OutputFormat::Markdown);

        assert!(generator.generate_report(&report, OutputFormat::Pdf).is_err());
        assert!(generator.render(&report, OutputFormat::Pdf).unwrap().starts_with(b"%PDF"));
        let console = generator.render(&report, OutputFormat::Console).unwrap();
        assert!(!String::from_utf8(console).unwrap().contains("Candidate Profile"));
    }

    #[test]
    fn test_saved_console_report_has_no_colors() {
        let report = sample_report();
        let generator = ReportGenerator::with_options(true, false, true);
        colored::control::set_override(true);

        let terminal = generator.generate_report(&report, OutputFormat::Console).unwrap();
        let saved = String::from_utf8(generator.render(&report, OutputFormat::Console).unwrap()).unwrap();
        colored::control::unset_override();

        assert!(terminal.contains("\u{1b}["));
        assert!(!saved.contains("\u{1b}["));
        assert!(saved.contains("RESUME ANALYSIS: jane_doe.txt"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "cv/jane_doe.pdf", false), "jane_doe_analysis.json");
        assert_eq!(suggest_filename(OutputFormat::Pdf, "resume.docx", false), "resume_analysis.pdf");
        assert!(suggest_filename(OutputFormat::Html, "resume.md", true).starts_with("resume_analysis_"));
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("out.md");
        save_report_to_file("# Report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Report");
    }
}
