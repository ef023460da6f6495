//! PDF rendering of an analysis report
//!
//! Uses the built-in Helvetica faces, so all text is reduced to Latin-1
//! before it is written. Layout is computed first as a flat list of lines
//! and then split into A4 pages.

use crate::error::{AnalyzerError, Result};
use crate::output::report::{format_score, ReportSummary};
use crate::processing::analyzer::AnalysisReport;
use crate::processing::feedback::FeedbackKind;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 15.0;
const TOP: f32 = PAGE_HEIGHT - 25.0;
const BOTTOM: f32 = 20.0;
/// Characters per wrapped body line at 10pt Helvetica across the text width
const WRAP_WIDTH: usize = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Chapter,
    Label,
    Body,
    Feedback(FeedbackKind),
    Spacer,
}

impl LineStyle {
    fn font_size(&self) -> f32 {
        match self {
            LineStyle::Title => 16.0,
            LineStyle::Chapter => 12.0,
            _ => 10.0,
        }
    }

    /// Vertical space consumed, in millimetres
    fn height(&self) -> f32 {
        match self {
            LineStyle::Title => 10.0,
            LineStyle::Chapter => 9.0,
            LineStyle::Spacer => 3.0,
            _ => 5.0,
        }
    }

    fn bold(&self) -> bool {
        !matches!(self, LineStyle::Body | LineStyle::Spacer)
    }

    fn color(&self) -> Color {
        let (r, g, b) = match self {
            LineStyle::Feedback(FeedbackKind::Strength) => (34, 139, 34),
            LineStyle::Feedback(FeedbackKind::Suggestion) => (255, 140, 0),
            LineStyle::Feedback(FeedbackKind::Critical) => (220, 20, 60),
            LineStyle::Chapter => (0, 90, 160),
            _ => (20, 20, 20),
        };
        Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PdfLine {
    pub style: LineStyle,
    pub text: String,
}

impl PdfLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn spacer() -> Self {
        Self::new(LineStyle::Spacer, "")
    }
}

/// Render the report as a PDF document
pub fn render_pdf(report: &AnalysisReport) -> Result<Vec<u8>> {
    let summary = ReportSummary::from_report(report);
    let pages = paginate(layout(&summary));

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Resume Analysis Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    let page_count = pages.len();
    for (index, lines) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        draw_page(&layer, lines, &regular, &bold);
        draw_footer(&layer, index + 1, page_count, &regular);
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn pdf_error(e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::Report(format!("Failed to render PDF: {}", e))
}

fn draw_page(layer: &PdfLayerReference, lines: &[PdfLine], regular: &IndirectFontRef, bold: &IndirectFontRef) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.35, 0.63, None)));
    layer.use_text("Resume Analysis Report", 15.0, Mm(MARGIN), Mm(PAGE_HEIGHT - 15.0), bold);

    let mut y = TOP;
    for line in lines {
        y -= line.style.height();
        if line.style == LineStyle::Spacer {
            continue;
        }
        let font = if line.style.bold() { bold } else { regular };
        layer.set_fill_color(line.style.color());
        layer.use_text(line.text.as_str(), line.style.font_size(), Mm(MARGIN), Mm(y), font);
    }
}

fn draw_footer(layer: &PdfLayerReference, page: usize, total: usize, font: &IndirectFontRef) {
    layer.set_fill_color(Color::Rgb(Rgb::new(0.5, 0.5, 0.5, None)));
    layer.use_text(
        format!("Page {} of {}", page, total),
        8.0,
        Mm(PAGE_WIDTH / 2.0 - 10.0),
        Mm(10.0),
        font,
    );
}

/// Flat, wrapped and sanitized line list for the whole report
pub fn layout(summary: &ReportSummary) -> Vec<PdfLine> {
    let mut lines = Vec::new();

    push_wrapped(&mut lines, LineStyle::Title, &format!("Analysis for: {}", summary.file_name));
    push_wrapped(
        &mut lines,
        LineStyle::Label,
        &format!(
            "Overall Score: {} | Grade: {} ({})",
            format_score(summary.overall_score),
            summary.grade,
            summary.score_label
        ),
    );
    lines.push(PdfLine::spacer());

    lines.push(PdfLine::new(LineStyle::Chapter, "Key Feedback"));
    if summary.feedback.is_empty() {
        push_wrapped(&mut lines, LineStyle::Body, "No specific feedback was generated.");
    }
    for item in &summary.feedback {
        if item.heading {
            lines.push(PdfLine::spacer());
        }
        push_wrapped(&mut lines, LineStyle::Feedback(item.kind), &format!("- {}", item.text));
    }
    lines.push(PdfLine::spacer());

    lines.push(PdfLine::new(LineStyle::Chapter, "Detected Skills"));
    if summary.skills.is_empty() {
        push_wrapped(&mut lines, LineStyle::Body, "No skills were detected.");
    }
    for group in &summary.skills {
        push_wrapped(&mut lines, LineStyle::Label, &group.category);
        push_wrapped(&mut lines, LineStyle::Body, &group.skills.join(", "));
    }
    lines.push(PdfLine::spacer());

    lines.push(PdfLine::new(LineStyle::Chapter, "Candidate Profile"));
    for (label, value) in &summary.profile {
        push_wrapped(&mut lines, LineStyle::Body, &format!("{}: {}", label, value));
    }
    lines.push(PdfLine::spacer());

    lines.push(PdfLine::new(LineStyle::Chapter, "Analysis Metadata"));
    for (label, value) in &summary.metadata {
        push_wrapped(&mut lines, LineStyle::Body, &format!("{}: {}", label, value));
    }

    lines
}

fn push_wrapped(lines: &mut Vec<PdfLine>, style: LineStyle, text: &str) {
    for chunk in wrap(&sanitize_latin1(text), WRAP_WIDTH) {
        lines.push(PdfLine::new(style, chunk));
    }
}

/// Split lines into pages that fit between the top and bottom margins.
/// Spacers at the top of a page are dropped.
pub fn paginate(lines: Vec<PdfLine>) -> Vec<Vec<PdfLine>> {
    let available = TOP - BOTTOM;
    let mut pages = Vec::new();
    let mut page: Vec<PdfLine> = Vec::new();
    let mut used = 0.0;

    for line in lines {
        let height = line.style.height();
        if used + height > available {
            pages.push(std::mem::take(&mut page));
            used = 0.0;
        }
        if page.is_empty() && line.style == LineStyle::Spacer {
            continue;
        }
        used += height;
        page.push(line);
    }

    if !page.is_empty() || pages.is_empty() {
        pages.push(page);
    }
    pages
}

/// Latin-1 only; anything else becomes `?`
pub fn sanitize_latin1(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\u{fe0f}')
        .map(|c| if (c as u32) <= 0xFF { c } else { '?' })
        .collect()
}

/// Greedy word wrap on whitespace; words longer than `width` are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::tests::sample_report;

    #[test]
    fn test_sanitize_latin1() {
        assert_eq!(sanitize_latin1("Café résumé"), "Café résumé");
        assert_eq!(sanitize_latin1("🎯 Score"), "? Score");
        assert_eq!(sanitize_latin1("⚠️ Warning"), "? Warning");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn test_pagination_respects_page_height() {
        let lines: Vec<PdfLine> = (0..120)
            .map(|i| PdfLine::new(LineStyle::Body, format!("line {}", i)))
            .collect();
        let pages = paginate(lines);

        // 252mm of usable height holds 50 body lines
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 50);
        assert_eq!(pages[2].len(), 20);
    }

    #[test]
    fn test_layout_contains_report_sections() {
        let summary = ReportSummary::from_report(&sample_report());
        let lines = layout(&summary);

        assert_eq!(lines[0].text, "Analysis for: jane_doe.txt");
        for chapter in ["Key Feedback", "Detected Skills", "Candidate Profile", "Analysis Metadata"] {
            assert!(lines.iter().any(|l| l.style == LineStyle::Chapter && l.text == chapter));
        }
        assert!(lines.iter().all(|l| l.text.chars().all(|c| (c as u32) <= 0xFF)));
        assert!(lines.iter().any(|l| matches!(l.style, LineStyle::Feedback(FeedbackKind::Critical))));
    }

    #[test]
    fn test_render_pdf_bytes() {
        let bytes = render_pdf(&sample_report()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
