//! Report rendering in console, JSON, Markdown, HTML and PDF form

pub mod formatter;
pub mod pdf;
pub mod report;

pub use formatter::{save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator};
pub use pdf::render_pdf;
pub use report::ReportSummary;
