//! CLI interface for the resume analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(version)]
#[command(about = "Resume quality analysis: sections, skills, score and feedback")]
#[command(long_about = "Analyze resumes (PDF, DOCX, TXT, MD) with deterministic section detection, taxonomy-based skill classification, weighted scoring and prioritized feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one or more resume files
    Analyze {
        /// Resume files (PDF, DOCX, TXT, MD)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long, value_parser = parse_output_format)]
        format: Option<OutputFormat>,

        /// Save output to a file (a directory when analyzing several files)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include skill confidences, gaps and metadata
        #[arg(short, long)]
        detailed: bool,

        /// Also write a PDF report to this path
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Skill taxonomy JSON overriding the configured one
        #[arg(short, long)]
        taxonomy: Option<PathBuf>,
    },

    /// List skill taxonomy categories and skills
    Skills {
        /// Show only this category
        #[arg(long)]
        category: Option<String>,

        /// Skill taxonomy JSON overriding the configured one
        #[arg(short, long)]
        taxonomy: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html, pdf",
            format
        )),
    }
}
