//! resume-analyzer: resume quality analysis from the command line

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_analyzer::cli::{Cli, Commands, ConfigAction};
use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{render_pdf, save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::processing::taxonomy::SkillTaxonomy;
use resume_analyzer::{AnalysisEngine, AnalysisReport, Config};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            files,
            format,
            save,
            detailed,
            pdf,
            taxonomy,
        } => {
            if let Some(path) = taxonomy {
                config.taxonomy.path = path;
            }
            let format = format.unwrap_or(config.output.format);
            let detailed = detailed || config.output.detailed;

            let reports = analyze_files(&files, &config).await?;
            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed,
                config.output.include_profile,
            );
            let several = reports.len() > 1;

            for report in &reports {
                match (&save, format) {
                    (Some(target), _) => {
                        let path = output_path(target, several, format, &report.analysis_metadata.file_name);
                        let content = generator.render(report, format)?;
                        save_report_to_file(&content, &path)
                            .with_context(|| format!("Failed to save report to {}", path.display()))?;
                        println!("💾 Report saved to {}", path.display());
                    }
                    (None, OutputFormat::Pdf) => {
                        let path = PathBuf::from(suggest_filename(format, &report.analysis_metadata.file_name, false));
                        save_report_to_file(render_pdf(report)?, &path)
                            .with_context(|| format!("Failed to save report to {}", path.display()))?;
                        println!("💾 PDF report saved to {}", path.display());
                    }
                    (None, _) => println!("{}", generator.generate_report(report, format)?),
                }

                if let Some(target) = &pdf {
                    let path = output_path(target, several, OutputFormat::Pdf, &report.analysis_metadata.file_name);
                    save_report_to_file(render_pdf(report)?, &path)
                        .with_context(|| format!("Failed to save PDF report to {}", path.display()))?;
                    println!("📄 PDF report saved to {}", path.display());
                }
            }

            let failed = files.len() - reports.len();
            if failed > 0 {
                bail!("{} of {} files could not be analyzed", failed, files.len());
            }
        }

        Commands::Skills { category, taxonomy } => {
            let path = taxonomy.unwrap_or(config.taxonomy.path);
            let taxonomy = SkillTaxonomy::load_or_default(&path);

            match category {
                Some(name) => {
                    let Some(found) = taxonomy.find_category(&name) else {
                        return Err(match taxonomy.suggest_category(&name) {
                            Some(suggestion) => anyhow!("Unknown category '{}'. Did you mean '{}'?", name, suggestion),
                            None => anyhow!("Unknown category '{}'", name),
                        });
                    };
                    print_category(found, taxonomy.skills(found).unwrap_or_default());
                }
                None => {
                    println!(
                        "🛠️  Skill taxonomy: {} categories, {} skills",
                        taxonomy.category_count(),
                        taxonomy.skill_count()
                    );
                    for (name, skills) in taxonomy.iter() {
                        print_category(name, skills);
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default()
                    .save_to(config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

/// Extract and analyze every file concurrently, keeping input order.
/// Failures are logged per file and left out of the result.
async fn analyze_files(files: &[PathBuf], config: &Config) -> anyhow::Result<Vec<AnalysisReport>> {
    let engine = Arc::new(AnalysisEngine::new(config));
    let input_manager = Arc::new(InputManager::new(&config.input));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {} file(s)...", files.len()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut tasks = JoinSet::new();
    for (index, path) in files.iter().cloned().enumerate() {
        let engine = Arc::clone(&engine);
        let input_manager = Arc::clone(&input_manager);
        tasks.spawn(async move {
            let result = match input_manager.extract_document(&path).await {
                Ok(document) => Ok(engine.analyze_document(&document)),
                Err(e) => Err(e),
            };
            (index, path, result)
        });
    }

    let mut reports = Vec::with_capacity(files.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, path, result) = joined.context("Analysis task panicked")?;
        match result {
            Ok(report) => {
                info!("Finished {}", path.display());
                reports.push((index, report));
            }
            Err(e) => {
                spinner.suspend(|| warn!("Skipping {}: {}", path.display(), e));
            }
        }
    }
    spinner.finish_and_clear();

    if reports.is_empty() {
        bail!("No files could be analyzed");
    }
    reports.sort_by_key(|(index, _)| *index);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}

/// `target` is a directory when several reports are written
fn output_path(target: &Path, several: bool, format: OutputFormat, file_name: &str) -> PathBuf {
    if several || target.is_dir() {
        target.join(suggest_filename(format, file_name, false))
    } else {
        target.to_path_buf()
    }
}

fn print_category(name: &str, skills: &[String]) {
    println!("\n{} ({})", name.bold(), skills.len());
    println!("  {}", skills.join(", "));
}
