//! Configuration management for the resume analyzer

use crate::error::{AnalyzerError, Result};
use crate::processing::scoring::{ScoreCoefficients, WeightTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub scoring: ScoringConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// JSON `{category: [skills]}`; the built-in taxonomy is used when unreadable
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: WeightTable,
    pub coefficients: ScoreCoefficients,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_file_size_mb: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub include_profile: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy: TaxonomyConfig {
                path: PathBuf::from("data").join("skills.json"),
            },
            scoring: ScoringConfig {
                weights: WeightTable::default(),
                coefficients: ScoreCoefficients::default(),
            },
            input: InputConfig {
                max_file_size_mb: 16,
                allowed_extensions: ["pdf", "docx", "txt", "md"].iter().map(|e| e.to_string()).collect(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                include_profile: true,
                color_output: true,
            },
        }
    }
}

impl InputConfig {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    pub fn is_extension_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Read `path`, creating it with defaults when it does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AnalyzerError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-analyzer")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.scoring.coefficients;
        if [c.section, c.structure, c.content, c.impact].iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(AnalyzerError::Configuration(
                "Score coefficients must be between 0 and 1".to_string(),
            ));
        }
        if self.input.max_file_size_mb == 0 {
            return Err(AnalyzerError::Configuration(
                "max_file_size_mb must be greater than zero".to_string(),
            ));
        }
        if self.input.allowed_extensions.is_empty() {
            return Err(AnalyzerError::Configuration(
                "At least one input extension must be allowed".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scoring.weights.experience, 30);
        assert_eq!(config.input.max_file_size_bytes(), 16 * 1024 * 1024);
        assert!(config.input.is_extension_allowed("PDF"));
        assert!(!config.input.is_extension_allowed("exe"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_size_limit_saturates() {
        let mut config = Config::default();
        config.input.max_file_size_mb = u64::MAX / 1024;
        assert!(config.validate().is_ok());
        assert_eq!(config.input.max_file_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_with_custom_weights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.weights.projects = 25;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AnalyzerError::Configuration(_))));

        let mut config = Config::default();
        config.scoring.coefficients.impact = 1.5;
        assert!(config.validate().is_err());
    }
}
