//! Resume analyzer library
//!
//! Extracts text from resume files and runs a deterministic analysis
//! pipeline over it: section detection, taxonomy-based skill
//! classification with context confidence, weighted scoring and
//! feedback generation.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use processing::{AnalysisEngine, AnalysisReport};
