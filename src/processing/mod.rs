//! Text processing and analysis module

pub mod analyzer;
pub mod confidence;
pub mod feedback;
pub mod profile;
pub mod scoring;
pub mod sections;
pub mod signals;
pub mod skill_classifier;
pub mod taxonomy;

pub use analyzer::{Analysis, AnalysisEngine, AnalysisReport};
pub use sections::{detect_sections, Section, SectionPresenceMap};
pub use taxonomy::SkillTaxonomy;
