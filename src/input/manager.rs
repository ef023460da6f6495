//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Text pulled out of a resume file plus what the report needs to know about the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub path: PathBuf,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: FileType,
    pub text: String,
}

pub struct InputManager {
    max_file_size: u64,
    input: InputConfig,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(&crate::config::Config::default().input)
    }
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes(),
            input: config.clone(),
        }
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        Ok(self.extract_document(path).await?.text)
    }

    pub async fn extract_document(&self, path: &Path) -> Result<ExtractedDocument> {
        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let file_size = tokio::fs::metadata(path).await?.len();
        if file_size > self.max_file_size {
            return Err(AnalyzerError::FileTooLarge {
                size: file_size,
                limit: self.max_file_size,
            });
        }

        info!("Extracting {} text from: {}", file_type, path.display());
        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Docx => DocxExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )))
            }
        };

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(AnalyzerError::EmptyText(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ExtractedDocument {
            path: path.to_path_buf(),
            file_name,
            file_size,
            file_type,
            text,
        })
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AnalyzerError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        let file_type = FileType::from_extension(extension);
        if !file_type.is_supported() || !self.input.is_extension_allowed(extension) {
            return Err(AnalyzerError::UnsupportedFormat(format!(
                ".{} (allowed: {})",
                extension,
                self.input.allowed_extensions.join(", ")
            )));
        }
        Ok(file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "  Jane Doe\nExperience\n").unwrap();

        let document = InputManager::default().extract_document(&path).await.unwrap();
        assert_eq!(document.text, "Jane Doe\nExperience");
        assert_eq!(document.file_name, "resume.txt");
        assert_eq!(document.file_type, FileType::Text);
        assert_eq!(document.file_size, 22);
    }

    #[tokio::test]
    async fn test_rejected_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let manager = InputManager::default();

        let missing = manager.extract_document(&dir.path().join("nope.txt")).await;
        assert!(matches!(missing, Err(AnalyzerError::InvalidInput(_))));

        let unknown = dir.path().join("resume.xyz");
        std::fs::write(&unknown, "text").unwrap();
        assert!(matches!(
            manager.extract_document(&unknown).await,
            Err(AnalyzerError::UnsupportedFormat(_))
        ));

        let blank = dir.path().join("blank.txt");
        std::fs::write(&blank, "   \n\t").unwrap();
        assert!(matches!(
            manager.extract_document(&blank).await,
            Err(AnalyzerError::EmptyText(_))
        ));
    }

    #[tokio::test]
    async fn test_size_and_extension_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.md");
        std::fs::write(&path, "x".repeat(2 * 1024 * 1024)).unwrap();

        let manager = InputManager::new(&InputConfig {
            max_file_size_mb: 1,
            allowed_extensions: vec!["md".to_string()],
        });
        assert!(matches!(
            manager.extract_document(&path).await,
            Err(AnalyzerError::FileTooLarge { .. })
        ));

        let txt = dir.path().join("resume.txt");
        std::fs::write(&txt, "Experience").unwrap();
        assert!(matches!(
            manager.extract_document(&txt).await,
            Err(AnalyzerError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_allow_list_ignores_extension_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("RESUME.TXT");
        std::fs::write(&path, "Experience").unwrap();

        let manager = InputManager::new(&InputConfig {
            max_file_size_mb: 1,
            allowed_extensions: vec!["Txt".to_string()],
        });
        let document = manager.extract_document(&path).await.unwrap();
        assert_eq!(document.file_type, FileType::Text);
    }
}
