//! Text extraction from various file formats

use crate::error::{AnalyzerError, Result};
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

const DOCX_BODY: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            AnalyzerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let docx_error = |e: zip::result::ZipError| {
            AnalyzerError::DocxExtraction(format!("Failed to open DOCX '{}': {}", path.display(), e))
        };
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(docx_error)?;
        let mut body = String::new();
        archive
            .by_name(DOCX_BODY)
            .map_err(docx_error)?
            .read_to_string(&mut body)?;

        docx_xml_to_text(&body)
    }
}

/// Plain text of a WordprocessingML body: non-empty top-level paragraphs
/// first, then one line per table row with its non-empty cells joined by
/// `" | "`.
pub fn docx_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut rows: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut cell: Vec<String> = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut table_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"tbl" => table_depth += 1,
                b"tr" if table_depth == 1 => cells.clear(),
                b"tc" if table_depth == 1 => cell.clear(),
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => paragraph.push('\t'),
                b"br" | b"cr" => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t.unescape().map_err(|e| AnalyzerError::DocxExtraction(e.to_string()))?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" if table_depth == 0 => {
                    if !paragraph.trim().is_empty() {
                        paragraphs.push(std::mem::take(&mut paragraph));
                    }
                }
                b"p" => cell.push(std::mem::take(&mut paragraph)),
                b"tc" if table_depth == 1 => cells.push(cell.join("\n").trim().to_string()),
                b"tr" if table_depth == 1 => {
                    let row: Vec<&str> = cells.iter().map(String::as_str).filter(|c| !c.is_empty()).collect();
                    if !row.is_empty() {
                        rows.push(row.join(" | "));
                    }
                }
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AnalyzerError::DocxExtraction(format!(
                    "Malformed document XML at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    paragraphs.extend(rows);
    Ok(paragraphs.join("\n"))
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }

    fn html_to_text(&self, html: &str) -> String {
        let text = html.replace("<br>", "\n").replace("</p>", "\n\n");

        let re = regex::Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex");
        let clean_text = re
            .replace_all(&text, "")
            .replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&");

        let lines: Vec<&str> = clean_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Work </w:t></w:r><w:r><w:t>Experience</w:t></w:r></w:p>
    <w:p></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p><w:r><w:t>Acme &amp; Co</w:t></w:r></w:p></w:tc>
        <w:tc><w:p></w:p></w:tc>
        <w:tc><w:p><w:r><w:t>2019-2023</w:t></w:r></w:p></w:tc>
      </w:tr>
    </w:tbl>
    <w:p><w:r><w:t>Education</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs_then_tables() {
        let text = docx_xml_to_text(DOCUMENT_XML).unwrap();
        assert_eq!(text, "Jane Doe\nWork Experience\nEducation\nAcme & Co | 2019-2023");
    }

    #[test]
    fn test_malformed_docx_xml() {
        let result = docx_xml_to_text("<w:document><w:body></w:document>");
        assert!(matches!(result, Err(AnalyzerError::DocxExtraction(_))));
    }

    #[tokio::test]
    async fn test_docx_archive_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file(DOCX_BODY, options).unwrap();
        writer.write_all(DOCUMENT_XML.as_bytes()).unwrap();
        writer.finish().unwrap();

        let text = DocxExtractor.extract(&path).await.unwrap();
        assert!(text.starts_with("Jane Doe\nWork Experience"));
    }

    #[tokio::test]
    async fn test_docx_without_body_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let result = DocxExtractor.extract(&path).await;
        assert!(matches!(result, Err(AnalyzerError::DocxExtraction(_))));
    }

    #[test]
    fn test_markdown_to_text() {
        let markdown = "# Jane Doe\n\n## Experience\n\n- Built **APIs** & tools\n";
        let text = MarkdownExtractor.markdown_to_text(markdown);
        assert_eq!(text, "Jane Doe\nExperience\nBuilt APIs & tools");
    }
}
