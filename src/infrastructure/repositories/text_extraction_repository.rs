use crate::domain::document::{Document, DocumentType};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{Cursor, Read};

/// Repository for turning uploaded documents into plain text.
///
/// Extraction is all-or-nothing: either the full text or an error, never a
/// partial result.
#[async_trait]
pub trait TextExtractionRepository: Send + Sync {
    async fn extract(&self, document: &Document) -> Result<String, String>;
}

const DOCX_BODY_PART: &str = "word/document.xml";

/// Text runs, paragraph ends, tabs and breaks in WordprocessingML
static DOCX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|</w:p>|<w:p(?:\s[^>]*)?/>|<w:tab/>|<w:br/>").unwrap()
});

static XML_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(amp|lt|gt|quot|apos|#[0-9]+|#x[0-9a-fA-F]+);").unwrap());

/// Extracts text from plain text, PDF and DOCX uploads
#[derive(Debug, Default)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(document_type: DocumentType, bytes: &[u8]) -> Result<String, String> {
        match document_type {
            DocumentType::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
            DocumentType::Pdf => pdf_extract::extract_text_from_mem(bytes)
                .map_err(|e| format!("Error reading PDF: {:?}", e)),
            DocumentType::Docx => extract_docx(bytes),
        }
    }
}

#[async_trait]
impl TextExtractionRepository for DocumentTextExtractor {
    async fn extract(&self, document: &Document) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        let document_type = document.document_type;
        let bytes = document.bytes.clone();

        // PDF parsing is CPU bound and may panic on malformed input
        let text = tokio::task::spawn_blocking(move || Self::extract_blocking(document_type, &bytes))
            .await
            .map_err(|e| format!("Extraction of {} document aborted: {}", document_type, e))??;

        tracing::info!(
            document_type = %document_type,
            document_size_bytes = document.bytes.len(),
            text_length = text.len(),
            latency_ms = start_time.elapsed().as_millis(),
            "Document text extracted"
        );

        Ok(text)
    }
}

/// Paragraph text of a DOCX body, one paragraph per line
fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| format!("Error reading DOCX container: {}", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| format!("Error reading DOCX body: {}", e))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("Error reading DOCX body: {}", e))?;

    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for token in DOCX_TOKEN.captures_iter(&xml) {
        if let Some(run) = token.get(1) {
            current.push_str(&decode_entities(run.as_str()));
            continue;
        }
        match &token[0] {
            "<w:tab/>" => current.push('\t'),
            "<w:br/>" => current.push('\n'),
            _ => paragraphs.push(std::mem::take(&mut current)),
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    Ok(paragraphs.join("\n"))
}

fn decode_entities(text: &str) -> String {
    XML_ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ if entity.starts_with("#x") => {
                    u32::from_str_radix(&entity[2..], 16).ok().and_then(char::from_u32)
                }
                _ => entity[1..].parse::<u32>().ok().and_then(char::from_u32),
            };
            decoded.map(String::from).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
