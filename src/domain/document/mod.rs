use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Declared format of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Text,
    Pdf,
    Docx,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [DocumentType::Text, DocumentType::Pdf, DocumentType::Docx];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Text => "text",
            DocumentType::Pdf => "pdf",
            DocumentType::Docx => "docx",
        }
    }

    /// Infer the type from an upload's file extension
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(DocumentType::Text),
            "pdf" => Some(DocumentType::Pdf),
            "docx" => Some(DocumentType::Docx),
            _ => None,
        }
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(DocumentType::Text),
            "pdf" => Ok(DocumentType::Pdf),
            "docx" => Ok(DocumentType::Docx),
            other => Err(format!("Unknown document type: {}", other)),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An uploaded document, alive for one request
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub document_type: DocumentType,
}

impl Document {
    pub fn new(bytes: Vec<u8>, document_type: DocumentType) -> Self {
        Self {
            bytes,
            document_type,
        }
    }
}
