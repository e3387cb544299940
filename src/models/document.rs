use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A document, either a draft or a publication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The document identifier.
    pub slug: String,

    /// The owning account.
    #[serde(default)]
    pub owner: String,

    /// The document URL.
    #[serde(default)]
    pub location: String,

    /// Lifecycle state, `Unknown` when the payload leaves it out.
    #[serde(default)]
    pub state: DocumentState,

    pub created: Option<DateTime<Utc>>,

    /// Pending or applied edits.
    pub changes: Option<DocumentChanges>,

    pub cover: Option<CoverImages>,

    pub file_info: Option<FileInfo>,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self
            .changes
            .as_ref()
            .and_then(|c| c.title.as_deref())
            .filter(|t| !t.is_empty());

        match title {
            Some(title) => write!(f, "Document: [{:?}] {} ({})", self.state, title, self.slug),
            None => write!(f, "Document: [{:?}] {}", self.state, self.slug),
        }
    }
}

/// Editable document properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub access: DocumentAccess,
    #[serde(default)]
    pub downloadable: bool,
    #[serde(default)]
    pub preview: bool,
    #[serde(default)]
    pub show_detected_links: bool,
    pub original_publish_date: Option<DateTime<Utc>>,
    pub scheduled_time: Option<DateTime<Utc>>,
}

/// Cover images in the sizes the API renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverImages {
    pub small: Option<Image>,
    pub medium: Option<Image>,
    pub large: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Details of the uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub page_count: u32,
    #[serde(rename = "type")]
    pub file_type: FileType,
    pub conversion_status: ConversionStatus,
    #[serde(default)]
    pub is_copyright_confirmed: bool,
}

/// Lifecycle state of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentState {
    Draft,
    Published,
    Scheduled,
    Unpublished,
    Quarantined,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Who can see a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentAccess {
    Public,
    #[default]
    Private,
}

/// Editorial category of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Editorial,
    Book,
    Promotion,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversionStatus {
    Done,
    Converting,
    Failed,
    #[serde(other)]
    Unknown,
}

/// Format of the uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Doc,
    Odp,
    Odt,
    Pdf,
    Ppt,
    Rtf,
    Sxi,
    Sxw,
    Wpd,
    Epub,
    Mobi,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "slug": "annual-report",
            "owner": "acme",
            "location": "https://issuu.com/acme/docs/annual-report",
            "state": "PUBLISHED",
            "created": "2024-03-01T10:00:00Z",
            "changes": {"title": "Annual report", "access": "PUBLIC", "downloadable": true},
            "fileInfo": {
                "name": "report.pdf",
                "size": 1024,
                "pageCount": 12,
                "type": "PDF",
                "conversionStatus": "DONE",
                "isCopyrightConfirmed": true
            }
        }"#;

        let document: Document = serde_json::from_str(json).unwrap();
        assert_eq!(document.state, DocumentState::Published);
        assert_eq!(document.file_info.as_ref().unwrap().file_type, FileType::Pdf);
        assert_eq!(document.changes.as_ref().unwrap().access, DocumentAccess::Public);
        assert_eq!(
            document.to_string(),
            "Document: [Published] Annual report (annual-report)"
        );
    }

    #[test]
    fn test_unknown_enum_values_are_tolerated() {
        let json = r#"{"slug": "x", "state": "ARCHIVED"}"#;
        let document: Document = serde_json::from_str(json).unwrap();
        assert_eq!(document.state, DocumentState::Unknown);
        assert_eq!(document.to_string(), "Document: [Unknown] x");
    }

    #[test]
    fn test_missing_state_defaults_to_unknown() {
        let json = r#"{"slug": "annual-report", "owner": "acme"}"#;
        let document: Document = serde_json::from_str(json).unwrap();
        assert_eq!(document.state, DocumentState::Unknown);
        assert_eq!(document.owner, "acme");
    }
}
