use super::document::{DocumentAccess, DocumentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The body of a draft create or update.
///
/// # Examples
///
/// ```
/// use issuu_client::models::{Draft, DocumentAccess};
///
/// let draft = Draft::new()
///     .title("Spring catalogue")
///     .access(DocumentAccess::Public)
///     .file_url("https://example.com/catalogue.pdf");
///
/// let json = serde_json::to_value(&draft).unwrap();
/// assert_eq!(json["info"]["title"], "Spring catalogue");
/// assert_eq!(json["info"]["access"], "PUBLIC");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Confirms the uploader holds the rights to the content.
    pub confirm_copyright: bool,
    /// URL of a file for the server to fetch instead of an upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Descriptive properties.
    pub info: DraftInfo,
}

/// Descriptive properties of a draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who can see the document once published.
    pub access: DocumentAccess,
    /// Editorial category.
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    /// Identifier of a file already uploaded to the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_id: Option<i64>,
    /// Readers may download the original file.
    pub downloadable: bool,
    /// The document is a preview of larger content.
    pub preview: bool,
    /// Extract links from the processed document.
    pub show_detected_links: bool,
    /// Publish date of content that appeared before.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_publish_date: Option<DateTime<Utc>>,
    /// When the draft should be published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
}

impl Draft {
    /// Creates a private draft with no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.info.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.info.description = Some(description.into());
        self
    }

    /// URL of a file for the server to fetch instead of an upload.
    pub fn file_url(mut self, url: impl Into<String>) -> Self {
        self.file_url = Some(url.into());
        self
    }

    /// Sets who can see the document.
    pub fn access(mut self, access: DocumentAccess) -> Self {
        self.info.access = access;
        self
    }

    /// Sets the editorial category.
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.info.document_type = document_type;
        self
    }

    /// Uses a file already uploaded to the account.
    pub fn file_id(mut self, file_id: i64) -> Self {
        self.info.file_id = Some(file_id);
        self
    }

    /// Confirms the uploader holds the rights to the content.
    pub fn confirm_copyright(mut self, confirm: bool) -> Self {
        self.confirm_copyright = confirm;
        self
    }

    /// Lets readers download the original file.
    pub fn downloadable(mut self, downloadable: bool) -> Self {
        self.info.downloadable = downloadable;
        self
    }

    /// Marks the document as a preview of larger content.
    pub fn preview(mut self, preview: bool) -> Self {
        self.info.preview = preview;
        self
    }

    /// Extract links from the processed document.
    pub fn show_detected_links(mut self, show: bool) -> Self {
        self.info.show_detected_links = show;
        self
    }

    /// Original publish date for historically published content.
    pub fn original_publish_date(mut self, date: DateTime<Utc>) -> Self {
        self.info.original_publish_date = Some(date);
        self
    }

    /// Schedules publication.
    pub fn scheduled_time(mut self, time: DateTime<Utc>) -> Self {
        self.info.scheduled_time = Some(time);
        self
    }
}

/// Body of a publish call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// URL name of the publication, already slugified.
    pub desired_name: Option<String>,
}

/// Where a published document can be found.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResult {
    /// Public location, for displaying.
    pub public_location: String,
    /// Private location, for editing.
    pub location: String,
}
