use serde::{Deserialize, Serialize};

/// Options for the embed code of a publication. Sent as query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSettings {
    /// Scale the reader with its container.
    pub responsive: bool,
    /// CSS width of the embed, e.g. `100%` or `640px`.
    pub width: Option<String>,
    /// CSS height of the embed.
    pub height: Option<String>,
    /// Hide the Issuu logo.
    pub hide_issuu_logo: bool,
    /// Hide the share button.
    pub hide_share_button: bool,
    /// Suggest other publications of the account when the reader ends.
    pub show_other_publications: bool,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            responsive: true,
            width: Some("100%".to_string()),
            height: Some("100%".to_string()),
            hide_issuu_logo: false,
            hide_share_button: false,
            show_other_publications: false,
        }
    }
}

/// Embed code returned for a publication.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbedResult {
    /// HTML snippet to paste into a page.
    pub embed: String,
}

/// Presentation of a full-screen share.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Turn pages automatically.
    #[serde(rename = "autoflip")]
    pub auto_flip: bool,
    /// Hex background color, e.g. `#ffffff`.
    pub background_color: Option<String>,
    pub background_image_position: BackgroundImagePosition,
    /// Image shown behind the reader.
    pub background_image_url: Option<String>,
    /// Hide the share button.
    pub hide_share: bool,
    /// Logo shown in the reader header.
    pub logo_url: Option<String>,
    pub page_layout: PageLayout,
    /// Suggest other publications of the account when the reader ends.
    pub show_other_publications: bool,
    /// Page the reader opens on, starting at 1.
    pub start_page: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            auto_flip: false,
            background_color: None,
            background_image_position: BackgroundImagePosition::TopLeft,
            background_image_url: None,
            hide_share: false,
            logo_url: None,
            page_layout: PageLayout::Double,
            show_other_publications: false,
            start_page: 1,
        }
    }
}

/// Pages shown side by side or one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageLayout {
    Double,
    Single,
}

/// How a background image is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImagePosition {
    TopLeft,
    Stretch,
}

/// A share link for a publication.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShareResult {
    /// The link to hand out.
    pub url: String,
}

/// Options for a QR code share.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrDisplaySettings {
    /// Image format of the QR code.
    pub format: QrFormat,
    /// Presentation of the full-screen reader the code points to.
    pub full_screen_settings: Option<DisplaySettings>,
}

/// Image format of a QR code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

/// A generated QR code.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrShareResult {
    /// Where the QR code image can be downloaded.
    pub qr_code_url: String,
    /// The URL encoded in the QR code.
    pub pointed_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_settings_wire_names() {
        let json = serde_json::to_value(DisplaySettings::default()).unwrap();
        assert_eq!(json["autoflip"], false);
        assert_eq!(json["backgroundImagePosition"], "topLeft");
        assert_eq!(json["pageLayout"], "double");
        assert_eq!(json["startPage"], 1);
    }

    #[test]
    fn test_qr_settings_wire_names() {
        let settings = QrDisplaySettings {
            format: QrFormat::Svg,
            full_screen_settings: None,
        };
        let json = serde_json::to_value(settings).unwrap();
        assert_eq!(json["format"], "SVG");
        assert!(json["fullScreenSettings"].is_null());
    }
}
