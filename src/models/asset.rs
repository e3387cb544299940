use serde::Deserialize;
use std::collections::HashMap;

/// Kinds of publication assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Text,
    Image,
    Cover,
}

impl AssetType {
    /// The value sent as the `assetType` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            AssetType::Cover => "cover1",
            AssetType::Image => "image1",
            AssetType::Text => "text1",
        }
    }
}

/// Assets extracted from one document page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetResult {
    pub assets: Option<AssetSet>,
    pub thumbnails: Option<ThumbnailSet>,
    pub page_image: Option<String>,
    #[serde(default)]
    pub page_number: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetSet {
    pub text: Option<HashMap<String, Vec<String>>>,
    #[serde(rename = "image")]
    pub images: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThumbnailSet {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
}
