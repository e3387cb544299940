//! Resource types exchanged with the API.

mod asset;
mod document;
mod draft;
mod share;

pub use asset::{AssetResult, AssetSet, AssetType, ThumbnailSet};
pub use document::{
    ConversionStatus, CoverImages, Document, DocumentAccess, DocumentChanges, DocumentState,
    DocumentType, FileInfo, FileType, Image,
};
pub use draft::{Draft, DraftInfo, PublishRequest, PublishResult};
pub use share::{
    BackgroundImagePosition, DisplaySettings, EmbedResult, EmbedSettings, PageLayout,
    QrDisplaySettings, QrFormat, QrShareResult, ShareResult,
};
