//! Request descriptors.
//!
//! A [`Request`] describes a single API call: method, relative path, query,
//! pagination hints, an optional typed JSON body and, for uploads, the
//! multipart form content. It is consumed by the client when sent.

use crate::query::QueryString;
use http::Method;
use std::fmt;
use std::path::PathBuf;

/// A file to upload as the `file` part of a multipart request.
pub enum Upload {
    /// A file on disk. The part's filename defaults to the path's file name.
    File {
        /// Location of the file.
        path: PathBuf,
        /// Explicit filename overriding the one taken from `path`.
        file_name: Option<String>,
    },

    /// A streamed body with an explicit filename.
    Stream {
        /// The body to stream.
        body: reqwest::Body,
        /// Filename reported in the part.
        file_name: String,
    },

    /// In-memory content with an explicit filename.
    Bytes {
        /// The file content.
        bytes: Vec<u8>,
        /// Filename reported in the part.
        file_name: String,
    },
}

impl Upload {
    /// Uploads the file at `path`.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Upload::File {
            path: path.into(),
            file_name: None,
        }
    }

    /// Uploads a streamed body under `file_name`.
    pub fn stream(body: impl Into<reqwest::Body>, file_name: impl Into<String>) -> Self {
        Upload::Stream {
            body: body.into(),
            file_name: file_name.into(),
        }
    }

    /// Uploads in-memory bytes under `file_name`.
    pub fn bytes(bytes: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Upload::Bytes {
            bytes: bytes.into(),
            file_name: file_name.into(),
        }
    }

    /// Overrides the filename reported for the part.
    pub fn with_file_name(self, name: impl Into<String>) -> Self {
        match self {
            Upload::File { path, .. } => Upload::File {
                path,
                file_name: Some(name.into()),
            },
            Upload::Stream { body, .. } => Upload::Stream {
                body,
                file_name: name.into(),
            },
            Upload::Bytes { bytes, .. } => Upload::Bytes {
                bytes,
                file_name: name.into(),
            },
        }
    }

    /// The filename the part will be sent with.
    ///
    /// For files without an explicit name this is the last component of the
    /// path, or `None` if the path has none (e.g. `..`).
    pub fn file_name(&self) -> Option<String> {
        match self {
            Upload::File {
                file_name: Some(name),
                ..
            } => Some(name.clone()),
            Upload::File {
                path,
                file_name: None,
            } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Upload::Stream { file_name, .. } | Upload::Bytes { file_name, .. } => {
                Some(file_name.clone())
            }
        }
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upload::File { path, file_name } => f
                .debug_struct("File")
                .field("path", path)
                .field("file_name", file_name)
                .finish(),
            Upload::Stream { file_name, .. } => f
                .debug_struct("Stream")
                .field("file_name", file_name)
                .finish_non_exhaustive(),
            Upload::Bytes { bytes, file_name } => f
                .debug_struct("Bytes")
                .field("len", &bytes.len())
                .field("file_name", file_name)
                .finish(),
        }
    }
}

/// Descriptor for a single API call.
///
/// `B` is the type of the JSON body; requests without a body use `()`.
///
/// # Examples
///
/// ```
/// use issuu_client::{query::QueryString, Request};
///
/// let request = Request::get("/publications/my-doc/assets")
///     .with_query(QueryString::new().add("assetType", "image1"))
///     .with_page(2)
///     .with_size(10);
///
/// assert_eq!(request.page(), Some(2));
/// assert_eq!(
///     request.full_query().to_string(),
///     "?assetType=image1&page=2&size=10"
/// );
/// ```
#[derive(Debug)]
pub struct Request<B = ()> {
    method: Method,
    path: String,
    query: QueryString,
    body: Option<B>,
    page: Option<u32>,
    size: Option<u32>,
    form_data: Vec<(String, String)>,
    upload: Option<Upload>,
    use_multipart: bool,
}

impl Request<()> {
    /// Creates a bodyless request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryString::new(),
            body: None,
            page: None,
            size: None,
            form_data: Vec::new(),
            upload: None,
            use_multipart: false,
        }
    }

    /// Creates a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body.
    pub fn with_body<B>(self, body: B) -> Request<B> {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            body: Some(body),
            page: self.page,
            size: self.size,
            form_data: self.form_data,
            upload: self.upload,
            use_multipart: self.use_multipart,
        }
    }
}

impl<B> Request<B> {
    /// Creates a `POST` request with a JSON body.
    pub fn post(path: impl Into<String>, body: B) -> Self {
        Request::new(Method::POST, path).with_body(body)
    }

    /// Creates a `PATCH` request with a JSON body.
    pub fn patch(path: impl Into<String>, body: B) -> Self {
        Request::new(Method::PATCH, path).with_body(body)
    }

    /// Sets the query parameters, replacing any set before.
    pub fn with_query(mut self, query: QueryString) -> Self {
        self.query = query;
        self
    }

    /// Requests a specific page. Values below 1 are raised to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Requests a specific page size. Values below 1 are raised to 1.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size.max(1));
        self
    }

    /// Sets both pagination hints from optional values.
    pub fn with_paging(mut self, page: Option<u32>, size: Option<u32>) -> Self {
        self.page = page.map(|p| p.max(1));
        self.size = size.map(|s| s.max(1));
        self
    }

    /// Adds a text field to the multipart form. Absent values are skipped.
    pub fn with_form_field(
        mut self,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        if let Some(value) = value {
            let key = key.into();
            let value = value.into();
            match self.form_data.iter_mut().find(|(k, _)| *k == key) {
                Some(field) => field.1 = value,
                None => self.form_data.push((key, value)),
            }
        }
        self
    }

    /// Sets the file to upload.
    ///
    /// The upload is only sent when multipart encoding is enabled with
    /// [`Request::multipart`].
    pub fn with_upload(mut self, upload: Upload) -> Self {
        self.upload = Some(upload);
        self
    }

    /// Encodes the body as `multipart/form-data` instead of JSON.
    pub fn multipart(mut self) -> Self {
        self.use_multipart = true;
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the client's base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The explicit query parameters, without pagination.
    pub fn query(&self) -> &QueryString {
        &self.query
    }

    /// The JSON body, if any.
    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// The requested page.
    pub fn page(&self) -> Option<u32> {
        self.page
    }

    /// The requested page size.
    pub fn size(&self) -> Option<u32> {
        self.size
    }

    /// The multipart text fields.
    pub fn form_data(&self) -> &[(String, String)] {
        &self.form_data
    }

    /// The file to upload.
    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    /// Whether the body is sent as `multipart/form-data`.
    pub fn uses_multipart(&self) -> bool {
        self.use_multipart
    }

    /// The explicit query followed by `page` and `size` when present.
    pub fn full_query(&self) -> QueryString {
        let mut query = self.query.clone();
        if let Some(page) = self.page {
            query.set("page".to_string(), page.to_string());
        }
        if let Some(size) = self.size {
            query.set("size".to_string(), size.to_string());
        }
        query
    }

    pub(crate) fn into_parts(self) -> (Option<B>, Vec<(String, String)>, Option<Upload>, bool) {
        (self.body, self.form_data, self.upload, self.use_multipart)
    }
}
