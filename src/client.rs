//! HTTP client and request pipeline.
//!
//! The [`Client`] type is the main entry point for making API calls.
//! Use [`ClientBuilder`] to configure and create clients.
//!
//! Every call goes through the same steps: the [`Request`] is resolved into a
//! URI and assembled into a transport request (bearer token, JSON or multipart
//! body), sent, buffered, and handed to the response transformer. Whatever
//! happens, the caller gets a [`Response`] envelope back.

use crate::{
    api::Resources,
    query::join_paths,
    request::Upload,
    settings::{Settings, DEFAULT_BASE_URL},
    transform::{self, CollectionMapper, NoContent, Received, ResponseMapper, SingleMapper},
    ApiError, Error, Request, Response, Result,
};
use http::{header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, Method};
use reqwest::multipart::{Form, Part};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// A client for the Issuu REST API.
///
/// The client is designed to be reused across requests and tasks. It holds a
/// connection pool and configuration that apply to all requests; cloning it is
/// cheap.
///
/// # Examples
///
/// ```no_run
/// use issuu_client::{models::Document, Client, Request};
///
/// # async fn example() -> Result<(), issuu_client::Error> {
/// let client = Client::builder()
///     .base_url("https://api.issuu.com/v2")?
///     .token("my-token")
///     .build()?;
///
/// // Through a resource group
/// let drafts = client.drafts().list(None, Some(10)).await;
/// println!("{} drafts", drafts.meta.map_or(0, |m| m.total_items));
///
/// // Or with a hand-built request
/// let request = Request::get("/publications/my-doc");
/// let document = client.fetch_single::<_, Document>(request).await;
/// if let Some(document) = document.data {
///     println!("{}", document.slug);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    token: String,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    capture_request_content: bool,
    capture_response_content: bool,
    resources: Resources,
}

impl Client {
    /// Creates a new `ClientBuilder` for configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        ClientBuilder::from_settings(settings)?.build()
    }

    pub(crate) fn resources(&self) -> &Resources {
        &self.inner.resources
    }

    /// Sends a request, ignoring any response body.
    pub async fn send<B>(&self, request: Request<B>) -> Response<()>
    where
        B: Serialize,
    {
        self.execute(request, NoContent).await
    }

    /// Sends a request whose response body is a single `T`.
    pub async fn fetch_single<B, T>(&self, request: Request<B>) -> Response<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.execute(request, SingleMapper).await
    }

    /// Sends a request whose response is a `{ count, pageSize, results, links }`
    /// list payload; `T` is the type of `results`.
    pub async fn fetch_many<B, T>(&self, request: Request<B>) -> Response<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        self.execute(request, CollectionMapper).await
    }

    /// Sends a request and maps a successful body with `mapper`.
    ///
    /// This never fails: transport errors, rejected requests and unreadable
    /// payloads are all reported on the returned envelope.
    pub async fn execute<B, T, M>(&self, request: Request<B>, mapper: M) -> Response<T>
    where
        B: Serialize,
        M: ResponseMapper<T>,
    {
        let method = request.method().clone();
        let uri = self.resolve_uri(&request);
        let requested_page = request.page();
        let start = Instant::now();

        tracing::debug!(
            method = %method,
            url = %uri,
            "Executing HTTP request"
        );

        let (http_request, request_body) = match self.assemble(request, &uri).await {
            Ok(assembled) => assembled,
            Err(e) => return self.failed(method, uri, e, None, None, start),
        };

        let request_content = request_body.filter(|_| self.inner.capture_request_content);

        let received = match self.receive(http_request, start).await {
            Ok(received) => received,
            Err(e) => return self.failed(method, uri, e, request_content, None, start),
        };

        let response_content = self
            .inner
            .capture_response_content
            .then(|| String::from_utf8_lossy(&received.body).into_owned());

        let transformed = transform::transform(
            method.clone(),
            uri.clone(),
            &received,
            &mapper,
            requested_page,
        );

        match transformed {
            Ok(mut response) => {
                response.request_content = request_content;
                response.response_content = response_content;
                response
            }
            Err(e) => self.failed(method, uri, e, request_content, response_content, start),
        }
    }

    /// Resolves the full URI a request will be sent to.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::{Client, Request};
    ///
    /// # fn example() -> Result<(), issuu_client::Error> {
    /// let client = Client::builder()
    ///     .base_url("https://api.example.com/v2")?
    ///     .token("t")
    ///     .build()?;
    ///
    /// let uri = client.resolve_uri(&Request::get("/drafts").with_page(2).with_size(10));
    /// assert_eq!(uri.as_str(), "https://api.example.com/v2/drafts?page=2&size=10");
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    pub fn resolve_uri<B>(&self, request: &Request<B>) -> Url {
        let mut url = self.inner.base_url.clone();
        let path = join_paths(self.inner.base_url.path(), request.path());
        url.set_path(&path);
        url.set_query(request.full_query().encoded().as_deref());
        url
    }

    /// Builds the transport request. Also returns the JSON body text, the only
    /// request body that can be captured without consuming it.
    async fn assemble<B>(
        &self,
        request: Request<B>,
        uri: &Url,
    ) -> Result<(reqwest::Request, Option<String>)>
    where
        B: Serialize,
    {
        let mut builder = self
            .inner
            .http_client
            .request(request.method().clone(), uri.clone());

        for (name, value) in &self.inner.default_headers {
            builder = builder.header(name, value);
        }

        builder = builder.bearer_auth(&self.inner.token);

        if let Some(timeout) = self.inner.timeout {
            builder = builder.timeout(timeout);
        }

        let (body, form_data, upload, use_multipart) = request.into_parts();
        let mut body_text = None;

        if use_multipart {
            builder = builder.multipart(build_form(form_data, upload).await?);
        } else if let Some(body) = body {
            let json = to_json_body(&body)?;
            body_text = Some(String::from_utf8_lossy(&json).into_owned());
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(json);
        }

        let http_request = builder.build()?;
        Ok((http_request, body_text))
    }

    /// Sends the request and buffers the whole body.
    async fn receive(&self, request: reqwest::Request, start: Instant) -> Result<Received> {
        let response = self
            .inner
            .http_client
            .execute(request)
            .await
            .map_err(Error::transport)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::transport)?;

        Ok(Received {
            status,
            headers,
            body: body.to_vec(),
            latency: start.elapsed(),
        })
    }

    fn failed<T>(
        &self,
        method: Method,
        uri: Url,
        error: Error,
        request_content: Option<String>,
        response_content: Option<String>,
        start: Instant,
    ) -> Response<T> {
        tracing::warn!(
            error = %error,
            method = %method,
            url = %uri,
            "Request failed"
        );

        let mut response = Response::failed(method, uri, ApiError::from_error(error));
        response.request_content = request_content;
        response.response_content = response_content;
        response.latency = start.elapsed();
        response
    }
}

/// Serializes a request body, dropping object members that are `null`.
fn to_json_body<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    let value = serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
    serde_json::to_vec(&strip_nulls(value)).map_err(|e| Error::SerializationFailed(e.to_string()))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

/// Builds the multipart body: one text part per form field, then the upload
/// as a part named `file`.
async fn build_form(form_data: Vec<(String, String)>, upload: Option<Upload>) -> Result<Form> {
    let mut form = Form::new();

    for (name, value) in form_data {
        form = form.text(name, value);
    }

    if let Some(upload) = upload {
        let file_name = upload.file_name();

        let part = match upload {
            Upload::File { path, .. } => {
                let file = tokio::fs::File::open(&path).await?;
                let length = file.metadata().await?.len();
                Part::stream_with_length(reqwest::Body::from(file), length)
            }
            Upload::Stream { body, .. } => Part::stream(body),
            Upload::Bytes { bytes, .. } => Part::bytes(bytes),
        };

        let part = match file_name {
            Some(name) => part.file_name(name),
            None => part,
        };

        form = form.part("file", part);
    }

    Ok(form)
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use issuu_client::ClientBuilder;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), issuu_client::Error> {
/// let client = ClientBuilder::new()
///     .base_url("https://api.issuu.com/v2")?
///     .token("my-token")
///     .timeout(Duration::from_secs(30))
///     .capture_response_content(true)
///     .default_header("User-Agent", "my-app/1.0")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    base_url: Option<Url>,
    token: Option<String>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
    capture_request_content: bool,
    capture_response_content: bool,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with default settings.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            default_headers: HeaderMap::new(),
            timeout: None,
            capture_request_content: false,
            capture_response_content: false,
        }
    }

    /// Creates a builder pre-populated from settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings fail validation.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;

        Ok(Self::new()
            .base_url(&settings.base_url)?
            .token(settings.token.clone())
            .capture_request_content(settings.capture_request_content)
            .capture_response_content(settings.capture_response_content))
    }

    /// Sets the API root all request paths are resolved against.
    ///
    /// Defaults to the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Adds a default header that will be included in all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Sets the request timeout, covering both the send and the body read.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attaches raw request bodies to responses.
    pub fn capture_request_content(mut self, enabled: bool) -> Self {
        self.capture_request_content = enabled;
        self
    }

    /// Attaches raw response bodies to responses.
    pub fn capture_response_content(mut self, enabled: bool) -> Self {
        self.capture_response_content = enabled;
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token was provided, the token cannot be sent
    /// as a header, or the HTTP client cannot be created.
    pub fn build(self) -> Result<Client> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::ConfigurationError("Token is required".to_string()))?;

        HeaderValue::try_from(format!("Bearer {}", token))
            .map_err(|e| Error::ConfigurationError(format!("Invalid token: {}", e)))?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = reqwest::Client::builder().build().map_err(|e| {
            Error::ConfigurationError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                token,
                default_headers: self.default_headers,
                timeout: self.timeout,
                capture_request_content: self.capture_request_content,
                capture_response_content: self.capture_response_content,
                resources: Resources::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryString;
    use serde_json::json;

    fn client(base_url: &str) -> Client {
        Client::builder()
            .base_url(base_url)
            .unwrap()
            .token("secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_uri_with_paging() {
        let client = client("https://api.example.com/v2");
        let request = Request::get("/drafts")
            .with_query(QueryString::new())
            .with_page(2)
            .with_size(10);

        assert_eq!(
            client.resolve_uri(&request).as_str(),
            "https://api.example.com/v2/drafts?page=2&size=10"
        );
    }

    #[test]
    fn test_resolve_uri_trailing_slash_base() {
        let client = client("https://api.example.com/v2/");
        let uri = client.resolve_uri(&Request::get("/publications/doc/reader"));
        assert_eq!(uri.as_str(), "https://api.example.com/v2/publications/doc/reader");
    }

    #[test]
    fn test_resolve_uri_host_only_base() {
        let client = client("https://api.example.com");
        let uri = client.resolve_uri(&Request::get("/drafts"));
        assert_eq!(uri.as_str(), "https://api.example.com/drafts");
    }

    #[test]
    fn test_resolve_uri_keeps_explicit_query_first() {
        let client = client("https://api.example.com/v2");
        let request = Request::get("/publications/doc/assets")
            .with_query(QueryString::new().add("assetType", "text1"))
            .with_page(1);

        assert_eq!(
            client.resolve_uri(&request).as_str(),
            "https://api.example.com/v2/publications/doc/assets?assetType=text1&page=1"
        );
    }

    #[test]
    fn test_strip_nulls_only_drops_members() {
        let value = json!({
            "title": "x",
            "description": null,
            "info": { "fileId": null, "access": "PRIVATE" },
            "tags": [null, "a"]
        });

        assert_eq!(
            strip_nulls(value),
            json!({
                "title": "x",
                "info": { "access": "PRIVATE" },
                "tags": [null, "a"]
            })
        );
    }

    #[tokio::test]
    async fn test_assemble_sets_bearer_and_json_body() {
        let client = client("https://api.example.com/v2");
        let request = Request::post("/drafts", json!({ "title": "x", "skip": null }));
        let uri = client.resolve_uri(&request);

        let (http_request, body_text) = client.assemble(request, &uri).await.unwrap();

        assert_eq!(
            http_request.headers().get("authorization").unwrap(),
            "Bearer secret"
        );
        assert_eq!(
            http_request.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(body_text.as_deref(), Some(r#"{"title":"x"}"#));
    }

    #[tokio::test]
    async fn test_assemble_bodyless_request() {
        let client = client("https://api.example.com/v2");
        let request = Request::delete("/drafts/doc");
        let uri = client.resolve_uri(&request);

        let (http_request, body_text) = client.assemble(request, &uri).await.unwrap();

        assert!(http_request.body().is_none());
        assert!(body_text.is_none());
        assert_eq!(http_request.method(), &Method::DELETE);
    }

    #[tokio::test]
    async fn test_assemble_missing_upload_file_fails() {
        let client = client("https://api.example.com/v2");
        let request = Request::patch("/drafts/doc/upload", ())
            .multipart()
            .with_upload(Upload::file("/definitely/not/here.pdf"));
        let uri = client.resolve_uri(&request);

        let result = client.assemble(request, &uri).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_build_requires_token() {
        let result = Client::builder().build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));

        let result = Client::builder().token("   ").build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_build_rejects_unsendable_token() {
        let result = Client::builder().token("bad\ntoken").build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_default_base_url() {
        let client = Client::builder().token("t").build().unwrap();
        let uri = client.resolve_uri(&Request::get("/drafts"));
        assert_eq!(uri.as_str(), "https://api.issuu.com/v2/drafts");
    }
}
