//! The response envelope returned by every call.
//!
//! A [`Response`] is produced for every request, whether it succeeded, was
//! rejected by the server, or never reached it. Check [`Response::is_success`]
//! before trusting [`Response::data`].

use crate::error::ApiError;
use crate::pagination::Meta;
use crate::rate_limit::RateLimit;
use http::{HeaderMap, Method, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// The outcome of a single API call.
///
/// # Type Parameters
///
/// * `T` - The type of the mapped response data
///
/// # Examples
///
/// ```no_run
/// use issuu_client::{models::Document, Client};
///
/// # async fn example() -> Result<(), issuu_client::Error> {
/// let client = Client::builder()
///     .base_url("https://api.issuu.com/v2")?
///     .token("my-token")
///     .build()?;
///
/// let response = client.drafts().list(Some(1), Some(20)).await;
///
/// if response.is_success() {
///     for document in response.data.unwrap_or_default() {
///         println!("{}", document.slug);
///     }
///     if let Some(meta) = response.meta {
///         println!("page {} of {}", meta.page, meta.total_pages);
///     }
/// } else if let Some(error) = &response.error {
///     eprintln!("HTTP {}: {}", response.status_code(), error);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// The HTTP method of the request.
    pub method: Method,

    /// The fully resolved request URI.
    pub uri: Url,

    /// Whether the server answered with a 2xx status.
    pub success: bool,

    /// The HTTP status, or `None` if no response was received.
    pub status: Option<StatusCode>,

    /// The mapped response data. Only present on success.
    pub data: Option<T>,

    /// Paging information for list responses.
    pub meta: Option<Meta>,

    /// Rate limit telemetry, when the server reported a complete set.
    pub rate_limit: Option<RateLimit>,

    /// Related links reported by list responses, keyed by relation name.
    pub links: Option<HashMap<String, String>>,

    /// The normalized error for failed calls.
    pub error: Option<ApiError>,

    /// The raw request body, when request capture is enabled.
    pub request_content: Option<String>,

    /// The raw response body, when response capture is enabled.
    pub response_content: Option<String>,

    /// The response headers. Empty if no response was received.
    pub headers: HeaderMap,

    /// Time from dispatch until the response was processed.
    pub latency: Duration,
}

impl<T> Response<T> {
    /// Creates the envelope for a call that never produced a usable response.
    pub fn failed(method: Method, uri: Url, error: ApiError) -> Self {
        Self {
            method,
            uri,
            success: false,
            status: None,
            data: None,
            meta: None,
            rate_limit: None,
            links: None,
            error: Some(error),
            request_content: None,
            response_content: None,
            headers: HeaderMap::new(),
            latency: Duration::ZERO,
        }
    }

    /// Returns `true` if the server answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The numeric status code, `0` when the call never reached the server.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::{ApiError, Response};
    /// use http::Method;
    ///
    /// let uri = "https://api.issuu.com/v2/drafts".parse().unwrap();
    /// let error = ApiError::new("connection refused");
    /// let response = Response::<()>::failed(Method::GET, uri, error);
    /// assert_eq!(response.status_code(), 0);
    /// assert!(response.is_transport_failure());
    /// ```
    pub fn status_code(&self) -> u16 {
        self.status.map_or(0, |s| s.as_u16())
    }

    /// Returns `true` if no response was received from the server.
    ///
    /// Such calls never reliably reached the server and are safe to repeat.
    pub fn is_transport_failure(&self) -> bool {
        self.status.is_none()
    }

    /// Returns a reference to a header value by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Maps the response data to a different type, preserving everything else.
    pub fn map<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> U,
    {
        self.and_then(|data| Some(f(data)))
    }

    /// Replaces the response data with the result of `f`, which may discard it.
    ///
    /// All other fields, including status, paging and rate limit telemetry, are
    /// carried over unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::{ApiError, Response};
    /// use http::Method;
    ///
    /// let uri = "https://api.issuu.com/v2/publications/doc/assets".parse().unwrap();
    /// let mut response = Response::<Vec<Vec<u32>>>::failed(Method::GET, uri, ApiError::new("x"));
    /// response.data = Some(vec![vec![1, 2], vec![3]]);
    ///
    /// let first = response.and_then(|lists| lists.into_iter().next());
    /// assert_eq!(first.data, Some(vec![1, 2]));
    /// ```
    pub fn and_then<U, F>(self, f: F) -> Response<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        Response {
            method: self.method,
            uri: self.uri,
            success: self.success,
            status: self.status,
            data: self.data.and_then(f),
            meta: self.meta,
            rate_limit: self.rate_limit,
            links: self.links,
            error: self.error,
            request_content: self.request_content,
            response_content: self.response_content,
            headers: self.headers,
            latency: self.latency,
        }
    }

    /// Converts the envelope into a `Result`, yielding the data on success.
    ///
    /// Successful calls without a body yield `Ok(None)`.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self
                .error
                .unwrap_or_else(|| ApiError::new(crate::error::UNKNOWN_ERROR_RESPONSE)))
        }
    }
}
