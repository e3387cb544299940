//! Response transformation.
//!
//! Turns a received status, header set and buffered body into a typed
//! [`Response`] envelope. How the body of a successful response becomes data is
//! decided by a [`ResponseMapper`]: [`SingleMapper`] for single resources,
//! [`CollectionMapper`] for `{ count, pageSize, results, links }` list
//! payloads, and [`NoContent`] for calls whose body is ignored.

use crate::error::{ApiError, Error};
use crate::pagination::{Meta, PageSeed};
use crate::rate_limit::RateLimit;
use crate::Response;
use http::{HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// What a mapper extracted from a successful response body.
#[derive(Debug)]
pub struct Mapped<T> {
    /// The typed data.
    pub data: Option<T>,
    /// The paging fields, present only when both `count` and `pageSize` were.
    pub seed: Option<PageSeed>,
    /// Related links keyed by relation name.
    pub links: Option<HashMap<String, String>>,
}

impl<T> Default for Mapped<T> {
    fn default() -> Self {
        Self {
            data: None,
            seed: None,
            links: None,
        }
    }
}

/// Extracts typed data, paging fields and links from a successful body.
///
/// Implement this for payload shapes the built-in mappers do not cover.
///
/// # Examples
///
/// ```
/// use issuu_client::transform::{Mapped, ResponseMapper};
///
/// /// Reads a bare JSON array of slugs.
/// struct SlugList;
///
/// impl ResponseMapper<Vec<String>> for SlugList {
///     fn map(&self, body: &[u8]) -> serde_json::Result<Mapped<Vec<String>>> {
///         Ok(Mapped {
///             data: Some(serde_json::from_slice(body)?),
///             ..Mapped::default()
///         })
///     }
/// }
///
/// let mapped = SlugList.map(br#"["a","b"]"#).unwrap();
/// assert_eq!(mapped.data.unwrap(), vec!["a", "b"]);
/// ```
pub trait ResponseMapper<T> {
    /// Maps the raw body of a 2xx response.
    fn map(&self, body: &[u8]) -> serde_json::Result<Mapped<T>>;
}

/// Deserializes the whole body as `T`. An empty body yields no data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleMapper;

impl<T: DeserializeOwned> ResponseMapper<T> for SingleMapper {
    fn map(&self, body: &[u8]) -> serde_json::Result<Mapped<T>> {
        if is_blank(body) {
            return Ok(Mapped::default());
        }

        Ok(Mapped {
            data: Some(serde_json::from_slice(body)?),
            ..Mapped::default()
        })
    }
}

/// Reads a `{ count?, pageSize?, results, links? }` list payload.
///
/// `T` is the type of `results`, usually a `Vec`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionMapper;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageEnvelope<T> {
    count: Option<u64>,
    page_size: Option<u32>,
    results: Option<T>,
    links: Option<HashMap<String, Link>>,
}

#[derive(Deserialize)]
struct Link {
    href: String,
}

impl<T: DeserializeOwned> ResponseMapper<T> for CollectionMapper {
    fn map(&self, body: &[u8]) -> serde_json::Result<Mapped<T>> {
        if is_blank(body) {
            return Ok(Mapped::default());
        }

        let page: PageEnvelope<T> = serde_json::from_slice(body)?;

        let links = page.links.filter(|links| !links.is_empty()).map(|links| {
            links
                .into_iter()
                .map(|(name, link)| (name, link.href))
                .collect()
        });

        Ok(Mapped {
            data: page.results,
            seed: PageSeed::from_parts(page.count, page.page_size),
            links,
        })
    }
}

/// Ignores the body. Used for calls that only report success or failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ResponseMapper<()> for NoContent {
    fn map(&self, _body: &[u8]) -> serde_json::Result<Mapped<()>> {
        Ok(Mapped::default())
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// A response as received from the transport, with its body fully buffered.
#[derive(Debug)]
pub(crate) struct Received {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub latency: Duration,
}

/// Builds the envelope for a received response.
///
/// Fails only when the mapper cannot read a successful body; the caller turns
/// that into a transport-level failure.
pub(crate) fn transform<T, M>(
    method: Method,
    uri: Url,
    received: &Received,
    mapper: &M,
    requested_page: Option<u32>,
) -> Result<Response<T>, Error>
where
    M: ResponseMapper<T> + ?Sized,
{
    let status = received.status;
    let rate_limit = RateLimit::from_headers(&received.headers);

    tracing::info!(
        method = %method,
        status = status.as_u16(),
        latency_ms = received.latency.as_millis(),
        "Received HTTP response"
    );

    let mut response = Response {
        method,
        uri,
        success: false,
        status: Some(status),
        data: None,
        meta: None,
        rate_limit,
        links: None,
        error: None,
        request_content: None,
        response_content: None,
        headers: received.headers.clone(),
        latency: received.latency,
    };

    if status.is_success() {
        let mapped = mapper.map(&received.body).map_err(|e| {
            let raw_response = String::from_utf8_lossy(&received.body).into_owned();
            tracing::error!(
                error = %e,
                raw_response = %raw_response,
                "Failed to deserialize response"
            );
            Error::DeserializationFailed {
                raw_response,
                serde_error: e.to_string(),
                status,
            }
        })?;

        response.success = true;
        response.data = mapped.data;
        response.meta = mapped
            .seed
            .map(|seed| Meta::resolve(seed, requested_page));
        response.links = mapped.links;
        return Ok(response);
    }

    let error = ApiError::from_body(status, &received.body);

    if status.is_client_error() {
        tracing::error!(
            status = status.as_u16(),
            message = %error.message,
            "Client error (4xx)"
        );
    } else {
        tracing::warn!(
            status = status.as_u16(),
            message = %error.message,
            "Server error"
        );
    }

    response.error = Some(error);
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NO_ERROR_MESSAGE;
    use http::HeaderValue;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        slug: String,
    }

    fn uri() -> Url {
        Url::parse("https://api.issuu.com/v2/drafts").unwrap()
    }

    fn received(status: u16, body: &str) -> Received {
        Received {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
            latency: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_collection_with_paging_and_links() {
        let body = r#"{
            "count": 57,
            "pageSize": 20,
            "page": 9,
            "results": [{"slug": "a"}, {"slug": "b"}],
            "links": {"next": {"href": "https://api.issuu.com/v2/drafts?page=3"}}
        }"#;

        let response: Response<Vec<Item>> = transform(
            Method::GET,
            uri(),
            &received(200, body),
            &CollectionMapper,
            Some(2),
        )
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.data.as_ref().unwrap().len(), 2);

        let meta = response.meta.unwrap();
        assert_eq!(meta.page, 2);
        assert_eq!(meta.page_size, 20);
        assert_eq!(meta.total_items, 57);
        assert_eq!(meta.total_pages, 3);

        assert_eq!(
            response.links.unwrap()["next"],
            "https://api.issuu.com/v2/drafts?page=3"
        );
    }

    #[test]
    fn test_collection_without_seed_has_no_meta() {
        let response: Response<Vec<Item>> = transform(
            Method::GET,
            uri(),
            &received(200, r#"{"count": 3, "results": []}"#),
            &CollectionMapper,
            None,
        )
        .unwrap();

        assert!(response.meta.is_none());
        assert!(response.links.is_none());
        assert_eq!(response.data, Some(Vec::new()));
    }

    #[test]
    fn test_single_item() {
        let response: Response<Item> = transform(
            Method::GET,
            uri(),
            &received(200, r#"{"slug": "doc"}"#),
            &SingleMapper,
            None,
        )
        .unwrap();

        assert_eq!(response.data, Some(Item { slug: "doc".into() }));
        assert!(response.meta.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_single_item_empty_body() {
        let response: Response<Item> = transform(
            Method::DELETE,
            uri(),
            &received(204, ""),
            &SingleMapper,
            None,
        )
        .unwrap();

        assert!(response.is_success());
        assert!(response.data.is_none());
    }

    #[test]
    fn test_mapping_failure_is_an_error() {
        let result: Result<Response<Item>, Error> = transform(
            Method::GET,
            uri(),
            &received(200, "not json"),
            &SingleMapper,
            None,
        );

        match result {
            Err(Error::DeserializationFailed {
                raw_response,
                status,
                ..
            }) => {
                assert_eq!(raw_response, "not json");
                assert_eq!(status, StatusCode::OK);
            }
            other => panic!("Expected DeserializationFailed, got {:?}", other.map(|r| r.status)),
        }
    }

    #[test]
    fn test_error_status_normalizes_body() {
        let response: Response<Item> = transform(
            Method::GET,
            uri(),
            &received(404, r#"{"message":"Not found"}"#),
            &SingleMapper,
            None,
        )
        .unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status_code(), 404);
        assert!(response.data.is_none());

        let error = response.error.unwrap();
        assert_eq!(error.message, "Not found");
        assert!(error.details.is_none());
    }

    #[test]
    fn test_error_status_without_body() {
        let response: Response<()> =
            transform(Method::DELETE, uri(), &received(404, ""), &NoContent, None).unwrap();

        assert_eq!(response.error.unwrap().message, NO_ERROR_MESSAGE);
    }

    #[test]
    fn test_rate_limit_on_failure() {
        let mut received = received(429, r#"{"message":"Too many requests"}"#);
        received
            .headers
            .insert("x-ratelimit-limit", HeaderValue::from_static("100"));
        received
            .headers
            .insert("x-ratelimit-remaining", HeaderValue::from_static("0"));
        received
            .headers
            .insert("x-ratelimit-reset", HeaderValue::from_static("1700000000"));

        let response: Response<()> =
            transform(Method::GET, uri(), &received, &NoContent, None).unwrap();

        let rate_limit = response.rate_limit.unwrap();
        assert_eq!(rate_limit.limit, 100);
        assert!(rate_limit.is_exhausted());
    }
}
