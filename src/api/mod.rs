//! Resource groups of the Issuu API.
//!
//! Each group is a thin handle borrowed from a [`Client`]; it builds
//! [`Request`]s for its root path and sends them through the client pipeline.

mod drafts;
mod publications;

pub use drafts::Drafts;
pub use publications::Publications;

use crate::{ApiError, Client, Error, Request, Response};
use http::Method;

/// Root paths of the resource groups, fixed when the client is built.
#[derive(Debug, Clone)]
pub(crate) struct Resources {
    drafts: String,
    publications: String,
}

impl Resources {
    pub(crate) fn new() -> Self {
        Self {
            drafts: "/drafts".to_string(),
            publications: "/publications".to_string(),
        }
    }
}

impl Client {
    /// Operations on unpublished documents.
    pub fn drafts(&self) -> Drafts<'_> {
        Drafts::new(self, &self.resources().drafts)
    }

    /// Operations on published documents.
    pub fn publications(&self) -> Publications<'_> {
        Publications::new(self, &self.resources().publications)
    }
}

/// Joins a resource root with a slug and an optional action segment.
fn slug_path(root: &str, slug: &str, action: Option<&str>) -> String {
    match action {
        Some(action) => format!("{root}/{slug}/{action}"),
        None => format!("{root}/{slug}"),
    }
}

/// Builds the envelope for a call refused before anything was sent.
fn rejected<T>(client: &Client, method: Method, root: &str, error: Error) -> Response<T> {
    tracing::warn!(method = %method, path = root, error = %error, "Request rejected");

    let uri = client.resolve_uri(&Request::new(method.clone(), root));
    Response::failed(method, uri, ApiError::from_error(error))
}

/// Returns a rejection envelope when `slug` is blank.
fn check_slug<T>(client: &Client, method: &Method, root: &str, slug: &str) -> Option<Response<T>> {
    if slug.trim().is_empty() {
        let error = Error::InvalidArgument("slug must not be empty".to_string());
        return Some(rejected(client, method.clone(), root, error));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::builder()
            .base_url("https://api.example.com/v2")
            .unwrap()
            .token("t")
            .build()
            .unwrap()
    }

    #[test]
    fn test_slug_path() {
        assert_eq!(slug_path("/drafts", "doc", None), "/drafts/doc");
        assert_eq!(
            slug_path("/publications", "doc", Some("assets")),
            "/publications/doc/assets"
        );
    }

    #[test]
    fn test_blank_slug_is_rejected() {
        let client = client();
        let response: Response<()> =
            check_slug(&client, &Method::DELETE, "/drafts", "  ").unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status_code(), 0);
        assert_eq!(response.uri.as_str(), "https://api.example.com/v2/drafts");
        let error = response.error.unwrap();
        assert!(matches!(
            error.cause.as_deref(),
            Some(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_blank_slug_passes() {
        let client = client();
        assert!(check_slug::<()>(&client, &Method::GET, "/drafts", "doc").is_none());
    }
}
