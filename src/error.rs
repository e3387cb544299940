//! Error types.
//!
//! [`Error`] covers everything that can go wrong before a server-acknowledged
//! answer exists: configuration, request assembly, the transport, and payload
//! decoding. Inside the pipeline these are folded into a [`ApiError`] on the
//! response envelope, so callers only see `Error` directly from builder and
//! configuration methods.

use http::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Message used when a failed response has no body.
pub const NO_ERROR_MESSAGE: &str = "No error message was returned";

/// Message used when a failed response body could not be parsed.
pub const UNPARSEABLE_ERROR_CONTENT: &str = "Could not parse the error content";

/// Message used when a parsed error body carries no message.
pub const UNKNOWN_ERROR_RESPONSE: &str = "Unknown error response";

/// The main error type for the client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Failed to deserialize a successful response body into the expected type.
    ///
    /// The raw body is kept so that mapping problems can be diagnosed from logs.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
    },

    /// Invalid configuration was provided.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Reading an upload from disk failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation argument was rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Classifies a transport error, separating timeouts from other failures.
    pub(crate) fn transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Error::Timeout
        } else {
            Error::Network(error)
        }
    }
}

/// A specialized `Result` type for client configuration.
pub type Result<T> = std::result::Result<T, Error>;

/// The normalized error attached to a failed [`Response`](crate::Response).
///
/// Server rejections carry the server's message and per-field details.
/// Failures that happened before a response existed carry the underlying
/// [`Error`] as their cause.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Human-readable description.
    pub message: String,

    /// Field or detail name mapped to its message.
    pub details: Option<HashMap<String, String>>,

    /// The failure that produced this error, when it came from the client side.
    pub cause: Option<Arc<Error>>,
}

impl ApiError {
    /// Creates an error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            cause: None,
        }
    }

    /// Builds the error for a failure that happened on the client side.
    pub fn from_error(error: Error) -> Self {
        Self {
            message: error.to_string(),
            details: None,
            cause: Some(Arc::new(error)),
        }
    }

    /// Normalizes the body of a non-2xx response.
    ///
    /// Accepts `{ "message": ..., "details" | "fields" | "errors": { ... } }`,
    /// where detail entries are either `{ "message": ... }` objects or plain
    /// strings. Detail entries of any other shape never discard the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use issuu_client::ApiError;
    /// use http::StatusCode;
    ///
    /// let body = br#"{"message":"Invalid draft","fields":{"title":{"message":"Required"}}}"#;
    /// let error = ApiError::from_body(StatusCode::BAD_REQUEST, body);
    /// assert_eq!(error.message, "Invalid draft");
    /// assert_eq!(error.details.unwrap()["title"], "Required");
    ///
    /// let error = ApiError::from_body(StatusCode::NOT_FOUND, b"");
    /// assert_eq!(error.message, issuu_client::error::NO_ERROR_MESSAGE);
    /// ```
    pub fn from_body(status: StatusCode, body: &[u8]) -> Self {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::new(NO_ERROR_MESSAGE);
        }

        let container = match serde_json::from_slice::<ErrorContainer>(body) {
            Ok(container) => container,
            Err(e) => {
                return Self {
                    message: UNPARSEABLE_ERROR_CONTENT.to_string(),
                    details: None,
                    cause: Some(Arc::new(Error::DeserializationFailed {
                        raw_response: String::from_utf8_lossy(body).into_owned(),
                        serde_error: e.to_string(),
                        status,
                    })),
                };
            }
        };

        let details = [container.details, container.fields, container.errors]
            .into_iter()
            .flatten()
            .filter_map(detail_map)
            .find(|map| !map.is_empty());

        let message = container
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR_RESPONSE.to_string());

        Self {
            message,
            details,
            cause: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)?;
        if let Some(details) = &self.details {
            let mut names: Vec<_> = details.keys().collect();
            names.sort();
            for name in names {
                write!(f, "; {}: {}", name, details[name])?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[derive(Deserialize)]
struct ErrorContainer {
    message: Option<String>,
    details: Option<Value>,
    fields: Option<Value>,
    errors: Option<Value>,
}

/// Collapses a detail object into name to message. Entries may be plain
/// strings or `{ "message": ... }` objects; anything else is kept as JSON text
/// so one odd entry never hides the rest of the error.
fn detail_map(value: Value) -> Option<HashMap<String, String>> {
    let Value::Object(entries) = value else {
        return None;
    };

    let map = entries
        .into_iter()
        .map(|(name, entry)| {
            let message = match entry {
                Value::String(text) => text,
                Value::Object(mut fields) => match fields.remove("message") {
                    Some(Value::String(text)) => text,
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                },
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (name, message)
        })
        .collect();

    Some(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_only() {
        let error = ApiError::from_body(StatusCode::BAD_REQUEST, br#"{"message":"Not found"}"#);
        assert_eq!(error.message, "Not found");
        assert!(error.details.is_none());
        assert!(error.cause.is_none());
    }

    #[test]
    fn test_details_preferred_over_fields() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{
                "message": "Bad request",
                "details": {"slug": {"message": "Unknown slug"}},
                "fields": {"title": {"message": "Required"}}
            }"#,
        );

        let details = error.details.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details["slug"], "Unknown slug");
    }

    #[test]
    fn test_empty_details_fall_through_to_fields() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Bad request","details":{},"fields":{"title":{"message":"Required"}}}"#,
        );
        assert_eq!(error.details.unwrap()["title"], "Required");
    }

    #[test]
    fn test_errors_map_with_plain_strings() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Invalid","errors":{"access":"Must be PUBLIC or PRIVATE"}}"#,
        );
        assert_eq!(error.details.unwrap()["access"], "Must be PUBLIC or PRIVATE");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(ApiError::from_body(StatusCode::BAD_GATEWAY, b"").message, NO_ERROR_MESSAGE);
        assert_eq!(ApiError::from_body(StatusCode::BAD_GATEWAY, b"  \n").message, NO_ERROR_MESSAGE);
    }

    #[test]
    fn test_unparseable_body_keeps_cause() {
        let error = ApiError::from_body(StatusCode::BAD_GATEWAY, b"<html>Bad Gateway</html>");
        assert_eq!(error.message, UNPARSEABLE_ERROR_CONTENT);

        match error.cause.as_deref() {
            Some(Error::DeserializationFailed { raw_response, .. }) => {
                assert_eq!(raw_response, "<html>Bad Gateway</html>");
            }
            other => panic!("Expected DeserializationFailed cause, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_message_uses_sentinel() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"fields":{"title":{"message":"Required"}}}"#,
        );
        assert_eq!(error.message, UNKNOWN_ERROR_RESPONSE);
        assert!(error.details.is_some());
    }

    #[test]
    fn test_from_error_sets_cause() {
        let error = ApiError::from_error(Error::InvalidArgument("slug is empty".to_string()));
        assert_eq!(error.message, "Invalid argument: slug is empty");
        assert!(matches!(
            error.cause.as_deref(),
            Some(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display_lists_details() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Invalid","fields":{"b":{"message":"two"},"a":{"message":"one"}}}"#,
        );
        assert_eq!(error.to_string(), "Invalid; a: one; b: two");
    }

    #[test]
    fn test_entry_without_message_keeps_top_level_message() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Validation failed","fields":{"title":{"code":"required"}}}"#,
        );
        assert_eq!(error.message, "Validation failed");
        assert!(error.cause.is_none());
        assert_eq!(error.details.unwrap()["title"], "");
    }

    #[test]
    fn test_entry_with_null_message_keeps_top_level_message() {
        let error = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Validation failed","fields":{"title":{"message":null}}}"#,
        );
        assert_eq!(error.message, "Validation failed");
        assert_eq!(error.details.unwrap()["title"], "");
    }

    #[test]
    fn test_odd_detail_shapes_are_tolerated() {
        let error = ApiError::from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"message":"Invalid","errors":["not", "a", "map"]}"#,
        );
        assert_eq!(error.message, "Invalid");
        assert!(error.details.is_none());

        let error = ApiError::from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            br#"{"message":"Invalid","fields":{"pages":{"message":3},"size":42}}"#,
        );
        let details = error.details.unwrap();
        assert_eq!(details["pages"], "3");
        assert_eq!(details["size"], "42");
    }
}
