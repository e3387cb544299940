//! Client settings.
//!
//! [`Settings`] is the serializable form of the client configuration, suitable
//! for binding from a configuration file or the environment. Pass it to
//! [`ClientBuilder::from_settings`](crate::ClientBuilder::from_settings).

use crate::{Error, Result};
use serde::Deserialize;

/// The production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.issuu.com/v2";

/// Configuration for an API client.
///
/// # Examples
///
/// ```
/// use issuu_client::settings::Settings;
///
/// let settings: Settings = serde_json::from_str(r#"{
///     "token": "secret",
///     "captureResponseContent": true
/// }"#).unwrap();
///
/// assert_eq!(settings.base_url, "https://api.issuu.com/v2");
/// assert!(settings.capture_response_content);
/// assert!(!settings.capture_request_content);
/// settings.validate().unwrap();
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// The API root all resource paths are resolved against.
    pub base_url: String,

    /// The bearer token sent with every request.
    pub token: String,

    /// Attach the raw request body to each response.
    pub capture_request_content: bool,

    /// Attach the raw response body to each response.
    pub capture_response_content: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            capture_request_content: false,
            capture_response_content: false,
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("capture_request_content", &self.capture_request_content)
            .field("capture_response_content", &self.capture_response_content)
            .finish()
    }
}

impl Settings {
    /// Reads settings from `ISSUU_BASE_URL`, `ISSUU_TOKEN`,
    /// `ISSUU_CAPTURE_REQUEST_CONTENT` and `ISSUU_CAPTURE_RESPONSE_CONTENT`.
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a capture flag is not `true` or `false`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(base_url) = lookup("ISSUU_BASE_URL") {
            settings.base_url = base_url;
        }
        if let Some(token) = lookup("ISSUU_TOKEN") {
            settings.token = token;
        }
        if let Some(value) = lookup("ISSUU_CAPTURE_REQUEST_CONTENT") {
            settings.capture_request_content = parse_flag("ISSUU_CAPTURE_REQUEST_CONTENT", &value)?;
        }
        if let Some(value) = lookup("ISSUU_CAPTURE_RESPONSE_CONTENT") {
            settings.capture_response_content =
                parse_flag("ISSUU_CAPTURE_RESPONSE_CONTENT", &value)?;
        }

        Ok(settings)
    }

    /// Checks that a token is present and the base URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] or [`Error::InvalidUrl`].
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::ConfigurationError("Token is required".to_string()));
        }
        url::Url::parse(&self.base_url)?;
        Ok(())
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(Error::ConfigurationError(format!(
            "Invalid boolean for {}: {}",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.token.is_empty());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let settings = Settings::from_lookup(lookup(&[
            ("ISSUU_BASE_URL", "http://localhost:8080/v2"),
            ("ISSUU_TOKEN", "abc"),
            ("ISSUU_CAPTURE_REQUEST_CONTENT", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(settings.base_url, "http://localhost:8080/v2");
        assert_eq!(settings.token, "abc");
        assert!(settings.capture_request_content);
        assert!(!settings.capture_response_content);
        settings.validate().unwrap();
    }

    #[test]
    fn test_invalid_flag() {
        let result =
            Settings::from_lookup(lookup(&[("ISSUU_CAPTURE_RESPONSE_CONTENT", "yes please")]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = Settings {
            base_url: "not a url".to_string(),
            token: "abc".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = Settings {
            token: "super-secret".to_string(),
            ..Settings::default()
        };
        assert!(!format!("{:?}", settings).contains("super-secret"));
    }
}
