//! Client configuration
//!
//! Holds everything a [`Session`](crate::Session) needs to know before it
//! talks to the service: where the API lives, which protocol version to
//! announce, the application key and the (optional) member credentials.

use std::fmt;
use std::time::Duration;

/// Production endpoint of the BetaSeries API
pub const DEFAULT_BASE_URL: &str = "https://api.betaseries.com";

/// Protocol version announced in the `X-BetaSeries-Version` header
pub const DEFAULT_API_VERSION: &str = "2.4";

/// Settings used to build a session.
///
/// Leaving `login` or `password` empty selects anonymous mode: no credential
/// exchange happens and requests are sent without a member token.
#[derive(Clone)]
pub struct ClientConfig {
    /// Root URL of the API, without a trailing endpoint path
    pub base_url: String,
    /// Value of the `X-BetaSeries-Version` header
    pub version: String,
    /// Developer key sent as `X-BetaSeries-Key`
    pub api_key: String,
    /// Member login; an empty login keeps the session anonymous
    pub login: String,
    /// Member password in clear text, hashed before it is sent
    pub password: String,
    /// Per-request deadline handed to the HTTP client. `None` keeps the
    /// client's own default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates an anonymous configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Sets the member login and password.
    pub fn with_credentials(mut self, login: impl Into<String>, password: impl Into<String>) -> Self {
        self.login = login.into();
        self.password = password.into();
        self
    }

    /// Points the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the API version header.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// True when both a login and a password are present.
    pub fn has_credentials(&self) -> bool {
        !self.login.is_empty() && !self.password.is_empty()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            api_key: String::new(),
            login: String::new(),
            password: String::new(),
            timeout: None,
        }
    }
}

// Hand-written so secrets never end up in logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("api_key", &"<redacted>")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.version, "2.4");
        assert_eq!(config.api_key, "key");
        assert!(!config.has_credentials());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_credentials_require_both_parts() {
        assert!(!ClientConfig::new("key").with_credentials("me", "").has_credentials());
        assert!(!ClientConfig::new("key").with_credentials("", "secret").has_credentials());
        assert!(ClientConfig::new("key").with_credentials("me", "secret").has_credentials());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = ClientConfig::new("my-api-key").with_credentials("me", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("my-api-key"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("me"));
    }
}
