//! HTTP transport layer
//!
//! Requests and responses are described as plain data. A [`Transport`]
//! turns an [`HttpRequest`] into an [`HttpResponse`], and the session owns
//! whichever implementation it was given at construction. The default one is
//! backed by a blocking reqwest client; tests swap in an in-memory double.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// HTTP verbs used by the BetaSeries API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outgoing request. All parameters travel in the URL's query string.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
        }
    }

    /// Sets a header, replacing any previous value with the same name.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    /// Looks up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Looks up the first query parameter with the given name.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// A fully consumed response. The body has already been read to the end.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure of the underlying HTTP machinery (network, TLS, timeout, ...)
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The request could not be sent or its response not be read
    #[error("{method} {url} failed: {source}")]
    Request {
        method: HttpMethod,
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Executes one HTTP round trip.
///
/// Implementations must return only after the response body has been read
/// completely (or the exchange has failed), so no connection is left open
/// once `execute` returns.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Transport backed by `reqwest::blocking::Client`.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest's defaults.
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Creates a transport whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::ClientBuild)?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let fail = |e: reqwest::Error| TransportError::Request {
            method: request.method,
            url: request.url.to_string(),
            source: Box::new(e),
        };

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Post => self.client.post(request.url.clone()),
            HttpMethod::Delete => self.client.delete(request.url.clone()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(fail)?;
        let status = response.status().as_u16();

        // text() consumes the response, releasing the connection on every path
        let body = response.text().map_err(fail)?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_header_replaces_existing_value() {
        let url = Url::parse("https://api.example.com/shows/list").unwrap();
        let mut request = HttpRequest::new(HttpMethod::Get, url);
        request.set_header("Accept", "text/plain");
        request.set_header("accept", "application/json");

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("ACCEPT"), Some("application/json"));
    }

    #[test]
    fn test_query_param_lookup() {
        let url = Url::parse("https://api.example.com/shows/search?title=lost&nbpp=100").unwrap();
        let request = HttpRequest::new(HttpMethod::Get, url);

        assert_eq!(request.query_param("title").as_deref(), Some("lost"));
        assert_eq!(request.query_param("nbpp").as_deref(), Some("100"));
        assert_eq!(request.query_param("order"), None);
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let bad = HttpResponse {
            status: 400,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }
}
