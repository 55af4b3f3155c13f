//! Error types for the BetaSeries client
//!
//! Every failure the library can produce is a variant of [`BetaSeriesError`].
//! Validation failures are raised before any request leaves the process;
//! everything else carries the context the service or the transport gave us.

use crate::envelope::ApiErrorEntry;
use crate::transport::TransportError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BetaSeriesError>;

/// Errors that can occur while talking to the BetaSeries API
#[derive(Debug, Error)]
pub enum BetaSeriesError {
    /// None of the accepted identifiers was set to a usable value
    #[error("id not properly set")]
    IdNotSet,

    /// Two mutually exclusive identifiers were both supplied
    #[error("no single id used")]
    NoSingleIdUsed,

    /// A show rating outside of the accepted 1-5 range
    #[error("invalid note {note}: must be between 1 and 5")]
    InvalidNote { note: i32 },

    /// The configured base URL could not be parsed
    #[error("invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    /// The underlying HTTP exchange failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The credential exchange was rejected by the service
    #[error("authentication failed (HTTP {status}): {}", format_entries(.errors))]
    Authentication {
        status: u16,
        errors: Vec<ApiErrorEntry>,
    },

    /// The service answered with a non-empty error list
    #[error("service error: {}", format_entries(.errors))]
    Service { errors: Vec<ApiErrorEntry> },

    /// A non-success status without any service-reported error
    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("no shows found")]
    NoShowsFound,

    #[error("no characters found")]
    NoCharactersFound,

    #[error("no videos found")]
    NoVideosFound,

    #[error("no episodes found")]
    NoEpisodesFound,

    /// A single-item response decoded cleanly but carried no item
    #[error("response from {endpoint} contained no payload")]
    MissingPayload { endpoint: &'static str },

    /// The response body was not valid JSON for the expected shape
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        source: serde_json::Error,
    },
}

impl BetaSeriesError {
    /// Returns the service-reported entries, if this error carries any.
    pub fn api_errors(&self) -> &[ApiErrorEntry] {
        match self {
            BetaSeriesError::Authentication { errors, .. } | BetaSeriesError::Service { errors } => {
                errors.as_slice()
            }
            _ => &[],
        }
    }

    /// True for failures detected locally, before a request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BetaSeriesError::IdNotSet
                | BetaSeriesError::NoSingleIdUsed
                | BetaSeriesError::InvalidNote { .. }
                | BetaSeriesError::InvalidBaseUrl { .. }
        )
    }
}

fn format_entries(errors: &[ApiErrorEntry]) -> String {
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.text))
        .collect::<Vec<_>>()
        .join("; ")
}
