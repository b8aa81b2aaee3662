//! Error type definitions.

use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// A `Result` alias where the `Err` case is `gorest_reports::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for the GoREST client and the report writers.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid token (make sure there are no invalid characters)")]
    InvalidToken,
    #[error("Invalid URL: {0}")]
    InvalidUrl(url::ParseError),
    #[error("Max pages must be at least 1")]
    InvalidMaxPages,
    #[error("Failed to setup HTTP client: {0}")]
    HttpClientSetup(reqwest::Error),
    #[error("Failed to deserialize response: {0}")]
    Deserialize(reqwest::Error),
    #[error("Http error: {0}")]
    Http(reqwest::Error),
    #[error(transparent)]
    InvalidParams(#[from] serde_qs::Error),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to fetch page {page}: {source}")]
    Fetch {
        page: u32,
        #[source]
        source: ApiError,
    },
    #[error("Gave up after {0} pages without reaching an empty page")]
    PageLimitExceeded(u32),
    #[error(transparent)]
    Api(ApiError),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn write(path: impl Into<PathBuf>, source: impl Into<io::Error>) -> Self {
        Error::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// An error returned by the GoREST API.
///
/// The body is kept as raw JSON since GoREST answers with either an object
/// (`{"message": ...}`) or a list of field errors depending on the failure.
#[derive(Debug)]
pub struct ApiError {
    pub status: u16,
    pub method: http::Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiError {
    pub(crate) fn new(
        status: u16,
        method: http::Method,
        path: String,
        body: Option<serde_json::Value>,
    ) -> Self {
        Self {
            status,
            method,
            path,
            body,
        }
    }

    /// The canonical reason phrase of the status code, if it has one.
    pub fn reason(&self) -> Option<&'static str> {
        http::StatusCode::from_u16(self.status)
            .ok()
            .and_then(|status| status.canonical_reason())
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Received {}", self.status)?;
        if let Some(reason) = self.reason() {
            write!(f, " {reason}")?;
        }
        write!(f, " on {} {}", self.method, self.path)?;
        if let Some(body) = self.body.as_ref() {
            write!(f, ": {body}")?;
        }
        Ok(())
    }
}
