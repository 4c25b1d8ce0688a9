//! Error types for upstream calls and the HTTP boundary
//!
//! `UpstreamError` describes what went wrong while talking to the catalog.
//! `AppError` adds the stage that failed and maps it to an HTTP response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure of a single outbound request or of the pagination walk
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection refused, timeout, or a non-success status code
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body was not valid JSON or did not have the expected shape
    #[error("unable to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog pagination exceeded {limit} pages")]
    PageLimit { limit: usize },

    #[error("catalog pagination revisited {url}")]
    PaginationCycle { url: String },
}

/// Errors surfaced by the residency endpoint
///
/// The display strings are the plain-text bodies sent to clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid parameter 'filmsCount'")]
    InvalidFilmsCount,

    #[error("Unable to get the planets list")]
    Catalog(#[source] UpstreamError),

    #[error("Unable to get the residents of the different planets")]
    Residents(#[source] UpstreamError),

    #[error("Error encoding JSON")]
    Encoding(#[source] serde_json::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidFilmsCount => StatusCode::BAD_REQUEST,
            AppError::Catalog(_) | AppError::Residents(_) | AppError::Encoding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::InvalidFilmsCount => tracing::debug!("rejected request: {}", self),
            AppError::Catalog(source) | AppError::Residents(source) => {
                tracing::error!(error = %source, "{}", self)
            }
            AppError::Encoding(source) => tracing::error!(error = %source, "{}", self),
        }

        (status, self.to_string()).into_response()
    }
}
