#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP client for the flood dashboard backend.
//!
//! [`ApiClient`] exposes one accessor per backend endpoint. Every request
//! is a single GET; there is no caching and no retry. A handful of
//! accessors (delay, flooded roads, criticality, bus impacts, summary)
//! fall back to a static JSON payload when the live call fails, see
//! [`fallback::with_fallback`]. Callers can cancel an in-flight request by
//! passing an [`futures::future::AbortRegistration`]; a cancelled request
//! never falls back.
//!
//! Flood location counts come back normalized through
//! [`flood_viz_normalize::normalize_flood_locations`], and the
//! critical-segments endpoint is parsed leniently because the backend emits
//! bare `NaN` tokens there.

pub mod bus;
pub mod car_trips;
pub mod config;
pub mod critical_segments;
pub mod fallback;
pub mod fetch;
pub mod flood_events;
pub mod traffic;
pub mod urls;

#[cfg(test)]
mod test_support;

pub use fallback::{DataOrigin, Fetched, with_fallback};
pub use fetch::ApiClient;
pub use flood_viz_api_models::ApiConfig;
pub use urls::QueryParams;

/// Errors that can occur while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The backend answered with a non-success status.
    #[error("GET {path} failed: {status} {body}")]
    Http {
        /// Endpoint path that was requested.
        path: String,
        /// HTTP status code.
        status: u16,
        /// Response body, or empty if it could not be read.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The response body was not valid JSON even after lenient cleanup.
    #[error("Invalid JSON from {path}")]
    MalformedResponse {
        /// Endpoint path that was requested.
        path: String,
    },

    /// A request URL could not be built from the configuration.
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl {
        /// The URL text that failed to parse.
        url: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The caller cancelled the request.
    #[error("Request aborted")]
    Aborted,
}

impl FetchError {
    /// Whether the caller cancelled the request.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    /// The HTTP status code, if the backend answered with an error status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
