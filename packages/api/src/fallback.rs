//! Static-payload fallback for endpoints the dashboard cannot do without.

use std::future::Future;

use futures::future::AbortRegistration;
use serde::de::DeserializeOwned;

use crate::{ApiClient, FetchError, QueryParams};

/// Where a [`Fetched`] payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// The live backend endpoint.
    Live,
    /// The static fallback payload.
    Fallback,
}

/// A payload together with its [`DataOrigin`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    /// The parsed payload.
    pub data: T,
    /// Whether the live endpoint or the fallback produced it.
    pub origin: DataOrigin,
}

impl<T> Fetched<T> {
    /// Wraps a payload from the live endpoint.
    #[must_use]
    pub const fn live(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Live,
        }
    }

    /// Wraps a payload from the fallback.
    #[must_use]
    pub const fn fallback(data: T) -> Self {
        Self {
            data,
            origin: DataOrigin::Fallback,
        }
    }

    /// Whether the dashboard is showing degraded data.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.origin, DataOrigin::Fallback)
    }
}

/// Awaits `primary`, and on failure awaits the future produced by
/// `fallback` instead.
///
/// Any error except [`FetchError::Aborted`] triggers the fallback: HTTP
/// error statuses, transport failures and unparseable bodies alike. A
/// cancelled primary is returned as-is and the fallback is never started.
/// If the fallback fails too, its error is returned.
///
/// # Errors
///
/// Returns [`FetchError::Aborted`] if the primary was cancelled, or the
/// fallback's error if both fail.
#[allow(clippy::future_not_send)]
pub async fn with_fallback<T, P, F, Fut>(primary: P, fallback: F) -> Result<Fetched<T>, FetchError>
where
    P: Future<Output = Result<T, FetchError>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    match primary.await {
        Ok(data) => Ok(Fetched::live(data)),
        Err(e) if e.is_aborted() => Err(e),
        Err(e) => {
            log::warn!("Live request failed, using fallback: {e}");
            fallback().await.map(Fetched::fallback)
        }
    }
}

impl ApiClient<'_> {
    /// GETs a live endpoint, falling back to a static payload if that
    /// fails.
    ///
    /// `signal` only covers the live request.
    #[allow(clippy::future_not_send)]
    pub(crate) async fn get_with_fallback<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        fallback_path: &str,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<T>, FetchError> {
        with_fallback(self.get_json_at(path, None, params, signal), || {
            self.get_resource(fallback_path)
        })
        .await
    }
}
