//! The GET/JSON core every accessor is built on.

use std::future::Future;

use flood_viz_api_models::ApiConfig;
use futures::future::{AbortRegistration, Abortable};
use serde::de::DeserializeOwned;

use crate::FetchError;
use crate::urls::{QueryParams, resolve_url};

/// Client for the flood dashboard backend.
///
/// Holds a borrowed, immutable endpoint table and a [`reqwest::Client`]
/// (which is internally reference-counted, so cloning the `ApiClient` is
/// cheap).
#[derive(Debug, Clone)]
pub struct ApiClient<'a> {
    http: reqwest::Client,
    config: &'a ApiConfig,
}

impl<'a> ApiClient<'a> {
    /// Creates a client with a default [`reqwest::Client`].
    #[must_use]
    pub fn new(config: &'a ApiConfig) -> Self {
        Self::with_http_client(reqwest::Client::new(), config)
    }

    /// Creates a client around an existing [`reqwest::Client`].
    #[must_use]
    pub const fn with_http_client(http: reqwest::Client, config: &'a ApiConfig) -> Self {
        Self { http, config }
    }

    /// The endpoint table this client resolves paths against.
    #[must_use]
    pub const fn config(&self) -> &'a ApiConfig {
        self.config
    }

    /// GETs `path` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] for non-success statuses,
    /// [`FetchError::Request`] for transport failures and
    /// [`FetchError::Json`] if the body does not parse into `T`.
    #[allow(clippy::future_not_send)]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, FetchError> {
        self.get_json_at(path, None, params, None).await
    }

    /// Like [`get_json`](Self::get_json), with an optional trailing path
    /// segment and an optional abort signal.
    ///
    /// # Errors
    ///
    /// Same as [`get_json`](Self::get_json), plus [`FetchError::Aborted`]
    /// if `signal` fires before the response is complete.
    #[allow(clippy::future_not_send)]
    pub async fn get_json_at<T: DeserializeOwned>(
        &self,
        path: &str,
        segment: Option<&str>,
        params: &QueryParams,
        signal: Option<AbortRegistration>,
    ) -> Result<T, FetchError> {
        let text = self.get_text(path, segment, params, signal).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// GETs a parameterless resource (a collection endpoint or a static
    /// fallback payload).
    #[allow(clippy::future_not_send)]
    pub(crate) async fn get_resource<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, FetchError> {
        self.get_json(path, &QueryParams::new()).await
    }

    /// GETs a single item below a collection path.
    #[allow(clippy::future_not_send)]
    pub(crate) async fn get_resource_by_id<T: DeserializeOwned>(
        &self,
        path: &str,
        id: &str,
    ) -> Result<T, FetchError> {
        self.get_json_at(path, Some(id), &QueryParams::new(), None)
            .await
    }

    /// GETs `path` and returns the raw body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] for non-success statuses (with the
    /// body read best-effort), [`FetchError::Request`] for transport
    /// failures and [`FetchError::Aborted`] if `signal` fires.
    #[allow(clippy::future_not_send)]
    pub async fn get_text(
        &self,
        path: &str,
        segment: Option<&str>,
        params: &QueryParams,
        signal: Option<AbortRegistration>,
    ) -> Result<String, FetchError> {
        abortable(self.send(path, segment, params), signal).await
    }

    #[allow(clippy::future_not_send)]
    async fn send(
        &self,
        path: &str,
        segment: Option<&str>,
        params: &QueryParams,
    ) -> Result<String, FetchError> {
        let url = resolve_url(self.config, path, segment, params)?;
        log::debug!("GET {url}");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::debug!("GET {path} returned {status}");
            return Err(FetchError::Http {
                path: path.to_owned(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

/// Runs `future`, resolving to [`FetchError::Aborted`] if `signal` fires
/// first.
#[allow(clippy::future_not_send)]
async fn abortable<T, F>(future: F, signal: Option<AbortRegistration>) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    match signal {
        Some(registration) => Abortable::new(future, registration)
            .await
            .unwrap_or(Err(FetchError::Aborted)),
        None => future.await,
    }
}
