//! Request URL construction.

use std::sync::LazyLock;

use flood_viz_api_models::{ApiConfig, RouteQuery};
use regex::Regex;
use reqwest::Url;

use crate::FetchError;

/// Ordered query parameters.
///
/// Setting a key twice replaces the earlier value, and `None` values are
/// left out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Sets `key` to the string form of `value`.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value.to_string());
        self
    }

    /// Sets `key` when `value` is present; does nothing otherwise.
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Sets `key`, replacing any earlier value.
    pub fn set(&mut self, key: &str, value: String) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key.to_owned(), value));
        }
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<&RouteQuery> for QueryParams {
    fn from(query: &RouteQuery) -> Self {
        Self::new()
            .with("start_address", &query.start_address)
            .with("end_address", &query.end_address)
            .with_opt("date", query.date.as_deref())
            .with_opt("time", query.time.as_deref())
    }
}

/// Regex matching a run of slashes that does not follow a scheme's `:`.
static REPEATED_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:]/)/+").expect("valid regex"));

/// Joins a base and a path with exactly one `/` between them.
///
/// Repeated slashes anywhere after the scheme are collapsed as well, so
/// `("/api/", "//traffic//delay")` becomes `/api/traffic/delay`.
#[must_use]
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.strip_suffix('/').unwrap_or(base);
    let joined = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };

    REPEATED_SLASH_RE.replace_all(&joined, "$1").into_owned()
}

/// Builds the absolute URL for a request.
///
/// Static paths (under [`ApiConfig::static_prefix`]) resolve against the
/// origin, everything else against the origin plus
/// [`ApiConfig::api_base`], or against the API base alone when it is an
/// absolute URL. `segment` is percent-encoded and appended as a
/// final path segment.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if the configured origin does not
/// produce a valid absolute URL.
pub fn resolve_url(
    config: &ApiConfig,
    path: &str,
    segment: Option<&str>,
    params: &QueryParams,
) -> Result<Url, FetchError> {
    let relative = if config.is_static(path) {
        path.to_owned()
    } else {
        join_url(&config.api_base, path)
    };
    // An absolute API base points at another host and replaces the origin.
    let raw = if Url::parse(&relative).is_ok() {
        relative
    } else {
        join_url(&config.origin, &relative)
    };

    let invalid = |message: String| FetchError::InvalidUrl {
        url: raw.clone(),
        message,
    };

    let mut url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;

    if let Some(segment) = segment {
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot take path segments".to_string()))?
            .pop_if_empty()
            .push(segment);
    }

    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }

    Ok(url)
}
