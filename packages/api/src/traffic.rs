//! Traffic delay, criticality and summary endpoints.

use flood_viz_api_models::{Aggregation, CriticalityMetric};
use futures::future::AbortRegistration;
use serde_json::Value;

use crate::{ApiClient, FetchError, Fetched, QueryParams};

impl ApiClient<'_> {
    /// Travel delay per road segment or node, as a GeoJSON
    /// `FeatureCollection`.
    ///
    /// Falls back to the static delay payload if the live call fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if cancelled, or the fallback's
    /// error if both the live call and the fallback fail.
    #[allow(clippy::future_not_send)]
    pub async fn delay(
        &self,
        mode: &str,
        scenario: &str,
        agg: Aggregation,
        limit: u32,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<Value>, FetchError> {
        let params = QueryParams::new()
            .with("mode", mode)
            .with("scenario", scenario)
            .with("agg", agg)
            .with("limit", limit);
        self.get_with_fallback(
            &self.config().paths.delay,
            &params,
            &self.config().fallbacks.delay,
            signal,
        )
        .await
    }

    /// Road segments ranked by a centrality metric, as a GeoJSON
    /// `FeatureCollection`.
    ///
    /// Falls back to the static criticality payload if the live call fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if cancelled, or the fallback's
    /// error if both the live call and the fallback fail.
    #[allow(clippy::future_not_send)]
    pub async fn criticality(
        &self,
        metric: CriticalityMetric,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<Value>, FetchError> {
        let params = QueryParams::new().with("metric", metric);
        self.get_with_fallback(
            &self.config().paths.criticality,
            &params,
            &self.config().fallbacks.criticality,
            signal,
        )
        .await
    }

    /// Headline KPIs for a mode and scenario.
    ///
    /// Falls back to the static summary payload if the live call fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if cancelled, or the fallback's
    /// error if both the live call and the fallback fail.
    #[allow(clippy::future_not_send)]
    pub async fn summary(
        &self,
        mode: &str,
        scenario: &str,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<Value>, FetchError> {
        let params = QueryParams::new()
            .with("mode", mode)
            .with("scenario", scenario);
        self.get_with_fallback(
            &self.config().paths.summary,
            &params,
            &self.config().fallbacks.summary,
            signal,
        )
        .await
    }

    /// Maximum traffic flow for every road.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_road_max_traffic_flow(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.road_max_traffic_flow)
            .await
    }

    /// Maximum traffic flow for one road.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn road_max_traffic_flow_by_id(&self, id: i64) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.road_max_traffic_flow, &id.to_string())
            .await
    }
}
