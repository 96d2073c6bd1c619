//! Flood event endpoints.

use flood_viz_api_models::DateRange;
use flood_viz_flood_models::{FloodLocationCount, UniqueFloodEvent};
use flood_viz_normalize::normalize_flood_locations;
use futures::future::AbortRegistration;
use serde_json::Value;

use crate::{ApiClient, FetchError, Fetched, QueryParams, with_fallback};

impl ApiClient<'_> {
    /// Flooded road geometry for a scenario.
    ///
    /// Falls back to the static flooded-roads payload if the live call
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if cancelled, or the fallback's
    /// error if both the live call and the fallback fail.
    #[allow(clippy::future_not_send)]
    pub async fn flooded_roads(
        &self,
        scenario: &str,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<Value>, FetchError> {
        let params = QueryParams::new().with("scenario", scenario);
        self.get_with_fallback(
            &self.config().paths.flooded_roads,
            &params,
            &self.config().fallbacks.flooded_roads,
            signal,
        )
        .await
    }

    /// Flood event counts per location, merged so that every location
    /// appears once.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    /// Rows the normalizer cannot interpret are dropped, not reported.
    #[allow(clippy::future_not_send)]
    pub async fn flood_locations(&self) -> Result<Vec<FloodLocationCount>, FetchError> {
        let raw: Value = self
            .get_resource(&self.config().paths.flood_locations)
            .await?;
        let locations = normalize_flood_locations(&raw);
        log::info!("Loaded {} flood locations", locations.len());
        Ok(locations)
    }

    /// One flood event per flooded location, with its travel delay.
    ///
    /// A body that is not an array yields an empty list, and array entries
    /// that do not look like flood events are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, is cancelled, or the
    /// body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn unique_flood_events_by_location(
        &self,
        signal: Option<AbortRegistration>,
    ) -> Result<Vec<UniqueFloodEvent>, FetchError> {
        let raw: Value = self
            .get_json_at(
                &self.config().paths.unique_flood_events_location,
                None,
                &QueryParams::new(),
                signal,
            )
            .await?;

        let Value::Array(rows) = raw else {
            log::debug!("Unique flood events response is not an array");
            return Ok(Vec::new());
        };

        Ok(rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value(row) {
                Ok(event) => Some(event),
                Err(e) => {
                    log::debug!("Skipping unique flood event: {e}");
                    None
                }
            })
            .collect())
    }

    /// Flood events (with road geometry and delay metrics) between two
    /// dates.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn flood_events_by_date_range(&self, range: &DateRange) -> Result<Value, FetchError> {
        let params = QueryParams::new()
            .with("start_date", range.start_param())
            .with("end_date", range.end_param());
        self.get_json(&self.config().paths.flood_events_by_date_range, &params)
            .await
    }

    /// Every recorded flood event.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_flood_events(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.flood_events).await
    }

    /// A single flood event.
    ///
    /// Asks the legacy `?flood_event_ids=` route first and falls back to
    /// the `/{id}` route if that fails.
    ///
    /// # Errors
    ///
    /// Returns the `/{id}` route's error if both routes fail.
    #[allow(clippy::future_not_send)]
    pub async fn flood_event_by_id(&self, id: i64) -> Result<Value, FetchError> {
        let paths = &self.config().paths;
        let legacy = QueryParams::new().with("flood_event_ids", id);
        let id = id.to_string();

        with_fallback(
            self.get_json(&paths.flood_event_by_id_legacy, &legacy),
            || self.get_resource_by_id(&paths.flood_events, &id),
        )
        .await
        .map(|fetched| fetched.data)
    }

    /// Bus services and candidate stops affected by a flood.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn buses_affected_by_floods(&self, flood_id: i64) -> Result<Value, FetchError> {
        let params = QueryParams::new().with("flood_id", flood_id);
        self.get_json(&self.config().paths.buses_affected, &params)
            .await
    }
}
