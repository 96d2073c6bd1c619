//! Bus network endpoints: stops, trips, routes and flood impacts.

use flood_viz_api_models::{BusSpeed, RouteQuery};
use futures::future::AbortRegistration;
use serde_json::Value;

use crate::{ApiClient, FetchError, Fetched, QueryParams};

impl ApiClient<'_> {
    /// Per-service bus impacts for a scenario.
    ///
    /// Falls back to the static bus impacts payload if the live call fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Aborted`] if cancelled, or the fallback's
    /// error if both the live call and the fallback fail.
    #[allow(clippy::future_not_send)]
    pub async fn bus_impacts(
        &self,
        scenario: &str,
        signal: Option<AbortRegistration>,
    ) -> Result<Fetched<Value>, FetchError> {
        let params = QueryParams::new().with("scenario", scenario);
        self.get_with_fallback(
            &self.config().paths.bus_impacts,
            &params,
            &self.config().fallbacks.bus_impacts,
            signal,
        )
        .await
    }

    /// Every bus stop.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_bus_stops(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.bus_stops).await
    }

    /// A single bus stop by its stop code.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn bus_stop_by_code(&self, code: &str) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.bus_stops, code)
            .await
    }

    /// Every simulated bus trip.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_bus_trips(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.bus_trips).await
    }

    /// A single bus trip.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn bus_trip_by_id(&self, id: i64) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.bus_trips, &id.to_string())
            .await
    }

    /// Every stop-to-stop bus trip segment.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_bus_trip_segments(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.bus_trip_segments)
            .await
    }

    /// A single bus trip segment.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn bus_trip_segment_by_id(&self, id: i64) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.bus_trip_segments, &id.to_string())
            .await
    }

    /// Stops and geometry of a bus service.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn bus_route_by_service(&self, service: &str) -> Result<Value, FetchError> {
        let params = QueryParams::new().with("service", service);
        self.get_json(&self.config().paths.bus_route, &params).await
    }

    /// Delay of trips from `stop_id` towards `end_area_code`, optionally at
    /// a fixed wading speed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn bus_trips_delay(
        &self,
        stop_id: &str,
        end_area_code: &str,
        speed: Option<BusSpeed>,
    ) -> Result<Value, FetchError> {
        let params = QueryParams::new()
            .with("stop_id", stop_id)
            .with("trip_end_area_code", end_area_code)
            .with_opt("speed_kmh", speed);
        self.get_json(&self.config().paths.bus_trips_delay, &params)
            .await
    }

    /// Public transport route between two addresses.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn pt_route(&self, query: &RouteQuery) -> Result<Value, FetchError> {
        self.get_json(&self.config().paths.pt_route, &QueryParams::from(query))
            .await
    }
}
