//! Car trip endpoints.

use flood_viz_api_models::RouteQuery;
use serde_json::Value;

use crate::{ApiClient, FetchError, QueryParams};

impl ApiClient<'_> {
    /// Car trips that cross a flooded road.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_car_trips_flooded(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.car_trips_flooded)
            .await
    }

    /// A single car trip under flooded conditions.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn car_trip_flooded_by_id(&self, id: i64) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.car_trips_flooded, &id.to_string())
            .await
    }

    /// The same trips under dry conditions.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn all_car_trips_dry(&self) -> Result<Value, FetchError> {
        self.get_resource(&self.config().paths.car_trips_dry).await
    }

    /// A single car trip under dry conditions.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn car_trip_dry_by_id(&self, id: i64) -> Result<Value, FetchError> {
        self.get_resource_by_id(&self.config().paths.car_trips_dry, &id.to_string())
            .await
    }

    /// Driving route between two addresses, with any flood detour.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails or the body is not JSON.
    #[allow(clippy::future_not_send)]
    pub async fn onemap_car_route(&self, query: &RouteQuery) -> Result<Value, FetchError> {
        self.get_json(
            &self.config().paths.onemap_car_route,
            &QueryParams::from(query),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{config_for, hits, serve};

    #[tokio::test]
    async fn flooded_and_dry_trips_use_separate_collections() {
        let server = serve(vec![
            ("/api/car_trips_flooded/3", 200, r#"{"trip_id": 3, "flooded": true}"#),
            ("/api/car_trips_dry/3", 200, r#"{"trip_id": 3, "flooded": false}"#),
        ])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let flooded = client.car_trip_flooded_by_id(3).await.unwrap();
        let dry = client.car_trip_dry_by_id(3).await.unwrap();
        assert_eq!(flooded["flooded"], json!(true));
        assert_eq!(dry["flooded"], json!(false));
    }

    #[tokio::test]
    async fn missing_collection_is_an_http_error() {
        let server = serve(vec![]).await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let err = client.all_car_trips_dry().await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn onemap_route_sends_date_and_time() {
        let server = serve(vec![("/api/onemap_car_route", 200, "{}")]).await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let query = RouteQuery {
            start_address: "119077".to_string(),
            end_address: "768675".to_string(),
            date: Some("2024-05-01".to_string()),
            time: Some("08:30".to_string()),
        };
        client.onemap_car_route(&query).await.unwrap();
        assert_eq!(
            hits(&server).await,
            vec![
                "/api/onemap_car_route?start_address=119077&end_address=768675&date=2024-05-01&time=08%3A30"
            ]
        );
    }
}
