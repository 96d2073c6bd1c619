//! Critical road segments around a flood.
//!
//! This endpoint emits bare `NaN` for missing floats, so its body is read
//! as text and cleaned up before decoding.

use flood_viz_flood_models::CriticalSegmentsNearFloodResponse;
use flood_viz_normalize::{fill_missing_road_names, parse_lenient};

use crate::{ApiClient, FetchError, QueryParams};

impl ApiClient<'_> {
    /// Critical road segments within `buffer_m` metres of a flood.
    ///
    /// The backend default buffer applies when `buffer_m` is `None`.
    /// Segments without a usable road name are labelled
    /// [`flood_viz_flood_models::UNNAMED_ROAD`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] or [`FetchError::Request`] if the request
    /// fails, and [`FetchError::MalformedResponse`] if the body is not JSON
    /// even after `NaN` substitution. There is no fallback. Valid JSON of an
    /// unexpected shape decodes leniently (see
    /// [`CriticalSegmentsNearFloodResponse`]), and a body that is not an
    /// object yields an empty response.
    #[allow(clippy::future_not_send)]
    pub async fn critical_segments_near_flood(
        &self,
        flood_id: i64,
        buffer_m: Option<f64>,
    ) -> Result<CriticalSegmentsNearFloodResponse, FetchError> {
        let path = &self.config().paths.critical_segments_near_flood;
        let params = QueryParams::new()
            .with("flood_id", flood_id)
            .with_opt("buffer_m", buffer_m);

        let text = self.get_text(path, None, &params, None).await?;
        let mut payload = parse_lenient(&text).map_err(|e| {
            log::warn!("Invalid JSON from {path}: {e}");
            FetchError::MalformedResponse { path: path.clone() }
        })?;

        let patched = fill_missing_road_names(&mut payload);
        if patched > 0 {
            log::debug!("Labelled {patched} unnamed critical segments");
        }

        Ok(serde_json::from_value(payload).unwrap_or_else(|e| {
            log::warn!("Unexpected critical segments payload from {path}: {e}");
            CriticalSegmentsNearFloodResponse::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use flood_viz_flood_models::{OneOrMany, UNNAMED_ROAD};

    use super::*;
    use crate::test_support::{config_for, hits, serve};

    #[tokio::test]
    async fn nan_lengths_become_absent() {
        let server = serve(vec![(
            "/api/critical-segments",
            200,
            r#"{"critical_segments": [{"length_m": NaN}]}"#,
        )])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let response = client.critical_segments_near_flood(14, None).await.unwrap();
        assert_eq!(response.critical_segments.len(), 1);
        assert_eq!(response.critical_segments[0].length_m, None);
        assert_eq!(response.critical_segments[0].road_name, UNNAMED_ROAD);
        assert_eq!(hits(&server).await, vec!["/api/critical-segments?flood_id=14"]);
    }

    #[tokio::test]
    async fn full_payload_decodes() {
        let server = serve(vec![(
            "/api/critical-segments",
            200,
            r#"{
                "flood_id": 14,
                "buffer_m": 75.0,
                "flood_point": {"type": "Point", "coordinates": [103.85, 1.29]},
                "count_critical_segments": 2,
                "critical_segments": [
                    {"road_name": "Orchard Road", "road_type": "primary", "length_m": 120.5, "centrality_score": 0.82,
                     "geometry": {"type": "LineString", "coordinates": [[28000.0, 31000.0], [28100.0, 31050.0]]}},
                    {"road_name": "  ", "length_m": NaN, "centrality_score": NaN}
                ]
            }"#,
        )])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let response = client
            .critical_segments_near_flood(14, Some(75.0))
            .await
            .unwrap();
        assert_eq!(response.flood_id, Some(14));
        assert_eq!(response.count_critical_segments, Some(2));
        assert_eq!(response.critical_segments[0].road_name, "Orchard Road");
        assert_eq!(response.critical_segments[0].length_m, Some(120.5));
        assert_eq!(response.critical_segments[1].road_name, UNNAMED_ROAD);
        assert_eq!(response.critical_segments[1].centrality_score, None);
        assert_eq!(
            hits(&server).await,
            vec!["/api/critical-segments?flood_id=14&buffer_m=75"]
        );
    }

    #[tokio::test]
    async fn unparseable_body_is_malformed() {
        let server =
            serve(vec![("/api/critical-segments", 200, "{critical_segments: [")]).await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let err = client
            .critical_segments_near_flood(14, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, FetchError::MalformedResponse { ref path } if path == "/critical-segments")
        );
    }

    #[tokio::test]
    async fn unexpected_shapes_decode_leniently() {
        let server = serve(vec![(
            "/api/critical-segments",
            200,
            r#"{"critical_segments": "none", "buffer_m": 50.0}"#,
        )])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let response = client.critical_segments_near_flood(14, None).await.unwrap();
        assert_eq!(response.buffer_m, Some(50.0));
        assert!(response.critical_segments.is_empty());
    }

    #[tokio::test]
    async fn merged_ways_and_nan_ordinates_are_accepted() {
        let server = serve(vec![(
            "/api/critical-segments",
            200,
            r#"{
                "buffer_m": 50.0,
                "count_critical_segments": 2,
                "critical_segments": [
                    {"centrality_score": 0.0216, "length_m": 189.67,
                     "road_name": ["Jalan Tan Tock Seng", "Bassein Road"],
                     "road_type": ["residential", "unclassified"],
                     "geometry": {"type": "LineString", "coordinates": [[29526.93, 33930.41], [29539.92, NaN]]}},
                    {"road_name": "Balestier Road", "road_type": "primary", "length_m": NaN}
                ]
            }"#,
        )])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let response = client.critical_segments_near_flood(14, None).await.unwrap();
        assert_eq!(response.critical_segments.len(), 2);

        let merged = &response.critical_segments[0];
        assert_eq!(merged.road_name, UNNAMED_ROAD);
        assert_eq!(
            merged.road_type.as_ref().and_then(OneOrMany::first),
            Some("residential")
        );
        let geometry = merged.geometry.as_ref().unwrap();
        assert_eq!(geometry.coordinates[1], [Some(29539.92), None]);

        assert_eq!(response.critical_segments[1].road_name, "Balestier Road");
        assert_eq!(response.critical_segments[1].length_m, None);
    }

    #[tokio::test]
    async fn error_status_is_not_masked() {
        let server = serve(vec![(
            "/api/critical-segments",
            400,
            r#"{"error": "flood_id is required"}"#,
        )])
        .await;
        let config = config_for(&server);
        let client = ApiClient::new(&config);

        let err = client
            .critical_segments_near_flood(14, None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }
}
