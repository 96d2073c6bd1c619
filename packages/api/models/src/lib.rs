#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Endpoint configuration and query parameter types for the flood
//! dashboard backend.
//!
//! [`ApiConfig`] is the immutable endpoint table: it is built once at
//! startup (usually from the embedded TOML defaults) and passed by
//! reference to the client.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Where the backend and the static fallback payloads live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port everything is resolved against
    /// (e.g. `"http://localhost:5173"`).
    pub origin: String,
    /// Path prefix of the backend API on the origin (e.g. `"/api"`).
    pub api_base: String,
    /// Paths starting with this prefix are static files served by the
    /// origin itself and do not go through [`api_base`](Self::api_base).
    #[serde(default = "default_static_prefix")]
    pub static_prefix: String,
    /// Live backend endpoints.
    pub paths: EndpointPaths,
    /// Static payloads used when a live endpoint fails.
    pub fallbacks: FallbackPaths,
}

fn default_static_prefix() -> String {
    "/mock".to_owned()
}

impl ApiConfig {
    /// Whether `path` names a static file rather than a backend endpoint.
    #[must_use]
    pub fn is_static(&self, path: &str) -> bool {
        !self.static_prefix.is_empty() && path.starts_with(&self.static_prefix)
    }
}

/// Backend endpoint paths, relative to [`ApiConfig::api_base`].
///
/// Endpoints addressed by ID (`/bus_trip/{id}` and friends) are listed by
/// their collection path; the ID is appended as an encoded path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointPaths {
    /// Per-segment or per-node travel delay. `?mode=&scenario=&agg=&limit=`
    pub delay: String,
    /// Flooded road geometry. `?scenario=`
    pub flooded_roads: String,
    /// Flood events between two dates. `?start_date=&end_date=`
    pub flood_events_by_date_range: String,
    /// Flood event counts per location.
    pub flood_locations: String,
    /// Road criticality ranking. `?metric=`
    pub criticality: String,
    /// Bus impact rows. `?scenario=`
    pub bus_impacts: String,
    /// Summary KPIs. `?mode=&scenario=`
    pub summary: String,
    /// `OneMap` car routing. `?start_address=&end_address=&date=&time=`
    pub onemap_car_route: String,
    /// `OneMap` public transport routing.
    pub pt_route: String,
    /// Bus services affected by a flood. `?flood_id=`
    pub buses_affected: String,
    /// Critical road segments around a flood. `?flood_id=&buffer_m=`
    pub critical_segments_near_flood: String,
    /// One flood event per flooded location.
    pub unique_flood_events_location: String,
    /// Bus stops; `/{code}` for a single stop.
    pub bus_stops: String,
    /// Bus trips; `/{id}` for a single trip.
    pub bus_trips: String,
    /// Bus trip segments; `/{id}` for a single segment.
    pub bus_trip_segments: String,
    /// Flood events; `/{id}` for a single event.
    pub flood_events: String,
    /// Legacy single flood event lookup. `?flood_event_ids=`
    pub flood_event_by_id_legacy: String,
    /// Car trips through flooded roads; `/{id}` for a single trip.
    pub car_trips_flooded: String,
    /// Car trips in dry conditions; `/{id}` for a single trip.
    pub car_trips_dry: String,
    /// Maximum traffic flow per road; `/{id}` for a single road.
    pub road_max_traffic_flow: String,
    /// Bus service route geometry. `?service=`
    pub bus_route: String,
    /// Bus trip delays. `?stop_id=&trip_end_area_code=&speed_kmh=`
    pub bus_trips_delay: String,
}

/// Static fallback payloads, relative to [`ApiConfig::origin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPaths {
    /// Fallback for [`EndpointPaths::delay`].
    pub delay: String,
    /// Fallback for [`EndpointPaths::flooded_roads`].
    pub flooded_roads: String,
    /// Fallback for [`EndpointPaths::criticality`].
    pub criticality: String,
    /// Fallback for [`EndpointPaths::bus_impacts`].
    pub bus_impacts: String,
    /// Fallback for [`EndpointPaths::summary`].
    pub summary: String,
}

/// Whether delay is aggregated per road segment or per graph node.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Aggregation {
    /// One value per road segment.
    Segment,
    /// One value per intersection.
    Node,
}

/// Centrality measure used to rank critical roads.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CriticalityMetric {
    /// Edge betweenness centrality.
    Betweenness,
    /// Closeness centrality.
    Closeness,
}

/// Bus speed through flood water, in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
pub enum BusSpeed {
    /// 5 km/h.
    #[strum(serialize = "5")]
    Kmh5,
    /// 10 km/h.
    #[strum(serialize = "10")]
    Kmh10,
    /// 20 km/h.
    #[strum(serialize = "20")]
    Kmh20,
}

/// An inclusive date window for flood event queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl DateRange {
    /// The backend's date format.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Formats the start date as `YYYY-MM-DD`.
    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(Self::FORMAT).to_string()
    }

    /// Formats the end date as `YYYY-MM-DD`.
    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(Self::FORMAT).to_string()
    }
}

/// Origin and destination for a routing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteQuery {
    /// Free-text start address or postal code.
    pub start_address: String,
    /// Free-text destination address or postal code.
    pub end_address: String,
    /// Departure date, passed through as given.
    pub date: Option<String>,
    /// Departure time, passed through as given.
    pub time: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn query_enums_render_as_backend_values() {
        assert_eq!(Aggregation::Segment.to_string(), "segment");
        assert_eq!(Aggregation::Node.as_ref(), "node");
        assert_eq!(CriticalityMetric::Betweenness.to_string(), "betweenness");
        assert_eq!(
            CriticalityMetric::from_str("closeness").unwrap(),
            CriticalityMetric::Closeness
        );
        assert_eq!(BusSpeed::Kmh5.to_string(), "5");
        assert_eq!(BusSpeed::from_str("20").unwrap(), BusSpeed::Kmh20);
    }

    #[test]
    fn date_range_uses_iso_dates() {
        let range = DateRange {
            start: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 4, 30).unwrap(),
        };
        assert_eq!(range.start_param(), "2020-04-01");
        assert_eq!(range.end_param(), "2020-04-30");
    }

    #[test]
    fn static_prefix_defaults_to_mock() {
        let config: ApiConfig = toml::de::from_str(
            r#"
            origin = "http://localhost:5173"
            api_base = "/api"

            [paths]
            delay = "/traffic/delay"
            flooded_roads = "/flood_events/roads"
            flood_events_by_date_range = "/get_flood_events_by_date_range"
            flood_locations = "/flood_events/location"
            criticality = "/traffic/criticality"
            bus_impacts = "/bus/impacts"
            summary = "/traffic/summary"
            onemap_car_route = "/onemap_car_route"
            pt_route = "/get_route"
            buses_affected = "/get_buses_affected_by_floods"
            critical_segments_near_flood = "/critical-segments"
            unique_flood_events_location = "/unique-flood-events/location"
            bus_stops = "/bus_stops"
            bus_trips = "/bus_trip"
            bus_trip_segments = "/bus_trip_segment"
            flood_events = "/flood_events"
            flood_event_by_id_legacy = "/flood_events/id/"
            car_trips_flooded = "/car_trips_flooded"
            car_trips_dry = "/car_trips_dry"
            road_max_traffic_flow = "/road_max_traffic_flow"
            bus_route = "/bus/route"
            bus_trips_delay = "/bus_trips/delay"

            [fallbacks]
            delay = "/mock/delay_segments.json"
            flooded_roads = "/mock/flooded_roads.json"
            criticality = "/mock/criticality.json"
            bus_impacts = "/mock/bus_impacts.json"
            summary = "/mock/summary.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.static_prefix, "/mock");
        assert!(config.is_static(&config.fallbacks.summary));
        assert!(!config.is_static(&config.paths.summary));
    }
}
