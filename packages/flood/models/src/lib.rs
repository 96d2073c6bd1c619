#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical records for the flood-impact dashboard.
//!
//! The backend reports flood locations, flood events and critical road
//! segments in several loosely-typed shapes. Everything the dashboard
//! renders is first converted into the types defined here, which keep the
//! backend's snake_case field names on the wire.

use serde::{Deserialize, Serialize};

/// Placeholder used for critical road segments the backend sends without a
/// usable name.
pub const UNNAMED_ROAD: &str = "Unnamed Road";

/// A flood-impacted location with aggregate travel-delay statistics.
///
/// Produced by merging every backend row that names the same location, so
/// there is at most one record per location in a normalized result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodLocationCount {
    /// Location name or identifier (bus stop code, road, landmark).
    pub location: String,
    /// Number of flood events observed at this location.
    pub count: u64,
    /// Largest travel delay observed across merged rows, in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_travel_delay_min: Option<f64>,
    /// Latitude (WGS84).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Length of the affected road in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_length: Option<f64>,
    /// Minutes to traverse the road at 20 km/h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_20kmh_min: Option<f64>,
    /// Minutes to traverse the road at 50 km/h.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_50kmh_min: Option<f64>,
}

impl FloodLocationCount {
    /// Creates a record with only a location and a count.
    #[must_use]
    pub fn new(location: impl Into<String>, count: u64) -> Self {
        Self {
            location: location.into(),
            count,
            time_travel_delay_min: None,
            latitude: None,
            longitude: None,
            road_length: None,
            time_20kmh_min: None,
            time_50kmh_min: None,
        }
    }
}

/// One flood event per flooded location, with its travel delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueFloodEvent {
    /// Backend flood event ID.
    pub flood_id: i64,
    /// Human-readable flooded location.
    pub flooded_location: String,
    /// Latitude (WGS84).
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude (WGS84).
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Travel delay caused by the flood, in minutes.
    #[serde(default)]
    pub time_travel_delay_min: Option<f64>,
}

/// A `LineString` in SVY21 (EPSG:3414) projected coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Svy21LineString {
    /// Geometry type, always `"LineString"`.
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// `[x, y]` pairs in meters. Ordinates the backend could not compute
    /// arrive as `NaN` and are kept as `None`.
    pub coordinates: Vec<[Option<f64>; 2]>,
}

/// A `Point` in WGS84 (EPSG:4326).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wgs84Point {
    /// Geometry type, always `"Point"`.
    #[serde(rename = "type")]
    pub geometry_type: String,
    /// `[longitude, latitude]`.
    pub coordinates: [Option<f64>; 2],
}

/// An OSM way attribute that is a single value for plain ways and a list
/// for ways the network simplification merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single value.
    One(String),
    /// Values of every merged way, in way order.
    Many(Vec<String>),
}

impl OneOrMany {
    /// The first value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Iterates over every value.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        };
        values.iter().map(String::as_str)
    }
}

/// A road segment ranked by network centrality near a flood.
///
/// Every optional field is decoded leniently: a value of an unexpected
/// shape is dropped instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalSegment {
    /// Road name. Never blank once the response has been post-processed.
    pub road_name: String,
    /// OSM highway class (e.g. `"primary"`, `["residential", "unclassified"]`).
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub road_type: Option<OneOrMany>,
    /// Segment length in meters.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub length_m: Option<f64>,
    /// Centrality score used for ranking.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub centrality_score: Option<f64>,
    /// Segment geometry straight from the backend.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub geometry: Option<Svy21LineString>,
}

/// Critical road segments within a buffer around a flood point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalSegmentsNearFloodResponse {
    /// Flood event the query was made for.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub flood_id: Option<i64>,
    /// Search radius in meters.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub buffer_m: Option<f64>,
    /// Location of the flood.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub flood_point: Option<Wgs84Point>,
    /// Number of segments the backend reported.
    #[serde(default, deserialize_with = "tolerant::or_none")]
    pub count_critical_segments: Option<u64>,
    /// The segments themselves. Entries that do not decode are skipped.
    #[serde(default, deserialize_with = "tolerant::each_or_skip")]
    pub critical_segments: Vec<CriticalSegment>,
}

mod tolerant {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize as _, Deserializer};
    use serde_json::Value;

    pub fn or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub fn each_or_skip<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        })
    }
}
