//! Flood location count normalization.
//!
//! Accepts every shape the `/flood_events/location` endpoint has been seen
//! to return and folds it into one [`FloodLocationCount`] per location:
//!
//! 1. `[{ "location": ..., "count": ..., "latitude": ..., ... }, ...]`
//! 2. `[["Place", 3], ...]`
//! 3. `[{ "Place": 3 }, ...]`
//! 4. any of the above wrapped in `{ "data": [...] }` or
//!    `{ "results": [...] }`
//!
//! The same location may appear more than once (e.g. a flyover reported
//! under two flood events). Duplicates are merged: counts add up, the
//! largest delay wins, and coordinates and road metrics keep the first
//! value seen.

use std::collections::HashMap;

use flood_viz_flood_models::FloodLocationCount;
use serde_json::{Map, Value};

use crate::coerce::{count, finite_number, stringify, strict_number};

/// The shape of one element of a flood location payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowShape<'a> {
    /// An object carrying explicit `location` and `count` fields.
    Object(&'a Map<String, Value>),
    /// A `[location, count, ...]` array.
    Pair {
        /// First element.
        location: &'a Value,
        /// Second element.
        count: &'a Value,
    },
    /// A `{ location: count }` map with a numeric count.
    SingleKey {
        /// The map's only key.
        location: &'a str,
        /// The map's only value.
        count: &'a Value,
    },
    /// Anything else. Skipped by the normalizer.
    Unrecognized,
}

/// Classifies a single payload element.
///
/// Single-key maps only qualify when their value is a number or a numeric
/// string: `{ "Place": "n/a" }` is [`RowShape::Unrecognized`] rather than a
/// zero count.
#[must_use]
pub fn classify_row(item: &Value) -> RowShape<'_> {
    match item {
        Value::Object(map) if map.contains_key("location") && map.contains_key("count") => {
            RowShape::Object(map)
        }
        Value::Array(items) => match items.as_slice() {
            [location, count, ..] => RowShape::Pair { location, count },
            _ => RowShape::Unrecognized,
        },
        Value::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((location, count)) if strict_number(count).is_some() => {
                RowShape::SingleKey { location, count }
            }
            _ => RowShape::Unrecognized,
        },
        _ => RowShape::Unrecognized,
    }
}

/// Extracts a record from a classified element.
fn extract(shape: RowShape<'_>) -> Option<FloodLocationCount> {
    match shape {
        RowShape::Object(map) => {
            let field = |key: &str| map.get(key).and_then(finite_number);
            Some(FloodLocationCount {
                location: map.get("location").map(stringify).unwrap_or_default(),
                count: map.get("count").map_or(0, count),
                time_travel_delay_min: field("time_travel_delay_min"),
                latitude: field("latitude"),
                longitude: field("longitude"),
                road_length: field("road_length"),
                time_20kmh_min: field("time_20kmh_min"),
                time_50kmh_min: field("time_50kmh_min"),
            })
        }
        RowShape::Pair {
            location,
            count: value,
        } => Some(FloodLocationCount::new(stringify(location), count(value))),
        RowShape::SingleKey {
            location,
            count: value,
        } => Some(FloodLocationCount::new(location, count(value))),
        RowShape::Unrecognized => None,
    }
}

/// Accumulates location records, merging rows that share a location.
///
/// Locations are keyed by their whitespace-trimmed name (case-sensitive)
/// and come back out in first-seen order.
#[derive(Debug, Default)]
pub struct LocationMerger {
    index: HashMap<String, usize>,
    records: Vec<FloodLocationCount>,
}

impl LocationMerger {
    /// Creates an empty merger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record or merges it into the existing record for the same
    /// location.
    ///
    /// Returns `false` (and discards the record) when the location is
    /// blank.
    pub fn upsert(&mut self, row: FloodLocationCount) -> bool {
        let key = row.location.trim();
        if key.is_empty() {
            return false;
        }

        if let Some(&i) = self.index.get(key) {
            merge_into(&mut self.records[i], row);
        } else {
            self.index.insert(key.to_owned(), self.records.len());
            self.records.push(row);
        }
        true
    }

    /// Number of distinct locations seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no location has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the merged records in first-seen order.
    #[must_use]
    pub fn into_records(self) -> Vec<FloodLocationCount> {
        self.records
    }
}

fn merge_into(prev: &mut FloodLocationCount, row: FloodLocationCount) {
    prev.count = prev.count.saturating_add(row.count);

    prev.time_travel_delay_min = match (prev.time_travel_delay_min, row.time_travel_delay_min) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    };

    prev.latitude = prev.latitude.or(row.latitude);
    prev.longitude = prev.longitude.or(row.longitude);
    prev.road_length = prev.road_length.or(row.road_length);
    prev.time_20kmh_min = prev.time_20kmh_min.or(row.time_20kmh_min);
    prev.time_50kmh_min = prev.time_50kmh_min.or(row.time_50kmh_min);
}

/// Picks the row array out of a raw payload.
fn source_rows(raw: &Value) -> &[Value] {
    match raw {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => ["data", "results"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    }
}

/// Normalizes a flood location payload of any supported shape.
///
/// Never fails: unsupported elements and blank locations are skipped.
#[must_use]
pub fn normalize_flood_locations(raw: &Value) -> Vec<FloodLocationCount> {
    let rows = source_rows(raw);
    let mut merger = LocationMerger::new();
    let mut skipped = 0_usize;

    for (i, item) in rows.iter().enumerate() {
        let accepted = extract(classify_row(item)).is_some_and(|row| merger.upsert(row));
        if !accepted {
            log::debug!("Skipping flood location row {i}: {item}");
            skipped += 1;
        }
    }

    log::debug!(
        "Normalized {} flood location rows into {} locations ({skipped} skipped)",
        rows.len(),
        merger.len()
    );

    merger.into_records()
}
