#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalization of flood dashboard backend responses.
//!
//! The backend is loosely typed: the same endpoint may answer with a bare
//! array, a `{ "data": [...] }` envelope, rows of objects, rows of
//! `[name, count]` pairs or `{ name: count }` maps, and some endpoints emit
//! bare `NaN` tokens that are not valid JSON. This crate turns all of that
//! into the canonical records of [`flood_viz_flood_models`].
//!
//! Normalization never fails. Rows that cannot be interpreted are dropped
//! (and logged at `debug` level) so that a few bad rows never take down a
//! whole map layer.

pub mod coerce;
pub mod lenient;
pub mod locations;

pub use lenient::{fill_missing_road_names, parse_lenient, sanitize_nan_tokens};
pub use locations::{LocationMerger, RowShape, classify_row, normalize_flood_locations};
