//! Tolerant handling of almost-JSON responses.
//!
//! The critical-segments endpoint serializes missing floats as bare `NaN`,
//! which no JSON parser accepts, and leaves unnamed roads as `null` or
//! blank strings.

use std::borrow::Cow;
use std::sync::LazyLock;

use flood_viz_flood_models::UNNAMED_ROAD;
use regex::Regex;
use serde_json::Value;

/// Regex matching `NaN` as a whole word.
static NAN_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bNaN\b").expect("valid regex"));

/// Replaces every standalone `NaN` token with `null`.
///
/// Tokens that are part of a longer word (`NaNa`, `isNaN`) are left alone.
#[must_use]
pub fn sanitize_nan_tokens(text: &str) -> Cow<'_, str> {
    NAN_TOKEN_RE.replace_all(text, "null")
}

/// Parses JSON text after [`sanitize_nan_tokens`].
///
/// # Errors
///
/// Returns [`serde_json::Error`] if the sanitized text is still not valid
/// JSON.
pub fn parse_lenient(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(&sanitize_nan_tokens(text))
}

/// Gives every entry of a `critical_segments` array a usable `road_name`.
///
/// Missing, non-string, empty and whitespace-only names become
/// [`UNNAMED_ROAD`]. Entries that are not objects are replaced by an
/// object holding only the placeholder name. Payloads without a
/// `critical_segments` array are left untouched.
///
/// Returns the number of entries that were patched.
pub fn fill_missing_road_names(payload: &mut Value) -> usize {
    let Some(segments) = payload
        .get_mut("critical_segments")
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let mut patched = 0;
    for segment in segments.iter_mut() {
        let named = segment
            .get("road_name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.trim().is_empty());
        if named {
            continue;
        }

        let placeholder = Value::String(UNNAMED_ROAD.to_owned());
        match segment {
            Value::Object(map) => {
                map.insert("road_name".to_owned(), placeholder);
            }
            other => *other = serde_json::json!({ "road_name": placeholder }),
        }
        patched += 1;
    }

    patched
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn replaces_standalone_nan_tokens() {
        let text = r#"{"a": NaN, "b": [1, NaN], "c": -1}"#;
        assert_eq!(
            sanitize_nan_tokens(text),
            r#"{"a": null, "b": [1, null], "c": -1}"#
        );
    }

    #[test]
    fn leaves_embedded_nan_alone() {
        let text = r#"{"name": "NaNa Road", "isNaN": 1}"#;
        assert!(matches!(sanitize_nan_tokens(text), Cow::Borrowed(_)));
    }

    #[test]
    fn parses_after_sanitizing() {
        let value = parse_lenient(r#"{"critical_segments": [{"length_m": NaN}]}"#).unwrap();
        assert_eq!(value["critical_segments"][0]["length_m"], Value::Null);
    }

    #[test]
    fn still_rejects_broken_json() {
        assert!(parse_lenient(r#"{"critical_segments": [NaN"#).is_err());
        assert!(parse_lenient("Infinity").is_err());
    }

    #[test]
    fn fills_blank_and_missing_road_names() {
        let mut payload = json!({
            "critical_segments": [
                {"road_name": "Pan-Island Expressway"},
                {"road_name": "   "},
                {"road_name": null},
                {"length_m": 12.5},
                {"road_name": 42},
                "garbage"
            ]
        });
        assert_eq!(fill_missing_road_names(&mut payload), 5);

        let names: Vec<&str> = payload["critical_segments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["road_name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec![
                "Pan-Island Expressway",
                UNNAMED_ROAD,
                UNNAMED_ROAD,
                UNNAMED_ROAD,
                UNNAMED_ROAD,
                UNNAMED_ROAD
            ]
        );
        assert_eq!(payload["critical_segments"][3]["length_m"], json!(12.5));
    }

    #[test]
    fn ignores_payloads_without_segments() {
        let mut payload = json!({"flood_id": 1, "critical_segments": null});
        assert_eq!(fill_missing_road_names(&mut payload), 0);
        assert_eq!(payload, json!({"flood_id": 1, "critical_segments": null}));

        let mut array = json!([{"road_name": ""}]);
        assert_eq!(fill_missing_road_names(&mut array), 0);
    }
}
