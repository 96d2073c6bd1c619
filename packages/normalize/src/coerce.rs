//! Loose scalar coercion for backend JSON values.
//!
//! Backend rows carry numbers as numbers, numeric strings, or not at all.
//! These helpers follow the usual "number-ish" rules: numeric strings are
//! parsed, blank strings count as zero, booleans are `1`/`0`, and anything
//! else is treated as missing.

use serde_json::{Number, Value};

/// Coerces a JSON value to a finite number.
///
/// Returns `None` for `null`, arrays, objects, unparseable strings and
/// non-finite results.
#[must_use]
pub fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Like [`finite_number`], but only accepts actual numbers and non-blank
/// numeric strings.
#[must_use]
pub fn strict_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(_) => finite_number(value),
        Value::String(s) if !s.trim().is_empty() => finite_number(value),
        _ => None,
    }
}

/// Coerces a JSON value to an event count.
///
/// Missing or invalid values count as zero. Negative values clamp to zero
/// and fractions are truncated.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count(value: &Value) -> u64 {
    finite_number(value).map_or(0, |n| n.max(0.0).trunc() as u64)
}

/// Renders a JSON value as a location name.
///
/// Strings are taken verbatim. Integral numbers render without a fractional
/// part so that a bus stop code sent as `21229` matches one sent as
/// `"21229"`.
#[must_use]
pub fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => number_to_string(n),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_owned(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    // f64's Display drops a zero fraction (`3.0` renders as `3`)
    n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerces_numbers_and_numeric_strings() {
        assert_eq!(finite_number(&json!(4.5)), Some(4.5));
        assert_eq!(finite_number(&json!(" 12 ")), Some(12.0));
        assert_eq!(finite_number(&json!("")), Some(0.0));
        assert_eq!(finite_number(&json!(true)), Some(1.0));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(finite_number(&json!(null)), None);
        assert_eq!(finite_number(&json!("abc")), None);
        assert_eq!(finite_number(&json!("NaN")), None);
        assert_eq!(finite_number(&json!("inf")), None);
        assert_eq!(finite_number(&json!([1])), None);
        assert_eq!(finite_number(&json!({"a": 1})), None);
    }

    #[test]
    fn strict_number_rejects_blank_and_bool() {
        assert_eq!(strict_number(&json!("")), None);
        assert_eq!(strict_number(&json!(false)), None);
        assert_eq!(strict_number(&json!("7")), Some(7.0));
    }

    #[test]
    fn counts_clamp_and_truncate() {
        assert_eq!(count(&json!(3)), 3);
        assert_eq!(count(&json!(3.9)), 3);
        assert_eq!(count(&json!(-2)), 0);
        assert_eq!(count(&json!("x")), 0);
        assert_eq!(count(&json!(null)), 0);
    }

    #[test]
    fn stringifies_like_a_location_name() {
        assert_eq!(stringify(&json!("Yishun MRT")), "Yishun MRT");
        assert_eq!(stringify(&json!(21229)), "21229");
        assert_eq!(stringify(&json!(3.0)), "3");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(null)), "null");
        assert_eq!(stringify(&json!(["a", null, 2])), "a,,2");
    }
}
