//! Lenient deserializers for dashboard form input
//!
//! The campaign form posts whatever the user typed in the reel-count box.
//! Anything that is not a usable number becomes 0, which the pricing
//! engine treats as "no estimate".

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a reel count from a number, a numeric string, null or junk
pub fn lenient_reels<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(reels_from_value).unwrap_or(0))
}

/// Interpret a JSON value as a reel count.
///
/// Fractions are truncated toward zero; non-finite or non-numeric input
/// yields 0.
pub fn reels_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate_reels))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(truncate_reels))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn truncate_reels(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "lenient_reels")]
        expected_reels: i64,
    }

    fn parse(body: Value) -> i64 {
        serde_json::from_value::<Form>(body).unwrap().expected_reels
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(parse(json!({ "expected_reels": 100 })), 100);
        assert_eq!(parse(json!({ "expected_reels": -5 })), -5);
        assert_eq!(parse(json!({ "expected_reels": 12.9 })), 12);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(parse(json!({ "expected_reels": " 40 " })), 40);
        assert_eq!(parse(json!({ "expected_reels": "7.5" })), 7);
    }

    #[test]
    fn test_junk_is_zero() {
        assert_eq!(parse(json!({ "expected_reels": "lots" })), 0);
        assert_eq!(parse(json!({ "expected_reels": null })), 0);
        assert_eq!(parse(json!({ "expected_reels": true })), 0);
        assert_eq!(parse(json!({ "expected_reels": [1, 2] })), 0);
        assert_eq!(parse(json!({})), 0);
    }
}
