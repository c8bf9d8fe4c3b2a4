//! Shared utilities for the testnet workspace.

use serde_json::Value;

/// Converts a JSON number or numeric string to f64.
///
/// Binance encodes most decimals as strings (`"100.00000000"`), while a few
/// fields (`leverage` on some endpoints, timestamps) arrive as numbers.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Reads `key` from a JSON object as f64, `None` when absent or not numeric.
pub fn field_f64(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(value_to_f64)
}

/// Reads `key` from a JSON object as a string, accepting numbers too
/// (order ids are numbers, client order ids are strings).
pub fn field_string(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_f64_accepts_strings_and_numbers() {
        assert_eq!(value_to_f64(&json!("100.50000000")), Some(100.5));
        assert_eq!(value_to_f64(&json!(20)), Some(20.0));
        assert_eq!(value_to_f64(&json!("abc")), None);
        assert_eq!(value_to_f64(&Value::Null), None);
    }

    #[test]
    fn test_field_helpers() {
        let obj = json!({"orderId": 22542179, "clientOrderId": "abc", "price": "0.1"});
        assert_eq!(field_string(&obj, "orderId").as_deref(), Some("22542179"));
        assert_eq!(field_string(&obj, "clientOrderId").as_deref(), Some("abc"));
        assert_eq!(field_f64(&obj, "price"), Some(0.1));
        assert_eq!(field_f64(&obj, "missing"), None);
    }
}
