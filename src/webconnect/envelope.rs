//! Unwrapping helpers for the `{"result": {<arbitrary key>: <payload>}}`
//! envelope that every WebConnect endpoint wraps its payload in.

use serde_json::Value;

use crate::prelude::*;

/// Take the payload out of `{"result": {<arbitrary key>: <payload>}}`.
///
/// The intermediate key is the inverter's own device id and is irrelevant to
/// the caller, so the envelope is decoded as a generic map and the single
/// value is taken regardless of its key. Anything other than exactly one
/// entry is a shape error.
pub fn unwrap_result(response: &Value) -> Result<&Value> {
    let result = response.get("result").ok_or_else(|| Error::shape("result", response))?;
    let entries = result.as_object().ok_or_else(|| Error::shape("result", result))?;
    let mut values = entries.values();
    match (values.next(), values.next()) {
        (Some(payload), None) => Ok(payload),
        _ => Err(Error::shape("result", result)),
    }
}

/// Extract the `val` of one data point: `{<key>: {"1": [{"val": <value>}]}}`.
///
/// `"1"` is the channel group the inverter files all its instantaneous
/// readings under.
pub fn data_point<'a>(payload: &'a Value, key: &str) -> Result<&'a Value> {
    let point = payload.get(key).ok_or_else(|| Error::shape(key, payload))?;
    let channel = point.get("1").ok_or_else(|| Error::shape(format!("{key}.1"), point))?;
    let values = channel.as_array().ok_or_else(|| Error::shape(format!("{key}.1"), channel))?;
    let [value] = values.as_slice() else {
        return Err(Error::shape(format!("{key}.1"), channel));
    };
    value.get("val").ok_or_else(|| Error::shape(format!("{key}.1.val"), value))
}

pub fn as_u64(value: &Value, context: &str) -> Result<u64> {
    value.as_u64().ok_or_else(|| Error::shape(context, value))
}

pub fn as_i64(value: &Value, context: &str) -> Result<i64> {
    value.as_i64().ok_or_else(|| Error::shape(context, value))
}

pub fn as_str<'a>(value: &'a Value, context: &str) -> Result<&'a str> {
    value.as_str().ok_or_else(|| Error::shape(context, value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unwrap_result_ignores_intermediate_key() -> Result {
        let response = json!({"result": {"0199-xxxxx385": {"tm": 1_609_459_200}}});
        let payload = unwrap_result(&response)?;
        assert_eq!(payload, &json!({"tm": 1_609_459_200}));
        Ok(())
    }

    #[test]
    fn test_unwrap_result_requires_result_key() {
        let response = json!({"err": 401});
        assert!(matches!(
            unwrap_result(&response),
            Err(Error::UnexpectedShape { context, .. }) if context == "result"
        ));
    }

    #[test]
    fn test_unwrap_result_rejects_multiple_entries() {
        let response = json!({"result": {"a": {}, "b": {}}});
        assert!(matches!(unwrap_result(&response), Err(Error::UnexpectedShape { .. })));
    }

    #[test]
    fn test_unwrap_result_rejects_empty_object() {
        let response = json!({"result": {}});
        assert!(matches!(unwrap_result(&response), Err(Error::UnexpectedShape { .. })));
    }

    #[test]
    fn test_unwrap_result_rejects_non_object_result() {
        let response = json!({"result": [1, 2, 3]});
        assert!(matches!(unwrap_result(&response), Err(Error::UnexpectedShape { .. })));
    }

    #[test]
    fn test_data_point_ok() -> Result {
        let payload = json!({"6400_00260100": {"1": [{"val": 1234}]}});
        let value = data_point(&payload, "6400_00260100")?;
        assert_eq!(as_u64(value, "val")?, 1234);
        Ok(())
    }

    #[test]
    fn test_data_point_missing_key() {
        let payload = json!({"6400_00260100": {"1": [{"val": 1234}]}});
        assert!(matches!(
            data_point(&payload, "6100_0046C200"),
            Err(Error::UnexpectedShape { context, .. }) if context == "6100_0046C200"
        ));
    }

    #[test]
    fn test_data_point_rejects_multi_element_list() {
        let payload = json!({"key": {"1": [{"val": 1}, {"val": 2}]}});
        assert!(matches!(data_point(&payload, "key"), Err(Error::UnexpectedShape { .. })));
    }

    #[test]
    fn test_data_point_requires_val_field() {
        let payload = json!({"key": {"1": [{"value": 1}]}});
        assert!(matches!(
            data_point(&payload, "key"),
            Err(Error::UnexpectedShape { context, .. }) if context == "key.1.val"
        ));
    }
}
