//! Scalar wire representation.
//!
//! A leaf value must survive storage in a string-only store. Strings are
//! stored verbatim; every other JSON value is wrapped as
//! `{"__enc": value}` and serialized, so that numbers, booleans, null,
//! arrays and objects can be told apart from the strings that spell them.
//! An optional [`Encoder`] transform runs after wrapping on the way in and
//! before interpretation on the way out.

use serde_json::Value;

use deepstore_kv::{Encoder, KvResult};

/// Reserved wrapper key for non-string scalars. Protocol constant; must
/// match across implementations.
pub const ENC_KEY: &str = "__enc";

/// Encode a leaf value into its stored string form.
pub fn encode_value(value: &Value, encoder: Option<&dyn Encoder>) -> KvResult<String> {
    let mut data = match value {
        Value::String(s) => s.clone(),
        other => {
            let mut wrapper = serde_json::Map::new();
            wrapper.insert(ENC_KEY.to_string(), other.clone());
            Value::Object(wrapper).to_string()
        }
    };
    if let Some(encoder) = encoder {
        data = encoder.encode(&data)?;
    }
    Ok(data)
}

/// Decode a stored string back into a leaf value.
///
/// Anything that does not look like a JSON object is a plain string. A
/// failed parse, or a parsed object without the wrapper key, degrades to
/// the raw string rather than failing the read: one corrupt value must
/// not block access to the rest.
pub fn decode_value(raw: &str, encoder: Option<&dyn Encoder>) -> KvResult<Value> {
    let data = match encoder {
        Some(encoder) => encoder.decode(raw)?,
        None => raw.to_string(),
    };
    if !data.starts_with('{') {
        return Ok(Value::String(data));
    }
    if let Ok(Value::Object(mut map)) = serde_json::from_str::<Value>(&data) {
        if let Some(inner) = map.remove(ENC_KEY) {
            return Ok(inner);
        }
    }
    Ok(Value::String(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepstore_kv::KvError;
    use serde_json::json;

    /// Wraps values in a visible sentinel so tests can tell encoded and
    /// plain storage apart.
    struct SentinelEncoder;

    impl Encoder for SentinelEncoder {
        fn encode(&self, value: &str) -> KvResult<String> {
            Ok(format!("<<{value}>>"))
        }

        fn decode(&self, data: &str) -> KvResult<String> {
            data.strip_prefix("<<")
                .and_then(|rest| rest.strip_suffix(">>"))
                .map(str::to_string)
                .ok_or_else(|| KvError::Encoding("missing sentinel".into()))
        }
    }

    // -----------------------------------------------------------------------
    // Encoding
    // -----------------------------------------------------------------------

    #[test]
    fn strings_pass_through_unwrapped() {
        assert_eq!(encode_value(&json!("plain"), None).unwrap(), "plain");
    }

    #[test]
    fn numbers_are_wrapped() {
        assert_eq!(encode_value(&json!(123), None).unwrap(), r#"{"__enc":123}"#);
    }

    #[test]
    fn null_is_wrapped() {
        assert_eq!(encode_value(&json!(null), None).unwrap(), r#"{"__enc":null}"#);
    }

    #[test]
    fn arrays_are_wrapped() {
        assert_eq!(
            encode_value(&json!([1, 2]), None).unwrap(),
            r#"{"__enc":[1,2]}"#
        );
    }

    // -----------------------------------------------------------------------
    // Decoding
    // -----------------------------------------------------------------------

    #[test]
    fn plain_string_decodes_as_itself() {
        assert_eq!(decode_value("hello", None).unwrap(), json!("hello"));
    }

    #[test]
    fn wrapped_values_decode() {
        assert_eq!(decode_value(r#"{"__enc":123}"#, None).unwrap(), json!(123));
        assert_eq!(
            decode_value(r#"{"__enc":false}"#, None).unwrap(),
            json!(false)
        );
        assert_eq!(decode_value(r#"{"__enc":null}"#, None).unwrap(), json!(null));
    }

    #[test]
    fn malformed_json_degrades_to_raw_string() {
        assert_eq!(
            decode_value("{not json", None).unwrap(),
            json!("{not json")
        );
    }

    #[test]
    fn object_without_wrapper_key_degrades_to_raw_string() {
        assert_eq!(
            decode_value(r#"{"a":1}"#, None).unwrap(),
            json!(r#"{"a":1}"#)
        );
    }

    // -----------------------------------------------------------------------
    // Round trips
    // -----------------------------------------------------------------------

    #[test]
    fn round_trip_all_scalar_kinds() {
        for value in [
            json!("text"),
            json!(0),
            json!(-1.5),
            json!(true),
            json!(null),
            json!([1, "a", null]),
            json!({"nested": {"deep": 1}}),
        ] {
            let encoded = encode_value(&value, None).unwrap();
            assert_eq!(decode_value(&encoded, None).unwrap(), value);
        }
    }

    #[test]
    fn round_trip_through_encoder() {
        let enc = SentinelEncoder;
        let value = json!(42);
        let encoded = encode_value(&value, Some(&enc)).unwrap();
        assert_eq!(encoded, r#"<<{"__enc":42}>>"#);
        assert_eq!(decode_value(&encoded, Some(&enc)).unwrap(), value);
    }

    #[test]
    fn encoder_decode_failure_propagates() {
        let enc = SentinelEncoder;
        let err = decode_value("no sentinel here", Some(&enc)).unwrap_err();
        assert!(matches!(err, KvError::Encoding(_)));
    }
}
