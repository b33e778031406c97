//! Shipped [`Encoder`] implementations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{KvError, KvResult};
use crate::traits::Encoder;

/// Base64 encoder, standard alphabet with padding.
///
/// Not a security measure; it exists to exercise the encoder seam end to
/// end and to keep arbitrary value bytes safe for stores that mangle
/// non-ASCII payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Encoder;

impl Encoder for Base64Encoder {
    fn encode(&self, value: &str) -> KvResult<String> {
        Ok(STANDARD.encode(value.as_bytes()))
    }

    fn decode(&self, data: &str) -> KvResult<String> {
        let bytes = STANDARD
            .decode(data)
            .map_err(|e| KvError::Encoding(format!("invalid base64: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| KvError::Encoding(format!("decoded payload is not UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let enc = Base64Encoder;
        let encoded = enc.encode("hello world").unwrap();
        assert_ne!(encoded, "hello world");
        assert_eq!(enc.decode(&encoded).unwrap(), "hello world");
    }

    #[test]
    fn round_trip_json_payload() {
        let enc = Base64Encoder;
        let payload = r#"{"__enc":{"a":[1,2,3]}}"#;
        assert_eq!(enc.decode(&enc.encode(payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn decode_rejects_garbage() {
        let enc = Base64Encoder;
        let err = enc.decode("not base64 at all!!!").unwrap_err();
        assert!(matches!(err, KvError::Encoding(_)));
    }
}
