//! Codec trait and implementations for serializing/deserializing bodies.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! Both the HTTP client and the session layer go through a [`Codec`]
//! instead of calling `serde_json` directly, so request bodies and the
//! persisted `user` record are always produced the same way.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` lets a codec live inside long-lived shared
/// state (the HTTP client is shared across async tasks).
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;

    /// Encodes a value as a UTF-8 string.
    ///
    /// Key/value stores only hold strings, so the session layer persists
    /// the user record through this.
    fn encode_str<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes).map_err(|e| {
            ProtocolError::InvalidMessage(format!("encoded body is not UTF-8: {e}"))
        })
    }

    /// Decodes a value from a string.
    fn decode_str<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError> {
        self.decode(data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The auth API only speaks JSON, and the stored `user` record is a JSON
/// string, so this is the only codec the portal needs.
/// It's behind the `json` feature flag (enabled by default).
///
/// ## Example
///
/// ```rust
/// use ema_protocol::{Codec, JsonCodec, LoginRequest};
///
/// let codec = JsonCodec;
/// let request = LoginRequest {
///     email: "estudiante@ema.com".into(),
///     password: "password123".into(),
/// };
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: LoginRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }

    fn encode_str<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode_str<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;
    use crate::{Role, User, UserId};

    fn sample_user() -> User {
        User {
            id: UserId(1),
            email: "estudiante@ema.com".into(),
            role: Role::Student,
            first_name: "María".into(),
            last_name: "González".into(),
            is_first_login: false,
        }
    }

    #[test]
    fn test_encode_str_user_produces_camel_case_json() {
        let json = JsonCodec.encode_str(&sample_user()).unwrap();

        assert!(json.contains(r#""firstName":"María""#));
        assert!(json.contains(r#""isFirstLogin":false"#));
        assert!(json.contains(r#""role":"student""#));
    }

    #[test]
    fn test_decode_str_user_roundtrips_persisted_record() {
        let json = JsonCodec.encode_str(&sample_user()).unwrap();

        let decoded: User = JsonCodec.decode_str(&json).unwrap();

        assert_eq!(decoded, sample_user());
    }

    #[test]
    fn test_decode_malformed_json_returns_decode_error() {
        let result: Result<User, _> = JsonCodec.decode(b"{not json");

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_decode_wrong_shape_returns_decode_error() {
        // Valid JSON, but a string where an object is expected.
        let result: Result<User, _> = JsonCodec.decode_str(r#""just a string""#);

        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }
}
