//! Response body shapes shared by every endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Success body: the payload under `data`, plus an optional server message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T: DeserializeOwned> ApiEnvelope<T> {
    /// Decode a success body.
    ///
    /// Some endpoints answer with the bare payload instead of an envelope, so
    /// both shapes are accepted. The envelope error is reported when neither
    /// parses.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        match serde_json::from_slice::<ApiEnvelope<T>>(body) {
            Ok(envelope) => Ok(envelope),
            Err(envelope_err) => serde_json::from_slice::<T>(body)
                .map(|data| ApiEnvelope {
                    data,
                    message: None,
                })
                .map_err(|_| envelope_err),
        }
    }
}

/// Acknowledgement body for endpoints that only return a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body: servers use either `message` or `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message from an error response body.
    ///
    /// Falls back to the raw text when the body is not JSON.
    pub fn message_from(body: &[u8]) -> String {
        if let Ok(parsed) = serde_json::from_slice::<ErrorBody>(body) {
            if let Some(msg) = [parsed.message, parsed.error]
                .into_iter()
                .flatten()
                .find(|m| !m.trim().is_empty())
            {
                return msg;
            }
        }
        String::from_utf8_lossy(body).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Plan;

    #[test]
    fn test_decode_envelope_and_bare_payload() {
        let wrapped: ApiEnvelope<Vec<String>> =
            ApiEnvelope::decode(br#"{"data":["a","b"],"message":"ok"}"#).unwrap();
        assert_eq!(wrapped.data, vec!["a", "b"]);
        assert_eq!(wrapped.message.as_deref(), Some("ok"));

        let bare: ApiEnvelope<Vec<String>> = ApiEnvelope::decode(br#"["c"]"#).unwrap();
        assert_eq!(bare.data, vec!["c"]);
        assert!(bare.message.is_none());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(ApiEnvelope::<Vec<Plan>>::decode(b"<html>").is_err());
        assert!(ApiEnvelope::<Vec<Plan>>::decode(br#"{"data":42}"#).is_err());
    }

    #[test]
    fn test_error_message_from() {
        assert_eq!(
            ErrorBody::message_from(br#"{"message":"Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(
            ErrorBody::message_from(br#"{"error":"Token expired"}"#),
            "Token expired"
        );
        assert_eq!(
            ErrorBody::message_from(br#"{"message":"","error":"fallback"}"#),
            "fallback"
        );
        assert_eq!(ErrorBody::message_from(b"Bad Gateway\n"), "Bad Gateway");
    }
}
