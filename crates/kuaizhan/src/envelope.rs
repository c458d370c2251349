//! The `{code, msg, data}` wrapper every Kuaizhan endpoint responds with.

use crate::error::KuaizhanError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Envelope code signalling success.
pub const SUCCESS_CODE: i64 = 200;

/// Response envelope.
///
/// `code` is required; `msg` and `data` default when absent or `null`.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
    #[serde(default)]
    pub data: Option<Box<RawValue>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Envelope {
    /// Parse an envelope from a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Returns true if `code == 200`.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Extract the payload, or the application error the envelope carries.
    pub fn into_payload(self) -> Result<Payload, KuaizhanError> {
        if self.is_success() {
            Ok(Payload { raw: self.data })
        } else {
            Err(KuaizhanError::Application {
                code: self.code,
                msg: self.msg,
            })
        }
    }
}

/// The undecoded `data` field of a successful envelope.
#[derive(Debug, Clone)]
pub struct Payload {
    raw: Option<Box<RawValue>>,
}

impl Payload {
    /// Raw JSON text of `data`. Absent or `null` data reads as `null`.
    pub fn get(&self) -> &str {
        self.raw.as_deref().map_or("null", RawValue::get)
    }

    /// Returns true if `data` was absent or `null`.
    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    /// Decode `data` into a concrete shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_keeps_raw_data() {
        let envelope =
            Envelope::from_slice(br#"{"code":200,"msg":"ok","data":{"domain":"abc"}}"#).unwrap();
        assert!(envelope.is_success());

        let payload = envelope.into_payload().unwrap();
        assert_eq!(payload.get(), r#"{"domain":"abc"}"#);
        assert!(!payload.is_null());
    }

    #[test]
    fn test_error_envelope() {
        let envelope =
            Envelope::from_slice(br#"{"code":403,"msg":"forbidden","data":null}"#).unwrap();

        match envelope.into_payload() {
            Err(KuaizhanError::Application { code, msg }) => {
                assert_eq!(code, 403);
                assert_eq!(msg, "forbidden");
            }
            other => panic!("expected application error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_envelope_with_null_or_missing_msg() {
        for body in [
            &br#"{"code":403,"msg":null,"data":null}"#[..],
            &br#"{"code":403}"#[..],
        ] {
            match Envelope::from_slice(body).unwrap().into_payload() {
                Err(KuaizhanError::Application { code, msg }) => {
                    assert_eq!(code, 403);
                    assert_eq!(msg, "");
                }
                other => panic!("expected application error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_null_and_missing_data() {
        let null = Envelope::from_slice(br#"{"code":200,"msg":"ok","data":null}"#)
            .unwrap()
            .into_payload()
            .unwrap();
        assert!(null.is_null());
        assert_eq!(null.get(), "null");

        let missing = Envelope::from_slice(br#"{"code":200}"#)
            .unwrap()
            .into_payload()
            .unwrap();
        assert!(missing.is_null());
    }

    #[test]
    fn test_missing_code_is_rejected() {
        assert!(Envelope::from_slice(br#"{"msg":"ok","data":{}}"#).is_err());
    }

    #[test]
    fn test_not_json_is_rejected() {
        assert!(Envelope::from_slice(b"<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_payload_decode() {
        #[derive(Deserialize)]
        struct Domain {
            domain: String,
        }

        let payload = Envelope::from_slice(br#"{"code":200,"data":{"domain":"abc"}}"#)
            .unwrap()
            .into_payload()
            .unwrap();
        let decoded: Domain = payload.decode().unwrap();
        assert_eq!(decoded.domain, "abc");
    }
}
