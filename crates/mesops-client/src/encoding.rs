//! Body encodings: JSON and protobuf.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Media type of RecordIO framed streams.
pub const RECORDIO_MEDIA_TYPE: &str = "application/recordio";

/// How calls and responses are serialized on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Json,
    Protobuf,
}

impl Encoding {
    /// Value of `Content-Type` and `Accept` for unary calls.
    pub fn media_type(self) -> &'static str {
        match self {
            Encoding::Json => "application/json",
            Encoding::Protobuf => "application/x-protobuf",
        }
    }

    pub fn encode<M>(self, message: &M) -> ClientResult<Bytes>
    where
        M: prost::Message + Serialize,
    {
        match self {
            Encoding::Json => Ok(Bytes::from(serde_json::to_vec(message)?)),
            Encoding::Protobuf => Ok(Bytes::from(message.encode_to_vec())),
        }
    }

    pub fn decode<M>(self, body: &[u8]) -> ClientResult<M>
    where
        M: prost::Message + Default + DeserializeOwned,
    {
        match self {
            Encoding::Json => Ok(serde_json::from_slice(body)?),
            Encoding::Protobuf => Ok(M::decode(body)?),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => f.write_str("json"),
            Encoding::Protobuf => f.write_str("protobuf"),
        }
    }
}

impl FromStr for Encoding {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            "protobuf" | "proto" | "binary" => Ok(Encoding::Protobuf),
            other => Err(ClientError::config(format!("unknown encoding: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesops_proto::master::{Call, WireCall};
    use mesops_proto::OperatorUnion;

    #[test]
    fn test_media_types() {
        assert_eq!(Encoding::Json.media_type(), "application/json");
        assert_eq!(Encoding::Protobuf.media_type(), "application/x-protobuf");
    }

    #[test]
    fn test_encode_json() {
        let body = Encoding::Json.encode(&Call::GetHealth.into_wire()).unwrap();
        assert_eq!(&body[..], br#"{"type":"GET_HEALTH"}"#);
    }

    #[test]
    fn test_encode_decode_protobuf() {
        let body = Encoding::Protobuf
            .encode(&Call::GetVersion.into_wire())
            .unwrap();
        assert_eq!(&body[..], &[0x08, 0x03]);

        let wire: WireCall = Encoding::Protobuf.decode(&body).unwrap();
        assert_eq!(Call::from_wire(wire).unwrap(), Call::GetVersion);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result: ClientResult<WireCall> = Encoding::Json.decode(b"not json");
        assert!(matches!(result, Err(ClientError::Json(_))));
    }

    #[test]
    fn test_parse() {
        assert_eq!("JSON".parse::<Encoding>().unwrap(), Encoding::Json);
        assert_eq!("proto".parse::<Encoding>().unwrap(), Encoding::Protobuf);
        assert!("xml".parse::<Encoding>().is_err());
        assert_eq!(Encoding::Protobuf.to_string(), "protobuf");
    }
}
