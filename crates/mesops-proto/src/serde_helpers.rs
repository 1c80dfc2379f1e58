//! JSON conventions of the Operator API.
//!
//! Enumerations are written as their protocol names and `bytes` fields as
//! standard base64. Decoding accepts either enum names or raw numbers; names
//! this client does not know decode as `0` so that newer servers do not break
//! older clients.

use serde::{Deserialize, Deserializer, Serializer};

use crate::union::ProtoEnum;

/// Either representation of an enumeration value in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumRepr {
    Number(i32),
    Name(String),
}

impl EnumRepr {
    /// Resolves to the raw value of `E`.
    pub fn resolve<E: ProtoEnum>(self) -> i32 {
        match self {
            EnumRepr::Number(value) => value,
            EnumRepr::Name(name) => E::from_str_name(&name).map(Into::into).unwrap_or(0),
        }
    }
}

pub fn serialize_enum<E: ProtoEnum, S: Serializer>(
    value: &i32,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match E::name_of(*value) {
        Some(name) => serializer.serialize_str(name),
        None => serializer.serialize_i32(*value),
    }
}

pub fn deserialize_enum<'de, E: ProtoEnum, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<i32, D::Error> {
    Ok(EnumRepr::deserialize(deserializer)?.resolve::<E>())
}

/// `bytes` fields as base64 strings.
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded.as_bytes()).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    proto_enum! {
        pub enum Color (color) {
            Unknown = 0 => "UNKNOWN",
            Red = 1 => "RED",
            Blue = 2 => "BLUE",
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Paint {
        #[serde(with = "color", default)]
        color: i32,
        #[serde(with = "base64_bytes", default)]
        data: Vec<u8>,
    }

    #[test]
    fn test_enum_written_as_name() {
        let paint = Paint {
            color: Color::Blue as i32,
            data: b"hello".to_vec(),
        };
        let json = serde_json::to_value(&paint).unwrap();
        assert_eq!(json, serde_json::json!({"color": "BLUE", "data": "aGVsbG8="}));
    }

    #[test]
    fn test_enum_accepts_name_number_and_unknown() {
        let by_name: Paint = serde_json::from_str(r#"{"color":"RED"}"#).unwrap();
        assert_eq!(by_name.color, 1);

        let by_number: Paint = serde_json::from_str(r#"{"color":2}"#).unwrap();
        assert_eq!(by_number.color, 2);

        let newer: Paint = serde_json::from_str(r#"{"color":"GREEN"}"#).unwrap();
        assert_eq!(newer.color, 0);
    }

    #[test]
    fn test_unknown_number_written_as_number() {
        let paint = Paint {
            color: 9,
            data: Vec::new(),
        };
        let json = serde_json::to_value(&paint).unwrap();
        assert_eq!(json["color"], 9);
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result: Result<Paint, _> = serde_json::from_str(r#"{"data":"***"}"#);
        assert!(result.is_err());
    }
}
