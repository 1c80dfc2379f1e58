//! Tagged unions and protocol enumerations.
//!
//! Every Operator API message that can hold one of several payloads is sent
//! as a struct with a `type` field and one optional field per payload. The
//! typed side of such a message is a Rust enum; [`OperatorUnion`] converts
//! between the two and validates the wire form on the way in.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::UnionError;

/// An `i32`-backed protocol enumeration with stable names.
pub trait ProtoEnum: Copy + Debug + Into<i32> + TryFrom<i32> + 'static {
    /// The protocol name, e.g. `GET_HEALTH`.
    fn as_str_name(&self) -> &'static str;

    /// Parses a protocol name.
    fn from_str_name(name: &str) -> Option<Self>;

    /// Protocol name for a raw value, if the value is known.
    fn name_of(value: i32) -> Option<&'static str> {
        Self::try_from(value).ok().map(|v| v.as_str_name())
    }
}

/// Conversion between a typed union and its wire struct.
pub trait OperatorUnion: Sized + Send + 'static {
    /// The enumeration carried in the `type` field.
    type Kind: ProtoEnum;

    /// The wire struct, encodable as protobuf and JSON.
    type Wire: prost::Message + Default + Serialize + DeserializeOwned + Send + 'static;

    /// Name used in error messages.
    const NAME: &'static str;

    /// Tag of the populated variant.
    fn kind(&self) -> Self::Kind;

    /// Converts into the wire struct. Never fails.
    fn into_wire(self) -> Self::Wire;

    /// Validates a wire struct and converts it into the typed union.
    fn from_wire(wire: Self::Wire) -> Result<Self, UnionError>;
}

/// Declares an `i32` protocol enumeration.
///
/// The optional module name generates a serde `with` module that writes the
/// protocol name and accepts either the name or the number.
macro_rules! proto_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident $( ( $module:ident ) )? {
            $( $(#[$vmeta:meta])* $variant:ident = $value:tt => $wire:tt, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $crate::union::ProtoEnum for $name {
            fn as_str_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            fn from_str_name(name: &str) -> Option<Self> {
                match name {
                    $( $wire => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::union::ProtoEnum::as_str_name(self))
            }
        }

        $(
            #[doc = concat!("Serde helpers for `i32` fields holding a [`", stringify!($name), "`].")]
            pub mod $module {
                pub fn serialize<S: ::serde::Serializer>(value: &i32, serializer: S) -> Result<S::Ok, S::Error> {
                    $crate::serde_helpers::serialize_enum::<super::$name, S>(value, serializer)
                }

                pub fn deserialize<'de, D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
                    $crate::serde_helpers::deserialize_enum::<super::$name, D>(deserializer)
                }
            }
        )?
    };
}

/// Arm body of `from_wire` for one variant.
macro_rules! union_variant {
    ($wire:ident, $populated:ident, $union:expr, $kind:expr, $name:ident :: $variant:ident) => {{
        if $populated != 0 {
            return Err($crate::error::UnionError::UnexpectedPayload {
                union: $union,
                kind: $kind,
            });
        }
        Ok($name::$variant)
    }};
    ($wire:ident, $populated:ident, $union:expr, $kind:expr, $name:ident :: $variant:ident, $field:ident) => {{
        match $wire.$field {
            Some(payload) if $populated == 1 => Ok($name::$variant(payload)),
            Some(_) => Err($crate::error::UnionError::UnexpectedPayload {
                union: $union,
                kind: $kind,
            }),
            None => Err($crate::error::UnionError::MissingPayload {
                union: $union,
                kind: $kind,
            }),
        }
    }};
}

/// Declares a typed union, its `type` enumeration and its wire struct.
///
/// ```text
/// tagged_union! {
///     pub enum Call { kind: CallType, wire: WireCall }
///     GetHealth = 1 => "GET_HEALTH";
///     ListFiles = 7 => "LIST_FILES" { list_files: ListFiles = "4" };
/// }
/// ```
///
/// The wire struct keeps the `type` field at tag 1 and each payload at the
/// given tag. Its JSON form is `{"type": "NAME", "<field>": {...}}`.
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { kind: $kind:ident, wire: $wire:ident }
        $(
            $(#[$vmeta:meta])*
            $variant:ident = $code:tt => $wire_name:tt $( { $field:ident : $payload:ty = $tag:tt } )? ;
        )+
    ) => {
        proto_enum! {
            #[doc = concat!("Value of the `type` field of [`", stringify!($name), "`].")]
            pub enum $kind {
                Unknown = 0 => "UNKNOWN",
                $( $variant = $code => $wire_name, )+
            }
        }

        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant $( ($payload) )?, )+
        }

        #[doc = concat!("Wire form of [`", stringify!($name), "`].")]
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct $wire {
            #[prost(int32, tag = "1")]
            pub r#type: i32,
            $( $(
                #[prost(message, optional, tag = $tag)]
                pub $field: Option<$payload>,
            )? )+
        }

        impl $wire {
            fn populated(&self) -> usize {
                0 $( $( + usize::from(self.$field.is_some()) )? )+
            }
        }

        impl ::serde::Serialize for $wire {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ::serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                match <$kind as $crate::union::ProtoEnum>::name_of(self.r#type) {
                    Some(name) => map.serialize_entry("type", name)?,
                    None => map.serialize_entry("type", &self.r#type)?,
                }
                $( $(
                    if let Some(value) = &self.$field {
                        map.serialize_entry(stringify!($field), value)?;
                    }
                )? )+
                map.end()
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $wire {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct WireVisitor;

                impl<'de> ::serde::de::Visitor<'de> for WireVisitor {
                    type Value = $wire;

                    fn expecting(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                        f.write_str(concat!("a ", stringify!($name), " object"))
                    }

                    fn visit_map<A: ::serde::de::MapAccess<'de>>(self, mut map: A) -> Result<$wire, A::Error> {
                        let mut wire = <$wire>::default();
                        while let Some(key) = map.next_key::<String>()? {
                            if key == "type" {
                                let raw = map.next_value::<$crate::serde_helpers::EnumRepr>()?;
                                wire.r#type = raw.resolve::<$kind>();
                                continue;
                            }
                            $( $(
                                if key == stringify!($field) {
                                    wire.$field = map.next_value()?;
                                    continue;
                                }
                            )? )+
                            map.next_value::<::serde::de::IgnoredAny>()?;
                        }
                        Ok(wire)
                    }
                }

                deserializer.deserialize_map(WireVisitor)
            }
        }

        impl $name {
            /// Tag of the populated variant.
            pub fn kind(&self) -> $kind {
                match self {
                    $( $name::$variant { .. } => $kind::$variant, )+
                }
            }
        }

        impl $crate::union::OperatorUnion for $name {
            type Kind = $kind;
            type Wire = $wire;

            const NAME: &'static str = stringify!($name);

            fn kind(&self) -> $kind {
                $name::kind(self)
            }

            #[allow(unused_mut)]
            fn into_wire(self) -> $wire {
                let mut wire = <$wire>::default();
                wire.r#type = i32::from(self.kind());
                match self {
                    $( $name::$variant $( ($field) )? => {
                        $( wire.$field = Some($field); )?
                    } )+
                }
                wire
            }

            fn from_wire(wire: $wire) -> Result<Self, $crate::error::UnionError> {
                let populated = wire.populated();
                let kind = match <$kind>::try_from(wire.r#type) {
                    Ok(kind) if kind != $kind::Unknown => kind,
                    _ => {
                        return Err($crate::error::UnionError::UnknownType {
                            union: stringify!($name),
                            value: wire.r#type,
                        })
                    }
                };
                match kind {
                    $( $kind::$variant => union_variant!(
                        wire, populated, stringify!($name), $wire_name, $name::$variant $(, $field)?
                    ), )+
                    $kind::Unknown => Err($crate::error::UnionError::UnknownType {
                        union: stringify!($name),
                        value: 0,
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[derive(Clone, PartialEq, Message, serde::Serialize, serde::Deserialize)]
    pub struct Ping {
        #[prost(string, tag = "1")]
        #[serde(default)]
        pub note: String,
    }

    #[derive(Clone, PartialEq, Message, serde::Serialize, serde::Deserialize)]
    pub struct Pong {
        #[prost(uint32, tag = "1")]
        #[serde(default)]
        pub count: u32,
    }

    tagged_union! {
        pub enum Probe { kind: ProbeType, wire: WireProbe }
        Empty = 1 => "EMPTY";
        Ping = 2 => "PING" { ping: Ping = "2" };
        Pong = 3 => "PONG" { pong: Pong = "3" };
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(ProbeType::Ping.as_str_name(), "PING");
        assert_eq!(ProbeType::from_str_name("PONG"), Some(ProbeType::Pong));
        assert_eq!(ProbeType::from_str_name("NOPE"), None);
        assert_eq!(ProbeType::name_of(1), Some("EMPTY"));
        assert_eq!(ProbeType::name_of(42), None);
        assert_eq!(ProbeType::Empty.to_string(), "EMPTY");
    }

    #[test]
    fn test_into_wire_sets_tag_and_payload() {
        let wire = Probe::Ping(Ping { note: "hi".into() }).into_wire();
        assert_eq!(wire.r#type, 2);
        assert_eq!(wire.ping, Some(Ping { note: "hi".into() }));
        assert!(wire.pong.is_none());

        let wire = Probe::Empty.into_wire();
        assert_eq!(wire.r#type, 1);
        assert_eq!(wire.populated(), 0);
    }

    #[test]
    fn test_from_wire_validation() {
        let ok = WireProbe {
            r#type: 3,
            ping: None,
            pong: Some(Pong { count: 7 }),
        };
        assert_eq!(Probe::from_wire(ok).unwrap(), Probe::Pong(Pong { count: 7 }));

        let unknown = WireProbe {
            r#type: 12,
            ..Default::default()
        };
        assert!(matches!(
            Probe::from_wire(unknown),
            Err(UnionError::UnknownType { value: 12, .. })
        ));

        let zero = WireProbe::default();
        assert!(matches!(
            Probe::from_wire(zero),
            Err(UnionError::UnknownType { value: 0, .. })
        ));

        let missing = WireProbe {
            r#type: 2,
            ..Default::default()
        };
        assert_eq!(
            Probe::from_wire(missing),
            Err(UnionError::MissingPayload {
                union: "Probe",
                kind: "PING"
            })
        );

        let foreign = WireProbe {
            r#type: 2,
            ping: Some(Ping::default()),
            pong: Some(Pong::default()),
        };
        assert!(matches!(
            Probe::from_wire(foreign),
            Err(UnionError::UnexpectedPayload { kind: "PING", .. })
        ));

        let unit_with_payload = WireProbe {
            r#type: 1,
            pong: Some(Pong::default()),
            ..Default::default()
        };
        assert!(matches!(
            Probe::from_wire(unit_with_payload),
            Err(UnionError::UnexpectedPayload { kind: "EMPTY", .. })
        ));
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(Probe::Pong(Pong { count: 2 }).into_wire()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "PONG", "pong": {"count": 2}}));

        let json = serde_json::to_value(Probe::Empty.into_wire()).unwrap();
        assert_eq!(json, serde_json::json!({"type": "EMPTY"}));
    }

    #[test]
    fn test_json_decode_ignores_unknown_fields() {
        let wire: WireProbe = serde_json::from_str(
            r#"{"type":"PING","ping":{"note":"x"},"extra":{"a":[1,2]}}"#,
        )
        .unwrap();
        assert_eq!(Probe::from_wire(wire).unwrap(), Probe::Ping(Ping { note: "x".into() }));

        let numeric: WireProbe = serde_json::from_str(r#"{"type":1}"#).unwrap();
        assert_eq!(Probe::from_wire(numeric).unwrap(), Probe::Empty);
    }

    #[test]
    fn test_protobuf_uses_declared_tags() {
        let bytes = Probe::Pong(Pong { count: 1 }).into_wire().encode_to_vec();
        // type = 3 (field 1, varint), pong (field 3, length-delimited) { count = 1 }
        assert_eq!(bytes, vec![0x08, 0x03, 0x1a, 0x02, 0x08, 0x01]);

        let wire = WireProbe::decode(bytes.as_slice()).unwrap();
        assert_eq!(Probe::from_wire(wire).unwrap().kind(), ProbeType::Pong);
    }
}
