//! NT4 text-frame control messages.
//!
//! Every text frame is a JSON array; each element is an object of the form
//! `{"method": "<name>", "params": {...}}`.  The client only ever publishes, so
//! [`ClientMessage`] covers `publish`/`unpublish`.  Server messages the bridge
//! does not understand are skipped rather than failing the whole frame.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::codec::ProtocolError;

/// NT4 data types with their binary type id and text name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NtType {
    Boolean,
    Double,
    Int,
    Float,
    String,
    Raw,
    BooleanArray,
    DoubleArray,
    IntArray,
    FloatArray,
    StringArray,
}

impl NtType {
    /// Type id used in binary frames.
    pub fn type_id(self) -> u8 {
        match self {
            NtType::Boolean => 0,
            NtType::Double => 1,
            NtType::Int => 2,
            NtType::Float => 3,
            NtType::String => 4,
            NtType::Raw => 5,
            NtType::BooleanArray => 16,
            NtType::DoubleArray => 17,
            NtType::IntArray => 18,
            NtType::FloatArray => 19,
            NtType::StringArray => 20,
        }
    }

    /// Type string used in `publish`/`announce` messages.
    pub fn as_str(self) -> &'static str {
        match self {
            NtType::Boolean => "boolean",
            NtType::Double => "double",
            NtType::Int => "int",
            NtType::Float => "float",
            NtType::String => "string",
            NtType::Raw => "raw",
            NtType::BooleanArray => "boolean[]",
            NtType::DoubleArray => "double[]",
            NtType::IntArray => "int[]",
            NtType::FloatArray => "float[]",
            NtType::StringArray => "string[]",
        }
    }

    /// Inverse of [`NtType::type_id`].
    pub fn from_type_id(id: u8) -> Option<Self> {
        Some(match id {
            0 => NtType::Boolean,
            1 => NtType::Double,
            2 => NtType::Int,
            3 => NtType::Float,
            4 => NtType::String,
            5 => NtType::Raw,
            16 => NtType::BooleanArray,
            17 => NtType::DoubleArray,
            18 => NtType::IntArray,
            19 => NtType::FloatArray,
            20 => NtType::StringArray,
            _ => return None,
        })
    }
}

/// Parameters of a `publish` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishParams {
    /// Full topic name, e.g. `/Keyboard/Keys/a`.
    pub name: String,
    /// Client-chosen publisher id; binary frames for this topic use it.
    pub pubuid: i32,
    /// NT4 type string.
    #[serde(rename = "type")]
    pub type_str: String,
    /// Initial topic properties (empty for plain entries).
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Parameters of an `unpublish` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpublishParams {
    pub pubuid: i32,
}

/// Messages sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "lowercase")]
pub enum ClientMessage {
    Publish(PublishParams),
    Unpublish(UnpublishParams),
}

impl ClientMessage {
    /// A `publish` for a topic of type `ty` with no properties.
    pub fn publish(name: impl Into<String>, pubuid: i32, ty: NtType) -> Self {
        ClientMessage::Publish(PublishParams {
            name: name.into(),
            pubuid,
            type_str: ty.as_str().to_string(),
            properties: Map::new(),
        })
    }
}

/// Parameters of a server `announce`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnnounceParams {
    pub name: String,
    /// Server-assigned topic id.
    pub id: i64,
    #[serde(rename = "type")]
    pub type_str: String,
    /// Present when the announce answers one of our `publish` requests.
    #[serde(default)]
    pub pubuid: Option<i32>,
    #[serde(default)]
    pub properties: Value,
}

/// Parameters of a server `unannounce`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnannounceParams {
    pub name: String,
    pub id: i64,
}

/// Parameters of a server `properties` update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertiesParams {
    pub name: String,
    #[serde(default)]
    pub ack: Option<bool>,
    #[serde(default)]
    pub update: Value,
}

/// Messages sent by the server that the client understands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "lowercase")]
pub enum ServerMessage {
    Announce(AnnounceParams),
    Unannounce(UnannounceParams),
    Properties(PropertiesParams),
}

/// Serialises client messages into one text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if serialisation fails.
pub fn encode_text_frame(messages: &[ClientMessage]) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(messages)?)
}

/// Parses a server text frame.
///
/// Elements with an unknown `method` or malformed `params` are skipped.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if the frame is not valid JSON, or
/// [`ProtocolError::MalformedFrame`] if it is not a JSON array.
pub fn decode_text_frame(text: &str) -> Result<Vec<ServerMessage>, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(ProtocolError::MalformedFrame(
            "text frame is not a JSON array".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ServerMessage>(item) {
            Ok(msg) => Some(msg),
            Err(e) => {
                debug!("skipping server message: {e}");
                None
            }
        })
        .collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_publish_serialises_to_nt4_shape() {
        // Arrange
        let msg = ClientMessage::publish("/Keyboard/Keys/a", 3, NtType::Boolean);

        // Act
        let frame = encode_text_frame(&[msg]).unwrap();
        let parsed: Value = serde_json::from_str(&frame).unwrap();

        // Assert
        assert_eq!(
            parsed,
            json!([{
                "method": "publish",
                "params": {
                    "name": "/Keyboard/Keys/a",
                    "pubuid": 3,
                    "type": "boolean",
                    "properties": {}
                }
            }])
        );
    }

    #[test]
    fn test_unpublish_serialises_method_name() {
        let frame =
            encode_text_frame(&[ClientMessage::Unpublish(UnpublishParams { pubuid: 9 })]).unwrap();
        let parsed: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(parsed, json!([{"method": "unpublish", "params": {"pubuid": 9}}]));
    }

    #[test]
    fn test_decode_announce_with_pubuid() {
        let text = r#"[{"method":"announce","params":{"name":"/Keyboard/Keys/a","id":12,"type":"boolean","pubuid":3,"properties":{}}}]"#;

        let messages = decode_text_frame(text).unwrap();

        assert_eq!(messages.len(), 1);
        match &messages[0] {
            ServerMessage::Announce(a) => {
                assert_eq!(a.name, "/Keyboard/Keys/a");
                assert_eq!(a.id, 12);
                assert_eq!(a.pubuid, Some(3));
                assert_eq!(a.type_str, "boolean");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_decode_skips_unknown_methods() {
        let text = r#"[
            {"method":"somethingnew","params":{}},
            {"method":"unannounce","params":{"name":"/x","id":4}}
        ]"#;

        let messages = decode_text_frame(text).unwrap();

        assert_eq!(
            messages,
            vec![ServerMessage::Unannounce(UnannounceParams {
                name: "/x".to_string(),
                id: 4
            })]
        );
    }

    #[test]
    fn test_decode_properties_update() {
        let text = r#"[{"method":"properties","params":{"name":"/x","ack":true,"update":{"retained":true}}}]"#;
        let messages = decode_text_frame(text).unwrap();
        assert!(matches!(
            &messages[0],
            ServerMessage::Properties(PropertiesParams { ack: Some(true), .. })
        ));
    }

    #[test]
    fn test_decode_rejects_non_array_frame() {
        assert!(matches!(
            decode_text_frame(r#"{"method":"announce"}"#),
            Err(ProtocolError::MalformedFrame(_))
        ));
        assert!(matches!(decode_text_frame("not json"), Err(ProtocolError::Json(_))));
    }

    #[test]
    fn test_type_ids_round_trip() {
        for ty in [NtType::Boolean, NtType::Int, NtType::Raw, NtType::StringArray] {
            assert_eq!(NtType::from_type_id(ty.type_id()), Some(ty));
        }
        assert_eq!(NtType::from_type_id(6), None);
    }
}
