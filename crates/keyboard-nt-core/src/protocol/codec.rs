//! NT4 binary frames: MessagePack value updates.
//!
//! # Frame layout
//!
//! A binary WebSocket frame holds one or more MessagePack arrays back to back:
//!
//! ```text
//! [ id: int, timestamp_us: int, type_id: int, value: <type-dependent> ]
//! ```
//!
//! `id` is the publisher id (`pubuid`) for client-to-server updates and the
//! server topic id for server-to-client updates.  `id == -1` is a clock
//! synchronisation message whose value is the client timestamp as an int.

use std::io::Cursor;

use rmpv::Value;
use thiserror::Error;

use super::messages::NtType;

/// Topic id reserved for clock synchronisation.
pub const TIME_SYNC_ID: i64 = -1;

/// Errors produced while encoding or decoding NT4 frames.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("MessagePack encode error: {0}")]
    Encode(String),
    #[error("MessagePack decode error: {0}")]
    Decode(String),
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    #[error("value does not match type id {type_id}")]
    TypeMismatch { type_id: u8 },
    #[error("invalid server address: {0}")]
    InvalidAddress(String),
}

/// A decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum NtValue {
    Boolean(bool),
    Double(f64),
    Int(i64),
    Float(f32),
    String(String),
    Raw(Vec<u8>),
    /// Array types; the bridge never needs their contents.
    Unsupported { type_id: u8 },
}

impl NtValue {
    /// The binary type id of this value.
    pub fn type_id(&self) -> u8 {
        match self {
            NtValue::Boolean(_) => NtType::Boolean.type_id(),
            NtValue::Double(_) => NtType::Double.type_id(),
            NtValue::Int(_) => NtType::Int.type_id(),
            NtValue::Float(_) => NtType::Float.type_id(),
            NtValue::String(_) => NtType::String.type_id(),
            NtValue::Raw(_) => NtType::Raw.type_id(),
            NtValue::Unsupported { type_id } => *type_id,
        }
    }

    fn to_msgpack(&self) -> Result<Value, ProtocolError> {
        Ok(match self {
            NtValue::Boolean(b) => Value::Boolean(*b),
            NtValue::Double(d) => Value::F64(*d),
            NtValue::Int(i) => Value::from(*i),
            NtValue::Float(f) => Value::F32(*f),
            NtValue::String(s) => Value::from(s.as_str()),
            NtValue::Raw(bytes) => Value::Binary(bytes.clone()),
            NtValue::Unsupported { type_id } => {
                return Err(ProtocolError::Encode(format!(
                    "cannot encode value of type id {type_id}"
                )))
            }
        })
    }

    fn from_msgpack(type_id: u8, value: Value) -> Result<Self, ProtocolError> {
        let mismatch = || ProtocolError::TypeMismatch { type_id };
        Ok(match NtType::from_type_id(type_id) {
            Some(NtType::Boolean) => NtValue::Boolean(value.as_bool().ok_or_else(mismatch)?),
            Some(NtType::Double) => NtValue::Double(value.as_f64().ok_or_else(mismatch)?),
            Some(NtType::Int) => NtValue::Int(value.as_i64().ok_or_else(mismatch)?),
            Some(NtType::Float) => match value {
                Value::F32(f) => NtValue::Float(f),
                // Narrowing is how NT4 peers treat float topics sent as f64.
                Value::F64(f) => NtValue::Float(f as f32),
                _ => return Err(mismatch()),
            },
            Some(NtType::String) => match value {
                Value::String(s) => NtValue::String(s.into_str().ok_or_else(mismatch)?),
                _ => return Err(mismatch()),
            },
            Some(NtType::Raw) => match value {
                Value::Binary(bytes) => NtValue::Raw(bytes),
                _ => return Err(mismatch()),
            },
            _ => NtValue::Unsupported { type_id },
        })
    }
}

/// One value update.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryFrame {
    /// Publisher id (outbound) or topic id (inbound); `-1` for time sync.
    pub id: i64,
    /// Server-clock timestamp in microseconds (0 = unset).
    pub timestamp_us: i64,
    pub value: NtValue,
}

impl BinaryFrame {
    /// A boolean update for publisher `pubuid`.
    pub fn boolean(pubuid: i32, timestamp_us: i64, value: bool) -> Self {
        Self {
            id: i64::from(pubuid),
            timestamp_us,
            value: NtValue::Boolean(value),
        }
    }

    /// A clock synchronisation request carrying the local send time.
    pub fn time_sync_request(client_time_us: i64) -> Self {
        Self {
            id: TIME_SYNC_ID,
            timestamp_us: 0,
            value: NtValue::Int(client_time_us),
        }
    }

    /// `true` if this is a clock synchronisation message.
    pub fn is_time_sync(&self) -> bool {
        self.id == TIME_SYNC_ID
    }
}

/// Encodes a frame as a single MessagePack array.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] for [`NtValue::Unsupported`] values or if
/// the MessagePack writer fails.
pub fn encode_binary_frame(frame: &BinaryFrame) -> Result<Vec<u8>, ProtocolError> {
    let array = Value::Array(vec![
        Value::from(frame.id),
        Value::from(frame.timestamp_us),
        Value::from(frame.value.type_id()),
        frame.value.to_msgpack()?,
    ]);

    let mut buf = Vec::with_capacity(16);
    rmpv::encode::write_value(&mut buf, &array)
        .map_err(|e| ProtocolError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Decodes every value update contained in one binary WebSocket frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Decode`] on truncated MessagePack,
/// [`ProtocolError::MalformedFrame`] if an element is not a 4-element array
/// of the expected shape, or [`ProtocolError::TypeMismatch`] if a value does
/// not match its declared type.
pub fn decode_binary_frames(bytes: &[u8]) -> Result<Vec<BinaryFrame>, ProtocolError> {
    let mut cursor = Cursor::new(bytes);
    let mut frames = Vec::new();

    while (cursor.position() as usize) < bytes.len() {
        let value = rmpv::decode::read_value(&mut cursor)
            .map_err(|e| ProtocolError::Decode(e.to_string()))?;
        frames.push(frame_from_value(value)?);
    }

    Ok(frames)
}

fn frame_from_value(value: Value) -> Result<BinaryFrame, ProtocolError> {
    let Value::Array(items) = value else {
        return Err(ProtocolError::MalformedFrame(
            "binary element is not an array".to_string(),
        ));
    };
    let [id, timestamp, type_id, value]: [Value; 4] = items.try_into().map_err(|v: Vec<Value>| {
        ProtocolError::MalformedFrame(format!("expected 4 elements, got {}", v.len()))
    })?;

    let id = id
        .as_i64()
        .ok_or_else(|| ProtocolError::MalformedFrame("id is not an integer".to_string()))?;
    let timestamp_us = timestamp
        .as_i64()
        .ok_or_else(|| ProtocolError::MalformedFrame("timestamp is not an integer".to_string()))?;
    let type_id = type_id
        .as_u64()
        .and_then(|t| u8::try_from(t).ok())
        .ok_or_else(|| ProtocolError::MalformedFrame("invalid type id".to_string()))?;

    Ok(BinaryFrame {
        id,
        timestamp_us,
        value: NtValue::from_msgpack(type_id, value)?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
