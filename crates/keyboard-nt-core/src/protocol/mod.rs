//! NetworkTables 4 wire types.
//!
//! An NT4 connection is a WebSocket carrying two kinds of frames:
//!
//! ```text
//! Text frame   : JSON array of {"method": ..., "params": {...}} control messages
//!                (publish, unpublish / announce, unannounce, properties)
//! Binary frame : back-to-back MessagePack arrays
//!                [topic id | pubuid, timestamp µs, type id, value]
//! ```
//!
//! Topic id `-1` is reserved for clock synchronisation (see [`timesync`]).
//!
//! # Sub-modules
//!
//! - **`address`**  – Where the server lives and the WebSocket URL for a client.
//! - **`topic`**    – Table paths and the topic names derived from them.
//! - **`messages`** – JSON control messages and the NT4 data type list.
//! - **`codec`**    – MessagePack value frames.
//! - **`timesync`** – Server clock offset estimation.
//! - **`ds`**       – Driver Station status lines (robot IP discovery).

pub mod address;
pub mod codec;
pub mod ds;
pub mod messages;
pub mod timesync;
pub mod topic;

pub use address::{ServerTarget, DEFAULT_NT4_PORT};
pub use codec::{decode_binary_frames, encode_binary_frame, BinaryFrame, NtValue, ProtocolError};
pub use messages::{decode_text_frame, encode_text_frame, ClientMessage, NtType, ServerMessage};
pub use timesync::ServerClock;
pub use topic::TablePath;

/// WebSocket subprotocols offered by the client, newest first.
pub const NT4_SUBPROTOCOLS: [&str; 2] = [
    "v4.1.networktables.first.wpi.edu",
    "networktables.first.wpi.edu",
];
