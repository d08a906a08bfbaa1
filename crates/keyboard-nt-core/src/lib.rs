//! # keyboard-nt-core
//!
//! Shared, I/O-free building blocks for the keyboard-to-NetworkTables bridge:
//! key event classification, platform key name tables, and the NetworkTables 4
//! wire types used by the client.
//!
//! # Architecture overview
//!
//! The bridge turns physical key transitions into boolean NetworkTables
//! entries that robot code reads as simulated input.  This crate holds
//! everything that can be expressed without touching the OS or the network:
//!
//! - **`domain`** – The [`KeyEvent`] produced by an input source and the
//!   [`classify`] function that maps it to a [`KeyWrite`] (key identifier plus
//!   pressed flag).
//!
//! - **`keymap`** – Translation tables that give platform key codes (Linux
//!   evdev codes, Windows virtual-key codes) the canonical names the
//!   classifier works on.
//!
//! - **`protocol`** – NetworkTables 4 text (JSON) and binary (MessagePack)
//!   message types, clock synchronisation, server addressing, and the Driver
//!   Station status line parser.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::classify::{classify, KeyWrite};
pub use domain::key_event::{KeyEvent, KeyEventKind};
pub use keymap::KeyName;
pub use protocol::address::ServerTarget;
pub use protocol::codec::ProtocolError;
