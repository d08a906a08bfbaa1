//! Domain types for the bridge process.
//!
//! Key classification itself lives in `keyboard_nt_core::domain`; this crate
//! only adds the runtime configuration that ties a process run together.

pub mod config;

pub use config::{BridgeConfig, ClientIdentity};
