//! Infrastructure layer for the bridge.
//!
//! Contains OS-facing adapters: keyboard capture (evdev on Linux, a
//! low-level hook on Windows) and the NetworkTables 4 client with its Driver
//! Station discovery task.

pub mod input_capture;
pub mod network;
