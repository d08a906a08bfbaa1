//! Keyboard capture infrastructure.
//!
//! Each platform source turns OS key codes into [`KeyEvent`]s (names come from
//! `keyboard_nt_core::keymap`) and hands them to a registered
//! [`KeyEventHandler`] on the source's own thread.
//!
//! | Platform | Source                          | Mechanism                         |
//! |----------|---------------------------------|-----------------------------------|
//! | Linux    | `linux::EvdevKeyboardSource`    | one reader thread per `/dev/input` keyboard |
//! | Windows  | `windows::WindowsKeyboardHook`  | `WH_KEYBOARD_LL` on a message-loop thread |
//!
//! # Testability
//!
//! The [`InputSource`] trait allows tests to inject synthetic events via
//! [`mock::MockInputSource`] without OS hooks.

use std::sync::Arc;

use keyboard_nt_core::KeyEvent;

pub mod mock;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

/// Receives every key transition while an input source is running.
///
/// Called from the input source's threads, so implementations must be cheap
/// and thread-safe.
pub trait KeyEventHandler: Send + Sync {
    fn on_key_transition(&self, event: &KeyEvent);
}

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no keyboard devices found (is the user in the 'input' group?)")]
    NoKeyboards,
    #[error("failed to open input device: {0}")]
    DeviceAccess(String),
    #[error("failed to install keyboard hook: {0}")]
    HookInstallFailed(String),
    #[error("input source has already been started")]
    AlreadyStarted,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting keyboard event production.
pub trait InputSource: Send + Sync {
    /// Starts capturing and delivers every transition to `handler`.
    fn start(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), CaptureError>;
    /// Stops capturing; no events are delivered after this returns.
    fn stop(&self);
}

/// The keyboard source for the platform this binary was built for.
///
/// # Errors
///
/// Returns [`CaptureError::UnsupportedPlatform`] on platforms without a
/// keyboard source.
pub fn platform_input_source() -> Result<Box<dyn InputSource>, CaptureError> {
    #[cfg(target_os = "linux")]
    {
        Ok(Box::new(linux::EvdevKeyboardSource::new()))
    }
    #[cfg(target_os = "windows")]
    {
        Ok(Box::new(windows::WindowsKeyboardHook::new()))
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Err(CaptureError::UnsupportedPlatform(
            std::env::consts::OS.to_string(),
        ))
    }
}
