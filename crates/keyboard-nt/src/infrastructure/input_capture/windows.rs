//! Windows low-level keyboard hook implementation.
//!
//! Installs a `WH_KEYBOARD_LL` hook on a dedicated Win32 message-loop thread.
//! The hook callback only copies the virtual-key code, extended flag, and
//! transition out through a channel; a second thread names the key with
//! `keymap::windows_vk` and calls the handler, so a slow handler can never
//! stall the hook (Windows removes hooks that take longer than ~300 ms).
//!
//! Events are always passed on to the next hook; nothing is suppressed.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

use keyboard_nt_core::keymap::windows_vk;
use keyboard_nt_core::{KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, KBDLLHOOKSTRUCT_FLAGS, LLKHF_EXTENDED, MSG,
    WH_KEYBOARD_LL, WM_KEYDOWN, WM_KEYUP, WM_QUIT, WM_SYSKEYDOWN, WM_SYSKEYUP,
};

use super::{CaptureError, InputSource, KeyEventHandler};

/// What the hook callback copies out of `KBDLLHOOKSTRUCT`.
#[derive(Debug, Clone, Copy)]
struct HookEvent {
    vk_code: u8,
    is_extended: bool,
    kind: KeyEventKind,
}

/// Sender used by the hook callback.  `None` while no hook is installed;
/// taking it in `stop()` ends the dispatcher thread.
static EVENT_SENDER: Mutex<Option<Sender<HookEvent>>> = Mutex::new(None);

/// Windows low-level keyboard capture.
pub struct WindowsKeyboardHook {
    /// Win32 id of the message-loop thread; 0 when not running.
    hook_thread_id: Arc<AtomicU32>,
}

impl WindowsKeyboardHook {
    /// Creates a new (unstarted) hook.
    pub fn new() -> Self {
        Self {
            hook_thread_id: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Default for WindowsKeyboardHook {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for WindowsKeyboardHook {
    fn start(&self, handler: Arc<dyn KeyEventHandler>) -> Result<(), CaptureError> {
        let (tx, rx) = mpsc::channel::<HookEvent>();
        {
            let mut sender = EVENT_SENDER
                .lock()
                .map_err(|_| CaptureError::HookInstallFailed("sender lock poisoned".to_string()))?;
            if sender.is_some() {
                return Err(CaptureError::AlreadyStarted);
            }
            *sender = Some(tx);
        }

        thread::Builder::new()
            .name("kbnt-key-dispatch".to_string())
            .spawn(move || {
                for hook_event in rx {
                    let name = windows_vk::key_name(hook_event.vk_code, hook_event.is_extended);
                    handler.on_key_transition(&KeyEvent::from_key_name(name, hook_event.kind));
                }
                debug!("key dispatch thread exiting");
            })
            .map_err(|e| CaptureError::HookInstallFailed(e.to_string()))?;

        // The hook thread reports whether SetWindowsHookExW succeeded.
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<u32, String>>(1);
        thread::Builder::new()
            .name("kbnt-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(ready_tx))
            .map_err(|e| CaptureError::HookInstallFailed(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                self.hook_thread_id.store(thread_id, Ordering::SeqCst);
                info!("keyboard hook installed");
                Ok(())
            }
            Ok(Err(reason)) => {
                clear_sender();
                Err(CaptureError::HookInstallFailed(reason))
            }
            Err(_) => {
                clear_sender();
                Err(CaptureError::HookInstallFailed(
                    "hook thread exited before reporting".to_string(),
                ))
            }
        }
    }

    fn stop(&self) {
        clear_sender();
        let thread_id = self.hook_thread_id.swap(0, Ordering::SeqCst);
        if thread_id != 0 {
            // SAFETY: Posting WM_QUIT to a thread id we obtained from
            // GetCurrentThreadId on the hook thread; a stale id just fails.
            if let Err(e) =
                unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            {
                warn!("failed to stop keyboard hook thread: {e}");
            }
        }
    }
}

fn clear_sender() {
    if let Ok(mut sender) = EVENT_SENDER.lock() {
        *sender = None;
    }
}

/// Entry point for the dedicated Win32 message loop thread.
fn run_hook_message_loop(ready: mpsc::SyncSender<Result<u32, String>>) {
    // SAFETY: SetWindowsHookExW requires the calling thread to pump messages,
    // which this thread does below until WM_QUIT.
    let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) }
    {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // SAFETY: No preconditions.
    let thread_id = unsafe { GetCurrentThreadId() };
    let _ = ready.send(Ok(thread_id));

    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        UnhookWindowsHookEx(hook).ok();
    }
    debug!("keyboard hook removed");
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// Called by Windows from the hook message loop thread.  It must return
/// quickly to avoid hook removal by the OS.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code != HC_ACTION as i32 {
        // SAFETY: Must call CallNextHookEx when n_code < 0.
        return CallNextHookEx(None, n_code, w_param, l_param);
    }

    // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
    let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);

    let kind = match w_param.0 as u32 {
        WM_KEYDOWN | WM_SYSKEYDOWN => Some(KeyEventKind::Press),
        WM_KEYUP | WM_SYSKEYUP => Some(KeyEventKind::Release),
        _ => None,
    };

    if let Some(kind) = kind {
        let event = HookEvent {
            vk_code: kbs.vkCode as u8,
            is_extended: (kbs.flags & LLKHF_EXTENDED) != KBDLLHOOKSTRUCT_FLAGS(0),
            kind,
        };
        if let Ok(sender) = EVENT_SENDER.lock() {
            if let Some(tx) = sender.as_ref() {
                // Ignore send errors (dispatcher gone during shutdown).
                let _ = tx.send(event);
            }
        }
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
