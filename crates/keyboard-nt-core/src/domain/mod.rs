//! Domain types: what a key transition is and how it becomes a table write.
//!
//! Nothing in here performs I/O; input sources build [`KeyEvent`]s and the
//! application layer hands them to [`classify`].

pub mod classify;
pub mod key_event;

pub use classify::{classify, KeyWrite};
pub use key_event::{KeyEvent, KeyEventKind};
