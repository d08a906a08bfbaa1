//! Application layer use cases for the bridge.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure rules such as key classification) and the infrastructure (OS hooks,
//! sockets).  Use cases here orchestrate domain functions and depend on
//! traits ([`publish_keys::BooleanTable`], [`manage_session::TableClient`])
//! rather than on the concrete NetworkTables client, so they can be tested
//! against mocks.
//!
//! # Sub-modules
//!
//! - **`publish_keys`**   – Writes classified key transitions into the
//!   keyboard sub-table.  Runs on every keystroke.
//!
//! - **`manage_session`** – Owns the client lifecycle: open, wait for the
//!   first connection with a timeout, and tear down exactly once.
//!
//! - **`dispatch`**       – Wires the input source to the publisher and
//!   supervises connection liveness until the server goes away.

pub mod dispatch;
pub mod manage_session;
pub mod publish_keys;

pub use dispatch::{run_bridge, BridgeError, DispatchLoop};
pub use manage_session::{ConnectionSession, SessionError, SessionState, TableClient, TableClientError};
pub use publish_keys::{BooleanTable, KeyForwarder, KeyTablePublisher};
