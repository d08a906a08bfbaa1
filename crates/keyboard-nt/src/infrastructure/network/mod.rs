//! Network infrastructure: the NetworkTables 4 client.
//!
//! - **`nt4_client`** – [`Nt4Client`], the production [`TableClient`]: one
//!   background task that keeps a WebSocket connection to the server and
//!   publishes boolean topics on demand.
//! - **`ds_client`**  – Driver Station discovery task that overrides the
//!   server address with the robot IP the Driver Station reports.
//! - **`mock`**       – [`mock::RecordingTableClient`] for tests.
//!
//! [`TableClient`]: crate::application::manage_session::TableClient

pub mod ds_client;
pub mod mock;
pub mod nt4_client;

pub use nt4_client::{Nt4Client, Nt4Table};
