//! WebSocket layer: transport tasks, dispatch and the connection manager.
//!
//! The WebSocket endpoint at `/ws` carries `{event, data}` JSON envelopes.
//! Each socket runs its own transport task; all of them feed a single
//! dispatcher task that owns the [`ConnectionManager`].

pub mod connection;
pub mod dispatcher;
pub mod handler;
pub mod manager;
pub mod messages;

pub use dispatcher::{DispatchHandle, spawn_dispatcher};
pub use manager::{ConnectionHandler, ConnectionManager};
pub use messages::{ClientFrame, ServerEvent};
