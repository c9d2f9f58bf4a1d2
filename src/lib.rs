//! # probe-console
//!
//! Real-time web console. A browser page sends its `filename` and `input`
//! fields over a WebSocket; the server derives a few display strings and
//! pushes them back to the same connection only.
//!
//! ## Architecture
//!
//! ```text
//! Browser (console.html)
//!     │  {"event":"input_changed","data":{...}}
//!     ▼
//! Transport task per socket (ws/connection)
//!     │  DispatchCommand over mpsc
//!     ▼
//! Dispatcher task (ws/dispatcher)          single owner, in-order
//!     │
//!     ├── ConnectionManager (ws/manager) ── SessionRegistry (domain/)
//!     └── process() (service/)             pure
//!     │
//!     ▼  {"event":"update_outputs","data":{...}} to the sender only
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
