//! Domain layer: message shapes, session identity and the session registry.
//!
//! Everything here is transport-agnostic. The WebSocket layer turns frames
//! into these types and back.

pub mod input_message;
pub mod output_message;
pub mod session;
pub mod session_id;
pub mod session_registry;

pub use input_message::InputMessage;
pub use output_message::OutputMessage;
pub use session::{Session, SessionState};
pub use session_id::SessionId;
pub use session_registry::SessionRegistry;
