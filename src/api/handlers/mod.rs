//! HTTP endpoint handlers.

pub mod console;
pub mod system;
