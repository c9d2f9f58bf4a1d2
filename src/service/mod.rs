//! Service layer: the input processor.

pub mod input_processor;

pub use input_processor::{REQUIRED_FIELDS_ERROR, process};
