//! Manual input module.
//!
//! Menu-driven prompts used when voice capture is disabled or fails.

mod input;

pub use input::{confirm, read_value, select_category, select_unit};
