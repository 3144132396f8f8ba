//! Text-to-speech module.
//!
//! Speaks phrases through the system speech engine.

mod synthesizer;

pub use synthesizer::Synthesizer;
