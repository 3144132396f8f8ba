//! Speech-to-text module.
//!
//! Sends recorded clips to a remote transcription service and returns the
//! recognized text.

mod recognizer;

pub use recognizer::{RecognizeError, Recognizer};
