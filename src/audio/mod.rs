//! Audio input for voice mode.
//!
//! One-shot microphone capture via cpal, and WAV encoding of the captured
//! clip for the transcription upload.

mod capture;
mod wav;

pub use capture::{Capturer, Recording};
pub use wav::{encode_wav, save_wav};
