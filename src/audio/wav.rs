//! In-memory WAV encoding for the transcription upload.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::info;

use super::capture::Recording;

/// Encode a recording as mono 16-bit PCM WAV bytes.
///
/// # Errors
/// Returns an error if the WAV writer fails.
pub fn encode_wav(recording: &Recording) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: recording.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec).context("Failed to create WAV writer")?;
    for &sample in &recording.samples {
        let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(quantized).context("Failed to write WAV sample")?;
    }
    writer.finalize().context("Failed to finalize WAV data")?;

    Ok(cursor.into_inner())
}

/// Write encoded WAV bytes to a file (the --save-capture debugging aid).
pub fn save_wav(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to write WAV file: {}", path.display()))?;
    info!("Saved capture to {}", path.display());
    Ok(())
}
