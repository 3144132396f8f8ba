//! Audio capture using cpal.
//!
//! Records a fixed-length clip from the default input device. Each recording
//! uses a short-lived stream: built, played for the requested duration, then
//! torn down. Samples are downmixed to mono f32 at whatever rate the device
//! negotiated; the WAV header carries that rate downstream.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, StreamConfig, SupportedStreamConfig};
use tracing::{debug, info};

/// A recorded clip: mono samples at the rate the device delivered.
pub struct Recording {
    pub samples: Vec<f32>, // Mono samples in [-1.0, 1.0]
    pub sample_rate: u32,  // Capture rate in Hz
}

impl Recording {
    /// Clip length in seconds.
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

/// One-shot microphone recorder bound to the default input device.
pub struct Capturer {
    device: Device,                // Default input device
    config: SupportedStreamConfig, // Negotiated stream configuration
}

impl Capturer {
    /// Create a recorder bound to the default input device.
    ///
    /// # Arguments
    /// * `preferred_rate` - Sample rate to request when the device supports it
    ///
    /// # Errors
    /// Returns an error if no input device is available or the device exposes
    /// no usable configuration.
    pub fn new(preferred_rate: u32) -> Result<Self> {
        let host = cpal::default_host();
        let device = host.default_input_device().context("No input device available")?;

        info!("Using input device: {}", device_name(&device));

        let config = negotiate_config(&device, preferred_rate)?;
        debug!("Capture config: {} Hz, {} channels, {:?}", config.sample_rate(), config.channels(), config.sample_format());

        Ok(Self { device, config })
    }

    /// The sample rate recordings will be captured at.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate()
    }

    /// Record a clip of the given length, blocking until it is done.
    ///
    /// # Arguments
    /// * `duration` - How long to record
    ///
    /// # Returns
    /// The captured clip, truncated to at most `duration` worth of samples.
    ///
    /// # Errors
    /// Returns an error if the stream cannot be built or started, or if the
    /// device delivered no samples at all.
    pub fn record(&self, duration: Duration) -> Result<Recording> {
        let stream_config: StreamConfig = self.config.config();
        let sample_rate = self.config.sample_rate();
        let channels = self.config.channels() as usize;

        let (tx, rx) = mpsc::channel::<Vec<f32>>();

        let err_fn = |err| {
            tracing::error!("Audio capture error: {}", err);
        };

        let stream = match self.config.sample_format() {
            SampleFormat::F32 => self.device.build_input_stream(
                &stream_config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(mix_to_mono(data, channels));
                },
                err_fn,
                None,
            )?,
            SampleFormat::I16 => self.device.build_input_stream(
                &stream_config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(mix_to_mono(&i16_to_f32(data), channels));
                },
                err_fn,
                None,
            )?,
            SampleFormat::U16 => self.device.build_input_stream(
                &stream_config,
                move |data: &[u16], _: &cpal::InputCallbackInfo| {
                    let _ = tx.send(mix_to_mono(&u16_to_f32(data), channels));
                },
                err_fn,
                None,
            )?,
            format => anyhow::bail!("Unsupported sample format: {:?}", format),
        };

        stream.play().context("Failed to start audio stream")?;
        debug!("Recording {:.1} s at {} Hz", duration.as_secs_f32(), sample_rate);

        let target_len = (sample_rate as f64 * duration.as_secs_f64()) as usize;
        let mut samples: Vec<f32> = Vec::with_capacity(target_len);

        // Drain until the deadline, then collect whatever the device already
        // queued before the stream went away.
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(chunk) => samples.extend_from_slice(&chunk),
                Err(mpsc::RecvTimeoutError::Timeout) => continue,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
        drop(stream);
        while let Ok(chunk) = rx.try_recv() {
            samples.extend_from_slice(&chunk);
        }

        if samples.is_empty() {
            anyhow::bail!("No audio captured from input device");
        }

        samples.truncate(target_len);
        debug!("Captured {} samples ({:.2} s)", samples.len(), samples.len() as f32 / sample_rate as f32);

        Ok(Recording { samples, sample_rate })
    }
}

/// Pick a stream configuration, preferring the requested sample rate.
///
/// Mono and stereo configurations in the three common sample formats are
/// considered; the device default is the fallback when the preferred rate is
/// out of range everywhere.
fn negotiate_config(device: &Device, preferred_rate: u32) -> Result<SupportedStreamConfig> {
    let supported = device.supported_input_configs().context("Failed to get supported input configs")?;

    for range in supported {
        if range.channels() > 2 {
            continue;
        }
        if !matches!(range.sample_format(), SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16) {
            continue;
        }
        if preferred_rate >= range.min_sample_rate() && preferred_rate <= range.max_sample_rate() {
            return Ok(range.with_sample_rate(preferred_rate));
        }
    }

    let default = device.default_input_config().context("Failed to get default input config")?;
    debug!("Preferred rate {} Hz not supported, using device default {} Hz", preferred_rate, default.sample_rate());
    Ok(default)
}

/// Human-readable device name, or "Unknown".
fn device_name(device: &Device) -> String {
    device.description().ok().map(|desc| desc.name().to_string()).unwrap_or_else(|| "Unknown".to_string())
}

/// Downmix interleaved samples to mono by averaging the channels.
fn mix_to_mono(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        data.to_vec()
    } else {
        data.chunks(channels).map(|frame| frame.iter().sum::<f32>() / channels as f32).collect()
    }
}

fn i16_to_f32(data: &[i16]) -> Vec<f32> {
    data.iter().map(|&s| s as f32 / i16::MAX as f32).collect()
}

fn u16_to_f32(data: &[u16]) -> Vec<f32> {
    data.iter().map(|&s| (s as f32 - 32768.0) / 32768.0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stereo_mixdown_averages_channels() {
        let data = vec![0.5f32, 1.0, -0.5, -1.0];
        let result = mix_to_mono(&data, 2);
        assert_eq!(result, vec![0.75, -0.75]);
    }

    #[test]
    fn test_mono_passthrough() {
        let data = vec![0.1f32, 0.2, 0.3];
        assert_eq!(mix_to_mono(&data, 1), data);
    }

    #[test]
    fn test_i16_normalization() {
        let samples = i16_to_f32(&[0, i16::MAX, i16::MIN + 1]);
        assert_eq!(samples, vec![0.0, 1.0, -1.0]);
    }

    #[test]
    fn test_u16_normalization() {
        let samples = u16_to_f32(&[32768, 0, u16::MAX]);
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[1], -1.0);
        assert!((samples[2] - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_recording_duration() {
        let recording = Recording { samples: vec![0.0; 22050], sample_rate: 44100 };
        assert!((recording.duration_secs() - 0.5).abs() < 1e-6);
    }
}
