//! Application configuration and CLI argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convert;

/// Default transcription endpoint (OpenAI-compatible).
pub const DEFAULT_STT_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Unit converter application configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "sq-converter")]
#[command(author, version, about = "A voice-controlled unit conversion assistant", long_about = None)]
pub struct AppConfig {
    /// List all supported categories, units, and spoken aliases, then exit
    #[arg(long)]
    pub list_units: bool,

    /// Skip voice capture and use the manual form only
    #[arg(long)]
    pub manual: bool,

    /// Recording length for each voice prompt, in seconds
    #[arg(long, default_value = "5.0", value_parser = parse_record_secs)]
    pub record_secs: f64,

    /// Preferred capture sample rate in Hz
    #[arg(long, default_value = "44100")]
    pub sample_rate: u32,

    /// Transcription endpoint URL (OpenAI-compatible audio transcription API)
    #[arg(long, short = 'u', env = "STT_URL", default_value = DEFAULT_STT_URL)]
    pub stt_url: String,

    /// API key sent as a bearer token, if the endpoint requires one
    #[arg(long, env = "STT_API_KEY", hide_env_values = true)]
    pub stt_api_key: Option<String>,

    /// Transcription model name
    #[arg(long, short = 'm', env = "STT_MODEL", default_value = "whisper-1")]
    pub stt_model: String,

    /// STT language code (e.g., en, es, fr, de)
    #[arg(long, default_value = "en")]
    pub stt_language: String,

    /// Speech engine command (overrides platform detection, e.g. espeak-ng)
    #[arg(long, env = "TTS_COMMAND")]
    pub tts_command: Option<String>,

    /// Speaking rate in words per minute
    #[arg(long, default_value = "150")]
    pub tts_rate: u32,

    /// Speech engine voice name (passed to the engine's voice flag)
    #[arg(long)]
    pub tts_voice: Option<String>,

    /// Save each voice capture as a WAV file into this directory
    #[arg(long)]
    pub save_capture: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        let config = Self::parse();

        if config.list_units {
            convert::print_catalog();
            std::process::exit(0);
        }

        config
    }

    /// How long each voice prompt records before transcription.
    pub fn record_duration(&self) -> Duration {
        Duration::from_secs_f64(self.record_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            anyhow::bail!("Sample rate must be positive");
        }

        if self.stt_url.is_empty() {
            anyhow::bail!("Transcription endpoint must not be empty");
        }

        if self.tts_rate == 0 {
            anyhow::bail!("Speaking rate must be positive");
        }

        if let Some(ref dir) = self.save_capture {
            if !dir.is_dir() {
                anyhow::bail!("Capture directory does not exist: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Mode: {}", if self.manual { "manual form" } else { "voice" });
        info!("  Record duration: {}s", self.record_secs);
        info!("  Sample rate: {} Hz", self.sample_rate);
        info!("  STT endpoint: {}", self.stt_url);
        info!("  STT model: {}", self.stt_model);
        info!("  STT language: {}", self.stt_language);
        info!("  TTS rate: {} wpm", self.tts_rate);
        if let Some(ref voice) = self.tts_voice {
            info!("  TTS voice: {}", voice);
        }
        if let Some(ref dir) = self.save_capture {
            info!("  Saving captures to: {}", dir.display());
        }
    }
}

/// Parse and validate the recording length (0-60 seconds).
fn parse_record_secs(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value > 0.0 && value <= 60.0 {
        Ok(value)
    } else {
        Err(format!("recording length must be between 0 and 60 seconds, got {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["sq-converter"]).unwrap();
        assert!(!config.manual);
        assert_eq!(config.record_secs, 5.0);
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.stt_model, "whisper-1");
        assert_eq!(config.tts_rate, 150);
        assert_eq!(config.record_duration(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_parse() {
        let config = AppConfig::try_parse_from([
            "sq-converter",
            "--manual",
            "--record-secs",
            "3.5",
            "--stt-url",
            "http://localhost:8080/v1/audio/transcriptions",
            "--tts-rate",
            "120",
        ])
        .unwrap();
        assert!(config.manual);
        assert_eq!(config.record_secs, 3.5);
        assert_eq!(config.stt_url, "http://localhost:8080/v1/audio/transcriptions");
        assert_eq!(config.tts_rate, 120);
    }

    #[test]
    fn test_rejects_bad_record_secs() {
        assert!(AppConfig::try_parse_from(["sq-converter", "--record-secs", "0"]).is_err());
        assert!(AppConfig::try_parse_from(["sq-converter", "--record-secs", "90"]).is_err());
        assert!(AppConfig::try_parse_from(["sq-converter", "--record-secs", "soon"]).is_err());
    }

    #[test]
    fn test_validate_rejects_missing_capture_dir() {
        let mut config = AppConfig::try_parse_from(["sq-converter"]).unwrap();
        config.save_capture = Some(PathBuf::from("/no/such/directory"));
        assert!(config.validate().is_err());
    }
}
