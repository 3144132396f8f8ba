//! Speech recognition over an OpenAI-compatible transcription service.
//!
//! Recorded clips are submitted as multipart WAV uploads; the service answers
//! with the recognized text.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;

/// Recognition failures surfaced to the voice flow.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The service answered, but the clip contained no recognizable speech.
    #[error("no speech detected in the recording")]
    NoSpeech,

    /// The service could not be reached or answered with an error status.
    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Response payload of the transcription endpoint.
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for the remote transcription service.
pub struct Recognizer {
    client: reqwest::Client, // Shared HTTP client
    endpoint: String,        // Transcription endpoint URL
    model: String,           // Model name sent with each request
    language: String,        // Language hint sent with each request
    api_key: Option<String>, // Bearer token, if the service needs one
}

impl Recognizer {
    /// Create a transcription client from the application configuration.
    pub fn new(config: &AppConfig) -> Self {
        info!("Using transcription service: {} (model {})", config.stt_url, config.stt_model);

        Self {
            client: reqwest::Client::new(),
            endpoint: config.stt_url.clone(),
            model: config.stt_model.clone(),
            language: config.stt_language.clone(),
            api_key: config.stt_api_key.clone(),
        }
    }

    /// Transcribe a WAV clip.
    ///
    /// # Arguments
    /// * `wav_bytes` - Mono 16-bit PCM WAV data
    ///
    /// # Returns
    /// The recognized text, trimmed.
    ///
    /// # Errors
    /// Returns `ServiceUnavailable` when the request fails or the service
    /// answers with an error status, and `NoSpeech` when the transcript
    /// comes back empty.
    pub async fn transcribe(&self, wav_bytes: Vec<u8>) -> Result<String, RecognizeError> {
        debug!("Uploading {} bytes of audio for transcription", wav_bytes.len());

        let file = Part::bytes(wav_bytes)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognizeError::ServiceUnavailable(e.to_string()))?;

        let form = Form::new().text("model", self.model.clone()).text("language", self.language.clone()).part("file", file);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| RecognizeError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RecognizeError::ServiceUnavailable(format!("{}: {}", status, body)));
        }

        let payload: TranscriptionResponse = response.json().await.map_err(|e| RecognizeError::ServiceUnavailable(e.to_string()))?;

        let text = payload.text.trim().to_string();
        if text.is_empty() {
            return Err(RecognizeError::NoSpeech);
        }

        debug!("Transcription: \"{}\"", text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let payload: TranscriptionResponse = serde_json::from_str(r#"{"text": "five kilometers"}"#).unwrap();
        assert_eq!(payload.text, "five kilometers");
    }

    #[test]
    fn test_response_parsing_ignores_extra_fields() {
        let payload: TranscriptionResponse = serde_json::from_str(r#"{"text": "ok", "duration": 1.5, "language": "en"}"#).unwrap();
        assert_eq!(payload.text, "ok");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(RecognizeError::NoSpeech.to_string(), "no speech detected in the recording");
        assert_eq!(
            RecognizeError::ServiceUnavailable("503".to_string()).to_string(),
            "speech recognition service unavailable: 503"
        );
    }
}
