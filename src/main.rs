//! SQ Converter - a voice-controlled unit conversion assistant.
//!
//! This application converts values between units of length, weight,
//! temperature, area, and volume. Session prompts are spoken and answered
//! through the microphone, using audio capture (cpal), an OpenAI-compatible
//! transcription service, and a system speech engine, with a numbered
//! terminal form as the fallback for every step.

mod audio;
mod config;
mod convert;
mod form;
mod stt;
mod tts;

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use audio::Capturer;
use config::AppConfig;
use convert::{Category, ConversionRequest, Unit};
use stt::{RecognizeError, Recognizer};
use tts::Synthesizer;

/// Collaborators for a voice-driven session.
struct VoiceSession<'a> {
    config: &'a AppConfig,    // Session settings
    capturer: Capturer,       // Microphone capture
    recognizer: Recognizer,   // Transcription client
    synthesizer: Synthesizer, // Speech output handle
}

impl VoiceSession<'_> {
    /// Speak a phrase, logging instead of failing when the engine misbehaves.
    fn speak(&self, text: &str) {
        if let Err(e) = self.synthesizer.speak(text) {
            warn!("Speech output failed: {}", e);
        }
    }

    /// Record one answer and transcribe it.
    ///
    /// Returns `Ok(None)` when nothing usable was captured; the failure
    /// message has then already been printed and the caller is expected to
    /// fall back to manual input for the step being asked.
    async fn listen<W: Write>(&self, output: &mut W) -> Result<Option<String>> {
        writeln!(output, "Listening... Speak now!")?;
        output.flush()?;

        let text = match self.capture_and_transcribe().await {
            Ok(text) => text,
            Err(RecognizeError::NoSpeech) => {
                writeln!(output, "Sorry, I could not understand the audio.")?;
                return Ok(None);
            }
            Err(RecognizeError::ServiceUnavailable(reason)) => {
                debug!("Transcription failed: {}", reason);
                writeln!(output, "Sorry, there was an issue with the speech recognition service.")?;
                return Ok(None);
            }
        };

        writeln!(output, "You said: {}", text)?;
        Ok(Some(text))
    }

    async fn capture_and_transcribe(&self) -> Result<String, RecognizeError> {
        let recording = self
            .capturer
            .record(self.config.record_duration())
            .map_err(|e| RecognizeError::ServiceUnavailable(e.to_string()))?;
        debug!("Captured {:.1}s of audio", recording.duration_secs());

        let wav = audio::encode_wav(&recording).map_err(|e| RecognizeError::ServiceUnavailable(e.to_string()))?;

        if let Some(ref dir) = self.config.save_capture {
            if let Err(e) = audio::save_wav(&dir.join("last-capture.wav"), &wav) {
                warn!("Could not save capture: {}", e);
            }
        }

        self.recognizer.transcribe(wav).await
    }
}

/// Print a line and speak it through the session's engine.
fn announce<W: Write>(output: &mut W, session: &VoiceSession<'_>, text: &str) -> Result<()> {
    writeln!(output, "{}", text)?;
    session.speak(text);
    Ok(())
}

/// Run voice-driven conversions until the user declines another.
async fn run_voice(config: &AppConfig) -> Result<()> {
    let capturer = Capturer::new(config.sample_rate)?;
    let recognizer = Recognizer::new(config);
    let synthesizer = Synthesizer::new(config)?;
    let session = VoiceSession { config, capturer, recognizer, synthesizer };

    debug!("Capture device ready at {} Hz", session.capturer.sample_rate());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    loop {
        run_voice_session(&session, &mut input, &mut output).await?;
        if !form::confirm(&mut input, &mut output, "Convert another?")? {
            break;
        }
    }

    Ok(())
}

/// One voice conversion: category, units, value, result.
///
/// Each step asks by voice first and falls back to the terminal form when
/// capture fails. An unrecognized spoken category ends the interaction; an
/// invalid spoken unit leaves that unit unset so the final conversion
/// reports failure.
async fn run_voice_session<R: BufRead, W: Write>(
    session: &VoiceSession<'_>,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    announce(output, session, "Which converter do you want to use?")?;

    let category = match session.listen(output).await? {
        Some(transcript) => {
            let name = convert::title_case(&transcript);
            announce(output, session, &format!("You selected {}.", name))?;
            match Category::from_name(&name) {
                Some(category) => category,
                None => {
                    writeln!(output, "Select a unit category to start converting.")?;
                    return Ok(());
                }
            }
        }
        None => form::select_category(input, output)?,
    };

    let from = select_unit_by_voice(session, input, output, category, "Which unit do you want to convert from?", "From").await?;
    let to = select_unit_by_voice(session, input, output, category, "Which unit do you want to convert to?", "To").await?;

    announce(output, session, "Please say the value you want to convert.")?;
    let value = match session.listen(output).await? {
        Some(transcript) => match transcript.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                writeln!(output, "Invalid value. Please enter a number.")?;
                form::read_value(input, output)?
            }
        },
        None => form::read_value(input, output)?,
    };

    emit_result(output, Some(session), category, from, to, value)
}

/// Ask for one unit by voice.
///
/// The spoken answer is normalized and membership-checked against the
/// category. Invalid answers leave the unit unset; capture failures fall
/// back to the numbered menu.
async fn select_unit_by_voice<R: BufRead, W: Write>(
    session: &VoiceSession<'_>,
    input: &mut R,
    output: &mut W,
    category: Category,
    prompt: &str,
    label: &str,
) -> Result<Option<Unit>> {
    announce(output, session, prompt)?;

    match session.listen(output).await? {
        Some(transcript) => match resolve_spoken_unit(category, &transcript) {
            (Some(unit), feedback) => {
                announce(output, session, &feedback)?;
                Ok(Some(unit))
            }
            (None, feedback) => {
                writeln!(output, "{}", feedback)?;
                Ok(None)
            }
        },
        None => {
            writeln!(output, "Voice input failed. Please select the unit manually.")?;
            let unit = form::select_unit(input, output, category, label)?;
            Ok(Some(unit))
        }
    }
}

/// Normalize a spoken answer and check it against the active category.
///
/// Returns the resolved unit together with the feedback line; valid answers
/// are confirmed, invalid ones leave the unit unset.
fn resolve_spoken_unit(category: Category, transcript: &str) -> (Option<Unit>, String) {
    let name = convert::normalize_unit(transcript);
    match category.unit_named(&name) {
        Some(unit) => (Some(unit), format!("You selected {}.", unit)),
        None => (None, "Invalid unit. Please try again.".to_string()),
    }
}

/// Run manual form conversions until the user declines another.
fn run_manual() -> Result<()> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    loop {
        run_manual_session(&mut input, &mut output)?;
        if !form::confirm(&mut input, &mut output, "Convert another?")? {
            break;
        }
    }

    Ok(())
}

/// One conversion through the numbered menus.
fn run_manual_session<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let category = form::select_category(input, output)?;
    let from = form::select_unit(input, output, category, "From")?;
    let to = form::select_unit(input, output, category, "To")?;
    let value = form::read_value(input, output)?;

    emit_result(output, None, category, Some(from), Some(to), value)
}

/// Print the conversion outcome, speaking it when a voice session is active.
///
/// A missing unit or a rejected request both end with the same failure line.
fn emit_result<W: Write>(
    output: &mut W,
    session: Option<&VoiceSession<'_>>,
    category: Category,
    from: Option<Unit>,
    to: Option<Unit>,
    value: f64,
) -> Result<()> {
    let (Some(from), Some(to)) = (from, to) else {
        writeln!(output, "Conversion failed. Please check your inputs.")?;
        return Ok(());
    };

    let request = ConversionRequest { category, from, to, value };
    match convert::convert(&request) {
        Ok(result) => {
            writeln!(output, "Result: {} {}", result.value, result.unit)?;
            if let Some(session) = session {
                session.speak(&format!("The result is {} {}", result.value, result.unit));
            }
        }
        Err(e) => {
            info!("Conversion rejected: {}", e);
            writeln!(output, "Conversion failed. Please check your inputs.")?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .unwrap();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    info!("🎤 SQ Converter v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("Starting converter...");
    config.log_config();

    if config.manual {
        run_manual()?;
    } else {
        run_voice(&config).await?;
    }

    info!("✅ Converter stopped");
    Ok(())
}
