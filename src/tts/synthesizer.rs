//! Speech output through a system speech engine.
//!
//! The engine binary is resolved once at startup (macOS `say`, espeak-ng or
//! espeak elsewhere, or an explicit override) and held by the `Synthesizer`
//! handle. Each utterance runs the engine as a blocking subprocess.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Known engine flavors, used to pick rate and voice flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    Say,    // macOS built-in
    Espeak, // espeak / espeak-ng
    Other,  // User-supplied command, invoked with the text as sole argument
}

/// Speech synthesizer handle bound to a resolved engine binary.
pub struct Synthesizer {
    program: PathBuf,      // Resolved engine binary
    engine: Engine,        // Flavor for flag selection
    rate: u32,             // Speaking rate in words per minute
    voice: Option<String>, // Engine-specific voice name
}

impl Synthesizer {
    /// Resolve the speech engine from configuration.
    ///
    /// # Errors
    /// Returns an error if no engine is found on PATH and no explicit
    /// command was configured.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let (program, engine) = resolve_engine(config.tts_command.as_deref())?;

        info!("Using speech engine: {}", program.display());

        Ok(Self { program, engine, rate: config.tts_rate, voice: config.tts_voice.clone() })
    }

    /// Speak a phrase, blocking until the utterance completes.
    ///
    /// # Errors
    /// Returns an error if the engine cannot be spawned or exits with a
    /// failure status.
    pub fn speak(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        debug!("Speaking: \"{}\"", text);

        let status = self
            .build_command(text)
            .status()
            .with_context(|| format!("Failed to run speech engine {}", self.program.display()))?;

        if !status.success() {
            anyhow::bail!("Speech engine exited with {}", status);
        }

        Ok(())
    }

    /// Assemble the engine invocation for one utterance.
    fn build_command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        match self.engine {
            Engine::Say => {
                command.arg("-r").arg(self.rate.to_string());
                if let Some(ref voice) = self.voice {
                    command.arg("-v").arg(voice);
                }
            }
            Engine::Espeak => {
                command.arg("-s").arg(self.rate.to_string());
                if let Some(ref voice) = self.voice {
                    command.arg("-v").arg(voice);
                }
            }
            Engine::Other => {}
        }
        command.arg(text);
        command
    }
}

/// Resolve the engine binary: an explicit override, or the first known
/// engine found on PATH.
fn resolve_engine(override_command: Option<&str>) -> Result<(PathBuf, Engine)> {
    if let Some(command) = override_command {
        let path = Path::new(command);
        let resolved = if path.components().count() > 1 {
            path.is_file().then(|| path.to_path_buf())
        } else {
            find_in_path(command)
        };
        let program = resolved.with_context(|| format!("Speech engine not found: {}", command))?;
        let engine = match program.file_stem().and_then(|stem| stem.to_str()) {
            Some("say") => Engine::Say,
            Some("espeak") | Some("espeak-ng") => Engine::Espeak,
            _ => Engine::Other,
        };
        return Ok((program, engine));
    }

    let candidates: &[(&str, Engine)] = if cfg!(target_os = "macos") {
        &[("say", Engine::Say), ("espeak-ng", Engine::Espeak), ("espeak", Engine::Espeak)]
    } else {
        &[("espeak-ng", Engine::Espeak), ("espeak", Engine::Espeak)]
    };

    for (name, engine) in candidates {
        if let Some(program) = find_in_path(name) {
            return Ok((program, *engine));
        }
    }

    anyhow::bail!("No speech engine found on PATH. Install espeak-ng or pass --tts-command")
}

/// Search PATH for an executable with the given name.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    search_dirs(name, std::env::split_paths(&paths))
}

fn search_dirs(name: &str, dirs: impl Iterator<Item = PathBuf>) -> Option<PathBuf> {
    for dir in dirs {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_dirs_finds_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("mock-engine");
        std::fs::write(&binary, b"#!/bin/sh\n").unwrap();

        let found = search_dirs("mock-engine", std::iter::once(dir.path().to_path_buf()));
        assert_eq!(found, Some(binary));

        let missing = search_dirs("other-engine", std::iter::once(dir.path().to_path_buf()));
        assert_eq!(missing, None);
    }

    #[test]
    fn test_override_flavor_detection() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["say", "espeak-ng", "festival"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let say = dir.path().join("say");
        let (program, engine) = resolve_engine(Some(say.to_str().unwrap())).unwrap();
        assert_eq!(program, say);
        assert_eq!(engine, Engine::Say);

        let ng = dir.path().join("espeak-ng");
        let (_, engine) = resolve_engine(Some(ng.to_str().unwrap())).unwrap();
        assert_eq!(engine, Engine::Espeak);

        let festival = dir.path().join("festival");
        let (_, engine) = resolve_engine(Some(festival.to_str().unwrap())).unwrap();
        assert_eq!(engine, Engine::Other);

        let missing = dir.path().join("missing");
        assert!(resolve_engine(Some(missing.to_str().unwrap())).is_err());
    }

    #[test]
    fn test_say_command_flags() {
        let synth = Synthesizer {
            program: PathBuf::from("/usr/bin/say"),
            engine: Engine::Say,
            rate: 150,
            voice: Some("Samantha".to_string()),
        };
        let command = synth.build_command("hello");
        let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["-r", "150", "-v", "Samantha", "hello"]);
    }

    #[test]
    fn test_espeak_command_flags() {
        let synth = Synthesizer { program: PathBuf::from("/usr/bin/espeak-ng"), engine: Engine::Espeak, rate: 120, voice: None };
        let command = synth.build_command("one two");
        let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["-s", "120", "one two"]);
    }

    #[test]
    fn test_custom_engine_gets_only_the_text() {
        let synth = Synthesizer { program: PathBuf::from("/opt/bin/my-tts"), engine: Engine::Other, rate: 150, voice: None };
        let command = synth.build_command("result is 42");
        let args: Vec<String> = command.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args, vec!["result is 42"]);
    }
}
