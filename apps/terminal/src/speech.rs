//! Speech through an external text-to-speech program.

use crate::config::SpeechSetting;
use flipdeck_core::{SpeechEngine, Utterance};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Programs searched for on PATH, in order.
const CANDIDATES: [&str; 3] = ["espeak-ng", "espeak", "say"];

/// Speaking rate the programs treat as 1.0, in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 180.0;

/// Pitch the espeak family treats as normal (range 0 to 99).
const ESPEAK_BASE_PITCH: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flavor {
    Espeak,
    Say,
}

impl Flavor {
    fn of(program: &Path) -> Self {
        match program.file_stem().and_then(|s| s.to_str()) {
            Some("say") => Self::Say,
            _ => Self::Espeak,
        }
    }

    fn args(self, utterance: &Utterance) -> Vec<String> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * utterance.rate).round() as u32;
        match self {
            Self::Espeak => {
                let pitch = (ESPEAK_BASE_PITCH * utterance.pitch).round().clamp(0.0, 99.0) as u32;
                vec![
                    "-v".to_string(),
                    utterance.language.to_lowercase(),
                    "-s".to_string(),
                    words_per_minute.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    "--".to_string(),
                    utterance.text.clone(),
                ]
            }
            Self::Say => vec![
                "-r".to_string(),
                words_per_minute.to_string(),
                "--".to_string(),
                utterance.text.clone(),
            ],
        }
    }
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// Runs one child process per utterance. Cancelling kills the child that
/// is still speaking.
pub struct CommandSpeech {
    program: Option<PathBuf>,
    flavor: Flavor,
    current: Option<Child>,
}

impl CommandSpeech {
    pub fn from_setting(setting: &SpeechSetting) -> Self {
        let program = match setting {
            SpeechSetting::Off => None,
            SpeechSetting::Program(name) => {
                let found = find_on_path(name);
                if found.is_none() {
                    tracing::warn!(program = %name, "configured speech program not found");
                }
                found
            }
            SpeechSetting::Auto => CANDIDATES.iter().find_map(|name| find_on_path(name)),
        };

        match &program {
            Some(path) => tracing::info!(program = %path.display(), "speech enabled"),
            None => tracing::info!("speech unavailable"),
        }

        Self::with_program(program)
    }

    fn with_program(program: Option<PathBuf>) -> Self {
        let flavor = program
            .as_deref()
            .map(Flavor::of)
            .unwrap_or(Flavor::Espeak);
        Self {
            program,
            flavor,
            current: None,
        }
    }
}

impl SpeechEngine for CommandSpeech {
    fn is_available(&self) -> bool {
        self.program.is_some()
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                if let Err(e) = child.kill() {
                    tracing::debug!(error = %e, "failed to stop speech");
                }
            }
            // Reap the child.
            let _ = child.wait();
        }
    }

    fn speak(&mut self, utterance: &Utterance) {
        let Some(program) = &self.program else {
            return;
        };

        let spawned = Command::new(program)
            .args(self.flavor.args(utterance))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => self.current = Some(child),
            Err(e) => tracing::warn!(program = %program.display(), error = %e, "failed to start speech"),
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn espeak_arguments_follow_utterance() {
        let args = Flavor::Espeak.args(&Utterance::new("house"));
        assert_eq!(
            args,
            vec!["-v", "en-us", "-s", "162", "-p", "50", "--", "house"]
        );
    }

    #[test]
    fn say_arguments_follow_utterance() {
        let args = Flavor::Say.args(&Utterance::new("good morning"));
        assert_eq!(args, vec!["-r", "162", "--", "good morning"]);
    }

    #[test]
    fn flavor_from_program_name() {
        assert_eq!(Flavor::of(Path::new("/usr/bin/say")), Flavor::Say);
        assert_eq!(Flavor::of(Path::new("/usr/bin/espeak-ng")), Flavor::Espeak);
    }

    #[test]
    fn off_is_unavailable() {
        let speech = CommandSpeech::from_setting(&SpeechSetting::Off);
        assert!(!speech.is_available());
    }

    #[test]
    fn missing_program_is_unavailable() {
        let speech = CommandSpeech::from_setting(&SpeechSetting::Program(
            "definitely-not-a-speech-program".to_string(),
        ));
        assert!(!speech.is_available());
    }

    #[test]
    fn speak_without_program_is_silent() {
        let mut speech = CommandSpeech::with_program(None);
        speech.speak(&Utterance::new("house"));
        assert!(speech.current.is_none());
        speech.cancel();
    }
}
