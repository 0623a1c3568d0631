//! Best-effort pronunciation playback.

/// Language every utterance is spoken in.
pub const SPEECH_LANGUAGE: &str = "en-US";
/// Slightly slower than normal speech.
pub const SPEECH_RATE: f32 = 0.9;
pub const SPEECH_PITCH: f32 = 1.0;

/// One request to speak.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub language: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: SPEECH_LANGUAGE,
            rate: SPEECH_RATE,
            pitch: SPEECH_PITCH,
        }
    }
}

/// A text-to-speech backend.
///
/// `speak` is fire-and-forget: implementations log their own failures.
pub trait SpeechEngine {
    fn is_available(&self) -> bool;

    /// Stop whatever is being spoken, if anything.
    fn cancel(&mut self);

    fn speak(&mut self, utterance: &Utterance);
}

/// Engine for environments without speech.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSpeech;

impl SpeechEngine for NoSpeech {
    fn is_available(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}

    fn speak(&mut self, _utterance: &Utterance) {}
}

/// Speaks card text, the latest request always winning.
pub struct AudioCue {
    engine: Box<dyn SpeechEngine>,
}

impl AudioCue {
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self { engine }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_available()
    }

    /// Cancel anything in flight and speak `text`. Empty text is ignored.
    pub fn speak(&mut self, text: &str) {
        if text.is_empty() || !self.engine.is_available() {
            return;
        }
        self.engine.cancel();
        self.engine.speak(&Utterance::new(text));
    }
}
