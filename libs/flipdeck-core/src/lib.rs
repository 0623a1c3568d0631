//! Core study-card library used by the flipdeck front ends.
//!
//! Provides:
//! - Dataset loading with field-name normalization (single and composite sources)
//! - Fisher–Yates shuffling and per-card direction assignment
//! - The navigation session (next, previous, flip with wraparound)
//! - Input listener lifecycle bound to exactly one live session
//! - Best-effort audio cue and the rendering contract

pub mod audio;
pub mod error;
pub mod factory;
pub mod input;
pub mod loader;
pub mod normalize;
pub mod preference;
pub mod screen;
pub mod session;
pub mod shuffle;
pub mod types;
pub mod viewer;

pub use audio::{AudioCue, NoSpeech, SpeechEngine, Utterance};
pub use error::{CatalogError, FetchError, LoadError, PreferenceError, Result, SessionError};
pub use factory::{assemble_cards, build_cards};
pub use input::{
    Channel, InputEvent, InputSurface, Key, ListenerBinding, ListenerRegistry, Propagation,
    SwipeTracker, Target,
};
pub use loader::{CardSetLoader, Fetch};
pub use normalize::{BlankRecords, FieldAliases};
pub use preference::{MemoryPreferences, PreferenceStore};
pub use screen::{Placeholder, Screen};
pub use session::{Position, Session};
pub use shuffle::{shuffle, shuffled};
pub use types::{Card, DatasetCatalog, DatasetDescriptor, InitialSelection, Locator, RawPair};
pub use viewer::{ReloadOutcome, ReloadTicket, Viewer};
