//! Owner of the active session and the reload procedure.
//!
//! The viewer is the only thing allowed to swap sessions. Replacing a session
//! destroys the old listener binding before the new session's handlers are
//! attached, so input never reaches a superseded session. Reloads are tagged
//! with a generation; only the most recently started reload may install its
//! result.

use crate::audio::AudioCue;
use crate::error::{LoadError, Result};
use crate::input::{
    Channel, InputEvent, InputSurface, Key, ListenerBinding, Propagation, Swipe, SwipeTracker,
    Target, SWIPE_THRESHOLD,
};
use crate::preference::PreferenceStore;
use crate::screen::{counter_label, present, Placeholder, Screen};
use crate::session::Session;
use crate::types::{Card, DatasetDescriptor};
use std::cell::RefCell;
use std::rc::Rc;

pub type SharedScreen = Rc<RefCell<dyn Screen>>;

/// Handed out by [`Viewer::begin_reload`] and returned with the load result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadTicket {
    generation: u64,
    dataset_id: String,
}

impl ReloadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }
}

#[derive(Debug)]
pub enum ReloadOutcome {
    /// A new session is active.
    Installed { cards: usize },
    /// The load failed; the previous session, if any, is still active.
    ///
    /// The card area shows the error placeholder, front side up, until the
    /// next input re-presents the bound session. The counter keeps tracking
    /// the bound session.
    Failed(LoadError),
    /// A newer reload was started after this one. Nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Previous,
    Flip,
    Speak,
}

/// What a session's handlers hold on to.
#[derive(Clone)]
struct SessionContext {
    session: Rc<RefCell<Session>>,
    screen: SharedScreen,
    audio: Rc<RefCell<AudioCue>>,
}

impl SessionContext {
    fn apply(&self, action: Action) {
        let mut session = self.session.borrow_mut();
        match action {
            Action::Next => session.next(),
            Action::Previous => session.previous(),
            Action::Flip => session.flip(),
            Action::Speak => {
                let text = session.current_card().canonical_text.clone();
                self.audio.borrow_mut().speak(&text);
                return;
            }
        }
        present(&session, &mut *self.screen.borrow_mut());
    }
}

fn bind_session(
    surface: &mut dyn InputSurface,
    ctx: &SessionContext,
    swipe_threshold: f64,
    with_audio: bool,
) -> ListenerBinding {
    let mut binding = ListenerBinding::new();

    let keys = ctx.clone();
    binding.attach(
        surface,
        Channel::Keyboard,
        Box::new(move |event: &InputEvent| {
            let action = match event {
                InputEvent::Key(Key::ArrowLeft) => Action::Previous,
                InputEvent::Key(Key::ArrowRight) => Action::Next,
                InputEvent::Key(Key::Space) => Action::Flip,
                _ => return Propagation::Continue,
            };
            keys.apply(action);
            Propagation::Stop
        }),
    );

    let clicks = ctx.clone();
    binding.attach(
        surface,
        Channel::Pointer,
        Box::new(move |event: &InputEvent| {
            let action = match event {
                InputEvent::Click(Target::Card) => Action::Flip,
                InputEvent::Click(Target::PreviousButton) => Action::Previous,
                InputEvent::Click(Target::NextButton) => Action::Next,
                _ => return Propagation::Continue,
            };
            clicks.apply(action);
            Propagation::Stop
        }),
    );

    if with_audio {
        let speech = ctx.clone();
        binding.attach(
            surface,
            Channel::Pointer,
            Box::new(move |event: &InputEvent| match event {
                InputEvent::Click(Target::AudioButton) => {
                    speech.apply(Action::Speak);
                    Propagation::Stop
                }
                _ => Propagation::Continue,
            }),
        );
    }

    let swipes = ctx.clone();
    let mut tracker = SwipeTracker::new(swipe_threshold);
    binding.attach(
        surface,
        Channel::Touch,
        Box::new(move |event: &InputEvent| {
            match *event {
                InputEvent::TouchStart { x } => tracker.touch_start(x),
                InputEvent::TouchEnd { x } => match tracker.touch_end(x) {
                    Some(Swipe::Left) => swipes.apply(Action::Next),
                    Some(Swipe::Right) => swipes.apply(Action::Previous),
                    None => {}
                },
                _ => {}
            }
            Propagation::Continue
        }),
    );

    binding
}

struct ActiveSession {
    session: Rc<RefCell<Session>>,
    binding: ListenerBinding,
    dataset_id: String,
}

/// Owns the one active session and its input binding.
pub struct Viewer<S> {
    surface: S,
    screen: SharedScreen,
    audio: Rc<RefCell<AudioCue>>,
    preferences: Box<dyn PreferenceStore>,
    swipe_threshold: f64,
    active: Option<ActiveSession>,
    generation: u64,
    pending: Option<u64>,
}

impl<S: InputSurface> Viewer<S> {
    pub fn new(
        surface: S,
        screen: SharedScreen,
        audio: AudioCue,
        preferences: Box<dyn PreferenceStore>,
    ) -> Self {
        {
            let mut screen = screen.borrow_mut();
            screen.set_audio_visible(audio.is_available());
            screen.set_controls_enabled(false);
        }

        Self {
            surface,
            screen,
            audio: Rc::new(RefCell::new(audio)),
            preferences,
            swipe_threshold: SWIPE_THRESHOLD,
            active: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    /// Start a reload: remember the selection and show the loading state.
    ///
    /// The current session stays bound until a result is installed.
    pub fn begin_reload(&mut self, descriptor: &DatasetDescriptor) -> ReloadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);

        if let Err(e) = self.preferences.set_selected_dataset(&descriptor.id) {
            tracing::warn!(error = %e, dataset = %descriptor.id, "failed to save dataset preference");
        }

        {
            let mut screen = self.screen.borrow_mut();
            screen.set_controls_enabled(false);
            screen.show_placeholder(Placeholder::Loading);
        }

        tracing::info!(
            dataset = %descriptor.id,
            generation = self.generation,
            sources = descriptor.sources.len(),
            "reloading cards"
        );

        ReloadTicket {
            generation: self.generation,
            dataset_id: descriptor.id.clone(),
        }
    }

    /// Finish a reload started with [`begin_reload`](Self::begin_reload).
    pub fn complete_reload(&mut self, ticket: ReloadTicket, result: Result<Vec<Card>>) -> ReloadOutcome {
        if self.pending != Some(ticket.generation) {
            tracing::debug!(
                dataset = %ticket.dataset_id,
                generation = ticket.generation,
                latest = self.generation,
                "discarding stale reload"
            );
            return ReloadOutcome::Stale;
        }
        self.pending = None;

        let dataset = ticket.dataset_id;
        let session = result.and_then(|cards| {
            Session::new(cards).map_err(|_| LoadError::EmptyDataset {
                dataset: dataset.clone(),
            })
        });

        match session {
            Ok(session) => {
                let cards = session.len();
                self.replace(session, dataset.clone());
                tracing::info!(%dataset, cards, "session installed");
                ReloadOutcome::Installed { cards }
            }
            Err(error) => {
                tracing::error!(%dataset, error = %error, "failed to load cards");
                let mut screen = self.screen.borrow_mut();
                screen.show_placeholder(error.placeholder());
                if let Some(active) = &self.active {
                    screen.set_counter(&counter_label(&active.session.borrow()));
                }
                screen.set_controls_enabled(self.active.is_some());
                ReloadOutcome::Failed(error)
            }
        }
    }

    /// Tear down the active session's binding, then install and bind `session`.
    pub fn replace(&mut self, session: Session, dataset_id: impl Into<String>) {
        if let Some(previous) = self.active.take() {
            tracing::debug!(
                dataset = %previous.dataset_id,
                listeners = previous.binding.len(),
                "tearing down session"
            );
            previous.binding.destroy(&mut self.surface);
        }

        let ctx = SessionContext {
            session: Rc::new(RefCell::new(session)),
            screen: self.screen.clone(),
            audio: self.audio.clone(),
        };

        let with_audio = self.audio.borrow().is_available();
        {
            let mut screen = self.screen.borrow_mut();
            present(&ctx.session.borrow(), &mut *screen);
            screen.set_audio_visible(with_audio);
        }

        let binding = bind_session(&mut self.surface, &ctx, self.swipe_threshold, with_audio);
        self.active = Some(ActiveSession {
            session: ctx.session,
            binding,
            dataset_id: dataset_id.into(),
        });
    }

    /// Deliver an input event to whatever handlers are bound.
    pub fn dispatch(&mut self, event: &InputEvent) -> Propagation {
        self.surface.dispatch(event)
    }

    pub fn active_session(&self) -> Option<Rc<RefCell<Session>>> {
        self.active.as_ref().map(|a| a.session.clone())
    }

    pub fn active_dataset(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.dataset_id.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn audio_available(&self) -> bool {
        self.audio.borrow().is_available()
    }

    pub fn preferences(&self) -> &dyn PreferenceStore {
        self.preferences.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
