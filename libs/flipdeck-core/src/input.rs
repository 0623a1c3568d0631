//! Input listeners and their lifecycle.
//!
//! An [`InputSurface`] delivers input events to registered handlers. A
//! [`ListenerBinding`] remembers every handler it attached so the whole set
//! can be detached in one step when its session is replaced.

use std::fmt;

/// Default minimum horizontal travel, in input units, for a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Keyboard,
    Pointer,
    Touch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Char(char),
}

/// Clickable parts of the card display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Card,
    PreviousButton,
    NextButton,
    AudioButton,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    Click(Target),
    /// Horizontal screen coordinate where a touch began.
    TouchStart { x: f64 },
    /// Horizontal screen coordinate where a touch ended.
    TouchEnd { x: f64 },
}

impl InputEvent {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Key(_) => Channel::Keyboard,
            Self::Click(_) => Channel::Pointer,
            Self::TouchStart { .. } | Self::TouchEnd { .. } => Channel::Touch,
        }
    }
}

/// Whether a handler consumed the event. `Stop` suppresses the surface's
/// default action for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

pub type Handler = Box<dyn FnMut(&InputEvent) -> Propagation>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that accepts input handlers and delivers events to them.
pub trait InputSurface {
    fn attach(&mut self, channel: Channel, handler: Handler) -> ListenerId;

    /// Remove a handler. Returns false if it was not attached.
    fn detach(&mut self, id: ListenerId) -> bool;

    /// Deliver an event to every handler on its channel, in attach order.
    fn dispatch(&mut self, event: &InputEvent) -> Propagation;
}

struct Listener {
    id: ListenerId,
    channel: Channel,
    handler: Handler,
}

/// In-memory input surface.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.listeners.iter().filter(|l| l.channel == channel).count()
    }
}

impl InputSurface for ListenerRegistry {
    fn attach(&mut self, channel: Channel, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            channel,
            handler,
        });
        id
    }

    fn detach(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    fn dispatch(&mut self, event: &InputEvent) -> Propagation {
        let channel = event.channel();
        let mut result = Propagation::Continue;
        for listener in self.listeners.iter_mut().filter(|l| l.channel == channel) {
            if (listener.handler)(event) == Propagation::Stop {
                result = Propagation::Stop;
            }
        }
        result
    }
}

/// The set of handlers attached on behalf of one session.
#[must_use = "a binding must be destroyed to detach its handlers"]
#[derive(Debug, Default)]
pub struct ListenerBinding {
    ids: Vec<ListenerId>,
}

impl ListenerBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(
        &mut self,
        surface: &mut dyn InputSurface,
        channel: Channel,
        handler: Handler,
    ) -> ListenerId {
        let id = surface.attach(channel, handler);
        self.ids.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Detach every handler, newest first. Consumes the binding.
    pub fn destroy(mut self, surface: &mut dyn InputSurface) {
        for id in self.ids.drain(..).rev() {
            if !surface.detach(id) {
                tracing::warn!(listener = %id, "listener was already detached");
            }
        }
    }
}

impl Drop for ListenerBinding {
    fn drop(&mut self) {
        if !self.ids.is_empty() {
            tracing::warn!(
                count = self.ids.len(),
                "listener binding dropped without destroy"
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: advance.
    Left,
    /// Finger moved right: go back.
    Right,
}

/// Turns touch start/end coordinates into swipes.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish a touch. Travel must strictly exceed the threshold.
    pub fn touch_end(&mut self, x: f64) -> Option<Swipe> {
        let start = self.start_x.take()?;
        let diff = start - x;
        if diff.abs() <= self.threshold {
            return None;
        }
        if diff > 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD)
    }
}
