//! Translating terminal events into viewer input and app commands.

use crate::screen::{Hit, TerminalScreen};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use flipdeck_core::{InputEvent, Key, Target};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Deliver to the viewer's listeners.
    Input(InputEvent),
    Reload,
    CycleDataset(isize),
    SelectDataset(usize),
    Redraw,
    Quit,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    column: u16,
    hit: Option<Hit>,
}

/// Stateful translator; remembers where the mouse button went down.
#[derive(Debug)]
pub struct EventTranslator {
    threshold: f64,
    press: Option<Press>,
}

impl EventTranslator {
    /// `threshold` is the swipe threshold in columns. A card press that
    /// travels no further than this is a click.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            press: None,
        }
    }

    pub fn translate(&mut self, event: &Event, screen: &TerminalScreen) -> Vec<Command> {
        match event {
            Event::Key(key) => translate_key(key, screen).into_iter().collect(),
            Event::Mouse(mouse) => self.translate_mouse(mouse, screen),
            Event::Resize(..) => vec![Command::Redraw],
            _ => Vec::new(),
        }
    }

    fn translate_mouse(&mut self, mouse: &MouseEvent, screen: &TerminalScreen) -> Vec<Command> {
        let hit = screen.hit(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.press = Some(Press {
                    column: mouse.column,
                    hit,
                });
                match hit {
                    Some(Hit::Card) => vec![Command::Input(InputEvent::TouchStart {
                        x: f64::from(mouse.column),
                    })],
                    _ => Vec::new(),
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(press) = self.press.take() else {
                    return Vec::new();
                };

                if press.hit == Some(Hit::Card) {
                    let mut commands = vec![Command::Input(InputEvent::TouchEnd {
                        x: f64::from(mouse.column),
                    })];
                    let travel = (f64::from(mouse.column) - f64::from(press.column)).abs();
                    if hit == Some(Hit::Card) && travel <= self.threshold {
                        commands.push(Command::Input(InputEvent::Click(Target::Card)));
                    }
                    return commands;
                }

                match (press.hit, hit) {
                    (Some(down), Some(up)) if down == up => click(up, screen).into_iter().collect(),
                    _ => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }
}

/// What clicking a region does. Disabled controls do nothing.
fn click(hit: Hit, screen: &TerminalScreen) -> Option<Command> {
    if !screen.is_enabled(hit) {
        return None;
    }
    let command = match hit {
        Hit::Card | Hit::Flip => Command::Input(InputEvent::Click(Target::Card)),
        Hit::Previous => Command::Input(InputEvent::Click(Target::PreviousButton)),
        Hit::Next => Command::Input(InputEvent::Click(Target::NextButton)),
        Hit::Audio => Command::Input(InputEvent::Click(Target::AudioButton)),
        Hit::Reload => Command::Reload,
        Hit::Dataset(index) => Command::SelectDataset(index),
    };
    Some(command)
}

fn translate_key(key: &KeyEvent, screen: &TerminalScreen) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Left => Some(Command::Input(InputEvent::Key(Key::ArrowLeft))),
        KeyCode::Right => Some(Command::Input(InputEvent::Key(Key::ArrowRight))),
        KeyCode::Char(' ') => Some(Command::Input(InputEvent::Key(Key::Space))),
        KeyCode::Char('s') => click(Hit::Audio, screen),
        KeyCode::Char('r') => Some(Command::Reload),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Tab => Some(Command::CycleDataset(1)),
        KeyCode::BackTab => Some(Command::CycleDataset(-1)),
        KeyCode::Char(c) => Some(Command::Input(InputEvent::Key(Key::Char(c)))),
        _ => None,
    }
}
