//! Rendering contract between the core and whatever draws the cards.

use crate::session::Session;

/// Text shown on the card while no real card is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Loading,
    TransportFailure,
    EmptyDataset,
}

impl Placeholder {
    pub fn front(self) -> &'static str {
        match self {
            Self::Loading => "Loading cards…",
            Self::TransportFailure => "Could not load cards",
            Self::EmptyDataset => "This set has no cards",
        }
    }

    pub fn back(self) -> &'static str {
        match self {
            Self::Loading => "Please wait",
            Self::TransportFailure => "(check the source location)",
            Self::EmptyDataset => "(choose another set)",
        }
    }
}

/// The drawing surface for the card display.
pub trait Screen {
    fn set_card_text(&mut self, front: &str, back: &str);

    fn set_flipped(&mut self, flipped: bool);

    fn set_counter(&mut self, label: &str);

    /// Enable or disable the previous, next and audio controls.
    fn set_controls_enabled(&mut self, enabled: bool);

    fn set_audio_visible(&mut self, visible: bool);

    fn show_placeholder(&mut self, placeholder: Placeholder) {
        self.set_card_text(placeholder.front(), placeholder.back());
        self.set_flipped(false);
    }
}

/// Counter label for the current card.
pub fn counter_label(session: &Session) -> String {
    format!("Card {}", session.position())
}

/// Push the session's current state to the screen.
pub fn present(session: &Session, screen: &mut dyn Screen) {
    let card = session.current_card();
    screen.set_card_text(&card.front, &card.back);
    screen.set_flipped(session.is_flipped());
    screen.set_counter(&counter_label(session));
    screen.set_controls_enabled(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::assemble_cards;
    use crate::types::RawPair;

    #[derive(Default)]
    struct Recorded {
        front: String,
        back: String,
        flipped: bool,
        counter: String,
        enabled: bool,
    }

    impl Screen for Recorded {
        fn set_card_text(&mut self, front: &str, back: &str) {
            self.front = front.to_string();
            self.back = back.to_string();
        }
        fn set_flipped(&mut self, flipped: bool) {
            self.flipped = flipped;
        }
        fn set_counter(&mut self, label: &str) {
            self.counter = label.to_string();
        }
        fn set_controls_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn set_audio_visible(&mut self, _visible: bool) {}
    }

    #[test]
    fn present_writes_card_counter_and_enables_controls() {
        let cards = assemble_cards(
            vec![RawPair::new("hiša", "house"), RawPair::new("pes", "dog")],
            [true, true],
        );
        let mut session = Session::new(cards).unwrap();
        session.next();
        session.flip();

        let mut screen = Recorded::default();
        present(&session, &mut screen);
        assert_eq!(screen.front, "pes");
        assert_eq!(screen.back, "dog");
        assert!(screen.flipped);
        assert_eq!(screen.counter, "Card 2 of 2");
        assert!(screen.enabled);
    }

    #[test]
    fn placeholders_have_distinct_messages() {
        assert_ne!(
            Placeholder::TransportFailure.front(),
            Placeholder::EmptyDataset.front()
        );

        let mut screen = Recorded {
            flipped: true,
            ..Default::default()
        };
        screen.show_placeholder(Placeholder::Loading);
        assert_eq!(screen.front, "Loading cards…");
        assert!(!screen.flipped);
    }
}
