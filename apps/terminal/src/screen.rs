//! Terminal rendering of the card display.

use flipdeck_core::Screen;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Clickable regions recorded on the last draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Card,
    Previous,
    Flip,
    Next,
    Audio,
    Reload,
    Dataset(usize),
}

#[derive(Debug)]
pub struct TerminalScreen {
    front: String,
    back: String,
    flipped: bool,
    counter: String,
    controls_enabled: bool,
    audio_visible: bool,
    datasets: Vec<String>,
    selected: usize,
    status: String,
    hits: Vec<(Rect, Hit)>,
}

impl TerminalScreen {
    pub fn new(datasets: Vec<String>, selected: usize) -> Self {
        Self {
            front: String::new(),
            back: String::new(),
            flipped: false,
            counter: String::new(),
            controls_enabled: false,
            audio_visible: false,
            datasets,
            selected,
            status: String::new(),
            hits: Vec::new(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        if index < self.datasets.len() {
            self.selected = index;
        }
    }

    /// Move the selection by `step`, wrapping at both ends.
    pub fn cycle(&mut self, step: isize) -> usize {
        let len = self.datasets.len() as isize;
        if len > 0 {
            self.selected = (self.selected as isize + step).rem_euclid(len) as usize;
        }
        self.selected
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    pub fn counter(&self) -> &str {
        &self.counter
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn audio_visible(&self) -> bool {
        self.audio_visible
    }

    /// Text currently facing the user.
    pub fn visible_text(&self) -> &str {
        if self.flipped {
            &self.back
        } else {
            &self.front
        }
    }

    /// The region under a terminal cell, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        let position = Position::new(column, row);
        self.hits
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, hit)| *hit)
    }

    /// Whether clicking `hit` should do anything right now.
    pub fn is_enabled(&self, hit: Hit) -> bool {
        match hit {
            Hit::Previous | Hit::Next => self.controls_enabled,
            Hit::Audio => self.controls_enabled && self.audio_visible,
            Hit::Card | Hit::Flip | Hit::Reload | Hit::Dataset(_) => true,
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.hits.clear();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.draw_datasets(frame, chunks[0]);
        self.draw_card(frame, chunks[1]);

        frame.render_widget(
            Paragraph::new(self.counter.as_str()).alignment(Alignment::Center),
            chunks[2],
        );

        self.draw_buttons(frame, chunks[3]);

        let help = if self.status.is_empty() {
            "←/→ move  space flip  s speak  tab set  r reload  q quit".to_string()
        } else {
            self.status.clone()
        };
        frame.render_widget(
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
            chunks[4],
        );
    }

    fn draw_datasets(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Sets ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = Vec::new();
        let mut x = inner.x;
        for (i, name) in self.datasets.iter().enumerate() {
            let label = format!(" {} ", name);
            let width = label.chars().count() as u16;
            let style = if i == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let visible = width.min(inner.right().saturating_sub(x));
            if visible > 0 {
                self.hits
                    .push((Rect::new(x, inner.y, visible, 1), Hit::Dataset(i)));
            }
            x = x.saturating_add(width + 1);

            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), inner);
    }

    fn draw_card(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.flipped { " Back " } else { " Front " };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(if self.flipped {
                Color::Yellow
            } else {
                Color::Cyan
            }));
        let inner = block.inner(area);

        let padding = inner.height.saturating_sub(1) / 2;
        let mut lines: Vec<Line> = (0..padding).map(|_| Line::raw("")).collect();
        lines.push(Line::styled(
            self.visible_text().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ));

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
        self.hits.push((area, Hit::Card));
    }

    fn draw_buttons(&mut self, frame: &mut Frame, area: Rect) {
        let mut buttons = vec![
            (Hit::Previous, "◀ Prev"),
            (Hit::Flip, "Flip"),
            (Hit::Next, "Next ▶"),
        ];
        if self.audio_visible {
            buttons.push((Hit::Audio, "♪ Audio"));
        }
        buttons.push((Hit::Reload, "⟳ Reload"));

        let constraints: Vec<Constraint> = buttons
            .iter()
            .map(|_| Constraint::Ratio(1, buttons.len() as u32))
            .collect();
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for ((hit, label), cell) in buttons.into_iter().zip(cells.iter()) {
            let style = if self.is_enabled(hit) {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(Block::default().borders(Borders::ALL).border_style(style)),
                *cell,
            );
            self.hits.push((*cell, hit));
        }
    }
}

impl Screen for TerminalScreen {
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
        self.controls_enabled = enabled;
    }

    fn set_audio_visible(&mut self, visible: bool) {
        self.audio_visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdeck_core::Placeholder;
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(screen: &mut TerminalScreen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| screen.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn screen() -> TerminalScreen {
        TerminalScreen::new(vec!["Unit 1".to_string(), "Unit 2".to_string()], 0)
    }

    #[test]
    fn shows_front_then_back() {
        let mut screen = screen();
        screen.set_card_text("hiša", "house");
        assert!(rendered(&mut screen).contains("hiša"));

        screen.set_flipped(true);
        let text = rendered(&mut screen);
        assert!(text.contains("house"));
        assert!(!text.contains("hiša"));
    }

    #[test]
    fn placeholder_is_drawn() {
        let mut screen = screen();
        screen.show_placeholder(Placeholder::EmptyDataset);
        assert!(rendered(&mut screen).contains("This set has no cards"));
    }

    #[test]
    fn hit_areas_follow_layout() {
        let mut screen = screen();
        rendered(&mut screen);

        assert_eq!(screen.hit(40, 8), Some(Hit::Card));
        // First dataset label starts just inside the border.
        assert_eq!(screen.hit(2, 1), Some(Hit::Dataset(0)));
        // Button row sits above the status line; four buttons of 20 columns.
        assert_eq!(screen.hit(5, 17), Some(Hit::Previous));
        assert_eq!(screen.hit(70, 17), Some(Hit::Reload));
        assert_eq!(screen.hit(40, 19), None);
    }

    #[test]
    fn audio_button_only_when_visible() {
        let mut screen = screen();
        assert!(!rendered(&mut screen).contains("Audio"));

        screen.set_audio_visible(true);
        assert!(rendered(&mut screen).contains("Audio"));
        assert_eq!(screen.hit(60, 17), Some(Hit::Audio));
    }

    #[test]
    fn disabled_controls() {
        let mut screen = screen();
        screen.set_audio_visible(true);
        assert!(!screen.is_enabled(Hit::Next));
        assert!(!screen.is_enabled(Hit::Audio));
        assert!(screen.is_enabled(Hit::Card));
        assert!(screen.is_enabled(Hit::Reload));

        screen.set_controls_enabled(true);
        assert!(screen.is_enabled(Hit::Previous));
        assert!(screen.is_enabled(Hit::Audio));
    }

    #[test]
    fn cycle_wraps() {
        let mut screen = screen();
        assert_eq!(screen.cycle(-1), 1);
        assert_eq!(screen.cycle(1), 0);
        assert_eq!(screen.cycle(3), 1);
    }
}
