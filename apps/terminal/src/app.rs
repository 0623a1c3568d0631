//! The interactive loop: terminal input, background loads and drawing.

use crate::config::Config;
use crate::events::{Command, EventTranslator};
use crate::fetch::SourceFetcher;
use crate::preference::FilePreferences;
use crate::screen::TerminalScreen;
use crate::speech::CommandSpeech;
use crossterm::event::EventStream;
use flipdeck_core::{
    AudioCue, Card, CardSetLoader, DatasetCatalog, ListenerRegistry, PreferenceStore,
    ReloadOutcome, ReloadTicket, Screen, Viewer,
};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::sync::mpsc;

pub type LoadResult = (ReloadTicket, flipdeck_core::Result<Vec<Card>>);

pub struct App {
    catalog: DatasetCatalog,
    loader: Arc<CardSetLoader<SourceFetcher>>,
    viewer: Viewer<ListenerRegistry>,
    screen: Rc<RefCell<TerminalScreen>>,
    events: EventTranslator,
    auto_reload: bool,
    loads_tx: mpsc::UnboundedSender<LoadResult>,
    loads_rx: mpsc::UnboundedReceiver<LoadResult>,
}

impl App {
    pub fn new(config: &Config, catalog: DatasetCatalog) -> Self {
        let preferences = FilePreferences::open(&config.preferences_path);
        let saved = preferences.selected_dataset();
        let initial = catalog.initial_selection(saved.as_deref());
        tracing::info!(
            saved = ?saved,
            selected = initial.index,
            auto_reload = initial.auto_reload,
            "restored dataset selection"
        );

        let names = catalog.iter().map(|d| d.display_name.clone()).collect();
        let screen = Rc::new(RefCell::new(TerminalScreen::new(names, initial.index)));
        let shared: Rc<RefCell<dyn Screen>> = screen.clone();

        let audio = AudioCue::new(Box::new(CommandSpeech::from_setting(&config.speech)));
        let viewer = Viewer::new(ListenerRegistry::new(), shared, audio, Box::new(preferences))
            .with_swipe_threshold(config.swipe_threshold);

        let loader = CardSetLoader::new(SourceFetcher::new(config.source_base.clone()))
            .with_blank_records(config.blank_records);

        let (loads_tx, loads_rx) = mpsc::unbounded_channel();

        let app = Self {
            catalog,
            loader: Arc::new(loader),
            viewer,
            screen,
            events: EventTranslator::new(config.swipe_threshold),
            auto_reload: initial.auto_reload,
            loads_tx,
            loads_rx,
        };
        if !app.auto_reload {
            app.hint_selection();
        }
        app
    }

    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.start();

        let mut input = EventStream::new();
        loop {
            terminal.draw(|frame| self.screen.borrow_mut().draw(frame))?;

            tokio::select! {
                next = input.next() => match next {
                    Some(Ok(event)) => {
                        let commands = self.events.translate(&event, &self.screen.borrow());
                        if !self.apply_all(commands) {
                            break;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                _ = self.next_load() => {}
            }
        }

        tracing::info!("quitting");
        Ok(())
    }

    /// Kick off the first load if a saved selection was restored.
    pub fn start(&mut self) {
        if self.auto_reload {
            self.reload();
        }
    }

    /// Wait for the next background load to finish and hand it to the viewer.
    pub async fn next_load(&mut self) -> bool {
        match self.loads_rx.recv().await {
            Some((ticket, result)) => {
                self.finish_reload(ticket, result);
                true
            }
            None => false,
        }
    }

    /// Apply commands in order. Returns false once the user asked to quit.
    pub fn apply_all(&mut self, commands: Vec<Command>) -> bool {
        for command in commands {
            match command {
                Command::Input(event) => {
                    self.viewer.dispatch(&event);
                }
                Command::Reload => self.reload(),
                Command::CycleDataset(step) => {
                    self.screen.borrow_mut().cycle(step);
                    self.hint_selection();
                }
                Command::SelectDataset(index) => {
                    self.screen.borrow_mut().select(index);
                    self.hint_selection();
                }
                Command::Redraw => {}
                Command::Quit => return false,
            }
        }
        true
    }

    /// Start loading the selected dataset on a background task.
    fn reload(&mut self) {
        let index = self.screen.borrow().selected();
        let Some(descriptor) = self.catalog.get(index).cloned() else {
            return;
        };

        let ticket = self.viewer.begin_reload(&descriptor);
        self.screen
            .borrow_mut()
            .set_status(format!("Loading {}…", descriptor.display_name));

        let loader = self.loader.clone();
        let tx = self.loads_tx.clone();
        tokio::spawn(async move {
            let result = loader.load_cards(&descriptor).await;
            if tx.send((ticket, result)).is_err() {
                tracing::debug!(dataset = %descriptor.id, "viewer closed before load finished");
            }
        });
    }

    fn finish_reload(&mut self, ticket: ReloadTicket, result: flipdeck_core::Result<Vec<Card>>) {
        let name = self
            .catalog
            .find(ticket.dataset_id())
            .map(|d| d.display_name.clone())
            .unwrap_or_else(|| ticket.dataset_id().to_string());

        let status = match self.viewer.complete_reload(ticket, result) {
            ReloadOutcome::Installed { cards } => format!("{}: {} cards", name, cards),
            ReloadOutcome::Failed(e) => format!("{}: {}", name, e),
            ReloadOutcome::Stale => return,
        };
        self.screen.borrow_mut().set_status(status);
    }

    fn hint_selection(&self) {
        let mut screen = self.screen.borrow_mut();
        let selected = screen.selected();
        if let Some(descriptor) = self.catalog.get(selected) {
            screen.set_status(format!("{} selected, press r to load", descriptor.display_name));
        }
    }

    pub fn viewer(&self) -> &Viewer<ListenerRegistry> {
        &self.viewer
    }

    pub fn screen(&self) -> Rc<RefCell<TerminalScreen>> {
        self.screen.clone()
    }
}
