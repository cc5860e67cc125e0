//! Interactive console host
//!
//! Glues the prompt, command recall and the typing ticker to a
//! [`ConsoleSession`]. Everything here is driven by explicit calls with
//! an explicit `now`, so the event loop in `main` stays a thin adapter
//! over crossterm.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::core::registry::CommandRegistry;
use crate::core::session::ConsoleSession;
use crate::core::ticker::Ticker;
use crate::history::CommandHistory;
use crate::ui::{InputAction, InputField};

/// Poll timeout while nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(250);

/// What the event loop should do after an input action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed
    None,
    /// Only the prompt changed
    Redraw,
    /// The scrollback changed; snap to the newest row
    BufferChanged,
    ScrollUp,
    ScrollDown,
    Quit,
}

pub struct App<'r> {
    registry: &'r CommandRegistry,
    pub session: ConsoleSession<'r>,
    pub input: InputField,
    history: CommandHistory,
    ticker: Ticker,
}

impl<'r> App<'r> {
    pub fn new(
        registry: &'r CommandRegistry,
        session: ConsoleSession<'r>,
        history: CommandHistory,
        ticker: Ticker,
    ) -> Self {
        Self {
            registry,
            session,
            input: InputField::new(),
            history,
            ticker,
        }
    }

    /// Apply a key action
    pub fn handle(&mut self, action: InputAction, now: Instant) -> Outcome {
        let passthrough = matches!(
            action,
            InputAction::Quit | InputAction::ScrollUp | InputAction::ScrollDown
        );
        // The prompt is hidden while typing
        if self.session.is_typing() && !passthrough {
            return Outcome::None;
        }

        match action {
            InputAction::Quit => return Outcome::Quit,
            InputAction::ScrollUp => return Outcome::ScrollUp,
            InputAction::ScrollDown => return Outcome::ScrollDown,
            InputAction::Insert(ch) => self.input.insert(ch),
            InputAction::Backspace => self.input.backspace(),
            InputAction::Delete => self.input.delete(),
            InputAction::Left => self.input.move_left(),
            InputAction::Right => self.input.move_right(),
            InputAction::Home => self.input.move_home(),
            InputAction::End => self.input.move_end(),
            InputAction::ClearLine => self.input.clear(),
            InputAction::HistoryPrev => {
                let current = self.input.text().to_string();
                match self.history.previous(&current) {
                    Some(command) => self.input.set(command),
                    None => return Outcome::None,
                }
            }
            InputAction::HistoryNext => match self.history.next() {
                Some(command) => self.input.set(command),
                None => return Outcome::None,
            },
            InputAction::Complete => return self.complete(),
            InputAction::Submit => return self.submit(now),
        }
        Outcome::Redraw
    }

    /// Insert pasted text at the cursor
    pub fn paste(&mut self, text: &str) -> Outcome {
        if self.session.is_typing() {
            return Outcome::None;
        }
        self.input.insert_str(text);
        Outcome::Redraw
    }

    fn submit(&mut self, now: Instant) -> Outcome {
        // Blank prompts are not submitted
        if self.input.text().trim().is_empty() {
            return Outcome::None;
        }

        let command = self.input.take();
        self.history.add(&command);
        self.session.submit(&command);

        if self.session.is_typing() {
            self.ticker.arm(now);
        }
        Outcome::BufferChanged
    }

    fn complete(&mut self) -> Outcome {
        let registry = self.registry;
        let matches = registry.complete(self.input.text());
        let Some(first) = matches.first() else {
            return Outcome::None;
        };

        // Extend to the longest prefix shared by every match
        let mut common: &str = first;
        for candidate in &matches[1..] {
            let shared = common
                .char_indices()
                .zip(candidate.chars())
                .find(|((_, a), b)| a != b)
                .map(|((i, _), _)| i)
                .unwrap_or_else(|| common.len().min(candidate.len()));
            common = &common[..shared];
        }

        debug!("Completion {:?} -> {:?}", self.input.text(), matches);
        if common.len() <= self.input.text().trim_start().len() {
            return Outcome::None;
        }
        self.input.set(common);
        Outcome::Redraw
    }

    /// Feed due ticks to the session. Returns `true` if the buffer changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let due = self.ticker.due(now);
        for _ in 0..due {
            if !self.session.is_typing() {
                break;
            }
            self.session.tick();
        }
        if !self.session.is_typing() {
            self.ticker.cancel();
        }
        due > 0
    }

    /// How long the event loop may block waiting for input
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker
            .timeout(now)
            .map_or(IDLE_POLL, |t| t.min(IDLE_POLL))
    }
}
