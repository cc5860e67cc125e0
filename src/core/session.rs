//! Console session
//!
//! Owns the scrollback buffer and the `Idle`/`Typing` state machine.
//! All mutation goes through [`ConsoleSession::submit`] and
//! [`ConsoleSession::tick`]; the host calls them from a single event loop
//! and re-reads [`ConsoleSession::lines`] after each one.

use tracing::{debug, trace};

use super::line::{Line, LineKind};
use super::registry::{Action, CommandRegistry};

/// Responses longer than this many chars are typed out
pub const DEFAULT_TYPING_THRESHOLD: usize = 50;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting input
    #[default]
    Idle,
    /// Revealing a long response; input is dropped
    Typing,
}

/// Read-only view of a scrollback line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineView<'a> {
    pub kind: LineKind,
    pub text: &'a str,
    #[allow(dead_code)]
    pub created_at: u64,
}

/// A console session bound to a command registry
pub struct ConsoleSession<'r> {
    registry: &'r CommandRegistry,
    lines: Vec<Line>,
    phase: Phase,
    /// Responses above this length use the typing effect
    typing_threshold: usize,
}

impl<'r> ConsoleSession<'r> {
    /// Create a session with an empty buffer
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self {
            registry,
            lines: Vec::new(),
            phase: Phase::Idle,
            typing_threshold: DEFAULT_TYPING_THRESHOLD,
        }
    }

    /// Create a session whose buffer starts with the given output lines
    pub fn with_banner<I, S>(registry: &'r CommandRegistry, banner: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut session = Self::new(registry);
        session
            .lines
            .extend(banner.into_iter().map(|text| Line::new(LineKind::Output, text)));
        session
    }

    /// Override the typing threshold
    pub fn set_typing_threshold(&mut self, threshold: usize) {
        self.typing_threshold = threshold;
    }

    #[allow(dead_code)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_typing(&self) -> bool {
        self.phase == Phase::Typing
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in chronological order, with the typing line projected
    /// down to its revealed prefix
    pub fn lines(&self) -> impl ExactSizeIterator<Item = LineView<'_>> + '_ {
        self.lines.iter().map(|line| LineView {
            kind: line.kind(),
            text: line.text(),
            created_at: line.created_at(),
        })
    }

    /// `(revealed, total)` chars of the line being typed
    pub fn reveal_progress(&self) -> Option<(usize, usize)> {
        if self.phase != Phase::Typing {
            return None;
        }
        self.lines.last().and_then(Line::progress)
    }

    /// Submit a line of input.
    ///
    /// Ignored while typing. Otherwise the input is echoed verbatim and
    /// the resolved command is applied.
    pub fn submit(&mut self, raw: &str) {
        if self.phase == Phase::Typing {
            debug!("Dropped submission while typing: {:?}", raw);
            return;
        }

        self.lines.push(Line::new(LineKind::Input, format!("$ {}", raw)));

        let registry = self.registry;
        match registry.resolve(raw) {
            Action::Clear => {
                debug!("Clearing {} lines", self.lines.len());
                self.lines.clear();
            }
            Action::NoOp => {}
            Action::Unknown => {
                let command = CommandRegistry::normalize(raw);
                debug!("Unknown command: {:?}", command);
                self.lines.push(Line::new(
                    LineKind::Error,
                    format!(
                        "Command not found: {}. Type \"help\" for available commands.",
                        command
                    ),
                ));
            }
            Action::Respond(text) => {
                let len = text.chars().count();
                if len <= self.typing_threshold {
                    self.lines.push(Line::new(LineKind::Output, text));
                } else {
                    debug!("Typing {} chars", len);
                    self.lines.push(Line::revealing(text));
                    self.phase = Phase::Typing;
                }
            }
        }
    }

    /// Advance the typing effect by one char.
    ///
    /// No-op while idle. Returns to `Idle` on the tick that reveals the
    /// last char.
    pub fn tick(&mut self) {
        if self.phase != Phase::Typing {
            return;
        }

        let done = match self.lines.last_mut() {
            Some(line) => {
                let done = line.advance();
                trace!("Reveal tick: {:?}", line.progress());
                done
            }
            None => true,
        };

        if done {
            debug!("Typing finished");
            self.phase = Phase::Idle;
        }
    }

    /// Run the typing effect to completion
    pub fn finish_typing(&mut self) {
        while self.phase == Phase::Typing {
            self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{ABOUT_TEXT, RESUME_TEXT, SKILLS_TEXT};

    fn texts(session: &ConsoleSession) -> Vec<(LineKind, String)> {
        session
            .lines()
            .map(|l| (l.kind, l.text.to_string()))
            .collect()
    }

    #[test]
    fn test_echo_invariant() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        for raw in ["whoami", "  LS ", "nope", "", "help"] {
            let before = session.len();
            session.submit(raw);
            let lines = texts(&session);
            assert_eq!(lines[before], (LineKind::Input, format!("$ {}", raw)));
            let echoes = lines[before..]
                .iter()
                .filter(|(kind, _)| *kind == LineKind::Input)
                .count();
            assert_eq!(echoes, 1);
        }
    }

    #[test]
    fn test_clear_resets() {
        let registry = CommandRegistry::builtin();
        let mut session =
            ConsoleSession::with_banner(&registry, ["Welcome", "Type \"help\""]);
        session.submit("whoami");
        session.submit("frobnicate");
        assert_eq!(session.len(), 6);

        session.submit("  CLEAR  ");
        assert!(session.is_empty());
        assert_eq!(session.phase(), Phase::Idle);

        session.submit("clear");
        assert!(session.is_empty());
    }

    #[test]
    fn test_short_response() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        session.submit("whoami");
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(
            texts(&session),
            vec![
                (LineKind::Input, "$ whoami".to_string()),
                (LineKind::Output, "james@flyingrobots.dev".to_string()),
            ]
        );
    }

    #[test]
    fn test_reveal_monotonic() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);
        let target: Vec<char> = ABOUT_TEXT.chars().collect();

        session.submit("about");
        assert_eq!(session.len(), 2);

        for k in 0..=target.len() {
            let expected: String = target[..k].iter().collect();
            let last = session.lines().last().unwrap();
            assert_eq!(last.kind, LineKind::Output);
            assert_eq!(last.text, expected);

            if k < target.len() {
                assert_eq!(session.phase(), Phase::Typing);
                assert_eq!(session.reveal_progress(), Some((k, target.len())));
                session.tick();
            } else {
                assert_eq!(session.phase(), Phase::Idle);
                assert_eq!(session.reveal_progress(), None);
            }
        }

        // Extra ticks after completion change nothing
        session.tick();
        assert_eq!(session.lines().last().unwrap().text, ABOUT_TEXT);
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_unknown_command() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        session.submit("Frobnicate");
        let lines = texts(&session);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], (LineKind::Input, "$ Frobnicate".to_string()));
        assert_eq!(lines[1].0, LineKind::Error);
        assert_eq!(
            lines[1].1,
            "Command not found: frobnicate. Type \"help\" for available commands."
        );
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_drop_while_typing() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        session.submit("cat resume.txt");
        session.tick();
        session.tick();
        let before = texts(&session);

        session.submit("help");
        session.submit("clear");
        assert_eq!(texts(&session), before);
        assert_eq!(session.phase(), Phase::Typing);

        // Nothing was queued
        session.finish_typing();
        assert_eq!(session.len(), 2);
        assert_eq!(session.lines().last().unwrap().text, RESUME_TEXT);
    }

    #[test]
    fn test_empty_input() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        session.submit("");
        assert_eq!(texts(&session), vec![(LineKind::Input, "$ ".to_string())]);

        session.submit("   ");
        assert_eq!(session.len(), 2);
        assert_eq!(session.lines().last().unwrap().text, "$    ");
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_skills_then_clear() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);

        session.submit("skills");
        assert_eq!(session.len(), 2);
        assert_eq!(session.lines().last().unwrap().text, "");
        assert!(session.is_typing());

        for _ in 0..SKILLS_TEXT.chars().count() {
            session.tick();
        }
        assert_eq!(session.lines().last().unwrap().text, SKILLS_TEXT);
        assert_eq!(session.phase(), Phase::Idle);

        session.submit("clear");
        assert_eq!(session.len(), 0);
    }

    #[test]
    fn test_custom_threshold() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::new(&registry);
        session.set_typing_threshold(5);

        session.submit("whoami");
        assert!(session.is_typing());
        session.finish_typing();
        assert_eq!(session.lines().last().unwrap().text, "james@flyingrobots.dev");

        session.set_typing_threshold(usize::MAX);
        session.submit("about");
        assert!(!session.is_typing());
        assert_eq!(session.lines().last().unwrap().text, ABOUT_TEXT);
    }

    #[test]
    fn test_tick_while_idle() {
        let registry = CommandRegistry::builtin();
        let mut session = ConsoleSession::with_banner(&registry, ["hi"]);
        session.tick();
        assert_eq!(texts(&session), vec![(LineKind::Output, "hi".to_string())]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let registry = CommandRegistry::builtin();
        let mut a = ConsoleSession::new(&registry);
        let mut b = ConsoleSession::new(&registry);

        a.submit("about");
        b.submit("whoami");
        assert!(a.is_typing());
        assert!(!b.is_typing());
        assert_eq!(b.len(), 2);
    }
}
