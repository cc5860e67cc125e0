//! Scrollback lines
//!
//! A committed line never changes. The one exception is the line being
//! typed out, which is kept as a `Revealing` variant holding the full
//! target text and how much of it is visible. Readers only ever see the
//! projected prefix.

use std::time::{SystemTime, UNIX_EPOCH};

/// Render category of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Echoed command (`$ ...`)
    Input,
    /// Command response
    Output,
    /// Unknown command report
    Error,
}

/// Line body
#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Static(String),
    Revealing {
        target: String,
        /// Revealed length in chars
        revealed: usize,
        /// Byte offset of the revealed prefix end
        end: usize,
    },
}

/// A single scrollback line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    kind: LineKind,
    body: Body,
    /// Milliseconds since the Unix epoch
    created_at: u64,
}

impl Line {
    /// Create a finished line
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            body: Body::Static(text.into()),
            created_at: now_millis(),
        }
    }

    /// Create an output line that starts empty and reveals `target` over time
    pub fn revealing(target: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            body: Body::Revealing {
                target: target.into(),
                revealed: 0,
                end: 0,
            },
            created_at: now_millis(),
        }
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Currently visible text
    pub fn text(&self) -> &str {
        match &self.body {
            Body::Static(text) => text,
            Body::Revealing { target, end, .. } => &target[..*end],
        }
    }

    /// Whether the line is still being typed out
    #[allow(dead_code)]
    pub fn is_revealing(&self) -> bool {
        matches!(self.body, Body::Revealing { .. })
    }

    /// `(revealed, total)` in chars, `None` for finished lines
    pub fn progress(&self) -> Option<(usize, usize)> {
        match &self.body {
            Body::Static(_) => None,
            Body::Revealing {
                target, revealed, ..
            } => Some((*revealed, target.chars().count())),
        }
    }

    /// Reveal one more char.
    ///
    /// Returns `true` once the whole target is visible; the line is then
    /// frozen and further calls are no-ops returning `true`.
    pub fn advance(&mut self) -> bool {
        let Body::Revealing {
            target,
            revealed,
            end,
        } = &mut self.body
        else {
            return true;
        };

        if let Some(ch) = target[*end..].chars().next() {
            *end += ch.len_utf8();
            *revealed += 1;
        }

        if *end < target.len() {
            return false;
        }

        let text = std::mem::take(target);
        self.body = Body::Static(text);
        true
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
