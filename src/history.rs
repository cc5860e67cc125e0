//! Command recall for termfolio
//!
//! Keeps the commands submitted in this run and lets the prompt walk back
//! and forth through them with Up/Down. Nothing is written to disk.

/// Default number of remembered commands
const HISTORY_LIMIT: usize = 100;

/// Command history with a recall cursor
pub struct CommandHistory {
    /// All entries (newest last)
    entries: Vec<String>,
    /// Maximum entries
    max_entries: usize,
    /// Index into `entries` while recalling, `None` when at the live prompt
    cursor: Option<usize>,
    /// What was typed before recall started
    draft: String,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries: max_entries.max(1),
            cursor: None,
            draft: String::new(),
        }
    }

    /// Add a command to history
    pub fn add(&mut self, command: &str) {
        self.reset();

        // Skip empty or whitespace-only commands
        let trimmed = command.trim();
        if trimmed.is_empty() {
            return;
        }

        // Skip if same as last command (dedup consecutive)
        if self.entries.last().map(String::as_str) == Some(trimmed) {
            return;
        }

        self.entries.push(trimmed.to_string());

        // Trim if exceeding limit
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    /// Step back to an older command.
    ///
    /// `current` is the prompt text, remembered on the first step so that
    /// stepping forward past the newest entry restores it.
    pub fn previous(&mut self, current: &str) -> Option<&str> {
        let index = match self.cursor {
            None => {
                if self.entries.is_empty() {
                    return None;
                }
                self.draft = current.to_string();
                self.entries.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Step forward to a newer command, or back to the draft
    pub fn next(&mut self) -> Option<&str> {
        let index = self.cursor?;
        if index + 1 < self.entries.len() {
            self.cursor = Some(index + 1);
            self.entries.get(index + 1).map(String::as_str)
        } else {
            self.cursor = None;
            Some(self.draft.as_str())
        }
    }

    /// Leave recall mode
    pub fn reset(&mut self) {
        self.cursor = None;
        self.draft.clear();
    }

    /// Get recent history (newest first)
    #[allow(dead_code)]
    pub fn recent(&self, count: usize) -> Vec<&str> {
        self.entries.iter().rev().take(count).map(String::as_str).collect()
    }

    /// Get entry count
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_skips_blank_and_duplicates() {
        let mut history = CommandHistory::new();
        history.add("about");
        history.add("  about ");
        history.add("   ");
        history.add("skills");
        history.add("about");
        assert_eq!(history.recent(10), vec!["about", "skills", "about"]);
    }

    #[test]
    fn test_limit() {
        let mut history = CommandHistory::with_limit(2);
        history.add("a");
        history.add("b");
        history.add("c");
        assert_eq!(history.len(), 2);
        assert_eq!(history.recent(5), vec!["c", "b"]);
    }

    #[test]
    fn test_recall_walk() {
        let mut history = CommandHistory::new();
        history.add("help");
        history.add("whoami");

        assert_eq!(history.previous("wh"), Some("whoami"));
        assert_eq!(history.previous("ignored"), Some("help"));
        // Stays on the oldest entry
        assert_eq!(history.previous("ignored"), Some("help"));
        assert_eq!(history.next(), Some("whoami"));
        // Past the newest entry the draft comes back
        assert_eq!(history.next(), Some("wh"));
        assert_eq!(history.next(), None);
    }

    #[test]
    fn test_recall_empty() {
        let mut history = CommandHistory::new();
        assert_eq!(history.previous("x"), None);
        assert_eq!(history.next(), None);
    }
}
