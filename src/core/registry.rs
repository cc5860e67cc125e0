//! Command registry
//!
//! A fixed lookup table from a normalized command string to what the
//! console should do with it. Built once at startup and shared by
//! reference; there is no way to change it afterwards.

/// Value stored for a registered command
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Respond(&'static str),
    Clear,
}

/// Resolved outcome of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// Print this response
    Respond(&'a str),
    /// Wipe the scrollback
    Clear,
    /// Non-empty input with no matching command
    Unknown,
    /// Empty input, nothing to print
    NoOp,
}

pub const HELP_TEXT: &str = "about skills projects contact whoami ls cat clear";

pub const ABOUT_TEXT: &str = "Full-stack developer specializing in React, Next.js, and modern web technologies. I build impossible things.";

pub const SKILLS_TEXT: &str = "JavaScript/TypeScript • React/Next.js • Node.js • Python • PostgreSQL • Docker • AWS • Git";

pub const PROJECTS_TEXT: &str = "universalcharter.org - AI governance framework\n\
gitscrolls.org - Git visualization tool\n\
flyingrobots.dev - This interactive portfolio";

pub const CONTACT_TEXT: &str = "Email: hello@flyingrobots.dev\n\
LinkedIn: /in/jamesross\n\
GitHub: /flyingrobots";

pub const WHOAMI_TEXT: &str = "james@flyingrobots.dev";

pub const LS_TEXT: &str = "projects/  skills/  experience/  resume.txt";

pub const RESUME_TEXT: &str = "JAMES ROSS - Full Stack Developer
================================

Experience:
• 3+ years building web applications
• Expertise in React, Next.js, TypeScript
• Strong background in system architecture
• Passionate about user experience

Key Projects:
• Universal Charter - AI governance platform
• GitScrolls - Developer visualization tool
• Multiple client projects and consulting work

Skills:
• Frontend: React, Next.js, TypeScript, Tailwind
• Backend: Node.js, Python, PostgreSQL, Redis
• DevOps: Docker, AWS, Vercel, CI/CD
• Tools: Git, VS Code, Linear, Figma

Contact: hello@flyingrobots.dev
Portfolio: flyingrobots.dev";

/// Immutable command table
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    /// Registration order is kept for completion and listing
    entries: Vec<(&'static str, Entry)>,
}

impl CommandRegistry {
    /// The portfolio command vocabulary
    pub fn builtin() -> Self {
        Self {
            entries: vec![
                ("help", Entry::Respond(HELP_TEXT)),
                ("about", Entry::Respond(ABOUT_TEXT)),
                ("skills", Entry::Respond(SKILLS_TEXT)),
                ("projects", Entry::Respond(PROJECTS_TEXT)),
                ("contact", Entry::Respond(CONTACT_TEXT)),
                ("whoami", Entry::Respond(WHOAMI_TEXT)),
                ("ls", Entry::Respond(LS_TEXT)),
                ("cat resume.txt", Entry::Respond(RESUME_TEXT)),
                ("clear", Entry::Clear),
            ],
        }
    }

    /// Trim surrounding whitespace and lowercase.
    ///
    /// Inner whitespace is left alone, so `"cat  resume.txt"` does not
    /// match `"cat resume.txt"`.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase()
    }

    /// Resolve raw user input
    pub fn resolve(&self, raw: &str) -> Action<'_> {
        let key = Self::normalize(raw);
        if key.is_empty() {
            return Action::NoOp;
        }

        match self.entries.iter().find(|(k, _)| *k == key) {
            Some((_, Entry::Respond(text))) => Action::Respond(text),
            Some((_, Entry::Clear)) => Action::Clear,
            None => Action::Unknown,
        }
    }

    /// Registered command names in registration order
    pub fn commands(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Commands starting with the normalized `prefix`
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.trim_start().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.commands().filter(|c| c.starts_with(&prefix)).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(CommandRegistry::normalize("  WhoAmI \t"), "whoami");
        assert_eq!(CommandRegistry::normalize("Cat  Resume.TXT"), "cat  resume.txt");
        assert_eq!(CommandRegistry::normalize("   "), "");
    }

    #[test]
    fn test_resolve_vocabulary() {
        let registry = CommandRegistry::builtin();

        assert_eq!(registry.resolve("whoami"), Action::Respond(WHOAMI_TEXT));
        assert_eq!(registry.resolve("HELP"), Action::Respond(HELP_TEXT));
        assert_eq!(registry.resolve(" cat resume.txt "), Action::Respond(RESUME_TEXT));
        assert_eq!(registry.resolve("Clear"), Action::Clear);
        assert_eq!(registry.resolve("frobnicate"), Action::Unknown);
        assert_eq!(registry.resolve("cat  resume.txt"), Action::Unknown);
        assert_eq!(registry.resolve(""), Action::NoOp);
        assert_eq!(registry.resolve("  \t "), Action::NoOp);
    }

    #[test]
    fn test_vocabulary_table() {
        let registry = CommandRegistry::builtin();
        let table = [
            ("help", HELP_TEXT),
            ("about", ABOUT_TEXT),
            ("skills", SKILLS_TEXT),
            ("projects", PROJECTS_TEXT),
            ("contact", CONTACT_TEXT),
            ("whoami", WHOAMI_TEXT),
            ("ls", LS_TEXT),
            ("cat resume.txt", RESUME_TEXT),
        ];

        for (key, text) in table {
            assert_eq!(registry.resolve(key), Action::Respond(text), "{key}");
            let shouted = format!("  {}  ", key.to_uppercase());
            assert_eq!(registry.resolve(&shouted), Action::Respond(text), "{shouted:?}");
        }
        assert_eq!(registry.resolve("clear"), Action::Clear);
        assert_eq!(registry.resolve(" CLEAR "), Action::Clear);
        assert_eq!(registry.commands().count(), table.len() + 1);
    }

    #[test]
    fn test_help_names_every_command() {
        let registry = CommandRegistry::builtin();
        let words: Vec<&str> = HELP_TEXT.split_whitespace().collect();
        for command in registry.commands().filter(|c| *c != "help") {
            let first = command.split(' ').next().unwrap_or(command);
            assert!(words.contains(&first), "{command}");
        }
        // ls points at the file cat reads
        assert!(LS_TEXT.contains("resume.txt"));
    }

    #[test]
    fn test_short_and_long_responses() {
        // help, whoami and ls print at once; the rest are typed out
        for short in [HELP_TEXT, WHOAMI_TEXT, LS_TEXT] {
            assert!(short.chars().count() <= 50, "{short:?}");
        }
        for long in [ABOUT_TEXT, SKILLS_TEXT, PROJECTS_TEXT, CONTACT_TEXT, RESUME_TEXT] {
            assert!(long.chars().count() > 50, "{long:?}");
        }
        assert_eq!(PROJECTS_TEXT.lines().count(), 3);
        assert_eq!(CONTACT_TEXT.lines().count(), 3);
        assert!(RESUME_TEXT.starts_with("JAMES ROSS"));
        assert!(RESUME_TEXT.ends_with("Portfolio: flyingrobots.dev"));
    }

    #[test]
    fn test_complete() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.complete("wh"), vec!["whoami"]);
        assert_eq!(registry.complete("C"), vec!["contact", "cat resume.txt", "clear"]);
        assert_eq!(registry.complete("cl"), vec!["clear"]);
        assert!(registry.complete("zzz").is_empty());
        assert!(registry.complete("").is_empty());
        assert_eq!(registry.commands().count(), 9);
    }
}
