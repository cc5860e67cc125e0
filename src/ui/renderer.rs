//! Console renderer using crossterm
//!
//! Lays the scrollback out into screen rows (splitting on `\n` and soft
//! wrapping by display width), keeps the view pinned to the newest row
//! unless the user scrolled back, and draws the frame chrome.

use std::io::{self, Write};
use std::ops::Range;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{
        Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use unicode_width::UnicodeWidthChar;

use crate::config::{Color, ColorScheme};
use crate::core::line::LineKind;
use crate::core::session::{ConsoleSession, LineView};
use crate::ui::input_field::InputField;

const PROMPT: &str = "$ ";
const TITLE: &str = " >_ Interactive Terminal";
const BADGE: &str = " Live Shell ";

/// Rows used by chrome: title, two borders, hint
const CHROME_ROWS: u16 = 4;

/// How a body row is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Line(LineKind),
    Prompt,
}

/// One screen row of the scrollback area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub style: RowStyle,
    pub text: String,
}

/// Split `text` on newlines and wrap each piece to `width` columns
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for piece in text.split('\n') {
        let mut row = String::new();
        let mut used = 0;
        for ch in piece.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(ch);
            used += w;
        }
        rows.push(row);
    }

    rows
}

/// Lay scrollback lines out into rows
pub fn layout_lines<'a>(lines: impl Iterator<Item = LineView<'a>>, width: usize) -> Vec<Row> {
    lines
        .flat_map(|line| {
            wrap_text(line.text, width).into_iter().map(move |text| Row {
                style: RowStyle::Line(line.kind),
                text,
            })
        })
        .collect()
}

/// Slice of the prompt that fits `width` columns with the cursor visible.
///
/// Returns the visible text and the cursor column within it.
pub fn prompt_window(input: &InputField, width: usize) -> (String, usize) {
    let width = width.saturating_sub(PROMPT.len()).max(1);
    let chars: Vec<char> = input.text().chars().collect();
    let cursor = input.cursor().min(chars.len());

    // Drop leading chars until the cursor fits
    let mut start = 0;
    let col_of = |from: usize| -> usize {
        chars[from..cursor].iter().map(|c| c.width().unwrap_or(0)).sum()
    };
    while start < cursor && col_of(start) >= width {
        start += 1;
    }

    let mut visible = String::new();
    let mut used = 0;
    for ch in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        visible.push(*ch);
        used += w;
    }

    (visible, PROMPT.len() + col_of(start))
}

/// Rows of `total` visible in a window of `height` rows, scrolled back
/// `offset` rows from the bottom
pub fn visible_range(total: usize, height: usize, offset: usize) -> Range<usize> {
    let end = total.saturating_sub(offset);
    let start = end.saturating_sub(height);
    start..end
}

/// Terminal renderer
pub struct Renderer {
    scheme: ColorScheme,
    /// Footer hint shown while idle
    hint: String,
    /// Rows scrolled back from the newest row
    scroll_offset: usize,
    /// Largest useful offset as of the last frame
    max_scroll: usize,
    /// Height of the body area as of the last frame
    page: usize,
    /// Whether the terminal has been initialized
    initialized: bool,
}

impl Renderer {
    pub fn new(scheme: ColorScheme, hint: String) -> Self {
        Self {
            scheme,
            hint,
            scroll_offset: 0,
            max_scroll: 0,
            page: 1,
            initialized: false,
        }
    }

    /// Get terminal size
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Initialize the terminal for rendering
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            crossterm::event::EnableBracketedPaste,
            DisableLineWrap,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;

        stdout.flush()?;
        self.initialized = true;
        Ok(())
    }

    /// Cleanup the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.initialized = false;

        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset));
        let _ = execute!(stdout, Show);
        let _ = execute!(stdout, EnableLineWrap);
        let _ = execute!(stdout, crossterm::event::DisableBracketedPaste);
        let _ = execute!(stdout, LeaveAlternateScreen);
        let _ = stdout.flush();

        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Follow the newest row again
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll back one page
    pub fn scroll_page_up(&mut self) {
        self.scroll_offset = (self.scroll_offset + self.page).min(self.max_scroll);
    }

    /// Scroll forward one page
    pub fn scroll_page_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(self.page);
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_offset > 0
    }

    /// Render a frame
    pub fn render(&mut self, session: &ConsoleSession<'_>, input: &InputField) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let width = cols as usize;
        let height = rows.saturating_sub(CHROME_ROWS).max(1) as usize;

        let mut body = layout_lines(session.lines(), width);
        let mut cursor = None;
        // The prompt is hidden while a response is being typed
        if !session.is_typing() {
            let (text, col) = prompt_window(input, width);
            cursor = Some((col as u16, body.len()));
            body.push(Row {
                style: RowStyle::Prompt,
                text: format!("{}{}", PROMPT, text),
            });
        }

        self.page = height;
        self.max_scroll = body.len().saturating_sub(height);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);
        let range = visible_range(body.len(), height, self.scroll_offset);

        let stdout = io::stdout();
        let mut out = io::BufWriter::with_capacity(65536, stdout.lock());

        // Begin synchronized update (reduces flicker)
        write!(out, "\x1b[?2026h")?;
        queue!(out, Hide, SetBackgroundColor(self.scheme.background.to_crossterm()))?;

        self.draw_header(&mut out, cols)?;
        self.draw_border(&mut out, 1, cols)?;

        for screen_row in 0..height {
            let y = 2 + screen_row as u16;
            queue!(out, MoveTo(0, y))?;
            let index = range.start + screen_row;
            if index < range.end {
                let row = &body[index];
                queue!(out, SetForegroundColor(self.row_color(row.style)), Print(&row.text))?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
        }

        if self.is_scrolled() {
            let indicator = format!("[↑ {} rows]", self.scroll_offset);
            let x = cols.saturating_sub(indicator.chars().count() as u16);
            queue!(
                out,
                MoveTo(x, 2),
                SetForegroundColor(self.scheme.hint_fg.to_crossterm()),
                Print(indicator)
            )?;
        }

        self.draw_border(&mut out, rows.saturating_sub(2), cols)?;
        self.draw_footer(&mut out, session, rows.saturating_sub(1))?;

        let cursor_pos = cursor.and_then(|(col, index)| {
            range
                .contains(&index)
                .then(|| (col, 2 + (index - range.start) as u16))
        });
        if let Some((x, y)) = cursor_pos {
            queue!(out, MoveTo(x, y), Show)?;
        }

        queue!(out, ResetColor)?;
        // End synchronized update
        write!(out, "\x1b[?2026l")?;
        out.flush()
    }

    fn row_color(&self, style: RowStyle) -> crossterm::style::Color {
        let color: Color = match style {
            RowStyle::Line(LineKind::Input) => self.scheme.input_fg,
            RowStyle::Line(LineKind::Output) => self.scheme.output_fg,
            RowStyle::Line(LineKind::Error) => self.scheme.error_fg,
            RowStyle::Prompt => self.scheme.prompt_fg,
        };
        color.to_crossterm()
    }

    fn draw_header<W: Write>(&self, out: &mut W, cols: u16) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, 0),
            SetForegroundColor(self.scheme.title_fg.to_crossterm()),
            SetAttribute(Attribute::Bold),
            Print(TITLE),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(self.scheme.background.to_crossterm()),
            Clear(ClearType::UntilNewLine)
        )?;

        let badge_x = cols.saturating_sub(BADGE.len() as u16 + 1);
        if badge_x as usize > TITLE.chars().count() {
            queue!(
                out,
                MoveTo(badge_x, 0),
                SetBackgroundColor(self.scheme.badge_bg.to_crossterm()),
                SetForegroundColor(self.scheme.badge_fg.to_crossterm()),
                Print(BADGE),
                SetBackgroundColor(self.scheme.background.to_crossterm())
            )?;
        }
        Ok(())
    }

    fn draw_border<W: Write>(&self, out: &mut W, y: u16, cols: u16) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(self.scheme.border.to_crossterm()),
            Print("─".repeat(cols as usize))
        )
    }

    fn draw_footer<W: Write>(
        &self,
        out: &mut W,
        session: &ConsoleSession<'_>,
        y: u16,
    ) -> io::Result<()> {
        let text = match session.reveal_progress() {
            Some((done, total)) => format!(" typing... {}/{}", done, total),
            None => format!(" {}", self.hint),
        };
        queue!(
            out,
            MoveTo(0, y),
            SetForegroundColor(self.scheme.hint_fg.to_crossterm()),
            Print(text),
            Clear(ClearType::UntilNewLine)
        )
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Plain-text renderer for headless runs
pub struct TextRenderer;

impl TextRenderer {
    /// Render the scrollback, one line per row, no styling
    pub fn render(session: &ConsoleSession<'_>) -> String {
        let mut output = String::new();
        for line in session.lines() {
            output.push_str(line.text);
            output.push('\n');
        }
        output
    }
}
