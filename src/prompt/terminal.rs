/// Inline single-choice picker drawn on stderr with crossterm.
use std::io::{self, IsTerminal, Stderr, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use super::SortKeySelector;
use crate::records::{PeekError, filter_keys};

/// Rows visible at once; the window scrolls past this.
const PAGE_SIZE: usize = 10;

/// What a key press did to the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Operator chose the key at this index of the option list.
    Chosen(usize),
    Aborted,
}

/// Cursor, filter and scroll state, kept apart from terminal IO.
#[derive(Debug)]
pub struct PickerState<'a> {
    options: &'a [String],
    query: String,
    visible: Vec<usize>,
    cursor: usize,
    offset: usize,
}

impl<'a> PickerState<'a> {
    #[must_use]
    pub fn new(options: &'a [String]) -> Self {
        Self {
            options,
            query: String::new(),
            visible: filter_keys(options, ""),
            cursor: 0,
            offset: 0,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickerOutcome> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'd') => Some(PickerOutcome::Aborted),
                KeyCode::Char('p') => {
                    self.move_up();
                    None
                }
                KeyCode::Char('n') => {
                    self.move_down();
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Enter => {
                return self
                    .visible
                    .get(self.cursor)
                    .map(|&idx| PickerOutcome::Chosen(idx));
            }
            KeyCode::Esc => return Some(PickerOutcome::Aborted),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        None
    }

    /// Currently highlighted option, if any match the filter.
    #[cfg(test)]
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.visible
            .get(self.cursor)
            .map(|&idx| self.options[idx].as_str())
    }

    fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            if self.cursor < self.offset {
                self.offset = self.cursor;
            }
        }
    }

    fn move_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
            if self.cursor >= self.offset + PAGE_SIZE {
                self.offset = self.cursor + 1 - PAGE_SIZE;
            }
        }
    }

    fn refilter(&mut self) {
        self.visible = filter_keys(self.options, &self.query);
        self.cursor = 0;
        self.offset = 0;
    }

    /// Rows in the current window: (option text, highlighted).
    fn window(&self) -> impl Iterator<Item = (&str, bool)> {
        self.visible
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(PAGE_SIZE)
            .map(|(pos, &idx)| (self.options[idx].as_str(), pos == self.cursor))
    }
}

/// [`SortKeySelector`] that asks the operator on the terminal.
pub struct TerminalPicker {
    label: String,
}

impl TerminalPicker {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    fn run(&self, options: &[String]) -> io::Result<PickerOutcome> {
        let mut state = PickerState::new(options);
        let mut err = io::stderr();

        let _guard = RawModeGuard::enable()?;
        let mut drawn = self.draw(&mut err, &state, 0)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(outcome) = state.handle_key(key) {
                clear_lines(&mut err, drawn)?;
                if let PickerOutcome::Chosen(idx) = &outcome {
                    execute!(
                        err,
                        Print(format!("{} {}\r\n", self.label.as_str().dim(), options[*idx]))
                    )?;
                }
                return Ok(outcome);
            }
            drawn = self.draw(&mut err, &state, drawn)?;
        }
    }

    /// Redraw the picker over the previous `drawn` lines. Returns lines drawn.
    fn draw(&self, err: &mut Stderr, state: &PickerState<'_>, drawn: u16) -> io::Result<u16> {
        clear_lines(err, drawn)?;

        // Rows must never wrap, or `clear_lines` leaves stale output behind.
        let width = usize::from(terminal::size().map_or(80, |(cols, _)| cols).saturating_sub(1));
        let row_width = width.saturating_sub(2);

        let mut lines: u16 = 1;
        let header = fit(&format!("{}: {}", self.label, state.query), row_width);
        queue!(
            err,
            Print("? ".cyan()),
            SetAttribute(Attribute::Bold),
            Print(header),
            SetAttribute(Attribute::Reset),
            Print("\r\n"),
        )?;

        if state.visible.is_empty() {
            queue!(err, Print("  (no matching sort keys)\r\n".dark_grey()))?;
            lines += 1;
        }
        for (text, highlighted) in state.window() {
            let text = fit(text, row_width);
            if highlighted {
                queue!(err, Print("> ".cyan()), Print(text.cyan().bold()), Print("\r\n"))?;
            } else {
                queue!(err, Print(format!("  {text}\r\n")))?;
            }
            lines += 1;
        }
        if state.visible.len() > PAGE_SIZE {
            let footer = format!("  ({} of {})\r\n", state.cursor + 1, state.visible.len());
            queue!(err, Print(footer.dark_grey()))?;
            lines += 1;
        }
        err.flush()?;
        Ok(lines)
    }
}

impl SortKeySelector for TerminalPicker {
    fn select(&mut self, options: &[String]) -> Result<String, PeekError> {
        if options.is_empty() {
            return Err(PeekError::Selection("no sort keys to choose from".to_owned()));
        }
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(PeekError::Selection(
                "not attached to a terminal; pass --latest to fetch STATE".to_owned(),
            ));
        }

        match self.run(options) {
            Ok(PickerOutcome::Chosen(idx)) => {
                let choice = options[idx].clone();
                if choice.is_empty() {
                    return Err(PeekError::Selection("empty sort key selected".to_owned()));
                }
                tracing::debug!(sort_key = %choice, "sort key selected");
                Ok(choice)
            }
            Ok(PickerOutcome::Aborted) => Err(PeekError::SelectionAborted),
            Err(e) => Err(PeekError::Selection(e.to_string())),
        }
    }
}

/// Cut `text` to at most `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

fn clear_lines(err: &mut Stderr, lines: u16) -> io::Result<()> {
    if lines > 0 {
        queue!(err, MoveUp(lines))?;
    }
    queue!(err, MoveToColumn(0), Clear(ClearType::FromCursorDown))
}

/// Raw mode with hidden cursor for as long as it lives.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stderr(), Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stderr(), Show);
        let _ = terminal::disable_raw_mode();
    }
}
