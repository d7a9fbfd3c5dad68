//! An in-memory [`Terminal`] driven by scripted keys and lines.
//!
//! It keeps a grid of painted cells, so tests can assert on exactly what a
//! user would see, including colors, and on where the cursor was left.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;

use crate::error::Result;
use crate::terminal::Terminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            foreground: Color::Reset,
            background: Color::Reset,
        }
    }
}

#[derive(Debug)]
pub struct VirtualTerminal {
    width: u16,
    rows: Vec<Vec<Cell>>,
    column: u16,
    row: u16,
    foreground: Color,
    background: Color,
    keys: VecDeque<KeyEvent>,
    lines: VecDeque<String>,
    raw_depth: usize,
    cooked_key_reads: usize,
}

impl VirtualTerminal {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            rows: Vec::new(),
            column: 0,
            row: 0,
            foreground: Color::Reset,
            background: Color::Reset,
            keys: VecDeque::new(),
            lines: VecDeque::new(),
            raw_depth: 0,
            cooked_key_reads: 0,
        }
    }

    pub fn push_key(&mut self, code: KeyCode) {
        self.keys.push_back(KeyEvent::new(code, KeyModifiers::NONE));
    }

    pub fn push_keys(&mut self, codes: impl IntoIterator<Item = KeyCode>) {
        for code in codes {
            self.push_key(code);
        }
    }

    pub fn push_key_event(&mut self, key_event: KeyEvent) {
        self.keys.push_back(key_event);
    }

    /// Scripts one `Char` key press per character of `text`.
    pub fn type_text(&mut self, text: &str) {
        self.push_keys(text.chars().map(KeyCode::Char));
    }

    /// Scripts a line for the next [`Terminal::read_line`].
    pub fn push_line(&mut self, line: &str) {
        self.lines.push_back(line.to_string());
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_depth > 0
    }

    /// Keys that were read while the terminal was not in raw mode.
    pub fn cooked_key_reads(&self) -> usize {
        self.cooked_key_reads
    }

    pub fn position(&self) -> (u16, u16) {
        (self.column, self.row)
    }

    pub fn cell(&self, column: u16, row: u16) -> Option<Cell> {
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(column as usize))
            .copied()
    }

    /// The visible text of a row, without trailing blanks.
    pub fn row_text(&self, row: u16) -> String {
        let text: String = self
            .rows
            .get(row as usize)
            .map(|cells| cells.iter().map(|cell| cell.symbol).collect())
            .unwrap_or_default();

        text.trim_end().to_string()
    }

    /// Number of rows that have been touched so far.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn put(&mut self, symbol: char) {
        let row = self.row as usize;
        let column = self.column as usize;

        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }

        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, Cell::default());
        }

        cells[column] = Cell {
            symbol,
            foreground: self.foreground,
            background: self.background,
        };
    }
}

fn exhausted(what: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("no scripted {what} left"),
    )
}

impl Terminal for VirtualTerminal {
    fn read_key(&mut self) -> Result<KeyEvent> {
        if self.raw_depth == 0 {
            self.cooked_key_reads += 1;
        }
        Ok(self.keys.pop_front().ok_or_else(|| exhausted("keys"))?)
    }

    fn read_line(&mut self) -> Result<String> {
        let line = self.lines.pop_front().ok_or_else(|| exhausted("lines"))?;

        // The terminal echoes what was typed, including the line break
        self.write(&line)?;
        self.write("\n")?;

        Ok(line)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        for symbol in text.chars() {
            match symbol {
                '\n' => {
                    self.row = self.row.saturating_add(1);
                    self.column = 0;
                }
                '\r' => self.column = 0,
                _ => {
                    self.put(symbol);
                    self.column = self.column.saturating_add(1);
                    if self.width > 0 && self.column >= self.width {
                        self.column = 0;
                        self.row = self.row.saturating_add(1);
                    }
                }
            }
        }

        Ok(())
    }

    fn cursor_left(&mut self) -> Result<u16> {
        Ok(self.column)
    }

    fn set_cursor_left(&mut self, column: u16) -> Result<()> {
        self.column = column;
        Ok(())
    }

    fn cursor_top(&mut self) -> Result<u16> {
        Ok(self.row)
    }

    fn set_cursor_top(&mut self, row: u16) -> Result<()> {
        self.row = row;
        Ok(())
    }

    fn foreground_color(&self) -> Color {
        self.foreground
    }

    fn set_foreground_color(&mut self, color: Color) -> Result<()> {
        self.foreground = color;
        Ok(())
    }

    fn background_color(&self) -> Color {
        self.background
    }

    fn set_background_color(&mut self, color: Color) -> Result<()> {
        self.background = color;
        Ok(())
    }

    fn window_width(&mut self) -> Result<u16> {
        Ok(self.width)
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        self.raw_depth += 1;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        self.raw_depth = self.raw_depth.saturating_sub(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tracks_cells_and_cursor() {
        let mut terminal = VirtualTerminal::new(20);
        terminal.set_foreground_color(Color::Red).unwrap();
        terminal.write("ab\ncd").unwrap();

        assert_eq!(terminal.row_text(0), "ab");
        assert_eq!(terminal.row_text(1), "cd");
        assert_eq!(terminal.position(), (2, 1));
        assert_eq!(terminal.cell(1, 0).unwrap().foreground, Color::Red);
    }

    #[test]
    fn test_write_wraps_at_width() {
        let mut terminal = VirtualTerminal::new(4);
        terminal.write("abcdef").unwrap();

        assert_eq!(terminal.row_text(0), "abcd");
        assert_eq!(terminal.row_text(1), "ef");
    }

    #[test]
    fn test_read_line_echoes_and_moves_down() {
        let mut terminal = VirtualTerminal::new(20);
        terminal.push_line("hello");

        assert_eq!(terminal.read_line().unwrap(), "hello");
        assert_eq!(terminal.row_text(0), "hello");
        assert_eq!(terminal.position(), (0, 1));
    }

    #[test]
    fn test_read_key_errors_when_exhausted() {
        let mut terminal = VirtualTerminal::new(20);
        terminal.push_key(KeyCode::Enter);

        assert_eq!(terminal.read_key().unwrap().code, KeyCode::Enter);
        assert!(terminal.read_key().is_err());
        assert_eq!(terminal.cooked_key_reads(), 2);
    }

    #[test]
    fn test_raw_mode_depth() {
        let mut terminal = VirtualTerminal::new(20);
        terminal.push_keys([KeyCode::Enter, KeyCode::Esc]);

        terminal.enter_raw_mode().unwrap();
        terminal.enter_raw_mode().unwrap();
        terminal.read_key().unwrap();
        terminal.leave_raw_mode().unwrap();
        assert!(terminal.is_raw_mode());
        terminal.leave_raw_mode().unwrap();
        assert!(!terminal.is_raw_mode());

        terminal.read_key().unwrap();
        assert_eq!(terminal.cooked_key_reads(), 1);
    }
}
