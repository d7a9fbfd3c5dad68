//! [`Terminal`] backed by the process's real terminal through crossterm.

use std::io::{self, stdin, stdout, Stdout, Write};

use crossterm::cursor::{self, MoveToColumn, MoveToRow};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::queue;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use log::trace;

use crate::error::Result;
use crate::terminal::Terminal;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// The standard output terminal.
///
/// Raw mode stays on for as long as a reading session holds it through
/// [`Terminal::enter_raw_mode`]. A key read outside any session switches raw
/// mode on for that single read. The terminal cannot report its colors, so
/// the handle remembers the last ones it set.
pub struct CrosstermTerminal {
    out: Stdout,
    foreground: Color,
    background: Color,
    raw_depth: usize,
    raw_mode_guard: Option<RawModeGuard>,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self {
            out: stdout(),
            foreground: Color::Reset,
            background: Color::Reset,
            raw_depth: 0,
            raw_mode_guard: None,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self) -> Result<KeyEvent> {
        self.out.flush()?;

        // Outside a session raw mode is held for this read only
        let _raw_mode_guard = match self.raw_mode_guard {
            Some(_) => None,
            None => {
                enable_raw_mode()?;
                Some(RawModeGuard)
            }
        };

        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    trace!("Read key {:?}", key_event.code);
                    return Ok(key_event);
                }
            }
        }
    }

    fn read_line(&mut self) -> Result<String> {
        self.out.flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input").into());
        }

        let trimmed_len = input.trim_end_matches(&['\r', '\n'][..]).len();
        input.truncate(trimmed_len);
        Ok(input)
    }

    fn write(&mut self, text: &str) -> Result<()> {
        // Raw mode leaves line feeds without a carriage return
        if self.raw_mode_guard.is_some() && text.contains('\n') {
            queue!(self.out, Print(text.replace('\n', "\r\n")))?;
        } else {
            queue!(self.out, Print(text))?;
        }
        Ok(())
    }

    fn cursor_left(&mut self) -> Result<u16> {
        self.out.flush()?;
        let (column, _) = cursor::position()?;
        Ok(column)
    }

    fn set_cursor_left(&mut self, column: u16) -> Result<()> {
        queue!(self.out, MoveToColumn(column))?;
        Ok(())
    }

    fn cursor_top(&mut self) -> Result<u16> {
        self.out.flush()?;
        let (_, row) = cursor::position()?;
        Ok(row)
    }

    fn set_cursor_top(&mut self, row: u16) -> Result<()> {
        queue!(self.out, MoveToRow(row))?;
        Ok(())
    }

    fn foreground_color(&self) -> Color {
        self.foreground
    }

    fn set_foreground_color(&mut self, color: Color) -> Result<()> {
        queue!(self.out, SetForegroundColor(color))?;
        self.foreground = color;
        Ok(())
    }

    fn background_color(&self) -> Color {
        self.background
    }

    fn set_background_color(&mut self, color: Color) -> Result<()> {
        queue!(self.out, SetBackgroundColor(color))?;
        self.background = color;
        Ok(())
    }

    fn window_width(&mut self) -> Result<u16> {
        let (width, _) = terminal::size()?;
        Ok(width)
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        if self.raw_depth == 0 {
            self.out.flush()?;
            enable_raw_mode()?;
            self.raw_mode_guard = Some(RawModeGuard);
            trace!("Raw mode on");
        }
        self.raw_depth += 1;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        self.raw_depth = self.raw_depth.saturating_sub(1);
        if self.raw_depth == 0 && self.raw_mode_guard.is_some() {
            // Dropping the guard disables raw mode
            self.raw_mode_guard = None;
            trace!("Raw mode off");
            self.out.flush()?;
        }
        Ok(())
    }
}
