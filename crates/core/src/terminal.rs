//! The terminal capability consumed by every editor and helper.
//!
//! Editors never talk to stdout directly. They receive a `&mut impl Terminal`
//! and only use the narrow set of operations below, which keeps them testable
//! against [`crate::virtual_terminal::VirtualTerminal`].

use std::ops::{Deref, DerefMut};

use crossterm::event::KeyEvent;
use crossterm::style::Color;

use crate::error::Result;

/// A handle to a character terminal.
///
/// Columns and rows are zero based, the leftmost column and topmost row being `0`.
pub trait Terminal {
    /// Blocks until a key event is available. The key is never echoed.
    fn read_key(&mut self) -> Result<KeyEvent>;

    /// Reads a whole line using the terminal's own line editing, echo included.
    /// The trailing line break is not part of the returned text.
    fn read_line(&mut self) -> Result<String>;

    fn write(&mut self, text: &str) -> Result<()>;

    fn write_line(&mut self, text: &str) -> Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    fn cursor_left(&mut self) -> Result<u16>;
    fn set_cursor_left(&mut self, column: u16) -> Result<()>;
    fn cursor_top(&mut self) -> Result<u16>;
    fn set_cursor_top(&mut self, row: u16) -> Result<()>;

    fn foreground_color(&self) -> Color;
    fn set_foreground_color(&mut self, color: Color) -> Result<()>;
    fn background_color(&self) -> Color;
    fn set_background_color(&mut self, color: Color) -> Result<()>;

    fn window_width(&mut self) -> Result<u16>;

    fn flush(&mut self) -> Result<()>;

    /// Starts raw input for a run of [`Terminal::read_key`] calls. Calls nest,
    /// only the outermost pair switches the terminal mode.
    fn enter_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_key(&mut self) -> Result<KeyEvent> {
        (**self).read_key()
    }

    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }

    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        (**self).write_line(text)
    }

    fn cursor_left(&mut self) -> Result<u16> {
        (**self).cursor_left()
    }

    fn set_cursor_left(&mut self, column: u16) -> Result<()> {
        (**self).set_cursor_left(column)
    }

    fn cursor_top(&mut self) -> Result<u16> {
        (**self).cursor_top()
    }

    fn set_cursor_top(&mut self, row: u16) -> Result<()> {
        (**self).set_cursor_top(row)
    }

    fn foreground_color(&self) -> Color {
        (**self).foreground_color()
    }

    fn set_foreground_color(&mut self, color: Color) -> Result<()> {
        (**self).set_foreground_color(color)
    }

    fn background_color(&self) -> Color {
        (**self).background_color()
    }

    fn set_background_color(&mut self, color: Color) -> Result<()> {
        (**self).set_background_color(color)
    }

    fn window_width(&mut self) -> Result<u16> {
        (**self).window_width()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn enter_raw_mode(&mut self) -> Result<()> {
        (**self).enter_raw_mode()
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        (**self).leave_raw_mode()
    }
}

/// Captures the foreground and background colors of a terminal and puts them
/// back when dropped.
///
/// Every editing session holds one of these for its whole lifetime, so the
/// caller's colors come back whether the session finished, was cancelled, or
/// bailed out early with an error.
pub struct ColorScope<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
    foreground: Color,
    background: Color,
}

impl<'a, T: Terminal + ?Sized> ColorScope<'a, T> {
    pub fn enter(terminal: &'a mut T) -> Self {
        let foreground = terminal.foreground_color();
        let background = terminal.background_color();

        Self {
            terminal,
            foreground,
            background,
        }
    }

    /// The foreground color that was active when the scope was entered.
    pub fn saved_foreground(&self) -> Color {
        self.foreground
    }

    /// The background color that was active when the scope was entered.
    pub fn saved_background(&self) -> Color {
        self.background
    }
}

impl<T: Terminal + ?Sized> Deref for ColorScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for ColorScope<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for ColorScope<'_, T> {
    fn drop(&mut self) {
        // Restore colors on drop, nothing useful can be done with a failure here
        let _ = self.terminal.set_foreground_color(self.foreground);
        let _ = self.terminal.set_background_color(self.background);
        let _ = self.terminal.flush();
    }
}

/// Keeps a terminal in raw mode until dropped.
///
/// Key driven sessions hold one for their whole run, so keys typed between two
/// reads are never echoed or line buffered by the terminal.
pub struct RawInputScope<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> RawInputScope<'a, T> {
    pub fn enter(terminal: &'a mut T) -> Result<Self> {
        terminal.enter_raw_mode()?;
        Ok(Self { terminal })
    }
}

impl<T: Terminal + ?Sized> Deref for RawInputScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawInputScope<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> Drop for RawInputScope<'_, T> {
    fn drop(&mut self) {
        let _ = self.terminal.leave_raw_mode();
    }
}
