//! Integer only line input.

use log::debug;

use crate::error::Result;
use crate::keys::{classify, KeyAction};
use crate::line_buffer::{column_at, LineBuffer};
use crate::prompt::{Flow, InputPrompt};
use crate::terminal::{ColorScope, RawInputScope, Terminal};

/// Edits a field that only ever holds `-?[0-9]*`.
///
/// A minus sign is only accepted at the very start and only once. Digits can't
/// be typed in front of it. Every insertion or removal repaints the whole
/// field, since shifting digits changes what each cell shows.
#[derive(Debug)]
pub struct IntegerLineEditor {
    buffer: LineBuffer,
    field_start: u16,
}

impl IntegerLineEditor {
    pub fn new(field_start: u16) -> Self {
        Self {
            buffer: LineBuffer::new(),
            field_start,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// The parsed field, `None` when empty, a lone sign, or out of range.
    pub fn value(&self) -> Option<i64> {
        if self.buffer.is_empty() {
            return None;
        }

        self.buffer.text().parse().ok()
    }

    fn has_sign(&self) -> bool {
        self.buffer.chars().first() == Some(&'-')
    }

    pub fn handle_key<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        action: KeyAction,
    ) -> Result<Flow<Option<i64>>> {
        let previous_len = self.buffer.len();

        match action {
            KeyAction::Enter => return Ok(Flow::Finish(self.value())),
            KeyAction::Escape => {
                self.buffer.clear();
                return Ok(Flow::Finish(None));
            }
            KeyAction::Backspace => {
                if self.buffer.backspace().is_some() {
                    self.repaint(terminal, previous_len)?;
                }
            }
            KeyAction::Delete => {
                if self.buffer.delete().is_some() {
                    self.repaint(terminal, previous_len)?;
                }
            }
            KeyAction::MinusSign => {
                if self.buffer.cursor() == 0 && !self.has_sign() {
                    self.buffer.insert_at_cursor('-');
                    self.repaint(terminal, previous_len)?;
                }
            }
            KeyAction::DigitChar(digit) => {
                if !(self.buffer.cursor() == 0 && self.has_sign()) {
                    self.buffer.insert_at_cursor(digit);
                    self.repaint(terminal, previous_len)?;
                }
            }
            KeyAction::ArrowLeft => {
                if self.buffer.move_left() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::ArrowRight => {
                if self.buffer.move_right() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::Home => {
                self.buffer.move_home();
                self.place_cursor(terminal)?;
            }
            KeyAction::End => {
                self.buffer.move_end();
                self.place_cursor(terminal)?;
            }
            KeyAction::ArrowUp
            | KeyAction::ArrowDown
            | KeyAction::Tab
            | KeyAction::PrintableChar(_)
            | KeyAction::Ignored => {}
        }

        Ok(Flow::Continue)
    }

    fn repaint<T: Terminal + ?Sized>(&self, terminal: &mut T, erase_width: usize) -> Result<()> {
        self.buffer
            .render(terminal, self.field_start, erase_width, |c| c)
    }

    fn place_cursor<T: Terminal + ?Sized>(&self, terminal: &mut T) -> Result<()> {
        terminal.set_cursor_left(column_at(self.field_start, self.buffer.cursor()))
    }
}

/// Reads an integer. Escape, an empty field, or anything that doesn't parse
/// gives `None`.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_int<T: Terminal + ?Sized>(terminal: &mut T, prompt: &InputPrompt) -> Result<Option<i64>> {
    let mut colors = ColorScope::enter(terminal);
    let mut scope = RawInputScope::enter(&mut *colors)?;
    prompt.begin(&mut *scope)?;

    let field_start = scope.cursor_left()?;
    debug!("Integer read started at column {field_start}");

    let mut editor = IntegerLineEditor::new(field_start);

    loop {
        let key_event = scope.read_key()?;
        if let Flow::Finish(value) = editor.handle_key(&mut *scope, classify(&key_event))? {
            scope.write_line("")?;
            debug!("Integer read finished with a value: {}", value.is_some());
            return Ok(value);
        }
    }
}
