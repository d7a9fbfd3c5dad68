//! Password style line input.
//!
//! Two flavours are offered. [`read_line_masked`] paints a mask character for
//! every key as it is typed and supports in-line editing. [`read_line_show_then_cover`]
//! lets the terminal echo the input normally and paints over it once the line
//! is submitted.

use std::iter;

use log::debug;

use crate::error::Result;
use crate::keys::{classify, KeyAction};
use crate::line_buffer::{column_at, LineBuffer};
use crate::prompt::{Flow, InputPrompt};
use crate::terminal::{ColorScope, RawInputScope, Terminal};

pub const MASK_CHAR_SQUARE: char = '■';
pub const MASK_CHAR_CENTERED_DOT: char = '∙';

/// Characters accepted as a mask. The first one is the fallback.
pub const ACCEPTED_MASK_CHARS: [char; 12] = [
    '*',
    ' ',
    'X',
    'x',
    '+',
    '-',
    '.',
    '#',
    '~',
    '?',
    MASK_CHAR_SQUARE,
    MASK_CHAR_CENTERED_DOT,
];

/// Returns `desired` if it is an accepted mask character, `*` otherwise.
pub fn accepted_mask_char(desired: Option<char>) -> char {
    desired
        .filter(|c| ACCEPTED_MASK_CHARS.contains(c))
        .unwrap_or(ACCEPTED_MASK_CHARS[0])
}

/// How a line read should treat what the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskType {
    /// Ordinary visible input.
    #[default]
    None,
    MaskWhileTyping,
    ShowThenCover,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedInputConfig {
    pub prompt: InputPrompt,
    mask_char: char,
}

impl MaskedInputConfig {
    pub fn new(prompt: InputPrompt) -> Self {
        Self {
            prompt,
            mask_char: accepted_mask_char(None),
        }
    }

    /// Sets the mask, silently falling back to `*` for unaccepted characters.
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = accepted_mask_char(Some(mask_char));
        self
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }
}

/// How a masked editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Done(String),
    Cancelled,
}

impl EditOutcome {
    /// The entered text, or an empty string for a cancelled session.
    pub fn into_text(self) -> String {
        match self {
            EditOutcome::Done(text) => text,
            EditOutcome::Cancelled => String::new(),
        }
    }
}

/// The mask-while-typing state machine.
///
/// Removals repaint the whole field. Insertions only repaint from the new
/// character onwards: every cell before it already shows the same mask glyph.
#[derive(Debug)]
pub struct MaskedLineEditor {
    buffer: LineBuffer,
    field_start: u16,
    mask_char: char,
}

impl MaskedLineEditor {
    pub fn new(field_start: u16, mask_char: char) -> Self {
        Self {
            buffer: LineBuffer::new(),
            field_start,
            mask_char,
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn handle_key<T: Terminal + ?Sized>(
        &mut self,
        terminal: &mut T,
        action: KeyAction,
    ) -> Result<Flow<EditOutcome>> {
        let mask_char = self.mask_char;
        let previous_len = self.buffer.len();

        match action {
            KeyAction::Enter => return Ok(Flow::Finish(EditOutcome::Done(self.buffer.text()))),
            KeyAction::Escape => return Ok(Flow::Finish(EditOutcome::Cancelled)),
            KeyAction::Backspace => {
                if self.buffer.backspace().is_some() {
                    self.buffer
                        .render(terminal, self.field_start, previous_len, |_| mask_char)?;
                }
            }
            KeyAction::Delete => {
                if self.buffer.delete().is_some() {
                    self.buffer
                        .render(terminal, self.field_start, previous_len, |_| mask_char)?;
                }
            }
            KeyAction::ArrowLeft | KeyAction::ArrowUp => {
                if self.buffer.move_left() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::ArrowRight | KeyAction::ArrowDown => {
                if self.buffer.move_right() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::PrintableChar(_) | KeyAction::DigitChar(_) | KeyAction::MinusSign => {
                if let Some(c) = action.as_char() {
                    let offset = self.buffer.cursor();
                    self.buffer.insert_at_cursor(c);
                    self.buffer
                        .render_from(terminal, self.field_start, offset, 0, |_| mask_char)?;
                }
            }
            KeyAction::Home | KeyAction::End | KeyAction::Tab | KeyAction::Ignored => {}
        }

        Ok(Flow::Continue)
    }

    fn place_cursor<T: Terminal + ?Sized>(&self, terminal: &mut T) -> Result<()> {
        terminal.set_cursor_left(column_at(self.field_start, self.buffer.cursor()))
    }
}

/// Runs a mask-while-typing session and reports how it ended.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_masked<T: Terminal + ?Sized>(
    terminal: &mut T,
    config: &MaskedInputConfig,
) -> Result<EditOutcome> {
    let mut colors = ColorScope::enter(terminal);
    let mut scope = RawInputScope::enter(&mut *colors)?;
    config.prompt.begin(&mut *scope)?;

    let field_start = scope.cursor_left()?;
    debug!("Masked read started at column {field_start}");

    let mut editor = MaskedLineEditor::new(field_start, config.mask_char());

    loop {
        let key_event = scope.read_key()?;
        if let Flow::Finish(outcome) = editor.handle_key(&mut *scope, classify(&key_event))? {
            scope.write_line("")?;
            debug!(
                "Masked read finished, cancelled: {}",
                outcome == EditOutcome::Cancelled
            );
            return Ok(outcome);
        }
    }
}

/// Reads a line showing only mask characters. Escape gives back an empty string.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_line_masked<T: Terminal + ?Sized>(
    terminal: &mut T,
    config: &MaskedInputConfig,
) -> Result<String> {
    Ok(read_masked(terminal, config)?.into_text())
}

/// Reads a line with the terminal's own editing and echo, then covers the
/// echoed text with the mask character.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_line_show_then_cover<T: Terminal + ?Sized>(
    terminal: &mut T,
    config: &MaskedInputConfig,
) -> Result<String> {
    let mut scope = ColorScope::enter(terminal);
    config.prompt.begin(&mut *scope)?;

    let field_start = scope.cursor_left()?;
    let input = scope.read_line()?;
    let input_len = input.chars().count();

    // The submitted line break moved the cursor down a row
    let row = scope.cursor_top()?;
    scope.set_cursor_top(row.saturating_sub(1))?;
    scope.set_cursor_left(field_start)?;
    let cover: String = iter::repeat(config.mask_char()).take(input_len).collect();
    scope.write(&cover)?;
    scope.set_cursor_left(0)?;
    scope.set_cursor_top(row)?;

    debug!("Covered {input_len} characters at column {field_start}");
    Ok(input)
}

/// Reads a line with a colored prompt and visible input.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_line<T: Terminal + ?Sized>(terminal: &mut T, prompt: &InputPrompt) -> Result<String> {
    let mut scope = ColorScope::enter(terminal);
    prompt.begin(&mut *scope)?;
    scope.read_line()
}

/// Picks the reader for `mask_type` at runtime.
///
/// # Errors
///
/// Only terminal failures are errors.
pub fn read_line_with_mask<T: Terminal + ?Sized>(
    terminal: &mut T,
    mask_type: MaskType,
    config: &MaskedInputConfig,
) -> Result<String> {
    match mask_type {
        MaskType::MaskWhileTyping => read_line_masked(terminal, config),
        MaskType::ShowThenCover => read_line_show_then_cover(terminal, config),
        MaskType::None => read_line(terminal, &config.prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_terminal::VirtualTerminal;
    use crossterm::event::KeyCode;
    use crossterm::style::Color;

    fn config(mask_char: char) -> MaskedInputConfig {
        MaskedInputConfig::new(InputPrompt::new("pw: ")).with_mask_char(mask_char)
    }

    #[test]
    fn test_accepted_mask_char() {
        assert_eq!(accepted_mask_char(None), '*');
        assert_eq!(accepted_mask_char(Some('#')), '#');
        assert_eq!(accepted_mask_char(Some(' ')), ' ');
        assert_eq!(accepted_mask_char(Some(MASK_CHAR_SQUARE)), '■');
        assert_eq!(accepted_mask_char(Some('a')), '*');
        assert_eq!(accepted_mask_char(Some('@')), '*');
    }

    #[test]
    fn test_invalid_mask_char_falls_back() {
        assert_eq!(config('q').mask_char(), '*');
        assert_eq!(config('~').mask_char(), '~');
    }

    #[test]
    fn test_enter_returns_typed_text_and_paints_mask() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("hunter2");
        terminal.push_key(KeyCode::Enter);

        let outcome = read_masked(&mut terminal, &config('#')).unwrap();

        assert_eq!(outcome, EditOutcome::Done("hunter2".to_string()));
        assert_eq!(terminal.row_text(0), "pw: #######");
        assert_eq!(terminal.position(), (0, 1));
    }

    #[test]
    fn test_escape_discards_buffer() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("hunter2");
        terminal.push_key(KeyCode::Esc);

        let outcome = read_masked(&mut terminal, &config('#')).unwrap();
        assert_eq!(outcome, EditOutcome::Cancelled);

        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("hunter2");
        terminal.push_key(KeyCode::Esc);
        assert_eq!(read_line_masked(&mut terminal, &config('#')).unwrap(), "");
    }

    #[test]
    fn test_empty_enter_is_distinct_from_cancel() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.push_key(KeyCode::Enter);

        let outcome = read_masked(&mut terminal, &config('*')).unwrap();
        assert_eq!(outcome, EditOutcome::Done(String::new()));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("ac");
        terminal.push_key(KeyCode::Left);
        terminal.type_text("b");
        terminal.push_key(KeyCode::Enter);

        let text = read_line_masked(&mut terminal, &config('*')).unwrap();
        assert_eq!(text, "abc");
        assert_eq!(terminal.row_text(0), "pw: ***");
    }

    #[test]
    fn test_up_and_down_move_like_left_and_right() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("14");
        terminal.push_keys([KeyCode::Up, KeyCode::Up, KeyCode::Up]);
        terminal.type_text("0");
        terminal.push_keys([KeyCode::Down, KeyCode::Down, KeyCode::Down]);
        terminal.type_text("-");
        terminal.push_key(KeyCode::Enter);

        let text = read_line_masked(&mut terminal, &config('*')).unwrap();
        assert_eq!(text, "014-");
    }

    #[test]
    fn test_backspace_and_delete_repaint_field() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("abcd");
        terminal.push_key(KeyCode::Backspace);
        terminal.push_keys([KeyCode::Left, KeyCode::Left, KeyCode::Delete]);
        terminal.push_key(KeyCode::Enter);

        let text = read_line_masked(&mut terminal, &config('x')).unwrap();
        assert_eq!(text, "ac");
        assert_eq!(terminal.row_text(0), "pw: xx");
    }

    #[test]
    fn test_backspace_at_field_start_is_noop() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("ab");
        terminal.push_keys([KeyCode::Home, KeyCode::Left, KeyCode::Left]);
        terminal.push_key(KeyCode::Backspace);
        terminal.push_key(KeyCode::Enter);

        let text = read_line_masked(&mut terminal, &config('*')).unwrap();
        assert_eq!(text, "ab");
        assert_eq!(terminal.row_text(0), "pw: **");
    }

    #[test]
    fn test_editor_keeps_cursor_on_field() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.write("pw: ").unwrap();
        let mut editor = MaskedLineEditor::new(4, '*');

        for c in "abc".chars() {
            editor
                .handle_key(&mut terminal, KeyAction::PrintableChar(c))
                .unwrap();
        }
        assert_eq!(terminal.position(), (7, 0));

        editor.handle_key(&mut terminal, KeyAction::ArrowLeft).unwrap();
        assert_eq!(terminal.position(), (6, 0));

        editor.handle_key(&mut terminal, KeyAction::Backspace).unwrap();
        assert_eq!(terminal.position(), (5, 0));
        assert_eq!(editor.buffer().text(), "ac");
        assert_eq!(terminal.row_text(0), "pw: **");
    }

    #[test]
    fn test_rendered_field_length_matches_input() {
        for input in ["", "a", "correct horse", "p@ss-w0rd!"] {
            let mut terminal = VirtualTerminal::new(80);
            terminal.type_text(input);
            terminal.push_key(KeyCode::Enter);

            let text = read_line_masked(&mut terminal, &config('.')).unwrap();

            assert_eq!(text, input);
            let expected = format!("pw: {}", ".".repeat(input.chars().count()));
            assert_eq!(terminal.row_text(0), expected.trim_end());
        }
    }

    #[test]
    fn test_colors_restored_after_session() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.set_foreground_color(Color::Yellow).unwrap();
        terminal.type_text("x");
        terminal.push_key(KeyCode::Esc);

        let config = MaskedInputConfig::new(
            InputPrompt::new("pw: ")
                .with_prompt_color(Color::DarkGrey)
                .with_input_color(Color::White),
        );
        read_line_masked(&mut terminal, &config).unwrap();

        assert_eq!(terminal.cell(4, 0).unwrap().foreground, Color::White);
        assert_eq!(terminal.foreground_color(), Color::Yellow);
    }

    #[test]
    fn test_show_then_cover() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.push_line("swordfish");

        let text = read_line_show_then_cover(&mut terminal, &config('#')).unwrap();

        assert_eq!(text, "swordfish");
        assert_eq!(terminal.row_text(0), "pw: #########");
        assert_eq!(terminal.position(), (0, 1));
    }

    #[test]
    fn test_read_line_with_mask_dispatch() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.push_line("visible");
        let text = read_line_with_mask(&mut terminal, MaskType::None, &config('*')).unwrap();
        assert_eq!(text, "visible");
        assert_eq!(terminal.row_text(0), "pw: visible");

        let mut terminal = VirtualTerminal::new(40);
        terminal.type_text("hidden");
        terminal.push_key(KeyCode::Enter);
        let text =
            read_line_with_mask(&mut terminal, MaskType::MaskWhileTyping, &config('*')).unwrap();
        assert_eq!(text, "hidden");
        assert_eq!(terminal.row_text(0), "pw: ******");
    }
}
