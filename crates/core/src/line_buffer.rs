//! The editable character buffer shared by every line editor.

use crate::error::{Error, Result};
use crate::terminal::Terminal;

/// The terminal column of `offset` characters into a field starting at `start_column`.
pub fn column_at(start_column: u16, offset: usize) -> u16 {
    start_column.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX))
}

/// A line of characters with a cursor offset into it.
///
/// The cursor always satisfies `0 <= cursor <= len`. The on-screen column of
/// the cursor is derived by the editor as `field start + cursor`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    content: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer holding `text` with the cursor after its last character.
    pub fn from_text(text: &str) -> Self {
        let content: Vec<char> = text.chars().collect();
        let cursor = content.len();
        Self { content, cursor }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chars(&self) -> &[char] {
        &self.content
    }

    pub fn text(&self) -> String {
        self.content.iter().collect()
    }

    /// Splices `c` in at `offset`. The cursor is left where it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `offset` is past the end of the buffer.
    pub fn insert_at(&mut self, offset: usize, c: char) -> Result<()> {
        if offset > self.content.len() {
            return Err(Error::out_of_range(offset, self.content.len()));
        }

        self.content.insert(offset, c);
        Ok(())
    }

    /// Removes the character at `offset`, pulling the cursor back if it would
    /// otherwise sit past the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if there is no character at `offset`.
    pub fn remove_at(&mut self, offset: usize) -> Result<char> {
        if offset >= self.content.len() {
            return Err(Error::out_of_range(offset, self.content.len()));
        }

        let removed = self.content.remove(offset);
        self.cursor = self.cursor.min(self.content.len());
        Ok(removed)
    }

    /// Inserts at the cursor and advances it past the new character.
    pub fn insert_at_cursor(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Removes the character left of the cursor. `None` at the field start.
    pub fn backspace(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }

        self.cursor -= 1;
        Some(self.content.remove(self.cursor))
    }

    /// Removes the character under the cursor. `None` at the end of the content.
    pub fn delete(&mut self) -> Option<char> {
        if self.cursor >= self.content.len() {
            return None;
        }

        Some(self.content.remove(self.cursor))
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.content.len() {
            return false;
        }

        self.cursor += 1;
        true
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Moves the cursor to `offset`, clamped to the content.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.content.len());
    }

    /// Replaces the whole content, cursor at the end.
    pub fn replace(&mut self, text: &str) {
        self.content = text.chars().collect();
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Repaints the whole field from `start_column`.
    ///
    /// Each character goes through `display` first, so masked editors can
    /// paint their mask. Blanks are written up to `erase_width` cells to wipe
    /// whatever a longer previous content left behind. The terminal cursor is
    /// then put back at `start_column + cursor`.
    ///
    /// Terminals can't be read back, so this always repaints the full field
    /// rather than trying to work out what changed.
    pub fn render<T, F>(
        &self,
        terminal: &mut T,
        start_column: u16,
        erase_width: usize,
        display: F,
    ) -> Result<()>
    where
        T: Terminal + ?Sized,
        F: Fn(char) -> char,
    {
        self.render_from(terminal, start_column, 0, erase_width, display)
    }

    /// Repaints the field from character `offset` onwards. Only safe when the
    /// cells before `offset` are known to be unchanged on screen.
    pub fn render_from<T, F>(
        &self,
        terminal: &mut T,
        start_column: u16,
        offset: usize,
        erase_width: usize,
        display: F,
    ) -> Result<()>
    where
        T: Terminal + ?Sized,
        F: Fn(char) -> char,
    {
        let offset = offset.min(self.content.len());

        let mut painted: String = self.content[offset..].iter().map(|&c| display(c)).collect();
        let padding = erase_width.saturating_sub(self.content.len());
        painted.extend(std::iter::repeat(' ').take(padding));

        terminal.set_cursor_left(column_at(start_column, offset))?;
        terminal.write(&painted)?;
        terminal.set_cursor_left(column_at(start_column, self.cursor))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::virtual_terminal::VirtualTerminal;

    fn assert_cursor_in_bounds(buffer: &LineBuffer) {
        assert!(buffer.cursor() <= buffer.len());
    }

    #[test]
    fn test_insert_at_bounds() {
        let mut buffer = LineBuffer::from_text("ac");
        buffer.insert_at(1, 'b').unwrap();
        assert_eq!(buffer.text(), "abc");

        buffer.insert_at(3, 'd').unwrap();
        assert_eq!(buffer.text(), "abcd");

        assert!(matches!(
            buffer.insert_at(9, 'x'),
            Err(Error::OutOfRange { offset: 9, len: 4 })
        ));
        assert_eq!(buffer.text(), "abcd");
    }

    #[test]
    fn test_remove_at_bounds() {
        let mut buffer = LineBuffer::from_text("abc");
        assert_eq!(buffer.remove_at(1).unwrap(), 'b');
        assert_eq!(buffer.text(), "ac");

        assert!(matches!(
            buffer.remove_at(2),
            Err(Error::OutOfRange { offset: 2, len: 2 })
        ));
    }

    #[test]
    fn test_remove_at_pulls_cursor_back() {
        let mut buffer = LineBuffer::from_text("abc");
        assert_eq!(buffer.cursor(), 3);

        buffer.remove_at(2).unwrap();
        assert_eq!(buffer.cursor(), 2);
        assert_cursor_in_bounds(&buffer);
    }

    #[test]
    fn test_cursor_invariant_over_mixed_operations() {
        let mut buffer = LineBuffer::new();

        for step in 0..60usize {
            match step % 7 {
                0 | 3 => buffer.insert_at_cursor(char::from(b'a' + (step % 26) as u8)),
                1 => {
                    buffer.backspace();
                }
                2 => {
                    buffer.move_left();
                }
                4 => {
                    let _ = buffer.remove_at(step % 5);
                }
                5 => {
                    buffer.delete();
                }
                _ => {
                    let _ = buffer.insert_at(step % 4, 'z');
                }
            }

            assert_cursor_in_bounds(&buffer);
        }
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut buffer = LineBuffer::from_text("abc");
        buffer.move_home();

        assert_eq!(buffer.backspace(), None);
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_delete_at_end_is_noop() {
        let mut buffer = LineBuffer::from_text("abc");

        assert_eq!(buffer.delete(), None);
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut buffer = LineBuffer::from_text("ab");
        assert!(!buffer.move_right());

        assert!(buffer.move_left());
        assert!(buffer.move_left());
        assert!(!buffer.move_left());
        assert_eq!(buffer.cursor(), 0);

        buffer.set_cursor(10);
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut buffer = LineBuffer::from_text("ac");
        buffer.move_left();
        buffer.insert_at_cursor('b');

        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_render_repaints_and_restores_cursor() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.write("> ").unwrap();

        let mut buffer = LineBuffer::from_text("hello");
        buffer.render(&mut terminal, 2, 0, |c| c).unwrap();
        assert_eq!(terminal.row_text(0), "> hello");
        assert_eq!(terminal.position(), (7, 0));

        buffer.move_home();
        buffer.delete();
        buffer.render(&mut terminal, 2, 5, |c| c).unwrap();
        assert_eq!(terminal.row_text(0), "> ello");
        assert_eq!(terminal.position(), (2, 0));
    }

    #[test]
    fn test_render_applies_display_transform() {
        let mut terminal = VirtualTerminal::new(40);
        let buffer = LineBuffer::from_text("secret");

        buffer.render(&mut terminal, 0, 0, |_| '*').unwrap();
        assert_eq!(terminal.row_text(0), "******");
    }

    #[test]
    fn test_render_from_only_touches_tail() {
        let mut terminal = VirtualTerminal::new(40);
        terminal.write("XXXX").unwrap();

        let mut buffer = LineBuffer::from_text("abcd");
        buffer.set_cursor(2);
        buffer.render_from(&mut terminal, 0, 2, 0, |c| c).unwrap();

        assert_eq!(terminal.row_text(0), "XXcd");
        assert_eq!(terminal.position(), (2, 0));
    }

    #[test]
    fn test_column_at_saturates() {
        assert_eq!(column_at(3, 4), 7);
        assert_eq!(column_at(u16::MAX - 1, 10), u16::MAX);
        assert_eq!(column_at(0, usize::MAX), u16::MAX);
    }
}
