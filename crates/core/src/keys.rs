//! Maps raw key events to the editing actions the editors understand.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to a line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Enter,
    Escape,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Tab,
    PrintableChar(char),
    /// `0` to `9`, whether typed on the main row or the numeric keypad.
    DigitChar(char),
    MinusSign,
    Ignored,
}

impl KeyAction {
    /// The character a key would insert into free text, if any.
    pub fn as_char(self) -> Option<char> {
        match self {
            KeyAction::PrintableChar(c) | KeyAction::DigitChar(c) => Some(c),
            KeyAction::MinusSign => Some('-'),
            _ => None,
        }
    }
}

/// Classifies a key event. Pure and deterministic.
///
/// Ctrl+C cancels like Escape since raw mode swallows the interrupt signal.
/// Other Ctrl or Alt chords are ignored, except Ctrl+Alt together which is
/// how AltGr characters are reported on some platforms.
pub fn classify(key_event: &KeyEvent) -> KeyAction {
    if key_event.kind == KeyEventKind::Release {
        return KeyAction::Ignored;
    }

    let modifiers = key_event.modifiers;
    let is_alt_gr = modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let is_chord = !is_alt_gr && modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Enter => KeyAction::Enter,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Char('c') if modifiers == KeyModifiers::CONTROL => KeyAction::Escape,
        KeyCode::Char(_) if is_chord => KeyAction::Ignored,
        KeyCode::Char(c) if c.is_ascii_digit() => KeyAction::DigitChar(c),
        KeyCode::Char('-') => KeyAction::MinusSign,
        KeyCode::Char(c) if !c.is_control() => KeyAction::PrintableChar(c),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Delete,
        KeyCode::Left => KeyAction::ArrowLeft,
        KeyCode::Right => KeyAction::ArrowRight,
        KeyCode::Up => KeyAction::ArrowUp,
        KeyCode::Down => KeyAction::ArrowDown,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::Tab => KeyAction::Tab,
        _ => KeyAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_classify_navigation_and_terminators() {
        assert_eq!(classify(&key(KeyCode::Enter)), KeyAction::Enter);
        assert_eq!(classify(&key(KeyCode::Esc)), KeyAction::Escape);
        assert_eq!(classify(&key(KeyCode::Backspace)), KeyAction::Backspace);
        assert_eq!(classify(&key(KeyCode::Delete)), KeyAction::Delete);
        assert_eq!(classify(&key(KeyCode::Left)), KeyAction::ArrowLeft);
        assert_eq!(classify(&key(KeyCode::Right)), KeyAction::ArrowRight);
        assert_eq!(classify(&key(KeyCode::Up)), KeyAction::ArrowUp);
        assert_eq!(classify(&key(KeyCode::Down)), KeyAction::ArrowDown);
        assert_eq!(classify(&key(KeyCode::Home)), KeyAction::Home);
        assert_eq!(classify(&key(KeyCode::End)), KeyAction::End);
        assert_eq!(classify(&key(KeyCode::Tab)), KeyAction::Tab);
        assert_eq!(classify(&key(KeyCode::PageUp)), KeyAction::Ignored);
        assert_eq!(classify(&key(KeyCode::F(5))), KeyAction::Ignored);
    }

    #[test]
    fn test_classify_characters() {
        assert_eq!(classify(&key(KeyCode::Char('a'))), KeyAction::PrintableChar('a'));
        assert_eq!(classify(&key(KeyCode::Char(' '))), KeyAction::PrintableChar(' '));
        assert_eq!(classify(&key(KeyCode::Char('7'))), KeyAction::DigitChar('7'));
        assert_eq!(classify(&key(KeyCode::Char('-'))), KeyAction::MinusSign);
    }

    #[test]
    fn test_classify_keypad_digit_normalized() {
        let keypad = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('4'),
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::KEYPAD,
        );

        assert_eq!(classify(&keypad), KeyAction::DigitChar('4'));
        assert_eq!(classify(&keypad), classify(&key(KeyCode::Char('4'))));
    }

    #[test]
    fn test_classify_modifiers() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify(&ctrl_c), KeyAction::Escape);

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(classify(&ctrl_a), KeyAction::Ignored);

        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(classify(&alt_x), KeyAction::Ignored);

        let alt_gr = KeyEvent::new(
            KeyCode::Char('@'),
            KeyModifiers::CONTROL | KeyModifiers::ALT,
        );
        assert_eq!(classify(&alt_gr), KeyAction::PrintableChar('@'));

        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(classify(&shifted), KeyAction::PrintableChar('A'));
    }

    #[test]
    fn test_classify_release_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(classify(&release), KeyAction::Ignored);
    }

    #[test]
    fn test_as_char() {
        assert_eq!(KeyAction::PrintableChar('q').as_char(), Some('q'));
        assert_eq!(KeyAction::DigitChar('3').as_char(), Some('3'));
        assert_eq!(KeyAction::MinusSign.as_char(), Some('-'));
        assert_eq!(KeyAction::Enter.as_char(), None);
    }
}
