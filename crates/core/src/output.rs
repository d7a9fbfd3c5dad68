//! Colored output and simple text layout.

use std::borrow::Cow;
use std::iter;

use crossterm::style::Color;
use log::warn;
use textwrap::{Options, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};
use crate::terminal::{ColorScope, Terminal};

/// Colors cycled through by [`write_rainbow`].
pub const RAINBOW: [Color; 5] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
];

pub const HORIZONTAL_SINGLE_LINE: char = '─';
pub const HORIZONTAL_DOUBLE_LINE: char = '═';

/// Characters accepted for a horizontal rule. The first one is the fallback.
pub const ACCEPTED_RULE_CHARS: [char; 21] = [
    '-',
    '=',
    '_',
    '~',
    '#',
    '*',
    '<',
    '^',
    'v',
    '>',
    '.',
    ':',
    '/',
    '|',
    '\\',
    'x',
    'X',
    'o',
    'O',
    HORIZONTAL_SINGLE_LINE,
    HORIZONTAL_DOUBLE_LINE,
];

/// Runs `write` with the given colors and restores the previous ones afterwards.
pub fn with_colors<T, R, F>(
    terminal: &mut T,
    foreground: Color,
    background: Color,
    write: F,
) -> Result<R>
where
    T: Terminal + ?Sized,
    F: FnOnce(&mut T) -> Result<R>,
{
    let mut scope = ColorScope::enter(terminal);
    scope.set_foreground_color(foreground)?;
    scope.set_background_color(background)?;
    write(&mut *scope)
}

pub fn write_color<T: Terminal + ?Sized>(
    terminal: &mut T,
    text: &str,
    foreground: Color,
    background: Color,
) -> Result<()> {
    with_colors(terminal, foreground, background, |terminal| terminal.write(text))
}

/// Like [`write_color`], but the line break is written after the colors are
/// restored so the background only sits behind the text.
pub fn write_color_line<T: Terminal + ?Sized>(
    terminal: &mut T,
    text: &str,
    foreground: Color,
    background: Color,
) -> Result<()> {
    write_color(terminal, text, foreground, background)?;
    terminal.write_line("")
}

/// Writes each character in the next color of [`RAINBOW`].
pub fn write_rainbow<T: Terminal + ?Sized>(terminal: &mut T, text: &str) -> Result<()> {
    let mut scope = ColorScope::enter(terminal);

    for (c, color) in text.chars().zip(RAINBOW.iter().cycle()) {
        scope.set_foreground_color(*color)?;
        scope.write(c.encode_utf8(&mut [0; 4]))?;
    }

    Ok(())
}

pub fn write_rainbow_line<T: Terminal + ?Sized>(terminal: &mut T, text: &str) -> Result<()> {
    write_rainbow(terminal, text)?;
    terminal.write_line("")
}

/// Returns `desired` if it is an accepted rule character, `-` otherwise.
pub fn accepted_rule_char(desired: Option<char>) -> char {
    desired
        .filter(|c| ACCEPTED_RULE_CHARS.contains(c))
        .unwrap_or(ACCEPTED_RULE_CHARS[0])
}

/// Writes a line of `rule_char`.
///
/// The length defaults to the window width; lengths of zero or wider than the
/// window are ignored. With no color the current colors are used.
pub fn write_horizontal_rule<T: Terminal + ?Sized>(
    terminal: &mut T,
    rule_char: char,
    color: Option<Color>,
    length: Option<u16>,
) -> Result<()> {
    let rule_char = accepted_rule_char(Some(rule_char));
    let window_width = terminal.window_width()?;
    let width = length
        .filter(|length| *length > 0 && *length <= window_width)
        .unwrap_or(window_width);

    let rule: String = iter::repeat(rule_char).take(width as usize).collect();

    match color {
        Some(color) => {
            let background = terminal.background_color();
            write_color_line(terminal, &rule, color, background)
        }
        None => terminal.write_line(&rule),
    }
}

/// Greedy word wrap to `width` display columns. Words longer than a line are split.
///
/// A width of zero disables wrapping.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let options = Options::new(width).wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletListStyle {
    pub bullet: String,
    /// `None` keeps the current foreground.
    pub bullet_color: Option<Color>,
    /// `None` keeps the current foreground.
    pub item_color: Option<Color>,
}

impl Default for BulletListStyle {
    fn default() -> Self {
        Self {
            bullet: " - ".to_string(),
            bullet_color: None,
            item_color: None,
        }
    }
}

/// Writes `items` as a bullet list wrapped to the window width, continuation
/// lines indented to line up with the text after the bullet.
///
/// # Errors
///
/// Returns [`Error::LayoutTooNarrow`] when the bullet is wider than a quarter
/// of the space left for text, or fewer than 12 columns remain for text.
pub fn write_bullet_list<T, S>(terminal: &mut T, items: &[S], style: &BulletListStyle) -> Result<()>
where
    T: Terminal + ?Sized,
    S: AsRef<str>,
{
    if items.is_empty() {
        return Ok(());
    }

    let bullet_width = style.bullet.width();
    let window_width = terminal.window_width()? as usize;
    let available_width = window_width.saturating_sub(bullet_width);

    if bullet_width > available_width / 4 || available_width < 12 {
        warn!("Bullet list skipped, window width {window_width} is too narrow");
        return Err(Error::LayoutTooNarrow {
            bullet_width,
            window_width,
        });
    }

    let indent = " ".repeat(bullet_width);
    let mut scope = ColorScope::enter(terminal);
    let bullet_color = style.bullet_color.unwrap_or(scope.saved_foreground());
    let item_color = style.item_color.unwrap_or(scope.saved_foreground());

    if scope.cursor_left()? > 0 {
        scope.write_line("")?;
    }

    for item in items {
        scope.set_foreground_color(bullet_color)?;
        scope.write(&style.bullet)?;

        scope.set_foreground_color(item_color)?;
        for (i, line) in wrap_words(item.as_ref(), available_width).iter().enumerate() {
            if i > 0 {
                scope.write(&indent)?;
            }
            scope.write_line(line)?;
        }
    }

    Ok(())
}
