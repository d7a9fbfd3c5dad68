//! Prompt configuration shared by the line readers.

use crossterm::style::Color;

use crate::error::Result;
use crate::terminal::Terminal;

/// Whether an editor wants more keys or has finished with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Continue,
    Finish(T),
}

/// The text written before an input field, and the colors to use.
///
/// A `None` color leaves whatever foreground was active when the read began.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPrompt {
    pub text: String,
    pub prompt_color: Option<Color>,
    pub input_color: Option<Color>,
}

impl InputPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_prompt_color(mut self, color: Color) -> Self {
        self.prompt_color = Some(color);
        self
    }

    pub fn with_input_color(mut self, color: Color) -> Self {
        self.input_color = Some(color);
        self
    }

    /// Writes the prompt and leaves the terminal in the input color.
    pub(crate) fn begin<T: Terminal + ?Sized>(&self, terminal: &mut T) -> Result<()> {
        let saved = terminal.foreground_color();

        if !self.text.is_empty() {
            if let Some(prompt_color) = self.prompt_color {
                terminal.set_foreground_color(prompt_color)?;
            }
            terminal.write(&self.text)?;
        }

        terminal.set_foreground_color(self.input_color.unwrap_or(saved))
    }
}
