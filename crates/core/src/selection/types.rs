//! Type definitions for option selection.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crossterm::style::Color;

/// One entry of an option list.
///
/// Two items are equal when their values are equal and their display texts
/// match ignoring case. The sort key plays no part in equality.
#[derive(Debug, Clone)]
pub struct OptionItem<T> {
    display_text: String,
    value: T,
    sort_key: i32,
}

impl<T> OptionItem<T> {
    pub fn new(display_text: impl Into<String>, value: T) -> Self {
        Self {
            display_text: display_text.into(),
            value,
            sort_key: 0,
        }
    }

    pub fn with_sort_key(mut self, sort_key: i32) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn sort_key(&self) -> i32 {
        self.sort_key
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Orders by sort key, then by display text.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.sort_key
            .cmp(&other.sort_key)
            .then_with(|| self.display_text.cmp(&other.display_text))
    }
}

impl<T: PartialEq> PartialEq for OptionItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self
                .display_text
                .chars()
                .flat_map(char::to_lowercase)
                .eq(other.display_text.chars().flat_map(char::to_lowercase))
    }
}

impl<T: Eq> Eq for OptionItem<T> {}

impl<T> Display for OptionItem<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display_text)
    }
}

/// Everything about how an [`super::OptionSelector`] looks and behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Written above the list when not empty.
    pub title: String,
    pub title_color: Color,
    pub title_background: Color,

    /// Writes a line of key help between the title and the list.
    pub show_instructions: bool,
    pub instructions_color: Color,
    pub instructions_background: Color,

    /// Written before every option, e.g. `" - "` for a dashed list.
    pub bullet: String,
    pub option_color: Color,
    pub option_background: Color,
    pub highlight_color: Color,
    pub highlight_background: Color,

    /// Written on the line below the list, where the user types.
    pub input_prompt: String,
    pub prompt_color: Color,
    pub prompt_background: Color,
    pub input_color: Color,
    pub input_background: Color,

    /// Lets Tab select the only option matching the typed text.
    pub predictive_tab: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_color: Color::White,
            title_background: Color::Reset,
            show_instructions: false,
            instructions_color: Color::DarkGrey,
            instructions_background: Color::Reset,
            bullet: String::new(),
            option_color: Color::Grey,
            option_background: Color::Reset,
            highlight_color: Color::White,
            highlight_background: Color::DarkGreen,
            input_prompt: String::new(),
            prompt_color: Color::Grey,
            prompt_background: Color::Reset,
            input_color: Color::Grey,
            input_background: Color::Reset,
            predictive_tab: false,
        }
    }
}

impl SelectorConfig {
    pub fn instructions(&self) -> &'static str {
        if self.predictive_tab {
            "type and press tab to predict; up and down arrow to select; enter key to go; escape key to cancel"
        } else {
            "up and down arrow to select; enter key to go; escape key to cancel"
        }
    }
}
