use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;
use log::{debug, trace};

use super::types::{OptionItem, SelectorConfig};
use crate::error::Result;
use crate::keys::{classify, KeyAction};
use crate::line_buffer::{column_at, LineBuffer};
use crate::output::{with_colors, write_color, write_color_line};
use crate::prompt::Flow;
use crate::terminal::{ColorScope, RawInputScope, Terminal};

/// A list of options the user picks from with the arrow keys.
#[derive(Debug, Clone)]
pub struct OptionSelector<T> {
    options: Vec<OptionItem<T>>,
    config: SelectorConfig,
}

impl<T> OptionSelector<T> {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            options: Vec::new(),
            config,
        }
    }

    pub fn with_options(config: SelectorConfig, options: Vec<OptionItem<T>>) -> Self {
        Self { options, config }
    }

    pub fn push(&mut self, option: OptionItem<T>) {
        self.options.push(option);
    }

    pub fn options(&self) -> &[OptionItem<T>] {
        &self.options
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SelectorConfig {
        &mut self.config
    }

    /// Orders the options by sort key, then display text.
    pub fn sort_options(&mut self) {
        self.options.sort_by(|o1, o2| o1.compare(o2));
    }

    /// Draws the list and prompt, then reads keys until the user confirms or
    /// cancels. `None` means no option was chosen.
    ///
    /// # Errors
    ///
    /// Only terminal failures are errors.
    pub fn run<Term: Terminal + ?Sized>(&self, terminal: &mut Term) -> Result<Option<&OptionItem<T>>> {
        let mut colors = ColorScope::enter(terminal);
        let mut scope = RawInputScope::enter(&mut *colors)?;
        let mut session = SelectorSession::draw(self, &mut *scope)?;

        loop {
            let key_event = scope.read_key()?;
            let action = classify(&key_event);
            trace!("Selector key {action:?}");

            if let Flow::Finish(selected) = session.handle_key(&mut *scope, action)? {
                session.finish(&mut *scope)?;
                debug!("Selector finished with selection {selected:?}");
                return Ok(selected.and_then(|index| self.options.get(index)));
            }
        }
    }
}

/// The state of one run of an [`OptionSelector`].
struct SelectorSession<'s, T> {
    options: &'s [OptionItem<T>],
    config: &'s SelectorConfig,
    selected: Option<usize>,
    typed: LineBuffer,
    first_option_row: u16,
    last_option_row: u16,
    input_row: u16,
    field_start: u16,
}

impl<'s, T> SelectorSession<'s, T> {
    fn draw<Term: Terminal + ?Sized>(
        selector: &'s OptionSelector<T>,
        terminal: &mut Term,
    ) -> Result<Self> {
        let config = &selector.config;

        if terminal.cursor_left()? != 0 {
            terminal.write_line("")?;
        }

        if !config.title.is_empty() {
            write_color_line(
                terminal,
                &config.title,
                config.title_color,
                config.title_background,
            )?;
        }

        if config.show_instructions {
            write_color_line(
                terminal,
                config.instructions(),
                config.instructions_color,
                config.instructions_background,
            )?;
        }

        for option in &selector.options {
            write_color_line(
                terminal,
                &option_line(config, option),
                config.option_color,
                config.option_background,
            )?;
        }

        write_color(
            terminal,
            &config.input_prompt,
            config.prompt_color,
            config.prompt_background,
        )?;

        // Rows are worked out from where the prompt ended up, so a list that
        // scrolled the window is still tracked correctly
        let input_row = terminal.cursor_top()?;
        let field_start = terminal.cursor_left()?;
        let option_count = u16::try_from(selector.options.len()).unwrap_or(u16::MAX);
        let first_option_row = input_row.saturating_sub(option_count);
        let last_option_row = input_row.saturating_sub(1);

        debug!(
            "Selector drawn with options on rows {first_option_row}..={last_option_row}, input on row {input_row}"
        );

        Ok(Self {
            options: &selector.options,
            config,
            selected: None,
            typed: LineBuffer::new(),
            first_option_row,
            last_option_row,
            input_row,
            field_start,
        })
    }

    fn handle_key<Term: Terminal + ?Sized>(
        &mut self,
        terminal: &mut Term,
        action: KeyAction,
    ) -> Result<Flow<Option<usize>>> {
        let previous_len = self.typed.len();

        match action {
            KeyAction::Escape => return Ok(Flow::Finish(None)),
            KeyAction::Enter => return Ok(Flow::Finish(self.selected)),
            KeyAction::ArrowDown => self.select(terminal, self.next_index())?,
            KeyAction::ArrowUp => self.select(terminal, self.previous_index())?,
            KeyAction::Backspace => {
                if self.typed.backspace().is_some() {
                    self.after_removal(terminal, previous_len)?;
                }
            }
            KeyAction::Delete => {
                if self.typed.delete().is_some() {
                    self.after_removal(terminal, previous_len)?;
                }
            }
            KeyAction::ArrowLeft => {
                if self.typed.move_left() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::ArrowRight => {
                if self.typed.move_right() {
                    self.place_cursor(terminal)?;
                }
            }
            KeyAction::Home => {
                self.typed.move_home();
                self.place_cursor(terminal)?;
            }
            KeyAction::End => {
                self.typed.move_end();
                self.place_cursor(terminal)?;
            }
            KeyAction::Tab => {
                if self.config.predictive_tab {
                    if let Some(index) = self.predict() {
                        self.select(terminal, Some(index))?;
                    }
                }
            }
            KeyAction::PrintableChar(_) | KeyAction::DigitChar(_) | KeyAction::MinusSign => {
                if let Some(c) = action.as_char() {
                    let offset = self.typed.cursor();
                    self.typed.insert_at_cursor(c);
                    self.paint_typed(terminal, offset, 0)?;
                }
            }
            KeyAction::Ignored => {}
        }

        Ok(Flow::Continue)
    }

    fn finish<Term: Terminal + ?Sized>(&self, terminal: &mut Term) -> Result<()> {
        terminal.set_cursor_top(self.input_row)?;
        terminal.write_line("")
    }

    /// The option after the current one; past the last comes free text.
    fn next_index(&self) -> Option<usize> {
        match self.selected {
            None if self.options.is_empty() => None,
            None => Some(0),
            Some(index) if index + 1 < self.options.len() => Some(index + 1),
            Some(_) => None,
        }
    }

    /// The option before the current one; before the first comes free text.
    fn previous_index(&self) -> Option<usize> {
        match self.selected {
            None => self.options.len().checked_sub(1),
            Some(0) => None,
            Some(index) => Some(index - 1),
        }
    }

    /// Moves the highlight and overwrites the input field with the option's
    /// text, or blanks the field when going back to free text.
    fn select<Term: Terminal + ?Sized>(
        &mut self,
        terminal: &mut Term,
        index: Option<usize>,
    ) -> Result<()> {
        let previous_len = self.typed.len();

        if let Some(previous) = self.selected {
            self.paint_option(terminal, previous, false)?;
        }

        self.selected = index.filter(|index| *index < self.options.len());

        match self.selected {
            Some(index) => {
                self.paint_option(terminal, index, true)?;
                self.typed.replace(self.options[index].display_text());
            }
            None => self.typed.clear(),
        }

        self.paint_typed(terminal, 0, previous_len)
    }

    fn after_removal<Term: Terminal + ?Sized>(
        &mut self,
        terminal: &mut Term,
        previous_len: usize,
    ) -> Result<()> {
        self.paint_typed(terminal, 0, previous_len)?;

        if self.typed.is_empty() {
            if let Some(previous) = self.selected.take() {
                self.paint_option(terminal, previous, false)?;
                self.place_cursor(terminal)?;
            }
        }

        Ok(())
    }

    /// Only the typed text will be matched; the selected option is unique
    /// among everything the fuzzy matcher accepts.
    fn predict(&self) -> Option<usize> {
        if self.typed.is_empty() {
            return None;
        }

        let pattern = self.typed.text();
        let matcher = SkimMatcherV2::default();

        self.options
            .iter()
            .positions(|option| matcher.fuzzy_match(option.display_text(), &pattern).is_some())
            .exactly_one()
            .ok()
    }

    fn option_row(&self, index: usize) -> u16 {
        self.first_option_row
            .saturating_add(u16::try_from(index).unwrap_or(u16::MAX))
            .min(self.last_option_row)
    }

    fn paint_option<Term: Terminal + ?Sized>(
        &self,
        terminal: &mut Term,
        index: usize,
        highlighted: bool,
    ) -> Result<()> {
        let Some(option) = self.options.get(index) else {
            return Ok(());
        };

        let (foreground, background) = if highlighted {
            (self.config.highlight_color, self.config.highlight_background)
        } else {
            (self.config.option_color, self.config.option_background)
        };

        let saved_row = terminal.cursor_top()?;
        terminal.set_cursor_left(0)?;
        terminal.set_cursor_top(self.option_row(index))?;
        write_color(terminal, &option_line(self.config, option), foreground, background)?;
        terminal.set_cursor_top(saved_row)
    }

    /// Repaints the input field from `offset`, blanking up to `erase_width`
    /// cells, and leaves the cursor at the typing position.
    fn paint_typed<Term: Terminal + ?Sized>(
        &self,
        terminal: &mut Term,
        offset: usize,
        erase_width: usize,
    ) -> Result<()> {
        terminal.set_cursor_top(self.input_row)?;

        let field_start = self.field_start;
        let typed = &self.typed;
        with_colors(
            terminal,
            self.config.input_color,
            self.config.input_background,
            |terminal| typed.render_from(terminal, field_start, offset, erase_width, |c| c),
        )
    }

    fn place_cursor<Term: Terminal + ?Sized>(&self, terminal: &mut Term) -> Result<()> {
        terminal.set_cursor_top(self.input_row)?;
        terminal.set_cursor_left(column_at(self.field_start, self.typed.cursor()))
    }
}

fn option_line<T>(config: &SelectorConfig, option: &OptionItem<T>) -> String {
    format!("{}{}", config.bullet, option.display_text())
}
