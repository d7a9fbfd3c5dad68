//! The demos behind each subcommand.
//!
//! Every demo only talks to the terminal through [`Terminal`], so the whole
//! flow can be driven from a scripted terminal in tests.

use crossterm::style::Color;
use log::debug;

use console_kit_core::config::ThemeDefinition;
use console_kit_core::error::Result;
use console_kit_core::integer::read_int;
use console_kit_core::masked::{read_line, read_line_masked, read_line_show_then_cover};
use console_kit_core::output::{
    write_bullet_list, write_color_line, write_horizontal_rule, write_rainbow_line,
};
use console_kit_core::selection::{OptionItem, OptionSelector};
use console_kit_core::terminal::Terminal;

use crate::cli_args::Demo;
use crate::shell::run_shell;

const SAMPLE_OPTION_COUNT: u32 = 5;
const SAMPLE_OPTION_SPACING_DAYS: u32 = 4;
const DEFAULT_OPTIONS_PROMPT: &str = "= ";
const DEFAULT_OPTIONS_BULLET: &str = " • ";

fn write_outcome<T: Terminal + ?Sized>(
    terminal: &mut T,
    text: &str,
    success: bool,
) -> Result<()> {
    let color = if success { Color::Yellow } else { Color::DarkRed };
    let background = terminal.background_color();
    write_color_line(terminal, text, color, background)
}

/// Options spaced a few days apart, valued by their day offset.
pub fn sample_options() -> Vec<OptionItem<u32>> {
    (1..=SAMPLE_OPTION_COUNT)
        .map(|i| {
            let days = i * SAMPLE_OPTION_SPACING_DAYS;
            let sort_key = i32::try_from(i).unwrap_or(i32::MAX);
            OptionItem::new(format!("in {days} days"), days).with_sort_key(sort_key)
        })
        .collect()
}

fn run_login<T: Terminal + ?Sized>(terminal: &mut T, theme: &ThemeDefinition) -> Result<()> {
    let username = read_line(terminal, &theme.input_prompt("Username: ")?)?;
    let password = read_line_masked(terminal, &theme.masked_config("Password: ")?)?;

    if password.is_empty() {
        write_outcome(terminal, "No password was entered", false)
    } else {
        let length = password.chars().count();
        write_outcome(
            terminal,
            &format!("Welcome {username}, your password has {length} characters"),
            true,
        )
    }
}

fn run_cover<T: Terminal + ?Sized>(terminal: &mut T, theme: &ThemeDefinition) -> Result<()> {
    let secret = read_line_show_then_cover(terminal, &theme.masked_config("Secret: ")?)?;
    let length = secret.chars().count();
    write_outcome(terminal, &format!("Covered {length} characters"), length > 0)
}

fn run_int<T: Terminal + ?Sized>(terminal: &mut T, theme: &ThemeDefinition) -> Result<()> {
    match read_int(terminal, &theme.input_prompt("Number: ")?)? {
        Some(value) => write_outcome(terminal, &format!("You entered {value}"), true),
        None => write_outcome(terminal, "No number was entered", false),
    }
}

fn run_options<T: Terminal + ?Sized>(
    terminal: &mut T,
    theme: &ThemeDefinition,
    title: Option<&str>,
    predict: bool,
    instructions: bool,
    items: &[String],
) -> Result<()> {
    let mut config = theme.selector_config(title.unwrap_or("available options..."))?;
    config.predictive_tab = predict;
    config.show_instructions = instructions;
    if theme.input_prompt.is_none() {
        config.input_prompt = DEFAULT_OPTIONS_PROMPT.to_string();
    }
    if theme.bullet.is_none() {
        config.bullet = DEFAULT_OPTIONS_BULLET.to_string();
    }

    let options = if items.is_empty() {
        sample_options()
    } else {
        items
            .iter()
            .zip(1u32..)
            .map(|(item, position)| OptionItem::new(item.clone(), position))
            .collect()
    };
    debug!("Offering {} options", options.len());

    let selector = OptionSelector::with_options(config, options);
    match selector.run(terminal)? {
        Some(selected) => write_outcome(terminal, &format!("Selected {selected}"), true),
        None => write_outcome(terminal, "No selection was made", false),
    }
}

/// Runs one demo against `terminal`.
///
/// # Errors
///
/// Returns an error if the terminal fails, the theme holds an invalid color,
/// or a bullet list doesn't fit the window.
pub fn run_demo<T: Terminal + ?Sized>(
    terminal: &mut T,
    demo: &Demo,
    theme: &ThemeDefinition,
) -> Result<()> {
    debug!("Running demo {demo:?}");

    let outcome = match demo {
        Demo::Login => run_login(terminal, theme),
        Demo::Cover => run_cover(terminal, theme),
        Demo::Int => run_int(terminal, theme),
        Demo::Options {
            title,
            predict,
            instructions,
            items,
        } => run_options(
            terminal,
            theme,
            title.as_deref(),
            *predict,
            *instructions,
            items,
        ),
        Demo::Bullets { items } => {
            write_bullet_list(terminal, items.as_slice(), &theme.bullet_style()?)
        }
        Demo::Rule { rule_char, length } => {
            write_horizontal_rule(terminal, *rule_char, None, *length)
        }
        Demo::Rainbow { text } => write_rainbow_line(terminal, text),
        Demo::Shell { prompt } => run_shell(terminal, theme, prompt),
    };

    outcome?;
    terminal.flush()
}
