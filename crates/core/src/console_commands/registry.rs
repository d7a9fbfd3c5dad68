use std::io;

use crossterm::style::Color;
use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::masked::read_line;
use crate::output::{
    wrap_words, write_color, write_color_line, write_horizontal_rule, HORIZONTAL_DOUBLE_LINE,
};
use crate::prompt::InputPrompt;
use crate::terminal::Terminal;

use super::types::{CommandName, CommandParameter, CommandReturn};

const HELP_NAMES: [&str; 3] = ["help", "h", "?"];
const EXIT_NAMES: [&str; 4] = ["exit", "x", "quit", "q"];

/// A command that can be run by name from a [`CommandRegistry`].
pub trait ConsoleCommand {
    fn names(&self) -> &CommandName;

    /// One line for the command list.
    fn short_help(&self) -> &str;

    fn long_help(&self) -> &str {
        self.short_help()
    }

    fn parameters(&self) -> &[CommandParameter] {
        &[]
    }

    /// Runs the command with the words typed after its name.
    ///
    /// # Errors
    ///
    /// Terminal failures end the command loop. Any other error is reported
    /// and the loop carries on.
    fn run(&self, terminal: &mut dyn Terminal, args: &[String]) -> Result<CommandReturn>;
}

/// Asks the session for the command list, or for one command's details.
pub struct HelpCommand {
    names: CommandName,
    parameters: Vec<CommandParameter>,
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self {
            names: CommandName::new(HELP_NAMES),
            parameters: vec![CommandParameter::new("command")
                .with_description("a command to show the details of")],
        }
    }
}

impl ConsoleCommand for HelpCommand {
    fn names(&self) -> &CommandName {
        &self.names
    }

    fn short_help(&self) -> &str {
        "Show the help menu."
    }

    fn long_help(&self) -> &str {
        "Lists every command with a line about what it does. Give a command name \
         after help, or help after a command name, to see the details of that command."
    }

    fn parameters(&self) -> &[CommandParameter] {
        &self.parameters
    }

    fn run(&self, _terminal: &mut dyn Terminal, _args: &[String]) -> Result<CommandReturn> {
        Ok(CommandReturn::help_request())
    }
}

/// Asks the session to end.
pub struct ExitCommand {
    names: CommandName,
}

impl Default for ExitCommand {
    fn default() -> Self {
        Self {
            names: CommandName::new(EXIT_NAMES),
        }
    }
}

impl ConsoleCommand for ExitCommand {
    fn names(&self) -> &CommandName {
        &self.names
    }

    fn short_help(&self) -> &str {
        "Leave the command loop."
    }

    fn run(&self, _terminal: &mut dyn Terminal, _args: &[String]) -> Result<CommandReturn> {
        Ok(CommandReturn::exit_request())
    }
}

/// Splits a typed line into the command word and its arguments.
///
/// Words are separated by whitespace. Quoted text stays one argument with the
/// quotes removed. A blank line gives `None`.
///
/// # Errors
///
/// Returns [`Error::UnbalancedQuotes`] when a quote is left open.
pub fn split_input(input: &str) -> Result<Option<(String, Vec<String>)>> {
    let words = shlex::split(input).ok_or_else(|| Error::UnbalancedQuotes(input.to_string()))?;

    let mut words = words.into_iter();
    Ok(words.next().map(|command| (command, words.collect())))
}

/// Writes the aliases, long help and parameters of `command` between two
/// double rules.
pub fn write_long_help<T, C>(terminal: &mut T, command: &C) -> Result<()>
where
    T: Terminal + ?Sized,
    C: ConsoleCommand + ?Sized,
{
    let width = terminal.window_width()?.saturating_sub(1);

    terminal.write_line(&command.names().to_string())?;
    write_horizontal_rule(terminal, HORIZONTAL_DOUBLE_LINE, None, Some(width))?;

    for line in wrap_words(command.long_help(), usize::from(width)) {
        terminal.write_line(&line)?;
    }
    terminal.write_line("")?;

    let mut parameters = command.parameters().to_vec();
    if !parameters.is_empty() {
        parameters.sort_by(|p1, p2| p1.compare(p2));
        let name_width = parameters
            .iter()
            .map(|parameter| parameter.name.chars().count())
            .max()
            .unwrap_or_default();

        terminal.write_line("Command Parameters...")?;
        for parameter in &parameters {
            terminal.write_line(&parameter.describe(name_width))?;
        }
    }

    write_horizontal_rule(terminal, HORIZONTAL_DOUBLE_LINE, None, Some(width))
}

/// The commands of an interactive session, looked up by any of their aliases.
///
/// A new registry already holds [`HelpCommand`] and [`ExitCommand`].
pub struct CommandRegistry {
    commands: Vec<Box<dyn ConsoleCommand>>,
    help_names: CommandName,
    names_color: Color,
    error_color: Color,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
            help_names: CommandName::new(HELP_NAMES),
            names_color: Color::Cyan,
            error_color: Color::DarkRed,
        };
        registry.register(HelpCommand::default());
        registry.register(ExitCommand::default());
        registry
    }

    /// Adds a command. When aliases collide, the command registered first wins.
    pub fn register(&mut self, command: impl ConsoleCommand + 'static) -> &mut Self {
        if let Some(existing) = self
            .commands
            .iter()
            .find(|existing| existing.names().overlaps(command.names()))
        {
            warn!(
                "Command `{}` shares an alias with `{}`",
                command.names(),
                existing.names()
            );
        }

        debug!("Registered command `{}`", command.names());
        self.commands.push(Box::new(command));
        self
    }

    pub fn commands(&self) -> impl Iterator<Item = &dyn ConsoleCommand> {
        self.commands.iter().map(|command| &**command)
    }

    pub fn find(&self, name: &str) -> Option<&dyn ConsoleCommand> {
        self.commands().find(|command| command.names().is_match(name))
    }

    /// Writes every command's aliases with its short help, aligned in two columns.
    pub fn write_command_list<T: Terminal + ?Sized>(&self, terminal: &mut T) -> Result<()> {
        let names: Vec<String> = self
            .commands()
            .map(|command| command.names().to_string())
            .collect();
        let name_width = names
            .iter()
            .map(|names| names.chars().count())
            .max()
            .unwrap_or_default();

        for (names, command) in names.iter().zip(self.commands()) {
            let background = terminal.background_color();
            write_color(terminal, names, self.names_color, background)?;

            let padding = name_width - names.chars().count();
            terminal.write_line(&format!(
                "{}  {}",
                " ".repeat(padding),
                command.short_help()
            ))?;
        }

        Ok(())
    }

    fn report_failure<T: Terminal + ?Sized>(
        &self,
        terminal: &mut T,
        message: String,
    ) -> Result<CommandReturn> {
        let background = terminal.background_color();
        write_color_line(terminal, &message, self.error_color, background)?;
        Ok(CommandReturn::failed().with_message(message))
    }

    /// Runs the command named by the first word of `line`.
    ///
    /// A help word right after the command name shows that command's details
    /// instead of running it. Unknown commands, unbalanced quotes and command
    /// errors other than terminal failures are written out and returned as a
    /// failed [`CommandReturn`].
    ///
    /// # Errors
    ///
    /// Only terminal failures are errors.
    pub fn dispatch<T: Terminal + ?Sized>(
        &self,
        terminal: &mut T,
        line: &str,
    ) -> Result<CommandReturn> {
        let (name, args) = match split_input(line) {
            Ok(Some(words)) => words,
            Ok(None) => return Ok(CommandReturn::success()),
            Err(e) => return self.report_failure(terminal, e.to_string()),
        };

        let Some(command) = self.find(&name) else {
            warn!("Unknown command `{name}`");
            return self.report_failure(
                terminal,
                format!("Unknown command `{name}`, type `help` for a list of commands"),
            );
        };

        if args.first().is_some_and(|arg| self.help_names.is_match(arg)) {
            write_long_help(terminal, command)?;
            return Ok(CommandReturn::help_request());
        }

        trace!("Running `{}` with {} arguments", command.names().primary(), args.len());
        let mut handle = &mut *terminal;
        let result = match command.run(&mut handle, &args) {
            Ok(result) => result,
            Err(Error::Io(e)) => return Err(Error::Io(e)),
            Err(e) => {
                warn!("Command `{name}` failed: {e}");
                return self.report_failure(terminal, e.to_string());
            }
        };

        if result.is_help_request() {
            match args.first().and_then(|topic| self.find(topic)) {
                Some(topic) => write_long_help(terminal, topic)?,
                None => self.write_command_list(terminal)?,
            }
        }

        Ok(result)
    }

    /// Reads lines after `prompt` and dispatches them until an exit command
    /// runs or the input ends.
    ///
    /// # Errors
    ///
    /// Only terminal failures are errors.
    pub fn run<T: Terminal + ?Sized>(
        &self,
        terminal: &mut T,
        prompt: &InputPrompt,
    ) -> Result<CommandReturn> {
        loop {
            let line = match read_line(terminal, prompt) {
                Ok(line) => line,
                Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("Input ended, leaving the command loop");
                    terminal.write_line("")?;
                    return Ok(CommandReturn::exit_request());
                }
                Err(e) => return Err(e),
            };

            let result = self.dispatch(terminal, &line)?;
            if result.is_exit_request() {
                return Ok(result);
            }
        }
    }
}
