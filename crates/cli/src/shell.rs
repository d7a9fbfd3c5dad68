//! The `shell` demo: the other demos as commands of a read-dispatch loop.

use crossterm::style::Color;
use log::debug;

use console_kit_core::config::ThemeDefinition;
use console_kit_core::console_commands::{
    CommandName, CommandParameter, CommandRegistry, CommandReturn, ConsoleCommand,
};
use console_kit_core::error::Result;
use console_kit_core::output::write_color_line;
use console_kit_core::terminal::Terminal;

use crate::cli_args::Demo;
use crate::commands::run_demo;

const WELCOME: &str = "Type `help` for a list of commands and `exit` to leave";

/// Runs one [`Demo`] built from the words typed after the command name.
pub struct DemoCommand {
    names: CommandName,
    short_help: &'static str,
    long_help: &'static str,
    parameters: Vec<CommandParameter>,
    build: fn(&[String]) -> Demo,
    theme: ThemeDefinition,
}

impl DemoCommand {
    fn new<const N: usize>(
        aliases: [&str; N],
        short_help: &'static str,
        build: fn(&[String]) -> Demo,
        theme: &ThemeDefinition,
    ) -> Self {
        Self {
            names: CommandName::new(aliases),
            short_help,
            long_help: short_help,
            parameters: Vec::new(),
            build,
            theme: theme.clone(),
        }
    }

    fn with_long_help(mut self, long_help: &'static str) -> Self {
        self.long_help = long_help;
        self
    }

    fn with_parameter(mut self, parameter: CommandParameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}

impl ConsoleCommand for DemoCommand {
    fn names(&self) -> &CommandName {
        &self.names
    }

    fn short_help(&self) -> &str {
        self.short_help
    }

    fn long_help(&self) -> &str {
        self.long_help
    }

    fn parameters(&self) -> &[CommandParameter] {
        &self.parameters
    }

    fn run(&self, terminal: &mut dyn Terminal, args: &[String]) -> Result<CommandReturn> {
        run_demo(terminal, &(self.build)(args), &self.theme)?;
        Ok(CommandReturn::success())
    }
}

fn options_demo(args: &[String]) -> Demo {
    Demo::Options {
        title: None,
        predict: true,
        instructions: true,
        items: args.to_vec(),
    }
}

fn rule_demo(args: &[String]) -> Demo {
    Demo::Rule {
        rule_char: args
            .first()
            .and_then(|arg| arg.chars().next())
            .unwrap_or('-'),
        length: args.get(1).and_then(|arg| arg.parse().ok()),
    }
}

/// A registry holding every demo except the shell itself.
pub fn demo_registry(theme: &ThemeDefinition) -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry
        .register(
            DemoCommand::new(
                ["login", "l", "auth", "a"],
                "Ask for a username and a masked password.",
                |_| Demo::Login,
                theme,
            )
            .with_long_help(
                "Asks for a username with ordinary input, then for a password that shows \
                 only mask characters while it is typed.",
            ),
        )
        .register(DemoCommand::new(
            ["cover", "c"],
            "Ask for a secret that is covered once entered.",
            |_| Demo::Cover,
            theme,
        ))
        .register(DemoCommand::new(
            ["int", "i", "number"],
            "Ask for a whole number.",
            |_| Demo::Int,
            theme,
        ))
        .register(
            DemoCommand::new(
                ["options", "o"],
                "Pick one of a list of options.",
                options_demo,
                theme,
            )
            .with_long_help(
                "Writes the options above a prompt. The arrow keys move the highlight, \
                 Tab completes the only option matching what was typed and Enter picks it.",
            )
            .with_parameter(
                CommandParameter::new("items")
                    .with_description("the options, five sample options when left out"),
            ),
        )
        .register(
            DemoCommand::new(
                ["bullets", "b"],
                "Write the arguments as a bullet list.",
                |args| Demo::Bullets {
                    items: args.to_vec(),
                },
                theme,
            )
            .with_parameter(
                CommandParameter::new("items")
                    .required()
                    .with_description("one bullet per argument"),
            ),
        )
        .register(
            DemoCommand::new(
                ["rule", "r"],
                "Write a horizontal rule.",
                rule_demo,
                theme,
            )
            .with_parameter(
                CommandParameter::new("char")
                    .with_order(1)
                    .with_description("the rule character, `-` by default"),
            )
            .with_parameter(
                CommandParameter::new("length")
                    .with_order(2)
                    .with_description("the window width by default"),
            ),
        )
        .register(DemoCommand::new(
            ["rainbow"],
            "Write the arguments in cycling colors.",
            |args| Demo::Rainbow {
                text: args.join(" "),
            },
            theme,
        ));

    registry
}

/// Reads and runs demo commands until `exit` or the end of input.
///
/// # Errors
///
/// Returns an error if the terminal fails or the theme holds an invalid color.
pub fn run_shell<T: Terminal + ?Sized>(
    terminal: &mut T,
    theme: &ThemeDefinition,
    prompt: &str,
) -> Result<()> {
    let prompt = theme.input_prompt(prompt)?;
    let registry = demo_registry(theme);

    let background = terminal.background_color();
    write_color_line(terminal, WELCOME, Color::Blue, background)?;

    let result = registry.run(terminal, &prompt)?;
    debug!("Shell finished with status {}", result.status_code());
    Ok(())
}
