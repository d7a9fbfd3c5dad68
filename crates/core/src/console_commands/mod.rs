//! Named commands run from a typed line.
//!
//! A [`CommandRegistry`] reads a line, splits it into a command word and its
//! arguments, and runs the [`ConsoleCommand`] one of whose aliases matches the
//! word.
//!
//! # Built-in Commands
//!
//! - `help`, `h`, `?`: lists the commands; `help <command>` shows one in detail
//! - `exit`, `x`, `quit`, `q`: ends [`CommandRegistry::run`]
//!
//! Following any command name with a help word, such as `login ?`, shows that
//! command's details instead of running it.

pub mod registry;
pub mod types;

pub use registry::{
    split_input, write_long_help, CommandRegistry, ConsoleCommand, ExitCommand, HelpCommand,
};
pub use types::{CommandName, CommandParameter, CommandReturn, SessionRequest};
