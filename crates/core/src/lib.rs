//! Console Kit Core Library
//!
//! This crate provides interactive line input for character terminals: masked
//! password entry, integer-only entry, and a selectable option list, along with
//! a handful of colored output helpers.
//!
//! # Key Features
//!
//! - **Terminal Abstraction**: Editors only use the [`terminal::Terminal`] trait,
//!   backed by crossterm in production and an in-memory grid in tests
//! - **Masked Input**: Mask-while-typing with in-line editing, or show-then-cover
//! - **Integer Input**: A field that only ever holds an optional sign and digits
//! - **Option Selection**: Arrow-key navigation with highlighted options
//! - **Themes**: Colors and glyphs loaded from a YAML file
//! - **Commands**: A read-dispatch loop over named commands with built-in help
//!
//! # Examples
//!
//! Reading a password:
//!
//! ```no_run
//! use console_kit_core::crossterm_terminal::CrosstermTerminal;
//! use console_kit_core::masked::{read_line_masked, MaskedInputConfig};
//! use console_kit_core::prompt::InputPrompt;
//!
//! let mut terminal = CrosstermTerminal::new();
//! let config = MaskedInputConfig::new(InputPrompt::new("Password: ")).with_mask_char('#');
//! let password = read_line_masked(&mut terminal, &config)?;
//! # Ok::<(), console_kit_core::error::Error>(())
//! ```

pub mod colors;
pub mod config;
pub mod console_commands;
pub mod crossterm_terminal;
pub mod error;
pub mod integer;
pub mod keys;
pub mod line_buffer;
pub mod masked;
pub mod output;
pub mod prompt;
pub mod selection;
pub mod terminal;
pub mod virtual_terminal;
