//! Console Kit CLI Library
//!
//! This crate provides `ck`, a small demo tool that runs each reader and
//! output helper of `console-kit-core` against the real terminal.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`commands`]: One demo per subcommand, written against the terminal trait
//! - [`shell`]: The demos as named commands of an interactive loop
//!
//! # Examples
//!
//! ```bash
//! # Username and masked password
//! ck login
//!
//! # Pick from a list, with Tab prediction and key help
//! ck options --predict --instructions Mon Tue Wed
//!
//! # A themed integer prompt
//! ck --theme-path ./theme.yml int
//!
//! # Every demo from one prompt
//! ck shell
//! ```

pub mod cli_args;
pub mod commands;
pub mod shell;
