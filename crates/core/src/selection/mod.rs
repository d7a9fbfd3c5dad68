//! Arrow-key option selection.
//!
//! An [`OptionSelector`] writes a list of options above an input prompt and
//! lets the user pick one.
//!
//! # User Interface
//!
//! - Up/Down arrows highlight the previous/next option and copy its text
//!   into the input field; moving past either end returns to free text
//! - Typing, Backspace, Delete, Left/Right, Home/End edit the input field
//! - Tab picks the only option matching the typed text, when enabled
//! - Enter confirms the highlighted option; with none highlighted it cancels
//! - Escape cancels

pub mod types;
pub mod ui;

pub use types::{OptionItem, SelectorConfig};
pub use ui::OptionSelector;
