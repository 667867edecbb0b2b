//! Interactive command selection.
//!
//! This module provides the terminal user interface of the launcher: a search
//! line over a scrollable list of functions and aliases, and an optional edit
//! line for the chosen command.
//!
//! # User Interface
//!
//! The interface supports:
//! - Typing to filter commands (substring, then edit-distance fallback)
//! - Arrow keys or the mouse wheel to move the selection
//! - Tab to switch focus between the search line and the list
//! - Ctrl+J / Ctrl+K to focus the list / the search line
//! - Enter to run the first match (search) or the selected command (list)
//! - 'q' (list only), Escape or Ctrl+C to quit

pub mod colors;
pub mod controller;
pub mod input;
pub mod types;
pub mod ui;

pub use controller::InteractionController;
pub use types::CommandChoice;
pub use ui::prompt_for_command_choice;

/// Character that quits when the list has focus
pub const QUIT_KEY: char = 'q';
