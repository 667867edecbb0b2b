//! Shell Launcher CLI Library
//!
//! This crate provides the command-line interface for shell-launcher, a
//! terminal launcher for the functions and aliases in a shell configuration
//! script. It handles argument parsing and the interactive selection that
//! turns a search into a command to run.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing into a launcher configuration
//! - [`command_selection`]: Interaction state machine and its terminal UI
//!
//! # Examples
//!
//! The CLI binary (`launcher`) can be used in two ways:
//!
//! ```bash
//! # Direct mode - the chosen command runs in a child shell
//! launcher
//!
//! # Handoff mode - the chosen command is written to a file for the caller
//! launcher /tmp/launcher.cmd && source /tmp/launcher.cmd
//!
//! # Different source script, edit the command before running it
//! launcher --source ~/.zsh/functions.zsh --edit
//! ```

pub mod cli_args;
pub mod command_selection;
