//! Shell Launcher Core Library
//!
//! This crate provides the core functionality for shell-launcher, a terminal
//! launcher for the functions and aliases defined in a personal shell
//! configuration script.
//!
//! # Key Features
//!
//! - **Source Parsing**: Extract functions, aliases and their descriptions from shell text
//! - **Search**: Substring filtering with an edit-distance fallback
//! - **Execution**: Run a chosen command directly, or hand it off to a calling shell
//! - **Caching**: Best-effort cache of the parsed command set
//! - **Error Handling**: Error types for every fatal failure mode
//!
//! # Examples
//!
//! Parsing commands out of shell source:
//!
//! ```
//! use shell_launcher_core::config::ParserConfig;
//! use shell_launcher_core::parsing::SourceParser;
//!
//! let source = "# show git status\ngst() { git status; }\nalias ll='ls -la' # long list\n";
//! let commands = SourceParser::new(ParserConfig::default()).parse(source);
//!
//! for command in &commands {
//!     println!("{command}");
//! }
//! assert_eq!(commands.len(), 2);
//! ```

pub mod command_definitions;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod parsing;
pub mod search;
