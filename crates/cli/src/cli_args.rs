//! Command-line argument parsing.
//!
//! This module defines the command-line interface using the `clap` crate and
//! turns it into the [`LauncherConfig`] the rest of the launcher runs on.

use clap::Parser;
use shell_launcher_core::config::{self, LauncherConfig, ParserConfig};
use shell_launcher_core::error::Result;

/// Command-line arguments for the `launcher` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use shell_launcher_cli::cli_args::Args;
///
/// let args = Args::parse_from(["launcher", "/tmp/handoff"]);
/// assert_eq!(args.handoff_path.as_deref(), Some("/tmp/handoff"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// File to write the chosen command to instead of executing it.
    ///
    /// Used by a wrapping shell function that evaluates the file itself, so
    /// directory changes and exports land in the calling shell.
    #[arg(num_args(1))]
    pub handoff_path: Option<String>,

    /// Shell script holding the functions and aliases to list.
    ///
    /// If not provided, defaults to `zsh/common.zsh` next to the launcher binary.
    #[arg(long, short = 's')]
    pub source: Option<String>,

    /// Name the launcher is invoked by; functions and aliases with this name are not listed.
    #[arg(long = "name", short = 'n', default_value = config::DEFAULT_INVOCATION_NAME)]
    pub invocation_name: String,

    /// Shell used to run the chosen command. Defaults to `$SHELL`.
    #[arg(long)]
    pub shell: Option<String>,

    /// Always parse the source, never read or write the command cache.
    #[arg(long, action)]
    pub no_cache: bool,

    /// Path of the command cache.
    ///
    /// If not provided, defaults to `~/.cache/shell-launcher/commands.yml`.
    #[arg(long)]
    pub cache_path: Option<String>,

    /// Show the chosen command as an editable line before running it.
    #[arg(long, short = 'e', action)]
    pub edit: bool,
}

impl Args {
    /// Resolves default paths and builds the launcher configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no source was given and the launcher's install
    /// directory cannot be determined.
    pub fn launcher_config(&self) -> Result<LauncherConfig> {
        let cache_path = if self.no_cache {
            None
        } else {
            Some(config::get_cache_path(&self.cache_path))
        };

        Ok(LauncherConfig {
            source_path: config::get_source_path(&self.source)?,
            parser: ParserConfig::with_invocation_name(&self.invocation_name),
            shell: config::get_shell(&self.shell),
            cache_path,
            edit_before_run: self.edit,
            handoff_path: self.handoff_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["launcher"]);

        assert!(args.handoff_path.is_none());
        assert!(args.source.is_none());
        assert_eq!(args.invocation_name, "l");
        assert!(args.shell.is_none());
        assert!(!args.no_cache);
        assert!(args.cache_path.is_none());
        assert!(!args.edit);
    }

    #[test]
    fn test_args_handoff_path() {
        let args = Args::parse_from(["launcher", "/tmp/launcher.cmd"]);
        assert_eq!(args.handoff_path, Some("/tmp/launcher.cmd".to_string()));
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "launcher",
            "-s",
            "/custom/common.zsh",
            "-n",
            "run",
            "-e",
        ]);

        assert_eq!(args.source, Some("/custom/common.zsh".to_string()));
        assert_eq!(args.invocation_name, "run");
        assert!(args.edit);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "launcher",
            "--source",
            "/custom/common.zsh",
            "--name",
            "run",
            "--shell",
            "/bin/bash",
            "--no-cache",
            "--cache-path",
            "/custom/cache.yml",
            "--edit",
            "/tmp/handoff",
        ]);

        assert_eq!(args.source, Some("/custom/common.zsh".to_string()));
        assert_eq!(args.invocation_name, "run");
        assert_eq!(args.shell, Some("/bin/bash".to_string()));
        assert!(args.no_cache);
        assert_eq!(args.cache_path, Some("/custom/cache.yml".to_string()));
        assert!(args.edit);
        assert_eq!(args.handoff_path, Some("/tmp/handoff".to_string()));
    }

    #[test]
    fn test_launcher_config_from_args() {
        let args = Args::parse_from([
            "launcher",
            "--source",
            "/custom/common.zsh",
            "--shell",
            "/bin/bash",
            "--cache-path",
            "/custom/cache.yml",
            "/tmp/handoff",
        ]);

        let config = args.launcher_config().unwrap();

        assert_eq!(config.source_path, "/custom/common.zsh");
        assert_eq!(config.shell, "/bin/bash");
        assert_eq!(config.cache_path, Some("/custom/cache.yml".to_string()));
        assert_eq!(config.handoff_path, Some("/tmp/handoff".to_string()));
        assert_eq!(config.parser, ParserConfig::default());
        assert!(!config.edit_before_run);
    }

    #[test]
    fn test_launcher_config_without_cache() {
        let args = Args::parse_from(["launcher", "--no-cache", "--cache-path", "/ignored.yml"]);
        let config = args.launcher_config().unwrap();
        assert!(config.cache_path.is_none());
    }

    #[test]
    fn test_too_many_positionals_rejected() {
        let result = Args::try_parse_from(["launcher", "/tmp/a", "/tmp/b"]);
        assert!(result.is_err());
    }
}
