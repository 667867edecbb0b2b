//! Configuration values for the launcher.
//!
//! Everything the parser, cache and executor need is carried in a
//! [`LauncherConfig`] built once from the command line. Default paths are
//! resolved here and shell expansions like `~` are applied.

use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Default path for the parsed command cache
const DEFAULT_CACHE_PATH: &str = "~/.cache/shell-launcher/commands.yml";
/// Location of the shell source relative to the launcher's install directory
const SOURCE_RELATIVE_PATH: &str = "zsh/common.zsh";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/zsh";

/// Name of the shell routine that wraps the launcher. Never listed.
pub const DEFAULT_INVOCATION_NAME: &str = "l";

/// Descriptions that hide a function or alias from the launcher.
pub const HIDDEN_SENTINELS: [&str; 2] = ["launcher-hidden", "launcher-hide"];

/// Rules the source parser applies when deciding what to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub invocation_name: String,
    pub hidden_sentinels: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            invocation_name: DEFAULT_INVOCATION_NAME.to_string(),
            hidden_sentinels: HIDDEN_SENTINELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_invocation_name(invocation_name: &str) -> Self {
        Self {
            invocation_name: invocation_name.to_string(),
            ..Self::default()
        }
    }

    /// Exact, case-sensitive match against the hidden sentinels.
    #[must_use]
    pub fn is_hidden(&self, description: &str) -> bool {
        self.hidden_sentinels.iter().any(|s| s == description)
    }

    #[must_use]
    pub fn is_launcher_itself(&self, name: &str) -> bool {
        self.invocation_name == name
    }
}

/// Complete launcher configuration.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Shell script the commands are read from
    pub source_path: String,
    pub parser: ParserConfig,
    /// Shell used in direct-execution mode
    pub shell: String,
    /// `None` disables the command cache
    pub cache_path: Option<String>,
    /// Show the editable command line before committing
    pub edit_before_run: bool,
    /// When set, the chosen command is written here instead of executed
    pub handoff_path: Option<String>,
}

/// Resolves the shell source file path.
///
/// If a custom path is provided, uses that path. Otherwise the source is
/// expected at `zsh/common.zsh` next to the launcher executable. Shell
/// expansions like `~` are resolved.
///
/// # Errors
///
/// Returns an error if no path was given and the executable's location
/// cannot be determined.
pub fn get_source_path(source_path_arg: &Option<String>) -> Result<String> {
    if let Some(source_path) = source_path_arg {
        return Ok(expand_path(source_path));
    }

    let executable = env::current_exe().map_err(Error::InstallPath)?;
    let install_dir = executable.parent().unwrap_or_else(|| Path::new("."));

    Ok(install_dir
        .join(SOURCE_RELATIVE_PATH)
        .to_string_lossy()
        .to_string())
}

/// Resolves the cache file path, falling back to the default location.
///
/// # Examples
///
/// ```
/// use shell_launcher_core::config::get_cache_path;
///
/// let custom = get_cache_path(&Some("/tmp/launcher.yml".to_string()));
/// assert_eq!(custom, "/tmp/launcher.yml");
/// ```
pub fn get_cache_path(cache_path_arg: &Option<String>) -> String {
    let cache_path = match cache_path_arg {
        Some(cache_path) => cache_path,
        None => DEFAULT_CACHE_PATH,
    };

    expand_path(cache_path)
}

/// Picks the shell for direct execution: explicit argument, then `$SHELL`,
/// then [`DEFAULT_SHELL`].
pub fn get_shell(shell_arg: &Option<String>) -> String {
    if let Some(shell) = shell_arg {
        return expand_path(shell);
    }

    env::var("SHELL").unwrap_or_else(|_| DEFAULT_SHELL.to_string())
}

/// Expands a leading `~` in a path.
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
