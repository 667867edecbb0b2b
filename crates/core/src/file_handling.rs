//! Reading the shell source and caching the parsed command set.
//!
//! The cache is best-effort: it is only trusted when it is at least as new
//! as the source file and was built with the same parser rules. Any problem
//! reading or writing it is logged and the source is parsed instead.

use std::fs::{self, File};
use std::path::Path;
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::command_definitions::Command;
use crate::config::{LauncherConfig, ParserConfig};
use crate::error::{Error, Result};
use crate::parsing::SourceParser;

#[derive(Deserialize, Serialize, Debug)]
struct CommandCache {
    source_path: String,
    invocation_name: String,
    hidden_sentinels: Vec<String>,
    commands: Vec<Command>,
}

impl CommandCache {
    fn matches(&self, source_path: &str, parser: &ParserConfig) -> bool {
        self.source_path == source_path
            && self.invocation_name == parser.invocation_name
            && self.hidden_sentinels == parser.hidden_sentinels
    }
}

/// Reads the whole shell source file.
///
/// # Errors
///
/// Returns [`Error::SourceNotFound`] if nothing exists at `path`, or an IO
/// error if the file cannot be read.
pub fn read_source(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(Error::source_not_found(path.to_string()));
    }

    fs::read_to_string(path)
        .map_err(|e| Error::io_error("shell source".to_string(), path.to_string(), e))
}

/// Loads the commands for a launcher session.
///
/// Uses the cache when it is enabled and fresh, otherwise parses the source
/// and refreshes the cache.
///
/// # Errors
///
/// Returns an error if:
/// - The source file does not exist or cannot be read
/// - No commands could be found in it
///
/// # Examples
///
/// ```no_run
/// use shell_launcher_core::config::{LauncherConfig, ParserConfig};
/// use shell_launcher_core::file_handling::load_commands;
///
/// let config = LauncherConfig {
///     source_path: "/home/me/dotfiles/zsh/common.zsh".to_string(),
///     parser: ParserConfig::default(),
///     shell: "/bin/zsh".to_string(),
///     cache_path: None,
///     edit_before_run: false,
///     handoff_path: None,
/// };
/// let commands = load_commands(&config)?;
/// println!("Loaded {} commands", commands.len());
/// # Ok::<(), shell_launcher_core::error::Error>(())
/// ```
pub fn load_commands(config: &LauncherConfig) -> Result<Vec<Command>> {
    let source_path = &config.source_path;

    let cached = config
        .cache_path
        .as_ref()
        .and_then(|cache_path| read_cache(cache_path, source_path, &config.parser));

    let commands = match cached {
        Some(commands) => commands,
        None => {
            let commands = SourceParser::new(config.parser.clone()).parse_file(source_path)?;
            if let Some(cache_path) = &config.cache_path {
                if let Err(e) = write_cache(cache_path, source_path, &config.parser, &commands) {
                    warn!("Could not write command cache: {e}");
                }
            }
            commands
        }
    };

    if commands.is_empty() {
        return Err(Error::empty_command_set(source_path.clone()));
    }

    Ok(commands)
}

fn modified_time(path: &str) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn cache_is_fresh(cache_path: &str, source_path: &str) -> bool {
    match (modified_time(cache_path), modified_time(source_path)) {
        (Some(cache_time), Some(source_time)) => cache_time >= source_time,
        _ => false,
    }
}

/// Returns the cached commands if the cache can be trusted for this source.
fn read_cache(cache_path: &str, source_path: &str, parser: &ParserConfig) -> Option<Vec<Command>> {
    if !cache_is_fresh(cache_path, source_path) {
        debug!("Command cache at `{cache_path}` is missing or stale");
        return None;
    }

    let reader = File::open(cache_path).ok()?;
    let cache: serde_yaml::Result<CommandCache> = serde_yaml::from_reader(reader);

    match cache {
        Ok(cache) if cache.matches(source_path, parser) => {
            info!("Using {} cached commands", cache.commands.len());
            Some(cache.commands)
        }
        Ok(_) => {
            debug!("Command cache at `{cache_path}` was built for another source");
            None
        }
        Err(e) => {
            warn!(
                "{}",
                Error::yaml_error(
                    "reading".to_string(),
                    "command cache".to_string(),
                    cache_path.to_string(),
                    e
                )
            );
            None
        }
    }
}

/// Writes the parsed commands to the cache file, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created, or the
/// commands cannot be serialized.
pub fn write_cache(
    cache_path: &str,
    source_path: &str,
    parser: &ParserConfig,
    commands: &[Command],
) -> Result<()> {
    if let Some(parent) = Path::new(cache_path).parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::io_error(
                "command cache directory".to_string(),
                parent.to_string_lossy().to_string(),
                e,
            )
        })?;
    }

    let f = File::create(cache_path)
        .map_err(|e| Error::io_error("command cache".to_string(), cache_path.to_string(), e))?;

    let cache = CommandCache {
        source_path: source_path.to_string(),
        invocation_name: parser.invocation_name.clone(),
        hidden_sentinels: parser.hidden_sentinels.clone(),
        commands: commands.to_vec(),
    };

    serde_yaml::to_writer(f, &cache).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "command cache".to_string(),
            cache_path.to_string(),
            e,
        )
    })
}
