use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Prefix of commands whose directory change has to be replayed in the
/// launcher process after the child exits.
const CHANGE_DIRECTORY_PREFIX: &str = "cd ";

/// Runs, or hands off, the raw text of a chosen command.
pub trait CommandExecutor {
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or handed off.
    fn execute(&self, raw: &str) -> Result<ExecutionReport>;
}

/// What happened to the launcher's working directory after a `cd` command.
#[derive(Debug, PartialEq, Eq)]
pub enum DirectoryChange {
    Changed(PathBuf),
    Missing(PathBuf),
    Unresolved { target: String, reason: String },
    Failed { path: PathBuf, reason: String },
}

impl Display for DirectoryChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DirectoryChange::Changed(path) => {
                write!(f, "Changed to directory: {}", path.display())
            }
            DirectoryChange::Missing(path) => {
                write!(f, "Directory not found: {}", path.display())
            }
            DirectoryChange::Unresolved { target, reason } => {
                write!(f, "Could not resolve directory `{target}`: {reason}")
            }
            DirectoryChange::Failed { path, reason } => {
                write!(f, "Could not change to {}: {reason}", path.display())
            }
        }
    }
}

/// Outcome of a finished execution.
///
/// A handed-off command has no exit status; a direct one has the child's.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub exit_status: Option<ExitStatus>,
    pub directory_change: Option<DirectoryChange>,
}

impl ExecutionReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_status.map_or(true, |status| status.success())
    }
}

/// Writes the command for a calling shell routine to apply itself.
pub struct HandoffExecutor {
    path: String,
}

impl HandoffExecutor {
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

impl CommandExecutor for HandoffExecutor {
    fn execute(&self, raw: &str) -> Result<ExecutionReport> {
        fs::write(&self.path, raw)
            .map_err(|e| Error::io_error("handoff".to_string(), self.path.clone(), e))?;

        info!("Handed off `{raw}` to `{}`", self.path);
        Ok(ExecutionReport::default())
    }
}

/// Runs the command in a child shell and waits for it.
pub struct ShellExecutor {
    shell: String,
    interactive: bool,
}

impl ShellExecutor {
    /// An interactive shell, so the user's rc files (and the functions they
    /// define) are loaded.
    #[must_use]
    pub fn new(shell: &str) -> Self {
        Self {
            shell: shell.to_string(),
            interactive: true,
        }
    }

    #[must_use]
    pub fn non_interactive(shell: &str) -> Self {
        Self {
            shell: shell.to_string(),
            interactive: false,
        }
    }

    fn shell_arguments<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        if self.interactive {
            vec!["-i", "-c", raw]
        } else {
            vec!["-c", raw]
        }
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, raw: &str) -> Result<ExecutionReport> {
        info!("Executing `{raw}` with {}", self.shell);

        let exit_status = Command::new(&self.shell)
            .args(self.shell_arguments(raw))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?
            .wait()?;

        // The child's `cd` died with it; replay it here.
        let directory_change = cd_target(raw).map(change_directory);

        Ok(ExecutionReport {
            exit_status: Some(exit_status),
            directory_change,
        })
    }
}

/// Picks the executor for a session: handoff when a path was supplied,
/// direct execution otherwise.
#[must_use]
pub fn executor_for(handoff_path: Option<&str>, shell: &str) -> Box<dyn CommandExecutor> {
    match handoff_path {
        Some(path) => Box::new(HandoffExecutor::new(path)),
        None => Box::new(ShellExecutor::new(shell)),
    }
}

/// Executes `raw`, or writes it to `handoff_path` if one is given.
///
/// # Errors
///
/// Returns an error if the handoff file cannot be written or the shell
/// cannot be started.
pub fn execute(raw: &str, handoff_path: Option<&str>, shell: &str) -> Result<ExecutionReport> {
    executor_for(handoff_path, shell).execute(raw)
}

fn cd_target(raw: &str) -> Option<&str> {
    raw.strip_prefix(CHANGE_DIRECTORY_PREFIX)
        .map(str::trim)
        .filter(|target| !target.is_empty())
}

/// Expands `~` and environment variables in a `cd` target and checks it exists.
fn resolve_directory(target: &str) -> std::result::Result<PathBuf, DirectoryChange> {
    let expanded = shellexpand::full(target).map_err(|e| DirectoryChange::Unresolved {
        target: target.to_string(),
        reason: e.to_string(),
    })?;

    let path = Path::new(expanded.as_ref()).to_path_buf();
    if path.exists() {
        Ok(path)
    } else {
        Err(DirectoryChange::Missing(path))
    }
}

fn change_directory(target: &str) -> DirectoryChange {
    match resolve_directory(target) {
        Ok(path) => match env::set_current_dir(&path) {
            Ok(()) => DirectoryChange::Changed(path),
            Err(e) => DirectoryChange::Failed {
                path,
                reason: e.to_string(),
            },
        },
        Err(change) => change,
    }
}
