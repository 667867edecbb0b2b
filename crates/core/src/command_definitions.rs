use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// How a command was defined in the shell source.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Function,
    Alias,
}

impl Display for CommandKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandKind::Function => formatter.write_str("function"),
            CommandKind::Alias => formatter.write_str("alias"),
        }
    }
}

/// A named shell fragment that can be launched.
///
/// `raw` is what gets handed to a shell: the function name itself for
/// functions, the right-hand side for aliases. It is never empty.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub description: String,
    pub kind: CommandKind,
    pub raw: String,
}

impl Command {
    pub fn function(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: CommandKind::Function,
            raw: name.to_string(),
        }
    }

    pub fn alias(name: &str, description: &str, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: CommandKind::Alias,
            raw: raw.to_string(),
        }
    }
}

impl Display for Command {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(formatter, "{} - No description", self.name)
        } else {
            write!(formatter, "{} - {}", self.name, self.description)
        }
    }
}
