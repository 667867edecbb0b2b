//! Extraction of launchable commands from shell source text.
//!
//! Two independent passes run over the text:
//!
//! - **Functions**: a line holding `[function] name() {` starts a candidate.
//!   A `#` comment on the line directly above becomes its description. The
//!   body is delimited by counting braces from the opening one; a block that
//!   never closes drops the candidate.
//! - **Aliases**: a line starting with `alias ` and containing `=`. An inline
//!   `# comment` after the value is the only source of a description.
//!
//! The brace counter does not know about quoting or comments, so a `{` or `}`
//! inside a string literal shifts the depth. That is accepted: the format this
//! reads is a personal config file, not arbitrary shell.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::command_definitions::Command;
use crate::config::ParserConfig;
use crate::error::Result;
use crate::file_handling::read_source;

static FUNCTION_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:function\s+)?(\w+)\s*\(\s*\)\s*\{").expect("function signature pattern")
});

const ALIAS_KEYWORD: &str = "alias";

pub struct SourceParser {
    config: ParserConfig,
}

impl SourceParser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parses shell source text into commands sorted by name.
    ///
    /// Equal names keep discovery order, so a function sorts before an alias
    /// of the same name.
    #[must_use]
    pub fn parse(&self, source: &str) -> Vec<Command> {
        let mut commands = Vec::new();

        self.parse_functions(source, &mut commands);
        self.parse_aliases(source, &mut commands);

        commands.sort_by(|a, b| a.name.cmp(&b.name));
        commands
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::SourceNotFound`] if the file does not
    /// exist, or an IO error if it cannot be read.
    pub fn parse_file(&self, path: &str) -> Result<Vec<Command>> {
        let source = read_source(path)?;
        Ok(self.parse(&source))
    }

    fn parse_functions(&self, source: &str, commands: &mut Vec<Command>) {
        let mut line_start = 0;
        let mut previous_line: Option<&str> = None;

        for line_with_ending in source.split_inclusive('\n') {
            let line = line_with_ending.trim_end_matches(['\n', '\r']);

            if let Some(captures) = FUNCTION_SIGNATURE.captures(line) {
                let name = &captures[1];
                let body_start = line_start + captures.get(0).map_or(0, |m| m.end());
                let description = previous_line.and_then(comment_text).unwrap_or("");

                if let Some(command) = self.function_candidate(source, name, description, body_start)
                {
                    commands.push(command);
                }
            }

            previous_line = Some(line);
            line_start += line_with_ending.len();
        }
    }

    fn function_candidate(
        &self,
        source: &str,
        name: &str,
        description: &str,
        body_start: usize,
    ) -> Option<Command> {
        if self.config.is_launcher_itself(name) {
            return None;
        }

        let Some(body_end) = find_closing_brace(source, body_start) else {
            debug!("Dropping function `{name}`: its body is never closed");
            return None;
        };

        if self.config.is_hidden(description) {
            debug!("Hiding function `{name}`");
            return None;
        }

        debug!(
            "Found function `{name}` with a {} byte body",
            source[body_start..body_end].trim().len()
        );
        Some(Command::function(name, description))
    }

    fn parse_aliases(&self, source: &str, commands: &mut Vec<Command>) {
        commands.extend(source.lines().filter_map(|line| self.parse_alias_line(line)));
    }

    fn parse_alias_line(&self, line: &str) -> Option<Command> {
        let trimmed = line.trim_start();
        if !trimmed.starts_with("alias ") {
            return None;
        }

        let (name_part, value_part) = trimmed.split_once('=')?;
        let name = name_part
            .trim()
            .strip_prefix(ALIAS_KEYWORD)
            .unwrap_or(name_part)
            .trim();

        let (value, description) = match value_part.split_once('#') {
            Some((value, comment)) => (value.trim(), comment.trim()),
            None => (value_part.trim(), ""),
        };
        let raw = strip_matching_quotes(value);

        if name.is_empty() || raw.is_empty() {
            debug!("Skipping malformed alias line: `{line}`");
            return None;
        }

        if self.config.is_launcher_itself(name) {
            return None;
        }

        if self.config.is_hidden(description) {
            debug!("Hiding alias `{name}`");
            return None;
        }

        Some(Command::alias(name, description, raw))
    }
}

/// Text of a `#` comment line, trimmed. `None` for anything else.
fn comment_text(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix('#').map(str::trim)
}

/// Finds the `}` that closes a block whose `{` sits just before `start`.
///
/// Depth starts at 1 and moves with every brace byte; the closing brace is
/// where it returns to 0.
fn find_closing_brace(source: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;

    for (offset, byte) in source.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

fn strip_matching_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    value
}
