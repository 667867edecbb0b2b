use std::collections::HashSet;

use crossterm::style::Color;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use shell_launcher_core::command_definitions::CommandKind;

pub const HEADER_BACKGROUND: Color = Color::DarkGreen;
pub const SELECTED_BACKGROUND: Color = Color::DarkBlue;
pub const SELECTED_FOREGROUND: Color = Color::Yellow;
pub const MATCH_FOREGROUND: Color = Color::Green;
pub const NO_MATCH_FOREGROUND: Color = Color::Red;

/// Trait for picking the terminal color a command kind is tagged with
pub trait KindColor {
    fn tag_color(&self) -> Color;
}

impl KindColor for CommandKind {
    fn tag_color(&self) -> Color {
        match self {
            CommandKind::Function => Color::Cyan,
            CommandKind::Alias => Color::Magenta,
        }
    }
}

/// Character positions in `name` to emphasise for `query`.
///
/// Empty when the query is empty or the name only matched via its
/// description.
pub fn highlight_positions(name: &str, query: &str) -> HashSet<usize> {
    if query.is_empty() {
        return HashSet::new();
    }

    SkimMatcherV2::default()
        .ignore_case()
        .fuzzy_indices(name, query)
        .map(|(_, indices)| indices.into_iter().collect())
        .unwrap_or_default()
}
