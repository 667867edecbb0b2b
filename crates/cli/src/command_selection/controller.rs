//! The selection state machine behind the launcher UI.
//!
//! | From            | Action             | Result                                          |
//! |-----------------|--------------------|-------------------------------------------------|
//! | search or list  | `Type`/`DeleteChar`| query edited, list refiltered, selection cleared |
//! | search or list  | `Move`             | selection moves by one, clamped to the list      |
//! | search or list  | `ToggleFocus`      | search and list swap focus                       |
//! | search          | `Confirm`          | first visible command is chosen                  |
//! | list            | `Confirm`          | selected command is chosen, if any               |
//! | any             | `Cancel`           | session ends without a command                   |
//! | editing         | `Type`/`DeleteChar`| pending command line edited                      |
//! | editing         | `Confirm`          | edited line is chosen                            |
//!
//! A chosen command goes to `Editing` first when edit-before-run is on,
//! otherwise it ends the session. Nothing is chosen without `Confirm`.

use log::debug;
use shell_launcher_core::command_definitions::Command;
use shell_launcher_core::search;

use super::types::{
    Action, CommandChoice, ControllerState, CycleDirection, ListRow, SearchState,
};

pub struct InteractionController<'a> {
    commands: &'a [Command],
    search: SearchState,
    state: ControllerState,
    edit_before_run: bool,
}

impl<'a> InteractionController<'a> {
    #[must_use]
    pub fn new(commands: &'a [Command], edit_before_run: bool) -> Self {
        Self {
            commands,
            search: SearchState {
                query: String::new(),
                filtered: commands.to_vec(),
                selection_index: None,
            },
            state: ControllerState::SearchFocused,
            edit_before_run,
        }
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.commands.len()
    }

    /// Rows to display for the current query.
    #[must_use]
    pub fn rows(&self) -> Vec<ListRow<'_>> {
        if self.search.filtered.is_empty() {
            return vec![ListRow::NoMatches];
        }

        self.search.filtered.iter().map(ListRow::Command).collect()
    }

    /// Applies one action. Returns a choice once the session is over.
    pub fn handle(&mut self, action: Action) -> Option<CommandChoice> {
        if action == Action::Cancel {
            debug!("Selection cancelled");
            return Some(CommandChoice::Quit);
        }

        if let ControllerState::Editing(line) = &mut self.state {
            return edit_line(line, action);
        }

        match action {
            Action::Type(c) => {
                self.search.query.push(c);
                self.refilter();
            }
            Action::DeleteChar => {
                if self.search.query.pop().is_some() {
                    self.refilter();
                }
            }
            Action::Move(direction) => self.move_selection(direction),
            Action::ToggleFocus => {
                self.state = match self.state {
                    ControllerState::ListFocused => ControllerState::SearchFocused,
                    _ => ControllerState::ListFocused,
                };
            }
            Action::FocusList => self.state = ControllerState::ListFocused,
            Action::FocusSearch => self.state = ControllerState::SearchFocused,
            Action::Confirm => {
                let index = match self.state {
                    ControllerState::SearchFocused => Some(0),
                    _ => self.search.selection_index,
                };
                return index.and_then(|i| self.commit(i));
            }
            Action::Cancel => {}
        }

        None
    }

    fn refilter(&mut self) {
        self.search.filtered = search::filter(self.commands, &self.search.query);
        self.search.selection_index = None;
        debug!(
            "Query `{}` matches {} commands",
            self.search.query,
            self.search.filtered.len()
        );
    }

    fn move_selection(&mut self, direction: CycleDirection) {
        let length = self.search.filtered.len();
        if length == 0 {
            return;
        }

        self.search.selection_index = match (self.search.selection_index, direction) {
            (None, CycleDirection::Down) => Some(0),
            (None, CycleDirection::Up) => None,
            (Some(index), CycleDirection::Up) => Some(index.saturating_sub(1)),
            (Some(index), CycleDirection::Down) => Some((index + 1).min(length - 1)),
        };
    }

    fn commit(&mut self, index: usize) -> Option<CommandChoice> {
        let (name, raw) = match self.rows().get(index) {
            Some(ListRow::Command(command)) => (command.name.clone(), command.raw.clone()),
            Some(ListRow::NoMatches) | None => return None,
        };

        if self.edit_before_run {
            debug!("Editing `{name}` before running");
            self.state = ControllerState::Editing(raw);
            return None;
        }

        debug!("Chose `{name}`");
        Some(CommandChoice::Run(raw))
    }
}

fn edit_line(line: &mut String, action: Action) -> Option<CommandChoice> {
    match action {
        Action::Type(c) => line.push(c),
        Action::DeleteChar => {
            line.pop();
        }
        Action::Confirm if !line.trim().is_empty() => {
            return Some(CommandChoice::Run(line.clone()));
        }
        _ => {}
    }

    None
}
