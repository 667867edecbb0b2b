//! Type definitions for command selection and UI state.
//!
//! This module defines the core types used throughout the command selection
//! interface, including user choices, controller states, and viewport state.

use shell_launcher_core::command_definitions::Command;

/// How the interactive session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandChoice {
    /// Raw shell text to hand to the executor
    Run(String),
    Quit,
}

/// Where input goes. `Editing` holds the pending command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControllerState {
    SearchFocused,
    ListFocused,
    Editing(String),
}

/// Direction to move the selection in the command list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Everything the controller can be asked to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Type(char),
    DeleteChar,
    Move(CycleDirection),
    ToggleFocus,
    FocusList,
    FocusSearch,
    Confirm,
    Cancel,
}

/// Query, the commands it lets through, and the highlighted one.
///
/// There is no selection until the user navigates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub filtered: Vec<Command>,
    pub selection_index: Option<usize>,
}

/// A row of the command list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListRow<'a> {
    Command(&'a Command),
    NoMatches,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the command list when there are more
/// commands than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

impl ViewportState {
    /// Scrolls just enough to keep the selection visible. Without a
    /// selection the list is shown from the top.
    pub fn follow(&mut self, selection_index: Option<usize>) {
        let height = usize::from(self.height.max(1));

        match selection_index {
            None => self.offset = 0,
            Some(index) if index < self.offset => self.offset = index,
            Some(index) if index >= self.offset + height => self.offset = index + 1 - height,
            Some(_) => {}
        }
    }
}
