use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEvent,
};
use crossterm::style::Color::Reset;
use crossterm::style::{
    Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use itertools::Itertools;
use shell_launcher_core::command_definitions::Command;
use shell_launcher_core::error::{Error, Result};

use super::colors::{
    highlight_positions, KindColor, HEADER_BACKGROUND, MATCH_FOREGROUND, NO_MATCH_FOREGROUND,
    SELECTED_BACKGROUND, SELECTED_FOREGROUND,
};
use super::controller::InteractionController;
use super::input::{action_for_key, action_for_mouse};
use super::types::{CommandChoice, ControllerState, ListRow, ViewportState};

/// Rows above the command list: header bar and search line
const LIST_TOP: u16 = 2;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let _ = restore_screen(&mut stdout());
    }
}

/// Undo everything the session turned on besides raw mode. The cursor may
/// have been hidden while the list had focus.
fn restore_screen(out: &mut impl Write) -> std::io::Result<()> {
    out.execute(DisableMouseCapture)?
        .execute(cursor::Show)?
        .execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Runs the interactive selection until a command is chosen or the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, read from, or drawn to.
pub fn prompt_for_command_choice(
    mut controller: InteractionController<'_>,
) -> Result<CommandChoice> {
    run_event_loop(&mut controller).map_err(Error::Stdio)
}

fn run_event_loop(controller: &mut InteractionController<'_>) -> std::io::Result<CommandChoice> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // When this goes out of scope, raw mode and mouse capture is disabled
    stdout.execute(EnableMouseCapture)?;

    let (width, height) = terminal::size()?;
    let mut viewport = ViewportState {
        offset: 0,
        height: height.saturating_sub(LIST_TOP),
        width,
    };

    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            viewport.follow(controller.search().selection_index);
            redraw_ui(&mut stdout, controller, &viewport)?;
            needs_redraw = false;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let action = match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                action_for_key(key_event, controller.state())
            }
            Event::Mouse(MouseEvent { kind, .. }) => action_for_mouse(kind),
            Event::Resize(width, height) => {
                viewport.width = width;
                viewport.height = height.saturating_sub(LIST_TOP);
                needs_redraw = true;
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            if let Some(choice) = controller.handle(action) {
                return Ok(choice);
            }
            needs_redraw = true;
        }
    }
}

fn redraw_ui(
    stdout: &mut Stdout,
    controller: &InteractionController<'_>,
    viewport: &ViewportState,
) -> std::io::Result<()> {
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(stdout, controller, viewport.width)?;

    match controller.state() {
        ControllerState::Editing(line) => print_edit_line(stdout, line)?,
        _ => {
            print_search_line(stdout, controller)?;
            print_rows(stdout, controller, viewport)?;
            place_cursor(stdout, controller, viewport)?;
        }
    }

    stdout.flush()
}

/// Print the header for the command selection UI
fn print_header(
    stdout: &mut Stdout,
    controller: &InteractionController<'_>,
    width: u16,
) -> std::io::Result<()> {
    let search = controller.search();

    let instructions = match controller.state() {
        ControllerState::Editing(_) => ["Enter: Execute", "Esc: Cancel"].iter().join("   |   "),
        state => {
            let focus_hint = if *state == ControllerState::ListFocused {
                "Tab: Focus Search"
            } else {
                "Tab: Focus List"
            };
            let position = search
                .selection_index
                .map_or_else(|| "-".to_string(), |i| (i + 1).to_string());
            let counter = format!(
                "{}/{} of {}",
                pad_to_width_of(position, search.filtered.len()),
                search.filtered.len(),
                controller.total()
            );

            [focus_hint, "Enter: Run", "Esc: Quit", counter.as_str()]
                .iter()
                .join("   |   ")
        }
    };

    let content = fit_to_width(&format!("  {instructions}"), usize::from(width));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(HEADER_BACKGROUND),
        Print(&content),
        Print(" ".repeat(usize::from(width).saturating_sub(content.chars().count()))),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )
}

fn print_search_line(
    stdout: &mut Stdout,
    controller: &InteractionController<'_>,
) -> std::io::Result<()> {
    queue!(stdout, MoveTo(0, 1))?;

    if *controller.state() == ControllerState::SearchFocused {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
    }

    let query = &controller.search().query;
    if query.is_empty() {
        queue!(
            stdout,
            Print("Search: "),
            SetAttribute(Attribute::Dim),
            Print("type to filter commands..."),
        )?;
    } else {
        queue!(stdout, Print(format!("Search: {query}")))?;
    }

    queue!(stdout, SetAttribute(Attribute::Reset))
}

fn print_edit_line(stdout: &mut Stdout, line: &str) -> std::io::Result<()> {
    queue!(
        stdout,
        MoveTo(0, 1),
        SetAttribute(Attribute::Bold),
        Print("Command- "),
        SetAttribute(Attribute::Reset),
        Print(line),
        MoveTo(0, 3),
        SetAttribute(Attribute::Dim),
        Print("Enter to execute"),
        SetAttribute(Attribute::Reset),
        MoveTo(
            u16::try_from(line.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(9),
            1
        ),
        cursor::Show,
    )
}

/// Print the visible commands with the selected one highlighted
fn print_rows(
    stdout: &mut Stdout,
    controller: &InteractionController<'_>,
    viewport: &ViewportState,
) -> std::io::Result<()> {
    let search = controller.search();
    let rows = controller.rows();

    let visible_rows = rows
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(usize::from(viewport.height));

    for (screen_row, (index, row)) in (LIST_TOP..).zip(visible_rows) {
        queue!(stdout, MoveTo(0, screen_row), Clear(ClearType::CurrentLine))?;

        match row {
            ListRow::NoMatches => queue!(
                stdout,
                SetForegroundColor(NO_MATCH_FOREGROUND),
                Print("No matching commands!"),
                SetForegroundColor(Reset),
            )?,
            ListRow::Command(command) => print_command_row(
                stdout,
                command,
                &search.query,
                search.selection_index == Some(index),
                viewport.width,
            )?,
        }
    }

    Ok(())
}

/// Write one command row: kind tag, name with matched characters emphasised,
/// then the description.
fn print_command_row(
    stdout: &mut Stdout,
    command: &Command,
    query: &str,
    is_selected: bool,
    width: u16,
) -> std::io::Result<()> {
    let width = usize::from(width);
    let tag = format!("{:<10}", format!("[{}]", command.kind));
    let rest = if command.description.is_empty() {
        " - No description".to_string()
    } else {
        format!(" - {}", command.description)
    };
    let highlighted = highlight_positions(&command.name, query);

    let (background, foreground) = if is_selected {
        queue!(stdout, SetAttribute(Attribute::Bold))?;
        (SELECTED_BACKGROUND, SELECTED_FOREGROUND)
    } else {
        (Reset, Reset)
    };

    queue!(stdout, SetBackgroundColor(background))?;

    let tag_color = if is_selected {
        foreground
    } else {
        command.kind.tag_color()
    };
    queue!(
        stdout,
        SetForegroundColor(tag_color),
        Print(fit_to_width(&tag, width))
    )?;
    let mut used = tag.chars().count().min(width);

    for (i, c) in command.name.chars().enumerate() {
        if used >= width {
            break;
        }

        let color = if highlighted.contains(&i) {
            MATCH_FOREGROUND
        } else {
            foreground
        };
        queue!(stdout, SetForegroundColor(color), Print(c))?;
        used += 1;
    }

    let rest = fit_to_width(&rest, width.saturating_sub(used));
    used += rest.chars().count();

    queue!(
        stdout,
        SetForegroundColor(foreground),
        Print(rest),
        Print(" ".repeat(width.saturating_sub(used))),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )
}

/// Cursor sits after the query when searching, and is hidden otherwise.
fn place_cursor(
    stdout: &mut Stdout,
    controller: &InteractionController<'_>,
    viewport: &ViewportState,
) -> std::io::Result<()> {
    if *controller.state() == ControllerState::SearchFocused {
        let column = "Search: ".len() + controller.search().query.chars().count();
        let column = u16::try_from(column)
            .unwrap_or(u16::MAX)
            .min(viewport.width.saturating_sub(1));
        queue!(stdout, MoveTo(column, 1), cursor::Show)
    } else {
        queue!(stdout, cursor::Hide)
    }
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of(value: String, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{value:>width$}")
}

/// Truncate to at most `width` characters.
fn fit_to_width(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_width_of() {
        assert_eq!(pad_to_width_of("3".to_string(), 120), "  3");
        assert_eq!(pad_to_width_of("-".to_string(), 9), "-");
    }

    #[test]
    fn test_restore_screen_shows_cursor() {
        let mut out = Vec::new();
        restore_screen(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();

        let show = written.find("\x1b[?25h").expect("cursor shown");
        let leave = written.find("\x1b[?1049l").expect("alternate screen left");
        assert!(show < leave);
    }

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("deploy_staging", 6), "deploy");
        assert_eq!(fit_to_width("gs", 10), "gs");
        assert_eq!(fit_to_width("ünïcode", 3), "ünï");
    }
}
