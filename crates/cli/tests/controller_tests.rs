#[cfg(test)]
mod tests {
    use shell_launcher_cli::command_selection::types::{
        Action, CommandChoice, ControllerState, CycleDirection,
    };
    use shell_launcher_cli::command_selection::InteractionController;
    use shell_launcher_core::command_definitions::Command;

    fn commands() -> Vec<Command> {
        vec![
            Command::function("backup_home", "backs up my home directory"),
            Command::function("deploy", ""),
            Command::function("deploy_staging", "deploy to staging"),
            Command::alias("gs", "show git status", "git status"),
        ]
    }

    fn type_text(controller: &mut InteractionController<'_>, text: &str) {
        for c in text.chars() {
            assert_eq!(controller.handle(Action::Type(c)), None);
        }
    }

    fn filtered_names(controller: &InteractionController<'_>) -> Vec<String> {
        controller
            .search()
            .filtered
            .iter()
            .map(|command| command.name.clone())
            .collect()
    }

    #[test]
    fn test_substring_query() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        type_text(&mut controller, "deploy");

        assert_eq!(filtered_names(&controller), vec!["deploy", "deploy_staging"]);
        assert_eq!(controller.search().selection_index, None);
        assert_eq!(controller.total(), 4);
    }

    #[test]
    fn test_fuzzy_fallback_query() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        type_text(&mut controller, "dploy");

        let names = filtered_names(&controller);
        assert_eq!(names.first().map(String::as_str), Some("deploy"));
        assert!(!names.contains(&"gs".to_string()));
    }

    #[test]
    fn test_editing_query_resets_selection() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        controller.handle(Action::Move(CycleDirection::Down));
        controller.handle(Action::Move(CycleDirection::Down));
        assert_eq!(controller.search().selection_index, Some(1));

        type_text(&mut controller, "d");
        assert_eq!(controller.search().selection_index, None);

        controller.handle(Action::Move(CycleDirection::Down));
        controller.handle(Action::DeleteChar);
        assert_eq!(controller.search().selection_index, None);
        assert_eq!(controller.search().query, "");
        assert_eq!(controller.search().filtered, commands);
    }

    #[test]
    fn test_navigation_clamps() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        controller.handle(Action::Move(CycleDirection::Up));
        assert_eq!(controller.search().selection_index, None);

        controller.handle(Action::Move(CycleDirection::Down));
        assert_eq!(controller.search().selection_index, Some(0));

        controller.handle(Action::Move(CycleDirection::Up));
        assert_eq!(controller.search().selection_index, Some(0));

        for _ in 0..10 {
            controller.handle(Action::Move(CycleDirection::Down));
        }
        assert_eq!(controller.search().selection_index, Some(3));
    }

    #[test]
    fn test_toggle_focus_keeps_search() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);
        type_text(&mut controller, "dep");
        let before = controller.search().clone();

        assert_eq!(controller.handle(Action::ToggleFocus), None);
        assert_eq!(controller.state(), &ControllerState::ListFocused);
        assert_eq!(controller.search(), &before);

        assert_eq!(controller.handle(Action::ToggleFocus), None);
        assert_eq!(controller.state(), &ControllerState::SearchFocused);
        assert_eq!(controller.search(), &before);

        controller.handle(Action::FocusList);
        assert_eq!(controller.state(), &ControllerState::ListFocused);
        controller.handle(Action::FocusSearch);
        assert_eq!(controller.state(), &ControllerState::SearchFocused);
    }

    #[test]
    fn test_confirm_from_search_runs_first_match() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);
        type_text(&mut controller, "dep");

        assert_eq!(
            controller.handle(Action::Confirm),
            Some(CommandChoice::Run("deploy".to_string()))
        );
    }

    #[test]
    fn test_confirm_from_search_ignores_selection() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        controller.handle(Action::Move(CycleDirection::Down));
        controller.handle(Action::Move(CycleDirection::Down));
        assert_eq!(controller.state(), &ControllerState::SearchFocused);
        assert_eq!(controller.search().selection_index, Some(1));

        assert_eq!(
            controller.handle(Action::Confirm),
            Some(CommandChoice::Run("backup_home".to_string()))
        );
    }

    #[test]
    fn test_confirm_from_list_needs_selection() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);
        controller.handle(Action::ToggleFocus);

        assert_eq!(controller.handle(Action::Confirm), None);

        for _ in 0..4 {
            controller.handle(Action::Move(CycleDirection::Down));
        }
        assert_eq!(
            controller.handle(Action::Confirm),
            Some(CommandChoice::Run("git status".to_string()))
        );
    }

    #[test]
    fn test_cancel_quits_from_every_state() {
        let commands = commands();

        let mut controller = InteractionController::new(&commands, false);
        assert_eq!(controller.handle(Action::Cancel), Some(CommandChoice::Quit));

        let mut controller = InteractionController::new(&commands, false);
        controller.handle(Action::ToggleFocus);
        assert_eq!(controller.handle(Action::Cancel), Some(CommandChoice::Quit));

        let mut controller = InteractionController::new(&commands, true);
        controller.handle(Action::Confirm);
        assert!(matches!(controller.state(), ControllerState::Editing(_)));
        assert_eq!(controller.handle(Action::Cancel), Some(CommandChoice::Quit));
    }

    #[test]
    fn test_edit_before_run() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, true);
        type_text(&mut controller, "gs");

        assert_eq!(controller.handle(Action::Confirm), None);
        assert_eq!(
            controller.state(),
            &ControllerState::Editing("git status".to_string())
        );

        type_text(&mut controller, " -sb");
        assert_eq!(
            controller.handle(Action::Confirm),
            Some(CommandChoice::Run("git status -sb".to_string()))
        );
    }

    #[test]
    fn test_navigation_never_commits() {
        let commands = commands();
        let mut controller = InteractionController::new(&commands, false);

        let actions = [
            Action::Move(CycleDirection::Down),
            Action::ToggleFocus,
            Action::Move(CycleDirection::Down),
            Action::Move(CycleDirection::Up),
            Action::FocusSearch,
            Action::Type('g'),
            Action::DeleteChar,
        ];

        for action in actions {
            assert_eq!(controller.handle(action), None);
        }
    }
}
