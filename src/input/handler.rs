use crate::app::AppState;
use crate::domain::{SessionMode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingActivity | UiMode::EditingActivity => handle_input_form_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_delete_mode(app, key),
        UiMode::SavingTemplate => handle_text_input_mode(app, key, AppState::save_current_as_template),
        UiMode::ImportPrompt => handle_text_input_mode(app, key, AppState::submit_import),
        UiMode::TemplatePicker => handle_template_picker_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if !app.is_importing {
        app.status_message = None;
    }

    match key.code {
        // Navigation (with Shift modifier for reordering)
        KeyCode::Up => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item_up();
            } else {
                app.move_selection_up();
            }
        }
        KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.move_item_down();
            } else {
                app.move_selection_down();
            }
        }
        KeyCode::Char('K') => app.move_item_up(),
        KeyCode::Char('J') => app.move_item_down(),

        // Session control
        KeyCode::Char(' ') => app.start_or_toggle(),
        KeyCode::Char('n') => app.skip(),
        KeyCode::Char('r') => app.reset_session(),
        KeyCode::Enter if app.mode() == SessionMode::Summary => app.reset_session(),

        // Planner
        KeyCode::Char('a') => app.start_add_activity(),
        KeyCode::Char('A') => app.add_default_activity(),
        KeyCode::Char('b') => app.add_break(),
        KeyCode::Char('e') => app.start_edit_activity(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('v') => app.toggle_select_current(),
        KeyCode::Char('V') => app.toggle_select_all(),

        // Templates, settings, import
        KeyCode::Char('p') => app.open_template_picker(),
        KeyCode::Char('w') => app.start_save_template(),
        KeyCode::Char('o') => app.open_settings(),
        KeyCode::Char('i') => app.start_import(),
        KeyCode::Char('t') => app.toggle_dark_mode(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in input form mode (adding or editing an activity)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        // Switch between name and duration
        KeyCode::Tab | KeyCode::BackTab => app.input_form_toggle_field(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_delete_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

/// Single-line prompt; `submit` runs on Enter
fn handle_text_input_mode(app: &mut AppState, key: KeyEvent, submit: fn(&mut AppState)) -> Result<bool> {
    match key.code {
        KeyCode::Enter => submit(app),
        KeyCode::Esc => app.cancel_text_input(),
        KeyCode::Backspace => app.text_input_backspace(),
        KeyCode::Char(c) => app.text_input_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_template_picker_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.template_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.template_cursor_down(),
        KeyCode::Enter => app.load_selected_template(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected_template(),
        KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
        _ => {}
    }
    Ok(false)
}

fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.settings_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.settings_cursor_down(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Enter | KeyCode::Char(' ') => {
            app.adjust_setting(true)
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.adjust_setting(false),
        KeyCode::Char('s') => app.preview_sound(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('o') => app.close_modal(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Activity;
    use crate::persistence::{KvStore, Settings};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn create_test_app() -> (tempfile::TempDir, AppState) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = KvStore::open(temp_dir.path().join("store.json"));
        let settings = Settings {
            volume: 0.0,
            ..Settings::default()
        };
        let activities = vec![Activity::new("Test activity", 10, "#6366f1")];
        (temp_dir, AppState::new(activities, settings, Vec::new(), store, None))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let (_dir, mut app) = create_test_app();
        app.add_activity("Activity 2", 5);
        app.selected_index = 0;

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_shift_reorder() {
        let (_dir, mut app) = create_test_app();
        app.add_activity("Activity 2", 5);
        app.selected_index = 0;

        handle_key(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(app.activities()[1].name, "Test activity");
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_handle_quit() {
        let (_dir, mut app) = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_add_activity() {
        let (_dir, mut app) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingActivity);
        assert!(app.input_form.is_some());

        // Clear the default name, then type a new one
        for _ in 0.."New Activity".len() {
            handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        }
        type_text(&mut app, "Read");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        handle_key(&mut app, key(KeyCode::Backspace)).unwrap();
        type_text(&mut app, "25");

        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.activities().len(), 2);
        assert_eq!(app.activities()[1].name, "Read");
        assert_eq!(app.activities()[1].duration, 25);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_handle_delete_confirm_flow() {
        let (_dir, mut app) = create_test_app();

        handle_key(&mut app, key(KeyCode::Delete)).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmDelete);

        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.activities().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.activities().is_empty());
    }

    #[test]
    fn test_handle_space_starts_and_pauses() {
        let (_dir, mut app) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(app.mode(), SessionMode::Running);
        assert!(app.session.is_running());

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.session.is_running());

        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.mode(), SessionMode::Planning);
    }

    #[test]
    fn test_handle_save_template_prompt() {
        let (_dir, mut app) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('w'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::SavingTemplate);
        type_text(&mut app, "Focus");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.custom_templates[0].name, "Focus");
    }

    #[test]
    fn test_handle_settings_navigation() {
        let (_dir, mut app) = create_test_app();

        handle_key(&mut app, key(KeyCode::Char('o'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Settings);
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.settings.break_duration, 6);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }
}
