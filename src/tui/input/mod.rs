mod edit;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use edit::handle_edit;
use navigate::handle_navigate;
use prompt::handle_prompt;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Help overlay swallows the key that closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::NewTask | Mode::AddSubtask => handle_prompt(app, key),
        Mode::EditDescription => handle_edit(app, key),
    }
}

/// Handle a bracketed paste event (terminal sends pasted text as a single string).
/// Line inputs get the text with newlines flattened; the description editor
/// keeps them as block breaks.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::NewTask | Mode::AddSubtask => {
            let clean = text.replace(['\n', '\r'], " ");
            prompt::insert_into_prompt(app, &clean);
        }
        Mode::EditDescription => {
            if let Some(buf) = app.board.edit_buffer_mut() {
                buf.insert_str(&text.replace("\r\n", "\n"));
            }
        }
        Mode::Navigate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = app_with_tasks(&["a"]);
        app.show_help = true;
        handle_key(&mut app, press('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_paste_into_new_task_flattens_newlines() {
        let mut app = app_with_tasks(&[]);
        handle_paste(&mut app, "one\ntwo");
        assert_eq!(app.new_task_input, "one two");
        assert_eq!(app.input_cursor, 7);
    }

    #[test]
    fn test_paste_into_editor_keeps_blocks() {
        let mut app = app_with_tasks(&["a"]);
        handle_key(&mut app, press('e'));
        handle_paste(&mut app, "x\r\ny");
        let buf = app.board.edit_buffer().unwrap();
        assert_eq!(buf.document().blocks.len(), 2);
    }

    #[test]
    fn test_paste_in_navigate_is_ignored() {
        let mut app = app_with_tasks(&["a"]);
        handle_paste(&mut app, "zzz");
        assert_eq!(app.board.tasks().len(), 1);
        assert!(app.new_task_input.is_empty());
    }
}
