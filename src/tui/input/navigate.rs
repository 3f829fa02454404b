use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FlatItem, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.build_flat_items().len().saturating_sub(1);
        }

        KeyCode::Char('a') | KeyCode::Char('i') => {
            app.mode = Mode::NewTask;
            app.input_cursor = app.new_task_input.len();
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_cursor_item(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_cursor_item(app),
        KeyCode::Char('e') | KeyCode::Enter => start_edit(app),
        KeyCode::Char('s') => start_add_subtask(app),
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.build_flat_items().len();
    if len == 0 {
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(len - 1);
}

fn toggle_cursor_item(app: &mut App) {
    match app.cursor_item() {
        Some(FlatItem::Task(id)) => app.board.toggle_task_completed(id),
        Some(FlatItem::Subtask {
            task_id,
            subtask_id,
        }) => app.board.toggle_subtask_completed(task_id, subtask_id),
        None => {}
    }
}

fn delete_cursor_item(app: &mut App) {
    let Some(item) = app.cursor_item() else {
        return;
    };
    match item {
        FlatItem::Task(id) => {
            let name = app.board.task(id).map(|t| t.name.clone()).unwrap_or_default();
            app.board.delete_task(id);
            app.status_message = Some(format!("deleted \"{}\"", name));
        }
        FlatItem::Subtask {
            task_id,
            subtask_id,
        } => app.board.delete_subtask(task_id, subtask_id),
    }
    app.clamp_cursor();
}

fn start_edit(app: &mut App) {
    let Some(task_id) = app.cursor_task_id() else {
        return;
    };
    app.board.start_edit(task_id);
    if app.board.edit_session().is_for(task_id) {
        app.focus(FlatItem::Task(task_id));
        app.mode = Mode::EditDescription;
    }
}

fn start_add_subtask(app: &mut App) {
    let Some(task_id) = app.cursor_task_id() else {
        return;
    };
    app.board.start_add_subtask(task_id);
    if app.board.add_subtask_session().is_for(task_id) {
        app.mode = Mode::AddSubtask;
        app.input_cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn test_cursor_moves_and_stops_at_edges() {
        let mut app = app_with_tasks(&["a", "b"]);
        handle_key(&mut app, press('k'));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, press('j'));
        handle_key(&mut app, press('j'));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, press('g'));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, press('G'));
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_space_toggles_task_and_subtask() {
        let mut app = app_with_tasks(&["a"]);
        let id = app.cursor_task_id().unwrap();
        app.board.add_subtask(id, "sub");

        handle_key(&mut app, press(' '));
        assert!(app.board.task(id).unwrap().completed);

        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, press('x'));
        let task = app.board.task(id).unwrap();
        assert!(task.subtasks[0].completed);
        // Task flag is independent of its subtasks
        assert!(task.completed);
    }

    #[test]
    fn test_delete_removes_row_and_clamps_cursor() {
        let mut app = app_with_tasks(&["a", "b"]);
        handle_key(&mut app, press('G'));
        handle_key(&mut app, press('d'));
        assert_eq!(app.board.tasks().len(), 1);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.status_message.as_deref(), Some("deleted \"b\""));
    }

    #[test]
    fn test_delete_on_empty_board_is_harmless() {
        let mut app = app_with_tasks(&[]);
        app.mode = Mode::Navigate;
        handle_key(&mut app, press('d'));
        handle_key(&mut app, press(' '));
        handle_key(&mut app, press('e'));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn test_e_opens_editor_on_parent_of_subtask_row() {
        let mut app = app_with_tasks(&["a"]);
        let id = app.cursor_task_id().unwrap();
        app.board.add_subtask(id, "sub");
        handle_key(&mut app, press('j'));
        handle_key(&mut app, press('e'));
        assert_eq!(app.mode, Mode::EditDescription);
        assert!(app.board.edit_session().is_for(id));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_s_opens_subtask_prompt() {
        let mut app = app_with_tasks(&["a"]);
        handle_key(&mut app, press('s'));
        assert_eq!(app.mode, Mode::AddSubtask);
        assert!(app.board.add_subtask_session().is_open());
    }

    #[test]
    fn test_q_quits() {
        let mut app = app_with_tasks(&["a"]);
        handle_key(&mut app, press('q'));
        assert!(app.should_quit);
    }
}
