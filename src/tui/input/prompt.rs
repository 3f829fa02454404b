use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FlatItem, Mode};
use crate::util::unicode;

/// Keys for the new-task input and the add-subtask prompt
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => leave_prompt(app),
        KeyCode::Enter => submit(app),
        _ => {
            let cursor = &mut app.input_cursor;
            let buf = match app.mode {
                Mode::NewTask => &mut app.new_task_input,
                _ => match app.board.subtask_name_mut() {
                    Some(name) => name,
                    None => {
                        app.mode = Mode::Navigate;
                        return;
                    }
                },
            };
            edit_line(buf, cursor, key);
        }
    }
}

/// Insert text at the caret of the focused line input
pub(super) fn insert_into_prompt(app: &mut App, text: &str) {
    let cursor = &mut app.input_cursor;
    let buf = match app.mode {
        Mode::NewTask => &mut app.new_task_input,
        Mode::AddSubtask => match app.board.subtask_name_mut() {
            Some(name) => name,
            None => return,
        },
        _ => return,
    };
    *cursor = (*cursor).min(buf.len());
    buf.insert_str(*cursor, text);
    *cursor += text.len();
}

fn leave_prompt(app: &mut App) {
    if app.mode == Mode::AddSubtask {
        app.board.cancel_add_subtask();
    }
    app.mode = Mode::Navigate;
}

fn submit(app: &mut App) {
    match app.mode {
        Mode::NewTask => {
            // Input stays focused for the next task; blank input stays as typed
            if let Some(id) = app.board.add_task(&app.new_task_input) {
                app.new_task_input.clear();
                app.input_cursor = 0;
                app.focus(FlatItem::Task(id));
            }
        }
        Mode::AddSubtask => {
            let Some(task_id) = app.board.add_subtask_session().task_id() else {
                app.mode = Mode::Navigate;
                return;
            };
            let added = app.board.submit_subtask();
            // Any non-blank submit closes the prompt, even if the task is gone
            if !app.board.add_subtask_session().is_open() {
                app.mode = Mode::Navigate;
            }
            if let Some(subtask_id) = added {
                app.focus(FlatItem::Subtask {
                    task_id,
                    subtask_id,
                });
            }
        }
        _ => {}
    }
}

/// Single-line editing keys; anything else is ignored
fn edit_line(buf: &mut String, cursor: &mut usize, key: KeyEvent) {
    *cursor = (*cursor).min(buf.len());
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => {
            buf.clear();
            *cursor = 0;
        }
        KeyCode::Char(c) if !ctrl => {
            buf.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                buf.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                buf.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left => {
            *cursor = unicode::prev_grapheme_boundary(buf, *cursor).unwrap_or(0);
        }
        KeyCode::Right => {
            *cursor = unicode::next_grapheme_boundary(buf, *cursor).unwrap_or(buf.len());
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buf.len(),
        _ => {}
    }
}
