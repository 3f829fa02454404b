use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::markup::RichTextBuffer;
use crate::tui::app::{App, Mode};

/// Keys for the description editor
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            app.board.cancel_edit();
            app.mode = Mode::Navigate;
        }
        KeyCode::Char('s') if ctrl => {
            app.board.save_edit();
            app.mode = Mode::Navigate;
            app.status_message = Some("description saved".into());
        }
        _ => match app.board.edit_buffer_mut() {
            Some(buf) => apply_edit_key(buf, key),
            // Session vanished under us (task deleted)
            None => app.mode = Mode::Navigate,
        },
    }
}

/// Apply one editing key to the buffer. Alt variants mirror the Ctrl
/// shortcuts for terminals that swallow Ctrl-I or Ctrl-L.
fn apply_edit_key(buf: &mut RichTextBuffer, key: KeyEvent) {
    let shortcut = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char(c) if shortcut => match c.to_ascii_lowercase() {
            'b' => buf.toggle_bold(),
            'i' => buf.toggle_italic(),
            'u' => buf.toggle_underline(),
            'l' => buf.toggle_list(),
            'a' => buf.select_all(),
            _ => {}
        },
        // Some terminals report Ctrl-I as Tab
        KeyCode::Tab if key.modifiers.contains(KeyModifiers::CONTROL) => buf.toggle_italic(),
        KeyCode::Char(c) => buf.insert_char(c),
        KeyCode::Enter => buf.insert_break(),
        KeyCode::Backspace => buf.backspace(),
        KeyCode::Delete => buf.delete_forward(),
        KeyCode::Left => buf.move_left(extend),
        KeyCode::Right => buf.move_right(extend),
        KeyCode::Up => buf.move_up(extend),
        KeyCode::Down => buf.move_down(extend),
        KeyCode::Home => buf.move_home(extend),
        KeyCode::End => buf.move_end(extend),
        _ => {}
    }
}
