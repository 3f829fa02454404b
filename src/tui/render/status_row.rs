use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

fn key_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Navigate => "? help  q quit",
        Mode::NewTask => "Enter add  Esc back",
        Mode::AddSubtask => "Enter add  Esc cancel",
        Mode::EditDescription => "^B ^I ^U ^L  ^S save",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        app.mode.label(),
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(ref message) = app.status_message {
        spans.push(Span::styled(
            format!("  {}", unicode::truncate_to_width(message, width.saturating_sub(12))),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = key_hint(app.mode);
        let content_width: usize = spans.iter().map(|s| unicode::display_width(&s.content)).sum();
        let hint_width = unicode::display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn status(app: &App) -> String {
        render_to_string(40, 1, |frame, area| render_status_row(frame, app, area))
    }

    #[test]
    fn test_mode_label_and_hint() {
        let app = app_with_tasks(&["a"]);
        assert_eq!(status(&app), format!("NAVIGATE{}? help  q quit", " ".repeat(18)));
    }

    #[test]
    fn test_message_shown_and_hints_can_be_hidden() {
        let mut app = app_with_tasks(&["a"]);
        app.show_key_hints = false;
        app.status_message = Some("description saved".into());
        assert_eq!(status(&app), "NAVIGATE  description saved");
    }
}
