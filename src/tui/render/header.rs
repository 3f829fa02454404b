use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::board_view::input_spans;

const PLACEHOLDER: &str = "Enter task name...";

/// Title with the done/total counter, the new-task input and a separator
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let title = " Task List";
    let counter = format!(
        "{}/{} done ",
        app.board.tasks().completed_count(),
        app.board.tasks().len()
    );
    let mut title_spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = unicode::display_width(title) + unicode::display_width(&counter);
    if used < width {
        title_spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        title_spans.push(Span::styled(counter, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let mut input = vec![Span::styled(
        " + ",
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    if app.mode == Mode::NewTask {
        input.extend(input_spans(app, &app.new_task_input, PLACEHOLDER));
    } else if app.new_task_input.is_empty() {
        input.push(Span::styled(PLACEHOLDER, Style::default().fg(app.theme.dim).bg(bg)));
    } else {
        input.push(Span::styled(
            app.new_task_input.clone(),
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let separator = Span::styled("\u{2500}".repeat(width), Style::default().fg(app.theme.dim).bg(bg));

    let paragraph = Paragraph::new(vec![
        Line::from(title_spans),
        Line::from(input),
        Line::from(separator),
    ])
    .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;
    use pretty_assertions::assert_eq;

    fn header(app: &App) -> String {
        render_to_string(30, 3, |frame, area| render_header(frame, app, area))
    }

    #[test]
    fn test_placeholder_with_caret_when_focused() {
        let app = app_with_tasks(&[]);
        assert_eq!(
            header(&app),
            [
                " Task List           0/0 done",
                " + \u{258C}Enter task name...",
                "\u{2500}".repeat(30).as_str(),
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_unfocused_draft_is_kept_visible() {
        let mut app = app_with_tasks(&["a"]);
        app.new_task_input = "draft".into();
        let out = header(&app);
        assert_eq!(out.lines().nth(1), Some(" + draft"));
    }
}
