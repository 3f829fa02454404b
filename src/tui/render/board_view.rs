use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::{Subtask, Task};
use crate::tui::app::{App, FlatItem, Mode};

use super::markup_view::{INDENT, description_lines, editor_lines};

const CURSOR_BAR: &str = "\u{258E}";
const CARET: &str = "\u{258C}";

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Render the task board: tasks, their descriptions or the open editor,
/// subtasks and the add-subtask prompt
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    if app.board.tasks().is_empty() {
        let empty = Paragraph::new(" No tasks yet. Add one above to get started!")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    app.clamp_cursor();
    let cursor_item = app.cursor_item();
    let navigating = app.mode == Mode::Navigate;

    let mut lines: Vec<Line> = Vec::new();
    // Line that must stay on screen: the cursor row, the editor caret or the prompt
    let mut focus_line = 0;

    for task in app.board.tasks() {
        let is_cursor = cursor_item == Some(FlatItem::Task(task.id));
        if is_cursor {
            focus_line = lines.len();
        }
        lines.push(task_line(app, task, is_cursor && navigating));

        match app.board.edit_buffer() {
            Some(buf) if app.board.edit_session().is_for(task.id) => {
                let (editor, caret) = editor_lines(buf, &app.theme);
                focus_line = lines.len() + caret;
                lines.extend(editor);
            }
            _ => lines.extend(description_lines(&task.description, &app.theme)),
        }

        for subtask in &task.subtasks {
            let item = FlatItem::Subtask {
                task_id: task.id,
                subtask_id: subtask.id,
            };
            let is_cursor = cursor_item == Some(item);
            if is_cursor && navigating {
                focus_line = lines.len();
            }
            lines.push(subtask_line(app, subtask, is_cursor && navigating));
        }

        if app.board.add_subtask_session().is_for(task.id) {
            focus_line = lines.len();
            lines.push(prompt_line(app));
        }
    }

    let visible_height = area.height as usize;
    if focus_line < app.scroll_offset {
        app.scroll_offset = focus_line;
    } else if focus_line >= app.scroll_offset + visible_height {
        app.scroll_offset = focus_line.saturating_sub(visible_height.saturating_sub(1));
    }
    let scroll = app.scroll_offset.min(lines.len().saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .scroll((scroll_row(scroll), 0))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Paragraph scroll takes a u16 row; saturate instead of wrapping
fn scroll_row(scroll: usize) -> u16 {
    u16::try_from(scroll).unwrap_or(u16::MAX)
}

fn marker(app: &App, is_cursor: bool) -> Span<'static> {
    if is_cursor {
        Span::styled(
            CURSOR_BAR,
            Style::default()
                .fg(app.theme.selection_border)
                .bg(app.theme.selection_bg),
        )
    } else {
        Span::styled(" ", Style::default().bg(app.theme.background))
    }
}

fn name_style(app: &App, completed: bool, row_bg: ratatui::style::Color) -> Style {
    if completed {
        Style::default()
            .fg(app.theme.dim)
            .bg(row_bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(app.theme.text_bright).bg(row_bg)
    }
}

fn task_line(app: &App, task: &Task, is_cursor: bool) -> Line<'static> {
    let row_bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let mut spans = vec![
        marker(app, is_cursor),
        Span::styled(
            checkbox(task.completed),
            Style::default()
                .fg(app.theme.checkbox_color(task.completed))
                .bg(row_bg),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(task.name.clone(), name_style(app, task.completed, row_bg)),
    ];
    let (done, total) = task.subtask_progress();
    if total > 0 {
        spans.push(Span::styled(
            format!("  {done}/{total}"),
            Style::default().fg(app.theme.dim).bg(row_bg),
        ));
    }
    Line::from(spans)
}

fn subtask_line(app: &App, subtask: &Subtask, is_cursor: bool) -> Line<'static> {
    let row_bg = if is_cursor {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    Line::from(vec![
        marker(app, is_cursor),
        Span::styled(&INDENT[1..], Style::default().bg(row_bg)),
        Span::styled(
            checkbox(subtask.completed),
            Style::default()
                .fg(app.theme.checkbox_color(subtask.completed))
                .bg(row_bg),
        ),
        Span::styled(" ", Style::default().bg(row_bg)),
        Span::styled(
            subtask.name.clone(),
            name_style(app, subtask.completed, row_bg),
        ),
    ])
}

fn prompt_line(app: &App) -> Line<'static> {
    let bg = app.theme.background;
    let mut spans = vec![Span::styled(
        format!("{INDENT}+ "),
        Style::default().fg(app.theme.highlight).bg(bg),
    )];
    spans.extend(input_spans(
        app,
        app.board.add_subtask_session().name().unwrap_or(""),
        "Enter subtask name...",
    ));
    Line::from(spans)
}

/// Spans for a focused single-line input: text with the caret drawn at
/// `app.input_cursor`, or a dim placeholder with the caret when empty
pub(super) fn input_spans(app: &App, text: &str, placeholder: &str) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let caret = Span::styled(CARET, Style::default().fg(app.theme.highlight).bg(bg));
    if text.is_empty() {
        return vec![
            caret,
            Span::styled(
                placeholder.to_string(),
                Style::default().fg(app.theme.dim).bg(bg),
            ),
        ];
    }
    let at = app.input_cursor.min(text.len());
    let at = (0..=at).rev().find(|&i| text.is_char_boundary(i)).unwrap_or(0);
    let style = Style::default().fg(app.theme.text_bright).bg(bg);
    vec![
        Span::styled(text[..at].to_string(), style),
        caret,
        Span::styled(text[at..].to_string(), style),
    ]
}
