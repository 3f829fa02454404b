use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::markup::{self, Block, BlockKind, Marks, RichTextBuffer};
use crate::tui::theme::Theme;

/// Left padding shared by description lines, subtasks and the editor
pub(super) const INDENT: &str = "     ";
pub(super) const BULLET: &str = "\u{2022} ";
const CARET: &str = "\u{258C}";

/// Terminal modifiers for a run's marks
pub(super) fn marks_style(base: Style, marks: Marks) -> Style {
    let mut style = base;
    if marks.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if marks.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if marks.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn block_prefix(block: &Block, base: Style) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(INDENT, base)];
    if block.kind == BlockKind::ListItem {
        spans.push(Span::styled(BULLET, base));
    }
    spans
}

/// Read-only rendering of a stored description, one line per block
pub(super) fn description_lines(html: &str, theme: &Theme) -> Vec<Line<'static>> {
    let doc = markup::parse(html);
    if doc.is_blank() {
        return Vec::new();
    }
    let base = Style::default().fg(theme.dim).bg(theme.background);
    doc.blocks
        .iter()
        .map(|block| {
            let mut spans = block_prefix(block, base);
            spans.extend(
                block
                    .runs
                    .iter()
                    .map(|run| Span::styled(run.text.clone(), marks_style(base, run.marks))),
            );
            Line::from(spans)
        })
        .collect()
}

/// Toolbar, editable blocks and key hint for an open edit session.
/// Returns the lines and the index of the line holding the caret.
pub(super) fn editor_lines(buf: &RichTextBuffer, theme: &Theme) -> (Vec<Line<'static>>, usize) {
    let bg = theme.editor_bg;
    let base = Style::default().fg(theme.text_bright).bg(bg);
    let mut lines = vec![toolbar_line(buf, theme)];

    for (idx, block) in buf.document().blocks.iter().enumerate() {
        lines.push(editor_block_line(buf, idx, block, base, theme));
    }

    lines.push(Line::from(Span::styled(
        format!("{INDENT}Ctrl-S save  Esc cancel"),
        Style::default().fg(theme.dim).bg(theme.background),
    )));

    (lines, buf.cursor().block + 1)
}

fn toolbar_line(buf: &RichTextBuffer, theme: &Theme) -> Line<'static> {
    let marks = buf.typing_marks();
    let in_list = buf
        .document()
        .blocks
        .get(buf.cursor().block)
        .is_some_and(|b| b.kind == BlockKind::ListItem);

    let button = |label: &'static str, active: bool, modifier: Modifier| {
        let fg = if active { theme.highlight } else { theme.dim };
        Span::styled(
            label,
            Style::default()
                .fg(fg)
                .bg(theme.background)
                .add_modifier(modifier),
        )
    };
    let gap = || Span::styled(" ", Style::default().bg(theme.background));

    Line::from(vec![
        Span::styled(INDENT, Style::default().bg(theme.background)),
        button("B", marks.bold, Modifier::BOLD),
        gap(),
        button("I", marks.italic, Modifier::ITALIC),
        gap(),
        button("U", marks.underline, Modifier::UNDERLINED),
        gap(),
        button("\u{2022} List", in_list, Modifier::empty()),
    ])
}

/// One block of the buffer, with the selection highlighted and the caret drawn
fn editor_block_line(
    buf: &RichTextBuffer,
    idx: usize,
    block: &Block,
    base: Style,
    theme: &Theme,
) -> Line<'static> {
    let mut spans = block_prefix(block, base);
    let caret_style = Style::default().fg(theme.highlight).bg(base.bg.unwrap_or(theme.editor_bg));
    let caret = (buf.cursor().block == idx).then_some(buf.cursor().offset);
    let selected = buf.selection().and_then(|(start, end)| {
        if idx < start.block || idx > end.block {
            return None;
        }
        let from = if idx == start.block { start.offset } else { 0 };
        let to = if idx == end.block { end.offset } else { block.len() };
        Some((from, to))
    });

    let mut offset = 0;
    for run in &block.runs {
        let end = offset + run.text.len();
        let mut cuts: Vec<usize> = [caret, selected.map(|s| s.0), selected.map(|s| s.1)]
            .into_iter()
            .flatten()
            .filter(|&c| c > offset && c < end)
            .collect();
        cuts.sort_unstable();
        cuts.dedup();
        cuts.push(end);

        let mut start = offset;
        for cut in cuts {
            if caret == Some(start) {
                spans.push(Span::styled(CARET, caret_style));
            }
            let mut style = marks_style(base, run.marks);
            if selected.is_some_and(|(from, to)| start >= from && cut <= to) {
                style = style.bg(theme.selection_bg);
            }
            spans.push(Span::styled(
                run.text[start - offset..cut - offset].to_string(),
                style,
            ));
            start = cut;
        }
        offset = end;
    }
    if caret == Some(block.len()) {
        spans.push(Span::styled(CARET, caret_style));
    }
    Line::from(spans)
}
