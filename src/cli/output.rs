use serde::Serialize;

use crate::markup;
use crate::model::task::Task;
use crate::model::task_list::TaskList;
use crate::ops::Board;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardJson<'a> {
    pub tasks: &'a TaskList,
    pub completed: usize,
    pub total: usize,
}

impl<'a> BoardJson<'a> {
    pub fn new(board: &'a Board) -> Self {
        let tasks = board.tasks();
        BoardJson {
            tasks,
            completed: tasks.completed_count(),
            total: tasks.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn checkbox(completed: bool) -> &'static str {
    if completed { "[x]" } else { "[ ]" }
}

/// Format one task with its description text and subtasks
pub fn format_task(task: &Task) -> Vec<String> {
    let mut lines = vec![format!("{} {}", checkbox(task.completed), task.name)];
    if task.has_description() {
        let doc = markup::parse(&task.description);
        for block in &doc.blocks {
            let bullet = match block.kind {
                markup::BlockKind::ListItem => "\u{2022} ",
                markup::BlockKind::Paragraph => "",
            };
            lines.push(format!("    {}{}", bullet, block.text()));
        }
    }
    for sub in &task.subtasks {
        lines.push(format!("    {} {}", checkbox(sub.completed), sub.name));
    }
    lines
}

pub fn format_board(board: &Board) -> Vec<String> {
    if board.tasks().is_empty() {
        return vec!["No tasks.".to_string()];
    }
    board.tasks().iter().flat_map(format_task).collect()
}
