use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a top-level task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

/// Identifier of a subtask (unique within its parent, globally unique in practice)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

impl fmt::Display for SubtaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subtask#{}", self.0)
    }
}

/// A child item of a task. Subtasks do not nest further.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    /// Trimmed, never blank
    pub name: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(id: SubtaskId, name: String) -> Self {
        Subtask {
            id,
            name,
            completed: false,
        }
    }
}

/// A top-level to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never blank, fixed at creation
    pub name: String,
    /// Toggled on its own; not derived from the subtasks
    pub completed: bool,
    /// Markup fragment. Empty means no description.
    pub description: String,
    /// Subtasks in insertion order
    pub subtasks: Vec<Subtask>,
}

impl Task {
    pub fn new(id: TaskId, name: String) -> Self {
        Task {
            id,
            name,
            completed: false,
            description: String::new(),
            subtasks: Vec::new(),
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn subtask_mut(&mut self, id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }

    /// (completed, total) over the subtasks
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }
}
