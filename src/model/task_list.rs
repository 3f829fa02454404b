use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::task::{Task, TaskId};

/// Tasks keyed by id, kept in insertion (display) order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: IndexMap<TaskId, Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.get_mut(&id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Task at a display position
    pub fn get_index(&self, index: usize) -> Option<&Task> {
        self.tasks.get_index(index).map(|(_, task)| task)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.values().filter(|t| t.completed).count()
    }

    /// Append at the end. The caller guarantees the id is fresh.
    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.insert(task.id, task);
    }

    /// Remove by identity, keeping the order of the rest
    pub(crate) fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.tasks.shift_remove(&id)
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = indexmap::map::Values<'a, TaskId, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.values()
    }
}

/// Serialized as a plain sequence in display order
impl Serialize for TaskList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tasks.values())
    }
}
