use crate::markup::RichTextBuffer;

use super::task::TaskId;

/// The single description-edit slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Editing {
        task_id: TaskId,
        buffer: RichTextBuffer,
    },
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            EditSession::Editing { task_id, .. } => Some(*task_id),
            EditSession::Closed => None,
        }
    }

    pub fn is_for(&self, id: TaskId) -> bool {
        self.task_id() == Some(id)
    }

    pub fn buffer(&self) -> Option<&RichTextBuffer> {
        match self {
            EditSession::Editing { buffer, .. } => Some(buffer),
            EditSession::Closed => None,
        }
    }

    pub fn buffer_mut(&mut self) -> Option<&mut RichTextBuffer> {
        match self {
            EditSession::Editing { buffer, .. } => Some(buffer),
            EditSession::Closed => None,
        }
    }
}

/// The single add-subtask prompt slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AddSubtaskSession {
    #[default]
    Closed,
    Adding { task_id: TaskId, name: String },
}

impl AddSubtaskSession {
    pub fn is_open(&self) -> bool {
        matches!(self, AddSubtaskSession::Adding { .. })
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            AddSubtaskSession::Adding { task_id, .. } => Some(*task_id),
            AddSubtaskSession::Closed => None,
        }
    }

    pub fn is_for(&self, id: TaskId) -> bool {
        self.task_id() == Some(id)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            AddSubtaskSession::Adding { name, .. } => Some(name),
            AddSubtaskSession::Closed => None,
        }
    }

    pub fn name_mut(&mut self) -> Option<&mut String> {
        match self {
            AddSubtaskSession::Adding { name, .. } => Some(name),
            AddSubtaskSession::Closed => None,
        }
    }
}
