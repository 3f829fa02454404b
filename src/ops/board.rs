use tracing::{debug, trace};

use crate::markup::RichTextBuffer;
use crate::model::ids::IdGen;
use crate::model::session::{AddSubtaskSession, EditSession};
use crate::model::task::{SubtaskId, Task, TaskId};
use crate::model::task_list::TaskList;

use super::task_ops::{self, TaskError};

/// The whole widget state: the task list plus the two session slots.
///
/// Every mutation goes through a method here, so the sessions can never
/// point at a task that no longer exists. Operations that cannot apply
/// (blank names, unknown ids) are silent no-ops.
#[derive(Debug, Default)]
pub struct Board {
    tasks: TaskList,
    ids: IdGen,
    edit: EditSession,
    add_subtask: AddSubtaskSession,
}

fn ignored(op: &str, err: &TaskError) {
    trace!(op, %err, "ignored");
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn add_subtask_session(&self) -> &AddSubtaskSession {
        &self.add_subtask
    }

    // -----------------------------------------------------------------------
    // Task collection
    // -----------------------------------------------------------------------

    pub fn add_task(&mut self, name: &str) -> Option<TaskId> {
        match task_ops::add_task(&mut self.tasks, &mut self.ids, name) {
            Ok(id) => {
                debug!(task = %id, "task added");
                Some(id)
            }
            Err(e) => {
                ignored("add_task", &e);
                None
            }
        }
    }

    pub fn toggle_task_completed(&mut self, id: TaskId) {
        match task_ops::toggle_task_completed(&mut self.tasks, id) {
            Ok(completed) => debug!(task = %id, completed, "task toggled"),
            Err(e) => ignored("toggle_task_completed", &e),
        }
    }

    /// Remove a task, force-closing any session scoped to it
    pub fn delete_task(&mut self, id: TaskId) {
        if let Err(e) = task_ops::delete_task(&mut self.tasks, id) {
            ignored("delete_task", &e);
            return;
        }
        debug!(task = %id, "task deleted");
        if self.edit.is_for(id) {
            debug!(task = %id, "edit session discarded with its task");
            self.edit = EditSession::Closed;
        }
        if self.add_subtask.is_for(id) {
            debug!(task = %id, "subtask prompt discarded with its task");
            self.add_subtask = AddSubtaskSession::Closed;
        }
    }

    /// Append a subtask to any task, whether or not its prompt is open.
    ///
    /// A non-blank name closes the add-subtask prompt, whichever task it
    /// belonged to. A blank name leaves everything as it was.
    pub fn add_subtask(&mut self, task_id: TaskId, name: &str) -> Option<SubtaskId> {
        let result = task_ops::add_subtask(&mut self.tasks, &mut self.ids, task_id, name);
        match result {
            Err(TaskError::BlankName) => {
                ignored("add_subtask", &TaskError::BlankName);
                return None;
            }
            Err(ref e) => ignored("add_subtask", e),
            Ok(id) => debug!(task = %task_id, subtask = %id, "subtask added"),
        }
        self.add_subtask = AddSubtaskSession::Closed;
        result.ok()
    }

    pub fn toggle_subtask_completed(&mut self, task_id: TaskId, subtask_id: SubtaskId) {
        match task_ops::toggle_subtask_completed(&mut self.tasks, task_id, subtask_id) {
            Ok(completed) => {
                debug!(task = %task_id, subtask = %subtask_id, completed, "subtask toggled")
            }
            Err(e) => ignored("toggle_subtask_completed", &e),
        }
    }

    pub fn delete_subtask(&mut self, task_id: TaskId, subtask_id: SubtaskId) {
        match task_ops::delete_subtask(&mut self.tasks, task_id, subtask_id) {
            Ok(_) => debug!(task = %task_id, subtask = %subtask_id, "subtask deleted"),
            Err(e) => ignored("delete_subtask", &e),
        }
    }

    /// Store `html` as the task's description without any processing.
    /// Edit sessions commit through [`Board::save_edit`], which sanitizes.
    pub fn set_description(&mut self, task_id: TaskId, html: impl Into<String>) {
        if let Err(e) = task_ops::set_description(&mut self.tasks, task_id, html.into()) {
            ignored("set_description", &e);
        }
    }

    // -----------------------------------------------------------------------
    // Description-edit session
    // -----------------------------------------------------------------------

    /// Open the editor on a task, seeded from its description. An editor
    /// already open elsewhere is discarded unsaved.
    pub fn start_edit(&mut self, task_id: TaskId) {
        let Some(task) = self.tasks.get(task_id) else {
            ignored("start_edit", &TaskError::TaskNotFound(task_id));
            return;
        };
        if let Some(previous) = self.edit.task_id() {
            debug!(task = %previous, "unsaved edit discarded");
        }
        let buffer = RichTextBuffer::from_markup(&task.description);
        self.edit = EditSession::Editing { task_id, buffer };
        debug!(task = %task_id, "edit started");
    }

    pub fn edit_buffer(&self) -> Option<&RichTextBuffer> {
        self.edit.buffer()
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut RichTextBuffer> {
        self.edit.buffer_mut()
    }

    /// Commit the buffer into the task's description and close the session
    pub fn save_edit(&mut self) {
        if let EditSession::Editing { task_id, buffer } = std::mem::take(&mut self.edit) {
            self.set_description(task_id, buffer.to_markup());
            debug!(task = %task_id, "description saved");
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(task_id) = self.edit.task_id() {
            debug!(task = %task_id, "edit cancelled");
        }
        self.edit = EditSession::Closed;
    }

    // -----------------------------------------------------------------------
    // Add-subtask session
    // -----------------------------------------------------------------------

    /// Open the subtask prompt on a task with an empty name, replacing any
    /// prompt open elsewhere
    pub fn start_add_subtask(&mut self, task_id: TaskId) {
        if !self.tasks.contains(task_id) {
            ignored("start_add_subtask", &TaskError::TaskNotFound(task_id));
            return;
        }
        self.add_subtask = AddSubtaskSession::Adding {
            task_id,
            name: String::new(),
        };
        debug!(task = %task_id, "subtask prompt opened");
    }

    pub fn subtask_name_mut(&mut self) -> Option<&mut String> {
        self.add_subtask.name_mut()
    }

    /// Submit the prompt's name. A blank name keeps the prompt open as is.
    pub fn submit_subtask(&mut self) -> Option<SubtaskId> {
        let (task_id, name) = match &self.add_subtask {
            AddSubtaskSession::Adding { task_id, name } => (*task_id, name.clone()),
            AddSubtaskSession::Closed => return None,
        };
        self.add_subtask(task_id, &name)
    }

    pub fn cancel_add_subtask(&mut self) {
        self.add_subtask = AddSubtaskSession::Closed;
    }
}
