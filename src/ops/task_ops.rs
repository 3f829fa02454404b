use crate::model::ids::IdGen;
use crate::model::task::{Subtask, SubtaskId, Task, TaskId};
use crate::model::task_list::TaskList;

/// Error type for task operations. Every error means nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("name is blank")]
    BlankName,
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("subtask not found: {subtask} in {task}")]
    SubtaskNotFound { task: TaskId, subtask: SubtaskId },
}

/// Trim a submitted name, rejecting blank input
fn clean_name(name: &str) -> Result<String, TaskError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Err(TaskError::BlankName)
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Append a new task at the end of the list. Returns the assigned id.
pub fn add_task(list: &mut TaskList, ids: &mut IdGen, name: &str) -> Result<TaskId, TaskError> {
    let name = clean_name(name)?;
    let id = TaskId(ids.next_id());
    list.push(Task::new(id, name));
    Ok(id)
}

/// Flip a task's completed flag. Returns the new value.
pub fn toggle_task_completed(list: &mut TaskList, id: TaskId) -> Result<bool, TaskError> {
    let task = list.get_mut(id).ok_or(TaskError::TaskNotFound(id))?;
    task.completed = !task.completed;
    Ok(task.completed)
}

/// Remove a task, returning it
pub fn delete_task(list: &mut TaskList, id: TaskId) -> Result<Task, TaskError> {
    list.remove(id).ok_or(TaskError::TaskNotFound(id))
}

/// Replace a task's description verbatim
pub fn set_description(list: &mut TaskList, id: TaskId, html: String) -> Result<(), TaskError> {
    let task = list.get_mut(id).ok_or(TaskError::TaskNotFound(id))?;
    task.description = html;
    Ok(())
}

// ---------------------------------------------------------------------------
// Subtasks
// ---------------------------------------------------------------------------

/// Append a subtask to a task. The name is checked before the task lookup,
/// so a blank name is reported as such even for an unknown task.
pub fn add_subtask(
    list: &mut TaskList,
    ids: &mut IdGen,
    task_id: TaskId,
    name: &str,
) -> Result<SubtaskId, TaskError> {
    let name = clean_name(name)?;
    let task = list
        .get_mut(task_id)
        .ok_or(TaskError::TaskNotFound(task_id))?;
    let id = SubtaskId(ids.next_id());
    task.subtasks.push(Subtask::new(id, name));
    Ok(id)
}

pub fn toggle_subtask_completed(
    list: &mut TaskList,
    task_id: TaskId,
    subtask_id: SubtaskId,
) -> Result<bool, TaskError> {
    let task = list
        .get_mut(task_id)
        .ok_or(TaskError::TaskNotFound(task_id))?;
    let subtask = task
        .subtask_mut(subtask_id)
        .ok_or(TaskError::SubtaskNotFound {
            task: task_id,
            subtask: subtask_id,
        })?;
    subtask.completed = !subtask.completed;
    Ok(subtask.completed)
}

pub fn delete_subtask(
    list: &mut TaskList,
    task_id: TaskId,
    subtask_id: SubtaskId,
) -> Result<Subtask, TaskError> {
    let task = list
        .get_mut(task_id)
        .ok_or(TaskError::TaskNotFound(task_id))?;
    let idx = task
        .subtasks
        .iter()
        .position(|s| s.id == subtask_id)
        .ok_or(TaskError::SubtaskNotFound {
            task: task_id,
            subtask: subtask_id,
        })?;
    Ok(task.subtasks.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_list() -> (TaskList, IdGen, TaskId, TaskId) {
        let mut list = TaskList::new();
        let mut ids = IdGen::new();
        let a = add_task(&mut list, &mut ids, "First").unwrap();
        let b = add_task(&mut list, &mut ids, "Second").unwrap();
        (list, ids, a, b)
    }

    fn names(list: &TaskList) -> Vec<&str> {
        list.iter().map(|t| t.name.as_str()).collect()
    }

    // --- Tasks ---

    #[test]
    fn test_add_task_appends_with_defaults() {
        let (list, _, a, _) = sample_list();
        assert_eq!(names(&list), vec!["First", "Second"]);
        let task = list.get(a).unwrap();
        assert!(!task.completed);
        assert_eq!(task.description, "");
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn test_add_task_trims_name() {
        let (mut list, mut ids, _, _) = sample_list();
        let id = add_task(&mut list, &mut ids, "  padded \t").unwrap();
        assert_eq!(list.get(id).unwrap().name, "padded");
    }

    #[test]
    fn test_add_task_rejects_blank_names() {
        let (mut list, mut ids, _, _) = sample_list();
        let before = list.clone();
        for blank in ["", "   ", "\t\n"] {
            assert_eq!(add_task(&mut list, &mut ids, blank), Err(TaskError::BlankName));
        }
        assert_eq!(list, before);
    }

    #[test]
    fn test_toggle_task_twice_restores() {
        let (mut list, _, a, _) = sample_list();
        assert_eq!(toggle_task_completed(&mut list, a), Ok(true));
        assert_eq!(toggle_task_completed(&mut list, a), Ok(false));
        assert!(!list.get(a).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_task() {
        let (mut list, _, _, _) = sample_list();
        let before = list.clone();
        assert_eq!(
            toggle_task_completed(&mut list, TaskId(1)),
            Err(TaskError::TaskNotFound(TaskId(1)))
        );
        assert_eq!(list, before);
    }

    #[test]
    fn test_delete_task_keeps_order() {
        let (mut list, mut ids, a, _) = sample_list();
        add_task(&mut list, &mut ids, "Third").unwrap();
        let removed = delete_task(&mut list, a).unwrap();
        assert_eq!(removed.name, "First");
        assert_eq!(names(&list), vec!["Second", "Third"]);
        assert!(delete_task(&mut list, a).is_err());
    }

    #[test]
    fn test_set_description_is_verbatim() {
        let (mut list, _, a, _) = sample_list();
        set_description(&mut list, a, "<b>raw</b><x>".into()).unwrap();
        assert_eq!(list.get(a).unwrap().description, "<b>raw</b><x>");
    }

    // --- Subtasks ---

    #[test]
    fn test_add_subtask_appends_in_order() {
        let (mut list, mut ids, a, b) = sample_list();
        add_subtask(&mut list, &mut ids, a, "one").unwrap();
        add_subtask(&mut list, &mut ids, a, " two ").unwrap();
        let task = list.get(a).unwrap();
        let subs: Vec<&str> = task.subtasks.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(subs, vec!["one", "two"]);
        assert!(task.subtasks.iter().all(|s| !s.completed));
        assert!(list.get(b).unwrap().subtasks.is_empty());
    }

    #[test]
    fn test_add_subtask_blank_checked_first() {
        let (mut list, mut ids, _, _) = sample_list();
        assert_eq!(
            add_subtask(&mut list, &mut ids, TaskId(7), "  "),
            Err(TaskError::BlankName)
        );
        assert_eq!(
            add_subtask(&mut list, &mut ids, TaskId(7), "x"),
            Err(TaskError::TaskNotFound(TaskId(7)))
        );
    }

    #[test]
    fn test_subtask_ids_unique_within_task() {
        let (mut list, mut ids, a, _) = sample_list();
        for i in 0..50 {
            add_subtask(&mut list, &mut ids, a, &format!("s{i}")).unwrap();
        }
        let mut seen: Vec<SubtaskId> = list.get(a).unwrap().subtasks.iter().map(|s| s.id).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 50);
    }

    #[test]
    fn test_toggle_and_delete_subtask() {
        let (mut list, mut ids, a, _) = sample_list();
        let s1 = add_subtask(&mut list, &mut ids, a, "one").unwrap();
        let s2 = add_subtask(&mut list, &mut ids, a, "two").unwrap();

        assert_eq!(toggle_subtask_completed(&mut list, a, s2), Ok(true));
        assert!(!list.get(a).unwrap().completed);

        let removed = delete_subtask(&mut list, a, s1).unwrap();
        assert_eq!(removed.name, "one");
        let task = list.get(a).unwrap();
        assert_eq!(task.subtasks.len(), 1);
        assert!(task.subtasks[0].completed);
    }

    #[test]
    fn test_subtask_lookup_failures() {
        let (mut list, _, a, _) = sample_list();
        let missing = SubtaskId(3);
        assert_eq!(
            toggle_subtask_completed(&mut list, a, missing),
            Err(TaskError::SubtaskNotFound {
                task: a,
                subtask: missing
            })
        );
        assert_eq!(
            delete_subtask(&mut list, TaskId(9), missing).unwrap_err(),
            TaskError::TaskNotFound(TaskId(9))
        );
    }
}
