use chrono::Utc;

use super::{on_current_board, Transition};
use crate::{Board, KanbanState, OtherAction, SubTask, SubTaskId, TaskFilter, TaskId};

impl Transition for OtherAction {
    fn apply(&self, state: &KanbanState) -> KanbanState {
        match self {
            OtherAction::AddSubTask { task_id, title } => {
                on_current_board(state, "ADD_SUBTASK", |board| {
                    edit_task(board, *task_id, |sub_tasks| {
                        sub_tasks.push(SubTask::new(title.clone()));
                        Some(())
                    })
                })
            }
            OtherAction::UpdateSubTask {
                task_id,
                sub_task_id,
                updates,
            } => on_current_board(state, "UPDATE_SUBTASK", |board| {
                edit_sub_task(board, *task_id, *sub_task_id, |s| s.update(updates.clone()))
            }),
            OtherAction::ToggleSubTask {
                task_id,
                sub_task_id,
            } => on_current_board(state, "TOGGLE_SUBTASK", |board| {
                edit_sub_task(board, *task_id, *sub_task_id, SubTask::toggle)
            }),
            OtherAction::DeleteSubTask {
                task_id,
                sub_task_id,
            } => on_current_board(state, "DELETE_SUBTASK", |board| {
                edit_task(board, *task_id, |sub_tasks| {
                    let index = sub_tasks.iter().position(|s| s.id == *sub_task_id)?;
                    sub_tasks.remove(index);
                    Some(())
                })
            }),
            OtherAction::SetViewMode { view_mode } => {
                let mut next = state.clone();
                next.view_mode = *view_mode;
                next
            }
            OtherAction::SetSortOption { sort_option } => {
                let mut next = state.clone();
                next.sort_option = *sort_option;
                next
            }
            OtherAction::SetTaskFilter { filter } => {
                let mut next = state.clone();
                next.task_filter = filter.clone();
                next
            }
            OtherAction::ClearTaskFilter => {
                let mut next = state.clone();
                next.task_filter = TaskFilter::default();
                next
            }
        }
    }
}

/// Edit a task's subtask list, bubbling `updated_at` to the task and board.
fn edit_task<F>(board: &mut Board, task_id: TaskId, edit: F) -> Option<()>
where
    F: FnOnce(&mut Vec<SubTask>) -> Option<()>,
{
    let task = board.task_mut(task_id)?;
    edit(&mut task.sub_tasks)?;
    let now = Utc::now();
    task.updated_at = now;
    board.updated_at = now;
    Some(())
}

fn edit_sub_task<F>(
    board: &mut Board,
    task_id: TaskId,
    sub_task_id: SubTaskId,
    edit: F,
) -> Option<()>
where
    F: FnOnce(&mut SubTask),
{
    edit_task(board, task_id, |sub_tasks| {
        let sub_task = sub_tasks.iter_mut().find(|s| s.id == sub_task_id)?;
        edit(sub_task);
        Some(())
    })
}
