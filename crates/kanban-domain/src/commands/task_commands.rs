use chrono::Utc;

use super::{clamp_index, on_current_board, Transition};
use crate::{Board, ColumnId, KanbanState, NewTask, Task, TaskAction, TaskId};

impl Transition for TaskAction {
    fn apply(&self, state: &KanbanState) -> KanbanState {
        match self {
            TaskAction::AddTask(new_task) => {
                on_current_board(state, "ADD_TASK", |board| add_task(board, new_task))
            }
            TaskAction::UpdateTask { task_id, updates } => {
                on_current_board(state, "UPDATE_TASK", |board| {
                    board.task_mut(*task_id)?.update(updates.clone());
                    board.touch();
                    Some(())
                })
            }
            TaskAction::MoveTask {
                task_id,
                source_column_id,
                target_column_id,
                target_index,
            } => on_current_board(state, "MOVE_TASK", |board| {
                move_task(
                    board,
                    *task_id,
                    *source_column_id,
                    *target_column_id,
                    *target_index,
                )
            }),
            TaskAction::DeleteTask { task_id } => on_current_board(state, "DELETE_TASK", |board| {
                let column = board
                    .columns
                    .iter_mut()
                    .find(|c| c.tasks.iter().any(|t| t.id == *task_id))?;
                column.tasks.retain(|t| t.id != *task_id);
                board.touch();
                Some(())
            }),
        }
    }
}

fn add_task(board: &mut Board, new_task: &NewTask) -> Option<()> {
    // Replayed creations must not duplicate a task already on the board.
    if let Some(id) = new_task.task_id {
        if board.find_task(id).is_some() {
            return None;
        }
    }

    let column = board.column_mut(new_task.column_id)?;
    let mut task = match new_task.task_id {
        Some(id) => Task::with_id(id, new_task.title.clone()),
        None => Task::new(new_task.title.clone()),
    };
    task.description = new_task.description.clone();
    task.due_date = new_task.due_date;
    task.priority = Some(new_task.priority);
    task.labels = new_task.labels.clone();
    if !new_task.files.is_empty() {
        task.attachments = Some(new_task.files.clone());
    }

    column.tasks.push(task);
    board.touch();
    Some(())
}

/// Splice a task out of `source` and into `target` at a clamped index.
///
/// `completed_at` follows terminal-column membership, but only moves that
/// cross the terminal boundary touch it: entering sets it, leaving clears
/// it, anything else leaves it as it was.
fn move_task(
    board: &mut Board,
    task_id: TaskId,
    source: ColumnId,
    target: ColumnId,
    target_index: i64,
) -> Option<()> {
    let source_idx = board.column_index(source)?;
    let task_pos = board.columns[source_idx].task_position(task_id)?;
    let target_idx = board.column_index(target)?;

    let entering_terminal = board.is_terminal_column(target) && !board.is_terminal_column(source);
    let leaving_terminal = board.is_terminal_column(source) && !board.is_terminal_column(target);

    let now = Utc::now();
    let mut task = board.columns[source_idx].tasks.remove(task_pos);
    if entering_terminal {
        task.completed_at = Some(now);
        task.updated_at = now;
    } else if leaving_terminal {
        task.completed_at = None;
        task.updated_at = now;
    }

    let tasks = &mut board.columns[target_idx].tasks;
    let index = clamp_index(target_index, tasks.len());
    tasks.insert(index, task);
    board.updated_at = now;
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldUpdate, Label, Priority, TaskUpdate};
    use std::sync::Arc;
    use uuid::Uuid;

    struct Fixture {
        state: KanbanState,
        todo: ColumnId,
        doing: ColumnId,
        done: ColumnId,
    }

    fn fixture() -> Fixture {
        let board = Board::new("Board".to_string());
        let (todo, doing, done) = (board.columns[0].id, board.columns[1].id, board.columns[2].id);
        Fixture {
            state: KanbanState::with_boards(vec![board]),
            todo,
            doing,
            done,
        }
    }

    fn add(state: &KanbanState, column_id: ColumnId, title: &str) -> (KanbanState, TaskId) {
        let next = TaskAction::AddTask(NewTask::new(column_id, title)).apply(state);
        let id = next
            .current_board()
            .unwrap()
            .column(column_id)
            .unwrap()
            .tasks
            .last()
            .unwrap()
            .id;
        (next, id)
    }

    fn move_to(
        state: &KanbanState,
        task_id: TaskId,
        source: ColumnId,
        target: ColumnId,
        index: i64,
    ) -> KanbanState {
        TaskAction::MoveTask {
            task_id,
            source_column_id: source,
            target_column_id: target,
            target_index: index,
        }
        .apply(state)
    }

    fn task(state: &KanbanState, id: TaskId) -> Task {
        state.current_board().unwrap().find_task(id).unwrap().1.clone()
    }

    fn column_titles(state: &KanbanState, column_id: ColumnId) -> Vec<String> {
        state
            .current_board()
            .unwrap()
            .column(column_id)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn test_add_task_defaults() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Write release notes");

        let task = task(&state, id);
        assert_eq!(task.priority, Some(Priority::Medium));
        assert!(task.sub_tasks.is_empty());
        assert!(task.completed_at.is_none());
        assert!(task.attachments.is_none());
        assert!(state.is_consistent());
    }

    #[test]
    fn test_add_task_appends_in_order() {
        let f = fixture();
        let (state, _) = add(&f.state, f.todo, "first");
        let (state, _) = add(&state, f.todo, "second");
        assert_eq!(column_titles(&state, f.todo), ["first", "second"]);
    }

    #[test]
    fn test_add_task_with_fields() {
        let f = fixture();
        let label = Label::new("ops".to_string(), "#333".to_string());
        let mut new_task = NewTask::new(f.doing, "Deploy");
        new_task.priority = Priority::Critical;
        new_task.labels = vec![label.clone()];
        new_task.description = "prod rollout".to_string();

        let state = TaskAction::AddTask(new_task).apply(&f.state);
        let task = &state.current_board().unwrap().columns[1].tasks[0];
        assert_eq!(task.priority, Some(Priority::Critical));
        assert_eq!(task.labels, vec![label]);
        assert_eq!(task.description, "prod rollout");
    }

    #[test]
    fn test_add_task_with_known_id_is_idempotent() {
        let f = fixture();
        let id = Uuid::new_v4();
        let mut new_task = NewTask::new(f.todo, "Remote");
        new_task.task_id = Some(id);

        let once = TaskAction::AddTask(new_task.clone()).apply(&f.state);
        assert_eq!(task(&once, id).title, "Remote");

        let twice = TaskAction::AddTask(new_task).apply(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_add_task_to_missing_column_is_noop() {
        let f = fixture();
        let next = TaskAction::AddTask(NewTask::new(Uuid::new_v4(), "Lost")).apply(&f.state);
        assert_eq!(next, f.state);
    }

    #[test]
    fn test_update_task() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Draft");
        let before = task(&state, id);

        let next = TaskAction::UpdateTask {
            task_id: id,
            updates: TaskUpdate {
                title: Some("Final".to_string()),
                priority: FieldUpdate::Set(Priority::High),
                ..Default::default()
            },
        }
        .apply(&state);

        let after = task(&next, id);
        assert_eq!(after.title, "Final");
        assert_eq!(after.priority, Some(Priority::High));
        assert!(after.updated_at >= before.updated_at);
        assert!(next.current_board().unwrap().updated_at >= state.current_board().unwrap().updated_at);
    }

    #[test]
    fn test_update_missing_task_is_noop() {
        let f = fixture();
        let next = TaskAction::UpdateTask {
            task_id: Uuid::new_v4(),
            updates: TaskUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            },
        }
        .apply(&f.state);
        assert_eq!(next, f.state);
    }

    #[test]
    fn test_move_into_terminal_sets_completed_at() {
        let f = fixture();
        let (state, id) = add(&f.state, f.doing, "Ship");

        let next = move_to(&state, id, f.doing, f.done, 0);
        let moved = task(&next, id);
        assert!(moved.completed_at.is_some());
        assert_eq!(moved.updated_at, moved.completed_at.unwrap());
        assert_eq!(column_titles(&next, f.done), ["Ship"]);
        assert!(column_titles(&next, f.doing).is_empty());
    }

    #[test]
    fn test_move_out_of_terminal_clears_completed_at() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Ship");
        let state = move_to(&state, id, f.todo, f.done, 0);

        let next = move_to(&state, id, f.done, f.doing, 0);
        assert!(task(&next, id).completed_at.is_none());
    }

    #[test]
    fn test_move_between_non_terminal_columns_keeps_completed_at() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Ship");
        let before = task(&state, id);

        let next = move_to(&state, id, f.todo, f.doing, 0);
        let after = task(&next, id);
        assert_eq!(after.completed_at, before.completed_at);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[test]
    fn test_reorder_within_terminal_keeps_completed_at() {
        let f = fixture();
        let (state, a) = add(&f.state, f.todo, "a");
        let (state, b) = add(&state, f.todo, "b");
        let state = move_to(&state, a, f.todo, f.done, 0);
        let state = move_to(&state, b, f.todo, f.done, 1);
        let completed = task(&state, a).completed_at;

        let next = move_to(&state, a, f.done, f.done, 1);
        assert_eq!(column_titles(&next, f.done), ["b", "a"]);
        assert_eq!(task(&next, a).completed_at, completed);
    }

    #[test]
    fn test_reorder_within_column_clamps_index() {
        let f = fixture();
        let (state, a) = add(&f.state, f.todo, "a");
        let (state, _) = add(&state, f.todo, "b");
        let (state, _) = add(&state, f.todo, "c");

        let next = move_to(&state, a, f.todo, f.todo, 99);
        assert_eq!(column_titles(&next, f.todo), ["b", "c", "a"]);

        let next = move_to(&next, a, f.todo, f.todo, -1);
        assert_eq!(column_titles(&next, f.todo), ["a", "b", "c"]);
    }

    #[test]
    fn test_move_inserts_at_index() {
        let f = fixture();
        let (state, _) = add(&f.state, f.doing, "x");
        let (state, _) = add(&state, f.doing, "y");
        let (state, id) = add(&state, f.todo, "new");

        let next = move_to(&state, id, f.todo, f.doing, 1);
        assert_eq!(column_titles(&next, f.doing), ["x", "new", "y"]);
    }

    #[test]
    fn test_move_from_wrong_source_is_noop() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Ship");
        let next = move_to(&state, id, f.doing, f.done, 0);
        assert_eq!(next, state);
    }

    #[test]
    fn test_move_to_missing_target_keeps_task() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Ship");
        let next = move_to(&state, id, f.todo, Uuid::new_v4(), 0);
        assert_eq!(next, state);
    }

    #[test]
    fn test_move_leaves_board_consistent() {
        let f = fixture();
        let (state, id) = add(&f.state, f.todo, "Ship");
        let next = move_to(&state, id, f.todo, f.done, 0);
        assert!(Arc::ptr_eq(next.current_board().unwrap(), &next.boards()[0]));
    }

    #[test]
    fn test_delete_task() {
        let f = fixture();
        let (state, id) = add(&f.state, f.doing, "Ship");
        let next = TaskAction::DeleteTask { task_id: id }.apply(&state);
        assert!(next.current_board().unwrap().find_task(id).is_none());
    }

    #[test]
    fn test_delete_missing_task_is_noop() {
        let f = fixture();
        let next = TaskAction::DeleteTask {
            task_id: Uuid::new_v4(),
        }
        .apply(&f.state);
        assert_eq!(next, f.state);
    }
}
