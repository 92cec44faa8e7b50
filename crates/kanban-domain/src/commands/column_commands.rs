use super::{clamp_index, on_current_board, Transition};
use crate::{Column, ColumnAction, KanbanState};

impl Transition for ColumnAction {
    fn apply(&self, state: &KanbanState) -> KanbanState {
        match self {
            ColumnAction::AddColumn { title, color } => {
                on_current_board(state, "ADD_COLUMN", |board| {
                    board.columns.push(Column::new(title.clone(), color.clone()));
                    board.touch();
                    Some(())
                })
            }
            ColumnAction::UpdateColumn { column_id, updates } => {
                on_current_board(state, "UPDATE_COLUMN", |board| {
                    board.column_mut(*column_id)?.update(updates.clone());
                    board.touch();
                    Some(())
                })
            }
            // Tasks in the column go with it.
            ColumnAction::DeleteColumn { column_id } => {
                on_current_board(state, "DELETE_COLUMN", |board| {
                    let index = board.column_index(*column_id)?;
                    let removed = board.columns.remove(index);
                    if !removed.tasks.is_empty() {
                        tracing::debug!(
                            column_id = %removed.id,
                            "Deleted column '{}' with {} task(s)",
                            removed.title,
                            removed.tasks.len()
                        );
                    }
                    board.touch();
                    Some(())
                })
            }
            ColumnAction::ReorderColumns {
                source_index,
                target_index,
            } => on_current_board(state, "REORDER_COLUMNS", |board| {
                if *source_index >= board.columns.len() {
                    return None;
                }
                let column = board.columns.remove(*source_index);
                let index = clamp_index(*target_index, board.columns.len());
                board.columns.insert(index, column);
                board.touch();
                Some(())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, ColumnUpdate, FieldUpdate, Task};
    use std::sync::Arc;
    use uuid::Uuid;

    fn state() -> KanbanState {
        KanbanState::with_boards(vec![Board::new("Board".to_string())])
    }

    fn titles(state: &KanbanState) -> Vec<String> {
        state
            .current_board()
            .unwrap()
            .columns
            .iter()
            .map(|c| c.title.clone())
            .collect()
    }

    fn reorder(state: &KanbanState, source_index: usize, target_index: i64) -> KanbanState {
        ColumnAction::ReorderColumns {
            source_index,
            target_index,
        }
        .apply(state)
    }

    #[test]
    fn test_add_column_appends() {
        let next = ColumnAction::AddColumn {
            title: "Review".to_string(),
            color: Some("#0af".to_string()),
        }
        .apply(&state());

        let board = next.current_board().unwrap();
        assert_eq!(board.columns.len(), 4);
        assert_eq!(board.columns[3].title, "Review");
        assert_eq!(board.columns[3].color.as_deref(), Some("#0af"));
        assert!(Arc::ptr_eq(board, &next.boards()[0]));
    }

    #[test]
    fn test_column_actions_without_current_board_are_ignored() {
        let empty = KanbanState::new();
        let next = ColumnAction::AddColumn {
            title: "Review".to_string(),
            color: None,
        }
        .apply(&empty);
        assert_eq!(next, empty);
    }

    #[test]
    fn test_update_column() {
        let state = state();
        let column_id = state.current_board().unwrap().columns[1].id;

        let next = ColumnAction::UpdateColumn {
            column_id,
            updates: ColumnUpdate {
                title: Some("Doing".to_string()),
                color: FieldUpdate::Set("#ff0".to_string()),
            },
        }
        .apply(&state);

        let column = next.current_board().unwrap().column(column_id).unwrap();
        assert_eq!(column.title, "Doing");
        assert_eq!(column.color.as_deref(), Some("#ff0"));
    }

    #[test]
    fn test_update_missing_column_is_noop() {
        let state = state();
        let next = ColumnAction::UpdateColumn {
            column_id: Uuid::new_v4(),
            updates: ColumnUpdate {
                title: Some("x".to_string()),
                ..Default::default()
            },
        }
        .apply(&state);
        assert_eq!(next, state);
    }

    #[test]
    fn test_delete_column_discards_its_tasks() {
        let mut board = Board::new("Board".to_string());
        board.columns[0].tasks.push(Task::new("doomed".to_string()));
        let column_id = board.columns[0].id;
        let state = KanbanState::with_boards(vec![board]);

        let next = ColumnAction::DeleteColumn { column_id }.apply(&state);
        let board = next.current_board().unwrap();
        assert_eq!(board.columns.len(), 2);
        assert_eq!(board.tasks().count(), 0);
    }

    #[test]
    fn test_reorder_first_to_last() {
        let next = reorder(&state(), 0, 2);
        assert_eq!(titles(&next), ["In Progress", "Done", "To Do"]);
    }

    #[test]
    fn test_reorder_last_to_first() {
        let next = reorder(&state(), 2, 0);
        assert_eq!(titles(&next), ["Done", "To Do", "In Progress"]);
    }

    #[test]
    fn test_reorder_same_index_keeps_order() {
        let next = reorder(&state(), 1, 1);
        assert_eq!(titles(&next), ["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn test_reorder_clamps_target() {
        let next = reorder(&state(), 0, 10);
        assert_eq!(titles(&next), ["In Progress", "Done", "To Do"]);

        let next = reorder(&state(), 2, -5);
        assert_eq!(titles(&next), ["Done", "To Do", "In Progress"]);
    }

    #[test]
    fn test_reorder_out_of_range_source_is_noop() {
        let state = state();
        assert_eq!(reorder(&state, 3, 0), state);
    }
}
