use std::sync::Arc;

use super::Transition;
use crate::{Board, BoardAction, KanbanState};

impl Transition for BoardAction {
    fn apply(&self, state: &KanbanState) -> KanbanState {
        let mut next = state.clone();
        match self {
            BoardAction::SetBoards { boards } => {
                let boards: Vec<Arc<Board>> = boards.iter().cloned().map(Arc::new).collect();
                let first = boards.first().map(|b| b.id);
                next.set_boards(boards, first);
            }
            BoardAction::CreateBoard { title } => {
                let board = next.push_board(Board::new(title.clone()));
                tracing::debug!(board_id = %board.id, "Created board '{}'", board.title);
                next.set_current(board);
            }
            BoardAction::SwitchBoard { board_id } => {
                next.select(Some(*board_id));
            }
            BoardAction::UpdateBoard { board_id, updates } => {
                let Some(existing) = state.board(*board_id) else {
                    return next;
                };
                let mut board = Board::clone(existing);
                board.update(updates.clone());
                next.replace_board(board);
            }
            BoardAction::DeleteBoard { board_id } => {
                next.remove_board(*board_id);
            }
        }
        next
    }
}
