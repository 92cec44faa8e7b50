use std::sync::Arc;

use super::{on_current_board, Transition};
use crate::{Board, KanbanState, Label, LabelAction, LabelId};

impl Transition for LabelAction {
    fn apply(&self, state: &KanbanState) -> KanbanState {
        match self {
            LabelAction::AddLabel { name, color } => {
                on_current_board(state, "ADD_LABEL", |board| {
                    board.labels.push(Label::new(name.clone(), color.clone()));
                    board.touch();
                    Some(())
                })
            }
            LabelAction::UpdateLabel { label_id, updates } => {
                on_current_board(state, "UPDATE_LABEL", |board| {
                    board.label_mut(*label_id)?.update(updates.clone());
                    board.touch();
                    Some(())
                })
            }
            LabelAction::DeleteLabel { label_id } => {
                on_current_board(state, "DELETE_LABEL", |board| {
                    board.remove_label_everywhere(*label_id).then_some(())
                })
            }
            LabelAction::DeleteLabelFromAllBoards { label_id } => {
                delete_from_all_boards(state, *label_id)
            }
        }
    }
}

/// Strip a label from every board and every task, keeping untouched boards
/// as they are and re-selecting the previously current board by id.
fn delete_from_all_boards(state: &KanbanState, label_id: LabelId) -> KanbanState {
    if !state.boards().iter().any(|b| b.references_label(label_id)) {
        return state.clone();
    }

    let boards: Vec<Arc<Board>> = state
        .boards()
        .iter()
        .map(|board| {
            if !board.references_label(label_id) {
                return Arc::clone(board);
            }
            let mut edited = Board::clone(board);
            edited.remove_label_everywhere(label_id);
            Arc::new(edited)
        })
        .collect();

    let current = state.current_board().map(|b| b.id);
    let mut next = state.clone();
    next.set_boards(boards, current);
    next
}
