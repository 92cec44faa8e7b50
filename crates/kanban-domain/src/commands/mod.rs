use crate::{Board, KanbanState};

pub mod board_commands;
pub mod column_commands;
pub mod label_commands;
pub mod other_commands;
pub mod task_commands;

/// A state transition for one category of actions.
///
/// Implementations never fail: a transition that cannot apply returns an
/// equal copy of the input state.
pub trait Transition {
    fn apply(&self, state: &KanbanState) -> KanbanState;
}

/// Run `edit` against a copy of the current board and store the result.
///
/// Without a current board the action is dropped with a warning. `edit`
/// returns `None` when its target entity is missing, which leaves the state
/// untouched without logging.
pub(crate) fn on_current_board<F>(state: &KanbanState, action: &str, edit: F) -> KanbanState
where
    F: FnOnce(&mut Board) -> Option<()>,
{
    let Some(current) = state.current_board() else {
        tracing::warn!(action, "No current board selected; action ignored");
        return state.clone();
    };

    let mut board = Board::clone(current);
    match edit(&mut board) {
        Some(()) => {
            let mut next = state.clone();
            next.replace_board(board);
            next
        }
        None => state.clone(),
    }
}

/// Clamp a caller-supplied insertion index into `0..=len`.
pub(crate) fn clamp_index(index: i64, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        usize::try_from(index).map_or(len, |i| i.min(len))
    }
}
