//! The action router: the top-level transition function of the board.

use kanban_core::KanbanError;

use crate::commands::Transition;
use crate::{Action, ActionEnvelope, KanbanState};

/// Apply one action, producing the next snapshot.
///
/// Total: actions that cannot apply (no current board, unknown ids) return
/// a state equal to `state`.
pub fn reduce(state: &KanbanState, action: &Action) -> KanbanState {
    tracing::trace!(action = action.name(), "Reducing");
    match action {
        Action::Board(a) => a.apply(state),
        Action::Column(a) => a.apply(state),
        Action::Task(a) => a.apply(state),
        Action::Label(a) => a.apply(state),
        Action::Other(a) => a.apply(state),
    }
}

/// Route an untyped action. Unknown names and malformed payloads are logged
/// and leave the state unchanged.
pub fn reduce_envelope(state: &KanbanState, envelope: &ActionEnvelope) -> KanbanState {
    match Action::try_from(envelope.clone()) {
        Ok(action) => reduce(state, &action),
        Err(KanbanError::UnknownAction(name)) => {
            tracing::warn!("Unknown action type '{}'; state unchanged", name);
            state.clone()
        }
        Err(e) => {
            tracing::warn!("Rejected action '{}': {}", envelope.kind, e);
            state.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, BoardAction, TaskAction};
    use serde_json::json;
    use uuid::Uuid;

    #[test]
    fn test_unknown_envelope_leaves_state() {
        let state = KanbanState::with_boards(vec![Board::new("B".to_string())]);
        let next = reduce_envelope(&state, &ActionEnvelope::new("TELEPORT_TASK", json!({})));
        assert_eq!(next, state);
    }

    #[test]
    fn test_malformed_payload_leaves_state() {
        let state = KanbanState::with_boards(vec![Board::new("B".to_string())]);
        let next = reduce_envelope(
            &state,
            &ActionEnvelope::new("DELETE_TASK", json!({ "taskId": "not-a-uuid" })),
        );
        assert_eq!(next, state);
    }

    #[test]
    fn test_envelope_routes_like_typed_action() {
        let state = KanbanState::new();
        let next = reduce_envelope(
            &state,
            &ActionEnvelope::new("CREATE_BOARD", json!({ "title": "From JSON" })),
        );
        assert_eq!(next.current_board().unwrap().title, "From JSON");
    }

    #[test]
    fn test_clear_filter_with_empty_object_payload() {
        let mut state = KanbanState::new();
        state.task_filter.search = Some("deploy".to_string());
        state.task_filter.hide_completed = true;

        let next = reduce_envelope(&state, &ActionEnvelope::new("CLEAR_TASK_FILTER", json!({})));
        assert!(next.task_filter.is_empty());
    }

    #[test]
    fn test_reduce_dispatches_by_category() {
        let state = reduce(
            &KanbanState::new(),
            &BoardAction::CreateBoard {
                title: "B".to_string(),
            }
            .into(),
        );
        let unchanged = reduce(
            &state,
            &TaskAction::DeleteTask {
                task_id: Uuid::new_v4(),
            }
            .into(),
        );
        assert_eq!(unchanged, state);
    }
}
