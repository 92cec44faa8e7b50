//! The root snapshot the action router transforms.

use std::sync::Arc;

use crate::{Board, BoardId, SortOption, TaskFilter, ViewMode};

/// Root state of a session.
///
/// Boards are shared immutable snapshots. `current_board`, when set, is the
/// same `Arc` as one element of `boards`; the two are only ever written
/// together, so callers can rely on `Arc::ptr_eq` between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KanbanState {
    boards: Vec<Arc<Board>>,
    current_board: Option<Arc<Board>>,
    pub view_mode: ViewMode,
    pub sort_option: SortOption,
    pub task_filter: TaskFilter,
}

impl KanbanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding `boards` with the first one selected.
    pub fn with_boards(boards: Vec<Board>) -> Self {
        let mut state = Self::new();
        let boards: Vec<Arc<Board>> = boards.into_iter().map(Arc::new).collect();
        let first = boards.first().map(|b| b.id);
        state.set_boards(boards, first);
        state
    }

    pub fn boards(&self) -> &[Arc<Board>] {
        &self.boards
    }

    pub fn current_board(&self) -> Option<&Arc<Board>> {
        self.current_board.as_ref()
    }

    pub fn board(&self, board_id: BoardId) -> Option<&Arc<Board>> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    /// True when `current_board` is absent or pointer-equal to its entry in `boards`.
    pub fn is_consistent(&self) -> bool {
        match &self.current_board {
            None => true,
            Some(current) => self.boards.iter().any(|b| Arc::ptr_eq(b, current)),
        }
    }

    /// Replace the board list and select `current` by id (none if absent).
    pub(crate) fn set_boards(&mut self, boards: Vec<Arc<Board>>, current: Option<BoardId>) {
        self.boards = boards;
        self.select(current);
    }

    /// Point `current_board` at the board with this id, or clear it.
    pub(crate) fn select(&mut self, board_id: Option<BoardId>) {
        self.current_board = board_id.and_then(|id| self.board(id).cloned());
    }

    pub(crate) fn push_board(&mut self, board: Board) -> Arc<Board> {
        let board = Arc::new(board);
        self.boards.push(Arc::clone(&board));
        board
    }

    /// Swap in a new version of an existing board, refreshing `current_board`
    /// in the same step when it is the one being replaced.
    pub(crate) fn replace_board(&mut self, board: Board) {
        let Some(index) = self.boards.iter().position(|b| b.id == board.id) else {
            return;
        };
        let board = Arc::new(board);
        let is_current = self
            .current_board
            .as_ref()
            .is_some_and(|c| c.id == board.id);
        if is_current {
            self.current_board = Some(Arc::clone(&board));
        }
        self.boards[index] = board;
    }

    /// Remove a board. If it was current, the first remaining board becomes
    /// current. Returns whether a board was removed.
    pub(crate) fn remove_board(&mut self, board_id: BoardId) -> bool {
        let before = self.boards.len();
        self.boards.retain(|b| b.id != board_id);
        if self.boards.len() == before {
            return false;
        }
        let was_current = self
            .current_board
            .as_ref()
            .is_some_and(|c| c.id == board_id);
        if was_current {
            self.current_board = self.boards.first().cloned();
        }
        true
    }

    pub(crate) fn set_current(&mut self, board: Arc<Board>) {
        self.current_board = Some(board);
    }
}
