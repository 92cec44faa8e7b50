pub mod action;
pub mod board;
pub mod column;
pub mod commands;
pub mod field_update;
pub mod filter;
pub mod label;
pub mod recommendation;
pub mod reducer;
pub mod sort;
pub mod state;
pub mod subtask;
pub mod task;
pub mod view;

pub use action::{
    Action, ActionCategory, ActionEnvelope, BoardAction, ColumnAction, LabelAction, NewTask,
    OtherAction, TaskAction,
};
pub use board::{Board, BoardId, BoardUpdate, DEFAULT_COLUMN_TITLES};
pub use column::{Column, ColumnId, ColumnUpdate};
pub use field_update::FieldUpdate;
pub use filter::{DueFilter, TaskFilter};
pub use label::{Label, LabelId, LabelUpdate};
pub use recommendation::{compute_recommendation, rank_tasks, score_task, ScoreBreakdown};
pub use reducer::{reduce, reduce_envelope};
pub use sort::SortOption;
pub use state::KanbanState;
pub use subtask::{SubTask, SubTaskId, SubTaskUpdate};
pub use task::{Attachment, Priority, Task, TaskId, TaskUpdate};
pub use view::{board_progress, visible_tasks, BoardProgress, ViewMode};
