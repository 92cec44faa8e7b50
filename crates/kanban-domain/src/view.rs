//! Read-side derivations used by the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::filter::TaskPredicate;
use crate::{Board, Column, SortOption, Task, TaskFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    Board,
    List,
}

/// Tasks of a column that pass `filter`, ordered by `sort`.
pub fn visible_tasks<'a>(
    column: &'a Column,
    filter: &TaskFilter,
    sort: SortOption,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let predicate = filter.compile(now);
    let mut tasks: Vec<&Task> = column
        .tasks
        .iter()
        .filter(|t| predicate.matches(t))
        .collect();
    sort.sort(&mut tasks);
    tasks
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardProgress {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub total_sub_tasks: usize,
    pub completed_sub_tasks: usize,
}

impl BoardProgress {
    /// Completed share of tasks in `0.0..=1.0`; an empty board counts as 0.
    pub fn ratio(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 / self.total_tasks as f64
    }
}

pub fn board_progress(board: &Board) -> BoardProgress {
    board
        .tasks()
        .fold(BoardProgress::default(), |mut progress, task| {
            progress.total_tasks += 1;
            if task.is_completed() {
                progress.completed_tasks += 1;
            }
            progress.total_sub_tasks += task.sub_tasks.len();
            progress.completed_sub_tasks += task.sub_tasks.iter().filter(|s| s.completed).count();
            progress
        })
}
