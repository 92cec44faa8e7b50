use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Column, ColumnId, Label, LabelId, Task, TaskId};

pub type BoardId = Uuid;

/// Column titles every new board starts with. The last one is terminal.
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Board {
    /// A board seeded with the default "To Do" / "In Progress" / "Done" columns.
    pub fn new(title: String) -> Self {
        let columns = DEFAULT_COLUMN_TITLES
            .iter()
            .map(|t| Column::new(t.to_string(), None))
            .collect();
        Self::with_columns(title, columns)
    }

    pub fn with_columns(title: String, columns: Vec<Column>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            columns,
            labels: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update(&mut self, updates: BoardUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// The last column; entering it marks a task complete.
    pub fn terminal_column(&self) -> Option<&Column> {
        self.columns.last()
    }

    pub fn is_terminal_column(&self, column_id: ColumnId) -> bool {
        self.terminal_column().is_some_and(|c| c.id == column_id)
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    pub fn column_index(&self, column_id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// All tasks in column order, then task order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.columns.iter().flat_map(|c| c.tasks.iter())
    }

    /// The task and the column that currently holds it.
    pub fn find_task(&self, task_id: TaskId) -> Option<(&Column, &Task)> {
        self.columns
            .iter()
            .find_map(|c| c.tasks.iter().find(|t| t.id == task_id).map(|t| (c, t)))
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.tasks.iter_mut())
            .find(|t| t.id == task_id)
    }

    pub fn label_mut(&mut self, label_id: LabelId) -> Option<&mut Label> {
        self.labels.iter_mut().find(|l| l.id == label_id)
    }

    /// Whether the label is defined on the board or embedded in any task.
    pub fn references_label(&self, label_id: LabelId) -> bool {
        self.labels.iter().any(|l| l.id == label_id) || self.tasks().any(|t| t.has_label(label_id))
    }

    /// Remove a label from the board and from every task that embeds it.
    /// Returns whether anything was removed.
    pub fn remove_label_everywhere(&mut self, label_id: LabelId) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l.id != label_id);
        let mut changed = self.labels.len() != before;

        for task in self.columns.iter_mut().flat_map(|c| c.tasks.iter_mut()) {
            changed |= task.remove_label(label_id);
        }

        if changed {
            self.touch();
        }
        changed
    }
}
