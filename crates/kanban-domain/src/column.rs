use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{FieldUpdate, Task, TaskId};

pub type ColumnId = Uuid;

/// An ordered list of tasks. Membership here is the only record of which
/// column owns a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub color: FieldUpdate<String>,
}

impl Column {
    pub fn new(title: String, color: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            tasks: Vec::new(),
            color,
        }
    }

    pub fn update(&mut self, updates: ColumnUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        updates.color.apply_to(&mut self.color);
    }

    pub fn task_position(&self, task_id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}
