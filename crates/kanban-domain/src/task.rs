use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{FieldUpdate, Label, SubTask};

pub type TaskId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// An already-encoded file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    pub name: String,
    pub content_type: String,
    pub size: u64,
    pub url: String,
}

/// A card on the board.
///
/// The owning column is not stored here: a task belongs to whichever column
/// lists it. `completed_at` is only written by a move across the board's
/// terminal column, never through [`TaskUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Partial update for a task. Completion is not editable through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub priority: FieldUpdate<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<SubTask>>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub due_date: FieldUpdate<DateTime<Utc>>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub attachments: FieldUpdate<Vec<Attachment>>,
}

impl Task {
    pub fn new(title: String) -> Self {
        Self::with_id(Uuid::new_v4(), title)
    }

    pub fn with_id(id: TaskId, title: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: String::new(),
            priority: Some(Priority::Medium),
            labels: Vec::new(),
            sub_tasks: Vec::new(),
            due_date: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
            attachments: None,
        }
    }

    pub fn update(&mut self, updates: TaskUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(description) = updates.description {
            self.description = description;
        }
        updates.priority.apply_to(&mut self.priority);
        if let Some(labels) = updates.labels {
            self.labels = labels;
        }
        if let Some(sub_tasks) = updates.sub_tasks {
            self.sub_tasks = sub_tasks;
        }
        updates.due_date.apply_to(&mut self.due_date);
        updates.attachments.apply_to(&mut self.attachments);
        self.updated_at = Utc::now();
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn has_label(&self, label_id: Uuid) -> bool {
        self.labels.iter().any(|l| l.id == label_id)
    }

    /// Drop every embedded copy of a label. Returns whether anything changed.
    pub fn remove_label(&mut self, label_id: Uuid) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l.id != label_id);
        if self.labels.len() == before {
            return false;
        }
        self.updated_at = Utc::now();
        true
    }
}

impl From<&Task> for TaskUpdate {
    /// Every editable field of `task`, used to overwrite a local copy.
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            priority: task.priority.into(),
            labels: Some(task.labels.clone()),
            sub_tasks: Some(task.sub_tasks.clone()),
            due_date: task.due_date.into(),
            attachments: task.attachments.clone().into(),
        }
    }
}
