//! Remote task events and how each maps onto a local action.

use std::fmt;

use kanban_domain::{Action, BoardId, ColumnId, NewTask, Task, TaskAction, TaskId, TaskUpdate};
use serde::{Deserialize, Serialize};

/// The three remote subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventChannel {
    #[serde(rename = "task_created")]
    Created,
    #[serde(rename = "task_updated")]
    Updated,
    #[serde(rename = "task_deleted")]
    Deleted,
}

impl EventChannel {
    pub const ALL: [EventChannel; 3] = [Self::Created, Self::Updated, Self::Deleted];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "task_created",
            Self::Updated => "task_updated",
            Self::Deleted => "task_deleted",
        }
    }
}

impl fmt::Display for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event delivered by one of the remote subscriptions.
pub trait RemoteEvent: fmt::Debug + Clone + Send + Sync + 'static {
    const CHANNEL: EventChannel;

    /// Board the event originated on, when the transport reports one.
    fn board_id(&self) -> Option<BoardId>;

    /// The local action that merges this event into the session state.
    fn to_action(&self) -> Action;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreated {
    #[serde(default)]
    pub board_id: Option<BoardId>,
    pub column_id: ColumnId,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdated {
    #[serde(default)]
    pub board_id: Option<BoardId>,
    pub task: Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDeleted {
    #[serde(default)]
    pub board_id: Option<BoardId>,
    pub task_id: TaskId,
}

impl RemoteEvent for TaskCreated {
    const CHANNEL: EventChannel = EventChannel::Created;

    fn board_id(&self) -> Option<BoardId> {
        self.board_id
    }

    /// `ADD_TASK` carrying the remote id, so a replayed creation is a no-op.
    fn to_action(&self) -> Action {
        let task = &self.task;
        TaskAction::AddTask(NewTask {
            column_id: self.column_id,
            task_id: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority.unwrap_or_default(),
            labels: task.labels.clone(),
            files: task.attachments.clone().unwrap_or_default(),
        })
        .into()
    }
}

impl RemoteEvent for TaskUpdated {
    const CHANNEL: EventChannel = EventChannel::Updated;

    fn board_id(&self) -> Option<BoardId> {
        self.board_id
    }

    fn to_action(&self) -> Action {
        TaskAction::UpdateTask {
            task_id: self.task.id,
            updates: TaskUpdate::from(&self.task),
        }
        .into()
    }
}

impl RemoteEvent for TaskDeleted {
    const CHANNEL: EventChannel = EventChannel::Deleted;

    fn board_id(&self) -> Option<BoardId> {
        self.board_id
    }

    fn to_action(&self) -> Action {
        TaskAction::DeleteTask {
            task_id: self.task_id,
        }
        .into()
    }
}
