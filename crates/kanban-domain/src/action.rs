//! The closed set of transitions the router accepts.
//!
//! Actions travel as `{ "type": NAME, "payload": {...} }`. Typed actions
//! serialize to exactly that shape; [`ActionEnvelope`] carries the untyped
//! form coming from outside, which may name an action this build does not
//! know.

use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    Attachment, Board, BoardId, BoardUpdate, ColumnId, ColumnUpdate, Label, LabelId, LabelUpdate,
    Priority, SortOption, SubTaskId, SubTaskUpdate, TaskFilter, TaskId, TaskUpdate, ViewMode,
};

pub const BOARD_ACTIONS: &[&str] = &[
    "SET_BOARDS",
    "CREATE_BOARD",
    "SWITCH_BOARD",
    "UPDATE_BOARD",
    "DELETE_BOARD",
];

pub const COLUMN_ACTIONS: &[&str] = &[
    "ADD_COLUMN",
    "UPDATE_COLUMN",
    "DELETE_COLUMN",
    "REORDER_COLUMNS",
];

pub const TASK_ACTIONS: &[&str] = &["ADD_TASK", "UPDATE_TASK", "MOVE_TASK", "DELETE_TASK"];

pub const LABEL_ACTIONS: &[&str] = &[
    "ADD_LABEL",
    "UPDATE_LABEL",
    "DELETE_LABEL",
    "DELETE_LABEL_FROM_ALL_BOARDS",
];

pub const OTHER_ACTIONS: &[&str] = &[
    "ADD_SUBTASK",
    "UPDATE_SUBTASK",
    "TOGGLE_SUBTASK",
    "DELETE_SUBTASK",
    "SET_VIEW_MODE",
    "SET_SORT_OPTION",
    "SET_TASK_FILTER",
    "CLEAR_TASK_FILTER",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionCategory {
    Board,
    Column,
    Task,
    Label,
    Other,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 5] = [
        ActionCategory::Board,
        ActionCategory::Column,
        ActionCategory::Task,
        ActionCategory::Label,
        ActionCategory::Other,
    ];

    pub fn names(self) -> &'static [&'static str] {
        match self {
            ActionCategory::Board => BOARD_ACTIONS,
            ActionCategory::Column => COLUMN_ACTIONS,
            ActionCategory::Task => TASK_ACTIONS,
            ActionCategory::Label => LABEL_ACTIONS,
            ActionCategory::Other => OTHER_ACTIONS,
        }
    }

    /// Classify an action name. `None` for names outside the alphabet.
    pub fn of(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.names().contains(&name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum BoardAction {
    SetBoards {
        boards: Vec<Board>,
    },
    CreateBoard {
        title: String,
    },
    SwitchBoard {
        board_id: BoardId,
    },
    UpdateBoard {
        board_id: BoardId,
        #[serde(default)]
        updates: BoardUpdate,
    },
    DeleteBoard {
        board_id: BoardId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ColumnAction {
    AddColumn {
        title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    UpdateColumn {
        column_id: ColumnId,
        #[serde(default)]
        updates: ColumnUpdate,
    },
    DeleteColumn {
        column_id: ColumnId,
    },
    /// `target_index` is clamped into the shortened list.
    ReorderColumns {
        source_index: usize,
        target_index: i64,
    },
}

/// Payload of `ADD_TASK`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub column_id: ColumnId,
    /// Use this id instead of generating one. Set for remotely created tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub files: Vec<Attachment>,
}

impl NewTask {
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            task_id: None,
            title: title.into(),
            description: String::new(),
            due_date: None,
            priority: Priority::Medium,
            labels: Vec::new(),
            files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum TaskAction {
    AddTask(NewTask),
    UpdateTask {
        task_id: TaskId,
        #[serde(default)]
        updates: TaskUpdate,
    },
    MoveTask {
        task_id: TaskId,
        source_column_id: ColumnId,
        target_column_id: ColumnId,
        target_index: i64,
    },
    DeleteTask {
        task_id: TaskId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum LabelAction {
    AddLabel {
        name: String,
        color: String,
    },
    UpdateLabel {
        label_id: LabelId,
        #[serde(default)]
        updates: LabelUpdate,
    },
    DeleteLabel {
        label_id: LabelId,
    },
    DeleteLabelFromAllBoards {
        label_id: LabelId,
    },
}

/// Subtask, filter and view handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum OtherAction {
    #[serde(rename = "ADD_SUBTASK")]
    AddSubTask { task_id: TaskId, title: String },
    #[serde(rename = "UPDATE_SUBTASK")]
    UpdateSubTask {
        task_id: TaskId,
        sub_task_id: SubTaskId,
        #[serde(default)]
        updates: SubTaskUpdate,
    },
    #[serde(rename = "TOGGLE_SUBTASK")]
    ToggleSubTask {
        task_id: TaskId,
        sub_task_id: SubTaskId,
    },
    #[serde(rename = "DELETE_SUBTASK")]
    DeleteSubTask {
        task_id: TaskId,
        sub_task_id: SubTaskId,
    },
    SetViewMode {
        view_mode: ViewMode,
    },
    SetSortOption {
        sort_option: SortOption,
    },
    SetTaskFilter {
        filter: TaskFilter,
    },
    ClearTaskFilter,
}

/// Every transition the router understands, grouped by category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ActionEnvelope")]
pub enum Action {
    Board(BoardAction),
    Column(ColumnAction),
    Task(TaskAction),
    Label(LabelAction),
    Other(OtherAction),
}

impl Action {
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::Board(_) => ActionCategory::Board,
            Action::Column(_) => ActionCategory::Column,
            Action::Task(_) => ActionCategory::Task,
            Action::Label(_) => ActionCategory::Label,
            Action::Other(_) => ActionCategory::Other,
        }
    }

    /// Wire name, e.g. `"MOVE_TASK"`.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Board(a) => match a {
                BoardAction::SetBoards { .. } => "SET_BOARDS",
                BoardAction::CreateBoard { .. } => "CREATE_BOARD",
                BoardAction::SwitchBoard { .. } => "SWITCH_BOARD",
                BoardAction::UpdateBoard { .. } => "UPDATE_BOARD",
                BoardAction::DeleteBoard { .. } => "DELETE_BOARD",
            },
            Action::Column(a) => match a {
                ColumnAction::AddColumn { .. } => "ADD_COLUMN",
                ColumnAction::UpdateColumn { .. } => "UPDATE_COLUMN",
                ColumnAction::DeleteColumn { .. } => "DELETE_COLUMN",
                ColumnAction::ReorderColumns { .. } => "REORDER_COLUMNS",
            },
            Action::Task(a) => match a {
                TaskAction::AddTask(_) => "ADD_TASK",
                TaskAction::UpdateTask { .. } => "UPDATE_TASK",
                TaskAction::MoveTask { .. } => "MOVE_TASK",
                TaskAction::DeleteTask { .. } => "DELETE_TASK",
            },
            Action::Label(a) => match a {
                LabelAction::AddLabel { .. } => "ADD_LABEL",
                LabelAction::UpdateLabel { .. } => "UPDATE_LABEL",
                LabelAction::DeleteLabel { .. } => "DELETE_LABEL",
                LabelAction::DeleteLabelFromAllBoards { .. } => "DELETE_LABEL_FROM_ALL_BOARDS",
            },
            Action::Other(a) => match a {
                OtherAction::AddSubTask { .. } => "ADD_SUBTASK",
                OtherAction::UpdateSubTask { .. } => "UPDATE_SUBTASK",
                OtherAction::ToggleSubTask { .. } => "TOGGLE_SUBTASK",
                OtherAction::DeleteSubTask { .. } => "DELETE_SUBTASK",
                OtherAction::SetViewMode { .. } => "SET_VIEW_MODE",
                OtherAction::SetSortOption { .. } => "SET_SORT_OPTION",
                OtherAction::SetTaskFilter { .. } => "SET_TASK_FILTER",
                OtherAction::ClearTaskFilter => "CLEAR_TASK_FILTER",
            },
        }
    }

    pub fn to_envelope(&self) -> KanbanResult<ActionEnvelope> {
        let value =
            serde_json::to_value(self).map_err(|e| KanbanError::Serialization(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| KanbanError::Serialization(e.to_string()))
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Action::Board(a) => a.serialize(serializer),
            Action::Column(a) => a.serialize(serializer),
            Action::Task(a) => a.serialize(serializer),
            Action::Label(a) => a.serialize(serializer),
            Action::Other(a) => a.serialize(serializer),
        }
    }
}

impl From<BoardAction> for Action {
    fn from(action: BoardAction) -> Self {
        Action::Board(action)
    }
}

impl From<ColumnAction> for Action {
    fn from(action: ColumnAction) -> Self {
        Action::Column(action)
    }
}

impl From<TaskAction> for Action {
    fn from(action: TaskAction) -> Self {
        Action::Task(action)
    }
}

impl From<LabelAction> for Action {
    fn from(action: LabelAction) -> Self {
        Action::Label(action)
    }
}

impl From<OtherAction> for Action {
    fn from(action: OtherAction) -> Self {
        Action::Other(action)
    }
}

/// Untyped `{ type, payload }` action as received from outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub payload: Value,
}

impl ActionEnvelope {
    pub fn new(kind: impl Into<String>, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            payload,
        }
    }
}

impl TryFrom<ActionEnvelope> for Action {
    type Error = KanbanError;

    fn try_from(envelope: ActionEnvelope) -> KanbanResult<Self> {
        let category = ActionCategory::of(&envelope.kind)
            .ok_or_else(|| KanbanError::UnknownAction(envelope.kind.clone()))?;

        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(envelope.kind.clone()));
        // Payloadless actions may arrive with `null` or `{}`.
        let empty = envelope.payload.is_null()
            || envelope.payload.as_object().is_some_and(Map::is_empty);
        if !empty {
            object.insert("payload".to_string(), envelope.payload);
        }
        let value = Value::Object(object);

        let invalid =
            |e: serde_json::Error| KanbanError::Validation(format!("{}: {}", envelope.kind, e));

        Ok(match category {
            ActionCategory::Board => Action::Board(serde_json::from_value(value).map_err(invalid)?),
            ActionCategory::Column => {
                Action::Column(serde_json::from_value(value).map_err(invalid)?)
            }
            ActionCategory::Task => Action::Task(serde_json::from_value(value).map_err(invalid)?),
            ActionCategory::Label => Action::Label(serde_json::from_value(value).map_err(invalid)?),
            ActionCategory::Other => Action::Other(serde_json::from_value(value).map_err(invalid)?),
        })
    }
}
