use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SubTaskId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: SubTaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubTaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl SubTask {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            completed: false,
        }
    }

    pub fn update(&mut self, updates: SubTaskUpdate) {
        if let Some(title) = updates.title {
            self.title = title;
        }
        if let Some(completed) = updates.completed {
            self.completed = completed;
        }
    }

    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
