//! Task model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{generate_id, IdKind};
use crate::records::Keyed;

/// Progress of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Progress of a single checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChecklistStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for ChecklistStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Placement of a task on the client's canvas. Stored as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A step inside a task's checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub status: ChecklistStatus,
    pub created_at: DateTime<Utc>,
}

impl ChecklistItem {
    /// Create a new item with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: generate_id(IdKind::ChecklistItem),
            text: text.into(),
            status: ChecklistStatus::default(),
            created_at: Utc::now(),
        }
    }

    pub(crate) fn apply(&mut self, update: ChecklistItemUpdate) {
        let ChecklistItemUpdate { text, status } = update;
        if let Some(text) = text {
            self.text = text;
        }
        if let Some(status) = status {
            self.status = status;
        }
    }
}

/// A task owned by a user, together with its ordered checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task for a user with the given title
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(IdKind::Task),
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            position: None,
            checklist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Look up a checklist item by id
    pub fn checklist_item(&self, item_id: &str) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.id == item_id)
    }

    pub(crate) fn checklist_item_mut(&mut self, item_id: &str) -> Option<&mut ChecklistItem> {
        self.checklist.iter_mut().find(|item| item.id == item_id)
    }

    /// Remove a checklist item, keeping the order of the remaining ones
    pub(crate) fn remove_checklist_item(&mut self, item_id: &str) -> Option<ChecklistItem> {
        let pos = self.checklist.iter().position(|item| item.id == item_id)?;
        Some(self.checklist.remove(pos))
    }

    pub(crate) fn apply(&mut self, update: TaskUpdate) {
        let TaskUpdate {
            title,
            description,
            status,
            position,
        } = update;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = Some(description);
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(position) = position {
            self.position = Some(position);
        }
    }

    /// Refresh `updated_at`, never moving it backwards
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when creating a task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl NewTask {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            title: title.into(),
            description: None,
            position: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the position
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub(crate) fn into_task(self) -> Task {
        let mut task = Task::new(self.user_id, self.title);
        task.description = self.description;
        task.position = self.position;
        task
    }
}

/// Partial update of a task. `None` leaves a field unchanged.
///
/// The checklist is deliberately absent: it only changes through the
/// checklist operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub position: Option<Position>,
}

impl TaskUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Partial update of a checklist item. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemUpdate {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub status: Option<ChecklistStatus>,
}

impl ChecklistItemUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn status(status: ChecklistStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
