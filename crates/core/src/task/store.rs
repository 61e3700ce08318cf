//! Task storage implementation
//!
//! Keeps tasks in memory and, when backed by a file, mirrors every mutation
//! to it as a JSON array.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::model::{ChecklistItem, ChecklistItemUpdate, NewTask, Task, TaskUpdate};
use super::repository::TaskRepository;
use crate::id::{generate_id, IdKind};
use crate::records::Records;
use crate::{Result, StorageMode};

const LABEL: &str = "tasks";

/// Task store with optional JSON file persistence
pub struct TaskStore {
    mode: StorageMode,
    /// Tasks in creation order. Writers hold the guard until the snapshot
    /// has been flushed.
    tasks: RwLock<Records<Task>>,
}

impl TaskStore {
    /// Open a store in the given mode, loading any existing snapshot
    pub async fn open(mode: StorageMode) -> Self {
        let loaded: Vec<Task> = mode.load(LABEL).await;
        let (tasks, dropped) = Records::from_vec(loaded);
        if dropped > 0 {
            warn!(dropped, "ignored tasks with duplicate ids in snapshot");
        }
        if let Some(path) = mode.path() {
            info!(path = %path.display(), count = tasks.len(), "loaded task store");
        }

        Self {
            mode,
            tasks: RwLock::new(tasks),
        }
    }

    /// Create a store without a backing file
    pub fn in_memory() -> Self {
        Self {
            mode: StorageMode::Memory,
            tasks: RwLock::new(Records::default()),
        }
    }

    /// Open a store backed by the JSON file at `path`
    ///
    /// If the file doesn't exist, it will be created on first write.
    pub async fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::open(StorageMode::File(path.into())).await
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.mode.path()
    }
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let mut tasks = self.tasks.write().await;

        let mut task = new_task.into_task();
        while tasks.contains(&task.id) {
            task.id = generate_id(IdKind::Task);
        }
        tasks.push(task.clone());

        self.mode.flush(tasks.as_slice(), LABEL).await;
        debug!(task_id = %task.id, user_id = %task.user_id, "created task");
        Ok(task)
    }

    async fn get_tasks_by_user_id(&self, user_id: &str) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(id) else {
            return Ok(None);
        };

        task.apply(update);
        task.touch();
        let updated = task.clone();

        self.mode.flush(tasks.as_slice(), LABEL).await;
        Ok(Some(updated))
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        let mut tasks = self.tasks.write().await;
        let Some(removed) = tasks.remove(id) else {
            return Ok(false);
        };

        self.mode.flush(tasks.as_slice(), LABEL).await;
        debug!(
            task_id = %removed.id,
            items = removed.checklist.len(),
            "deleted task"
        );
        Ok(true)
    }

    async fn add_checklist_item(
        &self,
        task_id: &str,
        text: &str,
    ) -> Result<Option<ChecklistItem>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(task_id) else {
            return Ok(None);
        };

        let mut item = ChecklistItem::new(text);
        while task.checklist_item(&item.id).is_some() {
            item.id = generate_id(IdKind::ChecklistItem);
        }
        task.checklist.push(item.clone());
        task.touch();

        self.mode.flush(tasks.as_slice(), LABEL).await;
        Ok(Some(item))
    }

    async fn update_checklist_item(
        &self,
        task_id: &str,
        item_id: &str,
        update: ChecklistItemUpdate,
    ) -> Result<Option<ChecklistItem>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(task_id) else {
            return Ok(None);
        };
        let Some(item) = task.checklist_item_mut(item_id) else {
            return Ok(None);
        };

        item.apply(update);
        let updated = item.clone();
        task.touch();

        self.mode.flush(tasks.as_slice(), LABEL).await;
        Ok(Some(updated))
    }

    async fn delete_checklist_item(&self, task_id: &str, item_id: &str) -> Result<bool> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(task_id) else {
            return Ok(false);
        };
        if task.remove_checklist_item(item_id).is_none() {
            return Ok(false);
        }
        task.touch();

        self.mode.flush(tasks.as_slice(), LABEL).await;
        Ok(true)
    }
}
