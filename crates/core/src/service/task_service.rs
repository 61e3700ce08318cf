use std::sync::Arc;

use super::{reject_blank, require_non_blank};
use crate::task::{
    ChecklistItem, ChecklistItemUpdate, NewTask, Task, TaskRepository, TaskUpdate,
};
use crate::Result;

/// Task operations as exposed to the transport
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_task(&self, mut new_task: NewTask) -> Result<Task> {
        new_task.user_id = require_non_blank("User ID", &new_task.user_id)?;
        new_task.title = require_non_blank("Task title", &new_task.title)?;
        self.repo.create_task(new_task).await
    }

    pub async fn get_tasks_by_user_id(&self, user_id: &str) -> Result<Vec<Task>> {
        self.repo.get_tasks_by_user_id(user_id).await
    }

    pub async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>> {
        self.repo.get_task_by_id(id).await
    }

    pub async fn update_task(&self, id: &str, mut update: TaskUpdate) -> Result<Option<Task>> {
        update.title = reject_blank("Task title", update.title.take())?;
        self.repo.update_task(id, update).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<bool> {
        self.repo.delete_task(id).await
    }

    pub async fn add_checklist_item(
        &self,
        task_id: &str,
        text: &str,
    ) -> Result<Option<ChecklistItem>> {
        let text = require_non_blank("Checklist item text", text)?;
        self.repo.add_checklist_item(task_id, &text).await
    }

    pub async fn update_checklist_item(
        &self,
        task_id: &str,
        item_id: &str,
        mut update: ChecklistItemUpdate,
    ) -> Result<Option<ChecklistItem>> {
        update.text = reject_blank("Checklist item text", update.text.take())?;
        self.repo.update_checklist_item(task_id, item_id, update).await
    }

    pub async fn delete_checklist_item(&self, task_id: &str, item_id: &str) -> Result<bool> {
        self.repo.delete_checklist_item(task_id, item_id).await
    }
}
