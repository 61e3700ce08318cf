//! Task repository trait
//!
//! Defines the interface for task storage operations.

use async_trait::async_trait;

use super::model::{ChecklistItem, ChecklistItemUpdate, NewTask, Task, TaskUpdate};
use crate::Result;

/// Repository interface for tasks and the checklist items they own.
///
/// Lookups that miss return `Ok(None)` or `Ok(false)`; errors are reserved
/// for storage failures.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new task with status `not-started` and an empty checklist
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;

    /// Get all tasks owned by a user, in creation order
    async fn get_tasks_by_user_id(&self, user_id: &str) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get_task_by_id(&self, id: &str) -> Result<Option<Task>>;

    /// Merge the present fields of `update` into a task
    async fn update_task(&self, id: &str, update: TaskUpdate) -> Result<Option<Task>>;

    /// Delete a task together with its checklist
    async fn delete_task(&self, id: &str) -> Result<bool>;

    /// Append an item to a task's checklist
    async fn add_checklist_item(&self, task_id: &str, text: &str)
        -> Result<Option<ChecklistItem>>;

    /// Merge the present fields of `update` into a checklist item
    async fn update_checklist_item(
        &self,
        task_id: &str,
        item_id: &str,
        update: ChecklistItemUpdate,
    ) -> Result<Option<ChecklistItem>>;

    /// Remove an item from a task's checklist
    async fn delete_checklist_item(&self, task_id: &str, item_id: &str) -> Result<bool>;
}
