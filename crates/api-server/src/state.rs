//! Application state

use std::sync::Arc;

use checklist_core::service::{TaskService, UserService};
use checklist_core::task::TaskStore;
use checklist_core::user::UserStore;

use crate::config::{Config, StorageKind};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    task_service: TaskService,
    user_service: UserService,
    storage: StorageKind,
}

impl AppState {
    /// Open the stores described by the configuration
    pub async fn new(config: &Config) -> Self {
        let task_store = TaskStore::open(config.tasks_storage()).await;
        let user_store = UserStore::open(config.users_storage()).await;
        Self::from_stores(task_store, user_store, config.storage)
    }

    /// State backed by in-memory stores only
    pub fn in_memory() -> Self {
        Self::from_stores(
            TaskStore::in_memory(),
            UserStore::in_memory(),
            StorageKind::Memory,
        )
    }

    fn from_stores(task_store: TaskStore, user_store: UserStore, storage: StorageKind) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                task_service: TaskService::new(Arc::new(task_store)),
                user_service: UserService::new(Arc::new(user_store)),
                storage,
            }),
        }
    }

    pub fn tasks(&self) -> &TaskService {
        &self.inner.task_service
    }

    pub fn users(&self) -> &UserService {
        &self.inner.user_service
    }

    pub fn storage(&self) -> StorageKind {
        self.inner.storage
    }
}
