//! User storage implementation

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::model::User;
use super::repository::UserRepository;
use crate::id::{generate_id, IdKind};
use crate::records::Records;
use crate::{Result, StorageMode};

const LABEL: &str = "users";

/// User store with optional JSON file persistence
pub struct UserStore {
    mode: StorageMode,
    users: RwLock<Records<User>>,
}

impl UserStore {
    /// Open a store in the given mode, loading any existing snapshot
    pub async fn open(mode: StorageMode) -> Self {
        let loaded: Vec<User> = mode.load(LABEL).await;
        let (users, dropped) = Records::from_vec(loaded);
        if dropped > 0 {
            warn!(dropped, "ignored users with duplicate ids in snapshot");
        }
        if let Some(path) = mode.path() {
            info!(path = %path.display(), count = users.len(), "loaded user store");
        }

        Self {
            mode,
            users: RwLock::new(users),
        }
    }

    /// Create a store without a backing file
    pub fn in_memory() -> Self {
        Self {
            mode: StorageMode::Memory,
            users: RwLock::new(Records::default()),
        }
    }

    /// Open a store backed by the JSON file at `path`
    pub async fn with_file(path: impl Into<PathBuf>) -> Self {
        Self::open(StorageMode::File(path.into())).await
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.mode.path()
    }

    async fn insert(&self, users: &mut Records<User>, name: &str) -> User {
        let mut user = User::new(name);
        while users.contains(&user.id) {
            user.id = generate_id(IdKind::User);
        }
        users.push(user.clone());

        self.mode.flush(users.as_slice(), LABEL).await;
        debug!(user_id = %user.id, "created user");
        user
    }
}

fn first_named<'a>(users: &'a Records<User>, name: &str) -> Option<&'a User> {
    users.iter().find(|u| u.name == name)
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create_user(&self, name: &str) -> Result<User> {
        let mut users = self.users.write().await;
        Ok(self.insert(&mut users, name).await)
    }

    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(first_named(&users, name).cloned())
    }

    async fn create_or_get_user(&self, name: &str) -> Result<User> {
        let mut users = self.users.write().await;
        if let Some(existing) = first_named(&users, name) {
            return Ok(existing.clone());
        }
        Ok(self.insert(&mut users, name).await)
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_and_get_user() {
        let store = UserStore::in_memory();

        let user = store.create_user("Alice").await.unwrap();
        assert_eq!(user.name, "Alice");

        let fetched = store.get_user_by_id(&user.id).await.unwrap();
        assert_eq!(fetched, Some(user));
        assert!(store.get_user_by_id("user_0_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_returns_first_created() {
        let store = UserStore::in_memory();

        let first = store.create_user("Alice").await.unwrap();
        let second = store.create_user("Alice").await.unwrap();
        assert_ne!(first.id, second.id);

        let found = store.find_user_by_name("Alice").await.unwrap();
        assert_eq!(found, Some(first));
        assert!(store.find_user_by_name("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_or_get_reuses_existing() {
        let store = UserStore::in_memory();

        let created = store.create_or_get_user("Bob").await.unwrap();
        let again = store.create_or_get_user("Bob").await.unwrap();
        assert_eq!(created, again);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_create_or_get_yields_one_user() {
        let store = Arc::new(UserStore::in_memory());

        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_or_get_user("Carol").await.unwrap()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().id);
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_in_creation_order() {
        let store = UserStore::in_memory();
        for name in ["Dana", "Eli", "Fay"] {
            store.create_user(name).await.unwrap();
        }

        let names: Vec<_> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Dana", "Eli", "Fay"]);
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.json");

        let (first, second) = {
            let store = UserStore::with_file(&path).await;
            let first = store.create_user("Alice").await.unwrap();
            let second = store.create_user("Alice").await.unwrap();
            (first, second)
        };

        let store = UserStore::with_file(&path).await;
        assert_eq!(store.list_users().await.unwrap(), vec![first.clone(), second]);
        assert_eq!(store.find_user_by_name("Alice").await.unwrap(), Some(first));
    }
}
