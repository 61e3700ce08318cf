//! User repository trait

use async_trait::async_trait;

use super::model::User;
use crate::Result;

/// Repository interface for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user. Names are not de-duplicated here.
    async fn create_user(&self, name: &str) -> Result<User>;

    /// Find the first-created user with this exact name
    async fn find_user_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Return the first-created user with this name, creating one if none
    /// exists. Lookup and insert happen under a single lock.
    async fn create_or_get_user(&self, name: &str) -> Result<User>;

    /// Get a user by ID
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Get all users in creation order
    async fn list_users(&self) -> Result<Vec<User>>;
}
