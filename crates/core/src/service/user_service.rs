use std::sync::Arc;

use super::require_non_blank;
use crate::user::{User, UserRepository};
use crate::Result;

/// User operations as exposed to the transport
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Return the user with this name, creating it on first use
    pub async fn create_or_get_user(&self, name: &str) -> Result<User> {
        let name = require_non_blank("Name", name)?;
        self.repo.create_or_get_user(&name).await
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.repo.get_user_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.repo.list_users().await
    }
}
