//! Service layer
//!
//! Trims, validates and shapes requests before forwarding them to the repositories.
//! Repositories never re-validate, so every write from the transport goes
//! through here.

mod task_service;
mod user_service;

pub use task_service::TaskService;
pub use user_service::UserService;

use crate::{Error, Result};

/// Trim a required value, rejecting it if nothing is left
fn require_non_blank(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_non_blank`], for fields that may be omitted
fn reject_blank(field: &str, value: Option<String>) -> Result<Option<String>> {
    value
        .map(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
            }
            Ok(trimmed.to_string())
        })
        .transpose()
}
