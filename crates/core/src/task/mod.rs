//! Task module
//!
//! Tasks, the checklist items they own, and their storage.

mod model;
mod repository;
mod store;

pub use model::*;
pub use repository::TaskRepository;
pub use store::TaskStore;
