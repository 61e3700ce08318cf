//! Core library for the checklist tracker
//!
//! This crate contains the persistent data layer and the thin service layer
//! in front of it:
//! - Task storage, including the checklist items each task owns
//! - User storage with atomic create-or-get by name
//! - JSON snapshot persistence shared by both stores

pub mod error;
pub mod id;
mod persistence;
mod records;
pub mod service;
pub mod task;
pub mod user;

pub use error::Error;
pub use persistence::StorageMode;
pub type Result<T> = std::result::Result<T, Error>;
