//! User module

mod model;
mod repository;
mod store;

pub use model::User;
pub use repository::UserRepository;
pub use store::UserStore;
