//! User domain
//!
//! Domain types for user accounts: the persisted entity, role constants,
//! shared validation rules, and the repository trait the storage layer
//! implements.

mod entity;
mod repository;
mod validation;

pub use entity::{Role, User};
pub use repository::UserRepository;
pub use validation::validate_password;
