//! Domain layer - Core business entities and traits

pub mod error;
pub mod user;

pub use error::DomainError;
pub use user::{Role, User, UserRepository};
