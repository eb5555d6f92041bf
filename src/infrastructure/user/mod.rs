//! User infrastructure - storage contexts, hashing, and the account service

pub mod memory;
pub mod mongo;
pub mod password;
pub mod service;

pub use memory::InMemoryUserContext;
pub use mongo::MongoUserContext;
pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, UserService};
