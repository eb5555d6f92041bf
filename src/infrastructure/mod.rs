//! Infrastructure layer - storage, hashing, auth, and logging

pub mod auth;
pub mod logging;
pub mod user;
