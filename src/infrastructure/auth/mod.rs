//! Authentication infrastructure

pub mod jwt;

pub use jwt::{Claims, JwtService, TokenVerifier};
