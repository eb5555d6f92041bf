//! Application configuration

pub mod app_config;

pub use app_config::{
    AppConfig, AssetsConfig, AuthConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig,
};
