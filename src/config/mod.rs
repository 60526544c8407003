/// Database configuration and connection management
pub mod database;

/// Campaign channel template loading from config.toml
pub mod channels;
