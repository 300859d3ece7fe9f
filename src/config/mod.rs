/// Database connection and table bootstrap
pub mod database;

/// Application settings from `stockroom.toml` and the environment
pub mod settings;
