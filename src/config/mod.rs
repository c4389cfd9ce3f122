/// Database configuration and connection management
pub mod database;

/// Seed data loading from config.toml (admin account, initial categories)
pub mod seed;
