//! Seed data loading from config.toml.
//!
//! This module loads the initial back-office data (the admin account and the
//! starting category list) from a TOML configuration file and writes it to the
//! database on first run. Seeding is idempotent: existing rows are left alone.

use crate::entities::{Admin, Category, admin, category};
use crate::errors::{Error, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Administrator account created on first run
    pub admin: AdminConfig,
    /// Category names to seed the catalog with
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Configuration for the initial admin account
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds the admin account and initial categories if they are missing.
///
/// Safe to run on every startup: the admin is matched by username and
/// categories by name, so existing rows are never duplicated.
pub async fn seed_initial_data(db: &DatabaseConnection, config: &Config) -> Result<()> {
    let now = chrono::Utc::now();

    let existing_admin = Admin::find()
        .filter(admin::Column::Username.eq(config.admin.username.as_str()))
        .count(db)
        .await?;
    if existing_admin == 0 {
        let model = admin::ActiveModel {
            username: Set(config.admin.username.clone()),
            password: Set(config.admin.password.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        model.insert(db).await?;
        info!(username = %config.admin.username, "Seeded admin account");
    }

    for name in &config.categories {
        let existing = Category::find()
            .filter(category::Column::Name.eq(name.as_str()))
            .count(db)
            .await?;
        if existing == 0 {
            let model = category::ActiveModel {
                name: Set(name.clone()),
                created_at: Set(now),
                ..Default::default()
            };
            model.insert(db).await?;
            info!(category = %name, "Seeded category");
        }
    }

    Ok(())
}
