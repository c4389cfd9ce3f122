//! Initialization binary: prepares the canteen POS database.
//!
//! Creates the schema and seeds the admin account and starting categories
//! from config.toml. The serving layer (web UI and its transport) lives
//! outside this crate and connects to the same database.

use canteen_pos::{config, errors::Result};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the seed configuration
    let seed_config = config::seed::load_default_config()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;
    info!("Successfully processed seed configuration.");

    // 4. Connect and create tables
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables created."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the admin account and starting categories
    config::seed::seed_initial_data(&db, &seed_config)
        .await
        .inspect(|_| info!("Initial data seeded successfully."))
        .inspect_err(|e| error!("Failed to seed initial data: {}", e))?;

    info!(url = %config::database::get_database_url(), "Canteen POS database ready.");
    Ok(())
}
