//! Database migrations.
//!
//! ```bash
//! gh-cli migrate
//! ```
//!
//! Reads `STOREFRONT_DATABASE_URL`, falling back to `DATABASE_URL`, and
//! applies `crates/storefront/migrations/`.

use sqlx::postgres::PgPoolOptions;

use super::CliError;

fn database_url() -> Result<String, CliError> {
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("STOREFRONT_DATABASE_URL"))
}

/// Run the storefront migrations.
///
/// # Errors
///
/// Returns an error if no database URL is set, the connection fails or a
/// migration fails to apply.
pub async fn storefront() -> Result<(), CliError> {
    let url = database_url()?;

    tracing::info!("Connecting to storefront database...");
    let pool = PgPoolOptions::new().max_connections(1).connect(&url).await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete");
    Ok(())
}
