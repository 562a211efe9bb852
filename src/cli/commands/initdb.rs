use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tracing::{debug, error, info};

/// Connects to `database_url` and applies every pending migration.
pub async fn init_database(database_url: &str) -> Result<()> {
    debug!("Preparing database schema at {}", database_url);

    let db = Database::connect(database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database '{}': {}", database_url, e))?;

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    info!("Applying {} pending migrations", pending);

    Migrator::up(&db, None)
        .await
        .inspect_err(|e| error!("Failed to run database migrations: {}", e))?;

    info!("Database schema is up to date");
    Ok(())
}
