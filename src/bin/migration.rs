use anyhow::{bail, Context};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use warehouse_locations_api::{config, db, migrator::Migrator};

/// Applies or rolls back the schema.
///
/// Usage: `migration [up|down|fresh|status]`, defaulting to `up`. The database
/// comes from the regular application configuration (`APP__DATABASE_URL`).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load_config().context("failed to load configuration")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());
    info!("Connecting to database for migration command '{}'", command);
    let conn = db::establish_connection_from_app_config(&cfg).await?;

    match command.as_str() {
        "up" => Migrator::up(&conn, None).await?,
        "down" => Migrator::down(&conn, Some(1)).await?,
        "fresh" => Migrator::fresh(&conn).await?,
        "status" => Migrator::status(&conn).await?,
        other => bail!("unknown migration command '{}'", other),
    }

    info!("Migration command '{}' completed", command);
    Ok(())
}
