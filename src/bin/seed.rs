//! Replace the configured database's transactions with demo data.

use fintrack::config::Config;
use fintrack::db::{create_pool, migrations, seed};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(database = %config.database_path.display(), "Seeding database");

    let pool = create_pool(&config.database_path)?;
    let conn = pool.get()?;
    migrations::run_migrations(&conn, &config.migrations_path)?;

    let inserted = seed::reseed(&conn, chrono::Utc::now())?;
    tracing::info!(count = inserted, "Sample data inserted");
    Ok(())
}
