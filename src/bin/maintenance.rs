use std::env;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use taskboard::{config::AppConfig, db};

const USAGE: &str = "Usage: maintenance <migrate|pending>";

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("migrate") => migrate()?,
        Some("pending") => list_pending()?,
        Some(cmd) => {
            eprintln!("Unknown command: {cmd}\n{USAGE}");
            std::process::exit(1);
        }
        None => {
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    Ok(())
}

fn connect() -> Result<db::PgPool> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        component = "maintenance",
        database_url = %config.redacted_database_url(),
        "loaded backend configuration"
    );
    db::init_pool_with_size(&config.database_url, 1)
}

fn migrate() -> Result<()> {
    let pool = connect()?;
    let applied = db::run_migrations(&pool)?;

    if applied.is_empty() {
        println!("No pending migrations.");
        return Ok(());
    }

    for version in &applied {
        println!("Applied {version}");
    }
    Ok(())
}

fn list_pending() -> Result<()> {
    let pool = connect()?;
    let pending = db::pending_migrations(&pool)?;

    if pending.is_empty() {
        println!("No pending migrations.");
        return Ok(());
    }

    println!("{} pending migrations:", pending.len());
    for name in &pending {
        println!("  {name}");
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
