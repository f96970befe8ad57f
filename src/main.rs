use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meal_planner::{
    config::{defaults::DEFAULT_CONFIG_FILE, Config},
    database::{redact_url, Database},
    services::MealService,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "meal-planner")]
#[command(version)]
#[command(about = "Stores lunch and dinner plans per day behind a small JSON API")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// PostgreSQL connection string (overrides config file)
    #[arg(short = 'd', long, value_name = "URL")]
    database_url: Option<String>,

    /// SQLite database file, used when no connection string is set
    #[arg(long, value_name = "FILE")]
    db_path: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("meal_planner={},tower_http=trace", cli.log_level)
    } else {
        format!("meal_planner={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Meal Planner v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config.display());

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }
    if let Some(database_url) = cli.database_url {
        config.database.url = Some(database_url);
    }
    if let Some(db_path) = cli.db_path {
        config.database.path = db_path;
    }

    match config.database.networked_url() {
        Some(url) => info!("Using database: {}", redact_url(url)),
        None => info!("Using database: {}", config.database.path.display()),
    }

    let database = Database::connect(&config.database).await?;
    database.ensure_schema().await?;
    info!("Database connection established and schema ready");

    let meals = MealService::new(database.repository());
    let web_server = WebServer::new(&config, meals)?;

    info!("Starting web server on {}", web_server.addr());
    web_server.serve().await?;

    Ok(())
}
