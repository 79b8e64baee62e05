//! Game Store catalog: CLI
//!
//! ```sh
//! # Run the API with default config (~/.config/gamestore-catalog/config.toml)
//! gamestore serve
//!
//! # Custom config path and port
//! gamestore --config /etc/gamestore/config.toml serve --port 8080
//!
//! # Load the sample catalog
//! gamestore seed --file seeder/games.json
//!
//! # Validate config without starting
//! gamestore check
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use gamestore_catalog::config::{default_config_path, AppConfig};
use gamestore_catalog::infrastructure::database::migrator::{Migrator, MigratorTrait};
use gamestore_catalog::infrastructure::database::seed::{load_seed_file, seed_games};
use gamestore_catalog::infrastructure::{init_database, SeaOrmGameRepository};
use gamestore_catalog::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Parser, Debug)]
#[command(
    name = "gamestore",
    version,
    about = "Game Store catalog API and seeding tool",
    long_about = "Game Store catalog: REST API serving a filtered, sorted and paginated \
                  game catalog, plus a command to bulk-load catalog data.\n\n\
                  Default config: ~/.config/gamestore-catalog/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "GAMESTORE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Override the database URL.
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server.
    Serve {
        /// Override the listen port.
        #[arg(short, long)]
        port: Option<u16>,

        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,
    },
    /// Bulk-insert games from a JSON file.
    Seed {
        /// JSON array of games.
        #[arg(short, long, default_value = "seeder/games.json")]
        file: PathBuf,
    },
    /// Validate the configuration file and exit.
    Check,
}

fn load_config(cli: &Cli) -> (PathBuf, AppConfig) {
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&apply_log_override(cfg.clone(), cli));
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&apply_log_override(cfg.clone(), cli));
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    config = apply_log_override(config, cli);
    if let Some(ref url) = cli.database_url {
        info!("CLI override: database.url = {}", url);
        config.database.url = url.clone();
    }
    (config_path, config)
}

fn apply_log_override(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    config
}

async fn serve(
    mut config: AppConfig,
    port: Option<u16>,
    no_migrate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = port {
        info!("CLI override: port = {}", port);
        config.server.port = port;
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

async fn seed(config: AppConfig, file: &Path) -> Result<u64, Box<dyn std::error::Error>> {
    let games = load_seed_file(file)?;

    let db = init_database(&config.database).await?;
    Migrator::up(&db, None).await?;

    let repo = Arc::new(SeaOrmGameRepository::new(db.clone()));
    let result = seed_games(repo.as_ref(), games).await;

    db.close().await?;
    info!("Disconnected from database.");
    Ok(result?)
}

fn check(config_path: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    println!("✅ Configuration is valid");
    println!("   Config file : {}", config_path.display());
    println!("   API address : {}", config.server.address());
    println!("   Database    : {}", config.database.url);
    println!("   Log level   : {}", config.logging.level);
    println!("   Page size   : {}", config.pagination.default_per_page);
    match config.pagination.max_per_page {
        Some(max) => println!("   Max page    : {}", max),
        None => println!("   Max page    : unbounded"),
    }
    println!(
        "   Uploads     : {} -> {}",
        config.uploads.serve_root,
        config.uploads.dir.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config_path, config) = load_config(&cli);

    let outcome = match cli.command {
        Command::Serve { port, no_migrate } => serve(config, port, no_migrate).await,
        Command::Seed { ref file } => seed(config, file).await.map(|_| ()),
        Command::Check => check(&config_path, &config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
