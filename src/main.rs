//! Trivia CLI - serve the trivia API and manage its database

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use trivia::config::{self, TriviaConfig};
use trivia::storage::SqliteStore;
use trivia::ui::{self, Icons};
use trivia::seed;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "trivia")]
#[command(version)]
#[command(about = "Trivia API - categories, paginated questions and a randomized quiz")]
#[command(long_about = r#"
Trivia serves the JSON API behind the trivia web application:
  • Categories and paginated question lists
  • Case-insensitive question search
  • Creating and deleting questions
  • A quiz endpoint that never repeats a question

Example usage:
  trivia init
  trivia seed --file data/seed.json
  trivia serve --port 5000
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, default_value_os_t = config::default_config_path())]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<String>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Load categories and questions from a JSON seed file
    Seed {
        /// Path to the seed file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Show category and question counts
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<String>,
    },
}

/// Command-line values win over the config file, which wins over defaults
fn resolve_config(config_path: &Path, overrides: TriviaConfig) -> anyhow::Result<TriviaConfig> {
    let file = config::load_config(config_path)?.unwrap_or_default();
    Ok(overrides.or(file))
}

fn open_store(settings: &TriviaConfig) -> anyhow::Result<(SqliteStore, PathBuf)> {
    let database = settings.database_path();
    config::ensure_db_dir(&database)?;
    let store = SqliteStore::open(&database)?;
    Ok((store, database))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Serve { database, host, port } => {
            let settings = resolve_config(&cli.config, TriviaConfig { database, host, port })?;
            let addr = settings.socket_addr()?;
            let (store, database) = open_store(&settings)?;

            ui::header("Trivia API");
            ui::info(Icons::DATABASE, "Database", &database.display().to_string());
            trivia::server::start_server(addr, store).await?;
        }

        Commands::Init { force } => {
            config::write_config(&cli.config, &TriviaConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", cli.config.display()));
        }

        Commands::Seed { file, database } => {
            let settings = resolve_config(&cli.config, TriviaConfig { database, ..Default::default() })?;
            let (mut store, database) = open_store(&settings)?;
            tracing::info!("Seeding {:?} from {}", database, file.display());

            let summary = seed::load_seed(&file)
                .and_then(|seed_file| seed::apply_seed(&mut store, seed_file));
            match summary {
                Ok(summary) => {
                    ui::info(Icons::SEED, "Categories added", &summary.categories.to_string());
                    ui::info(Icons::SEED, "Questions added", &summary.questions.to_string());
                    ui::success(&format!("Seeded {}", database.display()));
                }
                Err(e) => {
                    ui::error(&format!("Seeding failed: {}", e));
                    return Err(e.into());
                }
            }
        }

        Commands::Stats { database } => {
            let settings = resolve_config(&cli.config, TriviaConfig { database, ..Default::default() })?;
            let (store, database) = open_store(&settings)?;

            ui::header(&format!("{} Trivia Statistics ({})", Icons::STATS, database.display()));
            println!("{}", ui::stats_table(&store.stats()?));

            let counts = store.question_counts_by_category()?;
            if !counts.is_empty() {
                ui::section("Questions per category");
                println!("{}", ui::category_table(&counts));
            }
        }
    }

    Ok(())
}
