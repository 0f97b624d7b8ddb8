//! Foodgram management commands.

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::config::{AppConfig, DatabaseConfig};
use server::seed::{self, NewAdmin};

/// Foodgram management tool
#[derive(Parser, Debug)]
#[command(name = "foodgram")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (defaults to the value from configuration)
    #[arg(long, env = "FOODGRAM__DATABASE__URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import ingredients from a JSON file of {name, measurement_unit} objects
    LoadIngredients {
        /// Path to the JSON file
        #[arg(short, long, default_value = "data/ingredients.json")]
        path: PathBuf,
    },

    /// Create an administrator, or promote the account with that email
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long, env = "FOODGRAM_ADMIN_PASSWORD")]
        password: String,
        #[arg(long, default_value = "Admin")]
        first_name: String,
        #[arg(long, default_value = "Admin")]
        last_name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database = match cli.database_url {
        Some(url) => DatabaseConfig::new(url),
        None => {
            AppConfig::load()
                .context("Failed to load configuration")?
                .database
        }
    };

    let db = server::database::init_db(&database)
        .await
        .context("Failed to connect to the database")?;
    seed::ensure_constraints(&db).await?;

    match cli.command {
        Commands::LoadIngredients { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let catalog = common::ingredients::parse_json(&raw)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if catalog.skipped > 0 {
                info!("Ignored {} blank or duplicate entries", catalog.skipped);
            }

            let summary = seed::load_ingredients(&db, &catalog.records).await?;
            println!(
                "Loaded {} ingredients, {} already present",
                summary.inserted, summary.skipped
            );
        }
        Commands::CreateAdmin {
            email,
            username,
            password,
            first_name,
            last_name,
        } => {
            let admin = seed::create_admin(
                &db,
                NewAdmin {
                    email: &email,
                    username: &username,
                    password: &password,
                    first_name: &first_name,
                    last_name: &last_name,
                },
            )
            .await
            .map_err(|e| anyhow!("Failed to create administrator: {e:?}"))?;
            println!("Administrator {} (id {}) is ready", admin.email, admin.id);
        }
    }

    Ok(())
}
