//! # Kennel - Dog record store
//!
//! Entry point: loads configuration, connects to the store once and
//! injects the gateway into the resolvers.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Dependency Injection & Wiring           │
//! │    │                                                            │
//! │    ├── Creates: MongoStore or InMemoryStore (adapter)          │
//! │    ├── Creates: DogGateway (adapter, owns the store)           │
//! │    ├── Creates: DogResolver (use case)                         │
//! │    └── Runs: one command, prints JSON on stdout                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   kennel create --name Rex --good-boi
//!   kennel create-many --name Rex --name Fido
//!   kennel get 65a1f0c2e4b0a1b2c3d4e5f6
//!   kennel list
//!   kennel --in-memory demo

mod commands;
mod config;
mod view;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser};
use kennel_adapter::{DocumentStore, DogGateway, InMemoryStore, MongoStore};
use kennel_usecase::DogResolver;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Command;
use config::KennelConfig;

#[derive(Parser)]
#[command(name = "kennel")]
#[command(about = "Kennel - create, fetch and list dogs in MongoDB")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    store: StoreArgs,
}

/// Overrides applied on top of the config file
#[derive(Debug, Args)]
struct StoreArgs {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// MongoDB connection string
    #[arg(long, global = true, env = "KENNEL_MONGODB_URI")]
    uri: Option<String>,

    #[arg(long, global = true)]
    database: Option<String>,

    #[arg(long, global = true)]
    collection: Option<String>,

    /// Keep dogs in process memory instead of MongoDB
    #[arg(long, global = true)]
    in_memory: bool,
}

impl StoreArgs {
    fn load_config(&self) -> anyhow::Result<KennelConfig> {
        let mut config = match &self.config {
            Some(path) => KennelConfig::from_file(path)?,
            None => KennelConfig::default(),
        };

        if let Some(uri) = &self.uri {
            config.uri = uri.clone();
        }
        if let Some(database) = &self.database {
            config.database = database.clone();
        }
        if let Some(collection) = &self.collection {
            config.collection = collection.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.store.load_config()?;

    // ========================================
    // Dependency Injection - Wire up the system
    // ========================================

    let store: Arc<dyn DocumentStore> = if cli.store.in_memory {
        info!("Using in-memory store");
        Arc::new(InMemoryStore::new())
    } else {
        let store = MongoStore::connect(&config.mongo_settings())
            .await
            .context("Cannot serve requests without MongoDB")?;
        Arc::new(store)
    };

    let gateway = DogGateway::new(store, config.operation_timeout());
    let resolver = DogResolver::new(gateway);

    let output = cli.command.run(&resolver).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
