//! chain-api command line.
//!
//! Loads a configuration, stores it with `configure`, creates an `Api` over an
//! HTTP provider and runs one query against it.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, TxHash};
use clap::{Parser, Subcommand};

use chain_api::api::http_provider;
use chain_api::config::{finalize_config, load_config, ApiConfig, ConfigWatcher};
use chain_api::entrypoint::{self, ApiFactory};
use chain_api::observability::logging;

#[derive(Parser)]
#[command(name = "chain-api")]
#[command(about = "Query an EVM JSON-RPC endpoint through a configured API", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "CHAIN_API_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured RPC URL.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chain ID
    ChainId,
    /// Print the latest block number
    BlockNumber,
    /// Print the balance of an address in wei
    Balance { address: Address },
    /// Print the current gas price in wei
    GasPrice,
    /// Print a transaction receipt and its confirmation count
    Receipt { hash: TxHash },
    /// Check RPC reachability
    Health,
    /// Print the effective configuration as TOML
    Config,
    /// Reload the config file on change and report the head block
    Watch {
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
    },
}

/// Overrides layered on every loaded configuration, including reloads.
#[derive(Debug, Clone, Default)]
struct CliOverrides {
    rpc_url: Option<String>,
    log_level: Option<String>,
}

impl CliOverrides {
    /// Environment first, then command line flags.
    fn apply_with<F>(&self, config: &mut ApiConfig, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        config.apply_overrides(lookup);
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }

    fn apply(&self, config: &mut ApiConfig) {
        self.apply_with(config, |key| std::env::var(key).ok());
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        rpc_url: cli.rpc_url,
        log_level: cli.log_level,
    };

    let loaded = match &cli.config {
        Some(path) => load_config(path)?,
        None => ApiConfig::default(),
    };
    let config = finalize_config(loaded, |c| overrides.apply(c))?;

    logging::init(&config.observability);
    tracing::info!("chain-api v{} starting", env!("CARGO_PKG_VERSION"));

    if let Commands::Config = cli.command {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let verify = config.verify_chain_id;
    let rpc_url = config.rpc_url.clone();
    entrypoint::configure(config);

    let api = entrypoint::create(http_provider(&rpc_url)?)?;
    if verify {
        api.verify_chain_id().await?;
    }

    match cli.command {
        Commands::ChainId => println!("{}", api.chain_id().await?),
        Commands::BlockNumber => println!("{}", api.block_number().await?),
        Commands::Balance { address } => println!("{}", api.balance(address).await?),
        Commands::GasPrice => println!("{}", api.gas_price().await?),
        Commands::Receipt { hash } => match api.transaction_receipt(hash).await? {
            Some(receipt) => {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
                if let Some(confirmations) = api.confirmations(hash).await? {
                    println!("confirmations: {}", confirmations);
                }
                println!("status: {:?}", api.confirmation_status(hash).await?);
            }
            None => eprintln!("Transaction {} not found", hash),
        },
        Commands::Health => {
            let healthy = api.is_healthy().await;
            println!("{}", if healthy { "healthy" } else { "unreachable" });
            if !healthy {
                std::process::exit(1);
            }
        }
        Commands::Watch { interval_secs } => {
            let path = cli.config.ok_or("watch requires --config")?;
            watch(&path, overrides, Duration::from_secs(interval_secs.max(1))).await?;
        }
        Commands::Config => {}
    }

    Ok(())
}

/// Follow config file changes until Ctrl-C, querying with a freshly created
/// `Api` on each tick so reloads take effect.
async fn watch(
    path: &std::path::Path,
    overrides: CliOverrides,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, updates) = ConfigWatcher::new(path);
    let _watcher = watcher.with_overrides(move |c| overrides.apply(c)).run()?;

    let factory = std::sync::Arc::new(ApiFactory::new());
    if let Some(current) = entrypoint::global().config() {
        factory.configure((*current).clone());
    }
    let follower = factory.follow(updates);

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(config) = factory.config() else { continue };
                let api = factory.create(http_provider(&config.rpc_url)?)?;
                match api.block_number().await {
                    Ok(block) => tracing::info!(rpc_url = %config.rpc_url, block, "Head block"),
                    Err(e) => tracing::warn!(rpc_url = %config.rpc_url, error = %e, "Head block query failed"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
        }
    }

    follower.abort();
    Ok(())
}
