//! Pokedex - An interactive PokeAPI explorer
//!
//! Provides a REPL over the PokeAPI with every response held in a
//! self-expiring in-memory cache.

use std::io;

use anyhow::Context;
use tokio::io::BufReader;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Config, PokeApiClient, Session, TimedCache};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper
/// 4. Create the PokeAPI client and the REPL session
/// 5. Run the REPL on stdin/stdout until EOF, `exit` or Ctrl+C
/// 6. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the way of the prompt,
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        base_url = %config.base_url,
        cache_interval_secs = config.cache_interval,
        http_timeout_secs = config.http_timeout,
        catch_threshold = config.catch_threshold,
        "Configuration loaded"
    );

    let cache = TimedCache::new(config.cache_interval())
        .context("failed to create response cache")?;
    let client = PokeApiClient::new(&config, cache.clone())
        .context("failed to create PokeAPI client")?;
    let mut session = Session::new(client, config.catch_threshold);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    tokio::select! {
        result = repl::run(&mut session, stdin, &mut stdout) => {
            result.context("REPL terminated")?;
        }
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down...");
        }
    }

    cache.shutdown().await;
    info!("Pokedex closed");
    Ok(())
}
