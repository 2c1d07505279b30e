// src/main.rs
use anyhow::Context;
use monad_cycler::{BotConfig, CycleBot, config, prompt};
use std::path::Path;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bot_config = match std::env::args().nth(1) {
        Some(path) => BotConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => BotConfig::default(),
    };

    // Fail fast on a missing or malformed signing key.
    let private_key = config::private_key_from_env()?;
    let bot = CycleBot::connect(bot_config, private_key.as_str())?;

    let choice = prompt::collect_pair_choice()?;
    let run_config = prompt::collect_run_config()?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received: finishing the in-flight cycle, skipping the rest");
            let _ = shutdown_tx.send(true);
        }
    });

    bot.run(choice, run_config, shutdown_rx).await?;
    Ok(())
}
