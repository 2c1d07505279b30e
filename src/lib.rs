// src/lib.rs
pub mod actions;
pub mod chain;
pub mod config;
pub mod error;
pub mod executor;
pub mod generator;
pub mod orchestrator;
pub mod prompt;
pub mod types;

pub use config::BotConfig;
pub use error::{BotError, BotResult};
pub use types::{CycleOutcome, CycleStatus, PairChoice, RunConfig, RunSummary};

use crate::actions::{ActionPair, StakeUnstake, WrapUnwrap};
use crate::chain::{ChainClient, RpcChainClient};
use crate::executor::CycleExecutor;
use crate::generator::{AmountGenerator, DelayGenerator};
use crate::orchestrator::Orchestrator;
use std::sync::Arc;
use tokio::sync::watch;

/// Top-level bot: one chain client and one signing credential shared by
/// every cycle of a run.
pub struct CycleBot {
    config: BotConfig,
    client: Arc<dyn ChainClient>,
}

impl CycleBot {
    /// Connect to the configured RPC endpoint with the given signing key.
    pub fn connect(config: BotConfig, private_key: &str) -> BotResult<Self> {
        config.validate()?;
        let client = RpcChainClient::connect(&config, private_key)?;
        Ok(Self {
            config,
            client: Arc::new(client),
        })
    }

    /// Assemble against an externally built chain client.
    pub fn with_client(config: BotConfig, client: Arc<dyn ChainClient>) -> BotResult<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    /// Run the configured number of cycles of the chosen pair to completion.
    pub async fn run(
        &self,
        choice: PairChoice,
        run_config: RunConfig,
        shutdown: watch::Receiver<bool>,
    ) -> BotResult<RunSummary> {
        let pair: Arc<dyn ActionPair> = match choice {
            PairChoice::WrapUnwrap => Arc::new(WrapUnwrap::new(&self.config)),
            PairChoice::StakeUnstake => Arc::new(StakeUnstake::new(&self.config)),
        };
        let amounts = AmountGenerator::new(self.config.amount)?;
        let delays = DelayGenerator::new(self.config.delay)?;
        let executor = CycleExecutor::new(Arc::clone(&self.client), amounts, delays);
        let mut orchestrator = Orchestrator::new(executor, pair, run_config, delays, shutdown);
        orchestrator.run().await
    }
}
