// src/executor.rs
use crate::actions::ActionPair;
use crate::chain::ChainClient;
use crate::generator::{AmountGenerator, DelayGenerator};
use crate::types::{CycleOutcome, Leg};
use alloy::primitives::utils::format_ether;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, warn};

/// Runs one action pair end-to-end: first leg, confirmation, randomized
/// pause, second leg. Every failure is converted into a `Failed` outcome
/// here; nothing unwinds past this boundary.
pub struct CycleExecutor {
    client: Arc<dyn ChainClient>,
    amounts: AmountGenerator,
    delays: DelayGenerator,
}

impl CycleExecutor {
    pub fn new(
        client: Arc<dyn ChainClient>,
        amounts: AmountGenerator,
        delays: DelayGenerator,
    ) -> Self {
        Self {
            client,
            amounts,
            delays,
        }
    }

    pub async fn run_cycle(&self, index: u32, pair: &dyn ActionPair) -> CycleOutcome {
        info!(cycle = index, pair = pair.name(), "starting cycle");
        let amount = self.amounts.sample();
        info!(cycle = index, amount_mon = %format_ether(amount), "drawn random amount");

        let first_receipt = match pair.first(self.client.as_ref(), amount).await {
            Ok(receipt) => receipt,
            Err(error) => {
                warn!(cycle = index, op = pair.first_op(), %error, "first leg failed");
                return CycleOutcome::failed(index, Leg::First, error);
            }
        };

        let second_input = match pair.second_input(amount, &first_receipt) {
            Ok(input) => input,
            Err(error) => {
                warn!(
                    cycle = index,
                    op = pair.second_op(),
                    %error,
                    "cannot derive second leg input"
                );
                return CycleOutcome::failed(index, Leg::Second, error);
            }
        };

        let pause = self.delays.sample();
        info!(
            cycle = index,
            delay_secs = pause.as_secs(),
            "pausing before {}",
            pair.second_op()
        );
        sleep(pause).await;

        match pair.second(self.client.as_ref(), second_input).await {
            Ok(second_receipt) => {
                CycleOutcome::completed(index, first_receipt.tx_hash, second_receipt.tx_hash)
            }
            Err(error) => {
                warn!(cycle = index, op = pair.second_op(), %error, "second leg failed");
                CycleOutcome::failed(index, Leg::Second, error)
            }
        }
    }
}
