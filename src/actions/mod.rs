// src/actions/mod.rs
pub mod stake;
pub mod wrap;

pub use stake::StakeUnstake;
pub use wrap::WrapUnwrap;

use crate::chain::{CallSpec, ChainClient, Receipt};
use crate::error::BotResult;
use alloy::primitives::U256;
use async_trait::async_trait;
use tracing::info;

/// Two chain-mutating operations that must execute in order. The second
/// operation's input is derived from the first: either the same amount
/// (wrap/unwrap) or a value extracted from the first receipt
/// (stake/unstake).
#[async_trait]
pub trait ActionPair: Send + Sync {
    fn name(&self) -> &'static str;
    fn first_op(&self) -> &'static str;
    fn second_op(&self) -> &'static str;

    async fn first(&self, client: &dyn ChainClient, amount: U256) -> BotResult<Receipt>;

    /// Derive the second leg's input from the confirmed first leg.
    fn second_input(&self, amount: U256, first: &Receipt) -> BotResult<U256>;

    async fn second(&self, client: &dyn ChainClient, input: U256) -> BotResult<Receipt>;
}

/// Submit a call and block until it is confirmed, logging the explorer link
/// the way each confirmed operation is expected to surface.
pub(crate) async fn execute_call(
    client: &dyn ChainClient,
    explorer_base: &str,
    call: &CallSpec,
) -> BotResult<Receipt> {
    let pending = client.submit(call).await?;
    info!(
        op = call.op,
        "transaction sent: {}{}", explorer_base, pending.tx_hash
    );
    let receipt = client.await_confirmation(&pending).await?;
    info!(
        op = call.op,
        block = receipt.block_number,
        "transaction confirmed"
    );
    Ok(receipt)
}
