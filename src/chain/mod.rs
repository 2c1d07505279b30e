// src/chain/mod.rs
pub mod rpc;

#[cfg(test)]
pub mod mock;

pub use rpc::RpcChainClient;

use crate::error::BotResult;
use alloy::primitives::{Address, B256, Bytes, TxHash, U256};
use async_trait::async_trait;

/// One chain-mutating call: target, calldata, optional attached value, and a
/// fixed gas ceiling. `op` names the operation for logging and error tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSpec {
    pub op: &'static str,
    pub to: Address,
    pub data: Bytes,
    pub value: Option<U256>,
    pub gas_limit: u64,
}

/// Handle for a submitted transaction awaiting confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTx {
    pub op: &'static str,
    pub tx_hash: TxHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

/// Confirmed execution of a submitted call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    pub logs: Vec<LogRecord>,
}

/// The only component permitted to suspend a cycle: submits signed calls and
/// resolves their confirmation. A reverted execution surfaces as a
/// confirmation failure, never as an Ok receipt.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn submit(&self, call: &CallSpec) -> BotResult<PendingTx>;
    async fn await_confirmation(&self, pending: &PendingTx) -> BotResult<Receipt>;
}
