// src/chain/mock.rs
//! Scripted chain client for exercising executor and orchestrator flows
//! without a network.

use super::{CallSpec, ChainClient, LogRecord, PendingTx, Receipt};
use crate::error::{BotError, BotResult};
use alloy::primitives::{Address, B256, TxHash, U256};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::Instant;

/// Behavior of one submitted call, consumed in submission order. Calls with
/// no scripted step confirm with an empty receipt.
#[derive(Debug, Clone)]
pub enum MockStep {
    Confirm(Vec<LogRecord>),
    SubmitError(String),
    ConfirmError(String),
}

#[derive(Debug, Clone)]
pub struct MockEvent {
    pub kind: String,
    pub at: Instant,
}

#[derive(Default)]
pub struct MockChainClient {
    steps: Mutex<VecDeque<MockStep>>,
    pending: Mutex<HashMap<TxHash, MockStep>>,
    sequence: AtomicU64,
    events: Mutex<Vec<MockEvent>>,
    calls: Mutex<Vec<CallSpec>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self, step: MockStep) {
        self.steps.lock().unwrap().push_back(step);
    }

    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_kinds(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.kind.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<CallSpec> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: String) {
        self.events.lock().unwrap().push(MockEvent {
            kind,
            at: Instant::now(),
        });
    }
}

/// Receipt log matching what a successful Magma stake emits.
pub fn gmon_deposit_log(contract: Address, minted: U256) -> LogRecord {
    use alloy::sol_types::SolEvent;
    LogRecord {
        address: contract,
        topics: vec![crate::actions::stake::Deposit::SIGNATURE_HASH, B256::ZERO],
        data: minted.to_be_bytes::<32>().to_vec().into(),
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn submit(&self, call: &CallSpec) -> BotResult<PendingTx> {
        self.calls.lock().unwrap().push(call.clone());
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockStep::Confirm(Vec::new()));
        match step {
            MockStep::SubmitError(reason) => {
                self.record(format!("submit-error:{}", call.op));
                Err(BotError::Submission {
                    op: call.op,
                    reason,
                })
            }
            step => {
                let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
                let tx_hash = TxHash::with_last_byte(sequence as u8);
                self.pending.lock().unwrap().insert(tx_hash, step);
                self.record(format!("submit:{}", call.op));
                Ok(PendingTx {
                    op: call.op,
                    tx_hash,
                })
            }
        }
    }

    async fn await_confirmation(&self, pending: &PendingTx) -> BotResult<Receipt> {
        let step = self
            .pending
            .lock()
            .unwrap()
            .remove(&pending.tx_hash)
            .unwrap_or_else(|| MockStep::Confirm(Vec::new()));
        match step {
            MockStep::Confirm(logs) => {
                self.record(format!("confirm:{}", pending.op));
                Ok(Receipt {
                    tx_hash: pending.tx_hash,
                    block_number: Some(1),
                    gas_used: 60_000,
                    logs,
                })
            }
            MockStep::ConfirmError(reason) => {
                self.record(format!("confirm-error:{}", pending.op));
                Err(BotError::Confirmation {
                    op: pending.op,
                    reason,
                })
            }
            MockStep::SubmitError(_) => unreachable!("submit errors are raised at submit time"),
        }
    }
}
