// src/chain/rpc.rs
use super::{CallSpec, ChainClient, LogRecord, PendingTx, Receipt};
use crate::config::{self, BotConfig};
use crate::error::{BotError, BotResult};
use alloy::consensus::TxReceipt as _;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

/// JSON-RPC chain client: signs locally, submits through the configured
/// endpoint, and polls for the receipt until confirmed or timed out.
pub struct RpcChainClient {
    provider: DynProvider,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl RpcChainClient {
    pub fn connect(config: &BotConfig, private_key: &str) -> BotResult<Self> {
        let signer = config::validate_private_key(private_key)?;
        info!(address = %signer.address(), "signer ready");

        let url = config.rpc_url.parse().map_err(|err| {
            BotError::Config(format!("invalid RPC URL {}: {err}", config.rpc_url))
        })?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            poll_interval: Duration::from_millis(config.receipt_poll_ms),
            confirmation_timeout: Duration::from_millis(config.receipt_timeout_ms),
        })
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn submit(&self, call: &CallSpec) -> BotResult<PendingTx> {
        let mut request = TransactionRequest::default()
            .with_to(call.to)
            .with_input(call.data.clone())
            .with_gas_limit(call.gas_limit);
        if let Some(value) = call.value {
            request = request.with_value(value);
        }

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|err| BotError::Submission {
                op: call.op,
                reason: err.to_string(),
            })?;

        Ok(PendingTx {
            op: call.op,
            tx_hash: *pending.tx_hash(),
        })
    }

    async fn await_confirmation(&self, pending: &PendingTx) -> BotResult<Receipt> {
        let deadline = Instant::now() + self.confirmation_timeout;
        loop {
            match self.provider.get_transaction_receipt(pending.tx_hash).await {
                Ok(Some(receipt)) => {
                    if !receipt.status() {
                        return Err(BotError::Confirmation {
                            op: pending.op,
                            reason: "execution reverted".to_string(),
                        });
                    }
                    return Ok(Receipt {
                        tx_hash: pending.tx_hash,
                        block_number: receipt.block_number,
                        gas_used: receipt.gas_used,
                        logs: receipt
                            .inner
                            .logs()
                            .iter()
                            .map(|log| LogRecord {
                                address: log.inner.address,
                                topics: log.inner.data.topics().to_vec(),
                                data: log.inner.data.data.clone(),
                            })
                            .collect(),
                    });
                }
                Ok(None) => {
                    debug!(op = pending.op, tx = %pending.tx_hash, "receipt not yet available");
                }
                Err(err) => {
                    return Err(BotError::Confirmation {
                        op: pending.op,
                        reason: err.to_string(),
                    });
                }
            }
            if Instant::now() >= deadline {
                return Err(BotError::Confirmation {
                    op: pending.op,
                    reason: format!(
                        "not confirmed within {}s",
                        self.confirmation_timeout.as_secs()
                    ),
                });
            }
            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn connect_rejects_malformed_key() {
        let config = BotConfig::default();
        assert!(matches!(
            RpcChainClient::connect(&config, "garbage"),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn connect_rejects_malformed_url() {
        let config = BotConfig {
            rpc_url: "not a url".to_string(),
            ..BotConfig::default()
        };
        assert!(matches!(
            RpcChainClient::connect(&config, DEV_KEY),
            Err(BotError::Config(_))
        ));
    }
}
