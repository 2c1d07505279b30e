// src/config.rs
use crate::error::{BotError, BotResult};
use alloy::primitives::{Address, address};
use alloy::signers::local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use zeroize::Zeroizing;

/// Environment variable holding the signing key.
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Bounds for the randomized per-cycle amount, in whole MON. Draws are
/// floored at `precision` fractional digits before scaling to wei.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AmountRange {
    pub min_mon: f64,
    pub max_mon: f64,
    pub precision: u32,
}

/// Bounds for the randomized pacing delay, inclusive on both ends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Fixed configuration for a run: endpoints, contracts, gas ceilings, and
/// the randomization bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub rpc_url: String,
    pub explorer_base: String,
    pub wmon_contract: Address,
    pub magma_contract: Address,
    pub wrap_gas_limit: u64,
    pub stake_gas_limit: u64,
    pub unstake_gas_limit: u64,
    pub amount: AmountRange,
    pub delay: DelayRange,
    pub receipt_poll_ms: u64,
    pub receipt_timeout_ms: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://testnet-rpc.monad.xyz/".to_string(),
            explorer_base: "https://testnet.monadexplorer.com/tx/".to_string(),
            wmon_contract: address!("760AfE86e5de5fa0Ee542fc7B7B713e1c5425701"),
            magma_contract: address!("2c9C959516e9AAEdB2C748224a41249202ca8BE7"),
            wrap_gas_limit: 500_000,
            stake_gas_limit: 500_000,
            unstake_gas_limit: 800_000,
            amount: AmountRange {
                min_mon: 0.01,
                max_mon: 0.05,
                precision: 4,
            },
            delay: DelayRange {
                min_ms: 60_000,
                max_ms: 180_000,
            },
            receipt_poll_ms: 2_000,
            receipt_timeout_ms: 180_000,
        }
    }
}

impl BotConfig {
    /// Load from a JSON file; missing fields fall back to the defaults.
    pub fn from_file(path: &Path) -> BotResult<Self> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|err| BotError::Config(format!("cannot parse {}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BotResult<()> {
        if self.rpc_url.is_empty() {
            return Err(BotError::Config("rpc_url must not be empty".to_string()));
        }
        if !(self.amount.min_mon > 0.0) || self.amount.max_mon < self.amount.min_mon {
            return Err(BotError::Config(format!(
                "invalid amount range {}..{}",
                self.amount.min_mon, self.amount.max_mon
            )));
        }
        if self.amount.precision > 18 {
            return Err(BotError::Config(format!(
                "amount precision {} exceeds 18 decimals",
                self.amount.precision
            )));
        }
        if self.delay.min_ms > self.delay.max_ms {
            return Err(BotError::Config(format!(
                "invalid delay range {}..{}",
                self.delay.min_ms, self.delay.max_ms
            )));
        }
        Ok(())
    }
}

/// Read the signing key from the environment, failing fast when it is
/// missing or malformed.
pub fn private_key_from_env() -> BotResult<Zeroizing<String>> {
    let key = std::env::var(PRIVATE_KEY_ENV)
        .map_err(|_| BotError::Config(format!("{PRIVATE_KEY_ENV} is not set")))?;
    validate_private_key(&key)?;
    Ok(Zeroizing::new(key))
}

pub fn validate_private_key(key: &str) -> BotResult<PrivateKeySigner> {
    key.trim()
        .parse()
        .map_err(|err| BotError::Config(format!("malformed private key: {err}")))
}
