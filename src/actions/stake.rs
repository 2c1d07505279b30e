// src/actions/stake.rs
use super::{ActionPair, execute_call};
use crate::chain::{CallSpec, ChainClient, Receipt};
use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use alloy::primitives::{Address, Bytes, U256, utils::format_ether};
use alloy::sol_types::SolEvent;
use async_trait::async_trait;
use tracing::info;

alloy::sol! {
    event Deposit(address indexed depositor, uint256 amount);
}

// The staking contract publishes no ABI; these selectors are fixed.
const STAKE_SELECTOR: [u8; 4] = [0xd5, 0x57, 0x59, 0x82];
const UNSTAKE_SELECTOR: [u8; 4] = [0x6f, 0xed, 0x1e, 0xa7];

/// Stake/unstake pair against the Magma staking contract: stake carries the
/// amount as attached value, unstake takes the minted gMON quantity as a
/// single word argument.
pub struct StakeUnstake {
    contract: Address,
    stake_gas_limit: u64,
    unstake_gas_limit: u64,
    explorer_base: String,
}

impl StakeUnstake {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            contract: config.magma_contract,
            stake_gas_limit: config.stake_gas_limit,
            unstake_gas_limit: config.unstake_gas_limit,
            explorer_base: config.explorer_base.clone(),
        }
    }

    fn stake_call(&self, amount: U256) -> CallSpec {
        CallSpec {
            op: "stake",
            to: self.contract,
            data: Bytes::from_static(&STAKE_SELECTOR),
            value: Some(amount),
            gas_limit: self.stake_gas_limit,
        }
    }

    fn unstake_call(&self, amount: U256) -> CallSpec {
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(&UNSTAKE_SELECTOR);
        data.extend_from_slice(&amount.to_be_bytes::<32>());
        CallSpec {
            op: "unstake",
            to: self.contract,
            data: data.into(),
            value: None,
            gas_limit: self.unstake_gas_limit,
        }
    }

    fn minted_amount(&self, receipt: &Receipt) -> Option<U256> {
        receipt.logs.iter().find_map(|log| {
            if log.address != self.contract
                || log.topics.first() != Some(&Deposit::SIGNATURE_HASH)
                || log.data.len() != 32
            {
                return None;
            }
            Some(U256::from_be_slice(&log.data))
        })
    }
}

#[async_trait]
impl ActionPair for StakeUnstake {
    fn name(&self) -> &'static str {
        "stake-unstake"
    }

    fn first_op(&self) -> &'static str {
        "stake"
    }

    fn second_op(&self) -> &'static str {
        "unstake"
    }

    async fn first(&self, client: &dyn ChainClient, amount: U256) -> BotResult<Receipt> {
        info!(amount_mon = %format_ether(amount), "staking MON with Magma");
        execute_call(client, &self.explorer_base, &self.stake_call(amount)).await
    }

    /// Unstake what the stake actually minted, not what was requested.
    fn second_input(&self, _amount: U256, first: &Receipt) -> BotResult<U256> {
        self.minted_amount(first).ok_or_else(|| BotError::Dependency {
            op: "unstake",
            reason: "stake receipt carries no Deposit log".to_string(),
        })
    }

    async fn second(&self, client: &dyn ChainClient, input: U256) -> BotResult<Receipt> {
        info!(amount_gmon = %format_ether(input), "unstaking gMON");
        execute_call(client, &self.explorer_base, &self.unstake_call(input)).await
    }
}
