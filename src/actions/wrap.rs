// src/actions/wrap.rs
use super::{ActionPair, execute_call};
use crate::chain::{CallSpec, ChainClient, Receipt};
use crate::config::BotConfig;
use crate::error::BotResult;
use alloy::primitives::{Address, U256, utils::format_ether};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use tracing::info;

alloy::sol! {
    interface IWMON {
        function deposit() external payable;
        function withdraw(uint256 wad) external;
    }
}

/// Wrap/unwrap pair against the canonical WMON contract: `deposit()` with
/// the amount attached, then `withdraw(uint256)` of the same amount.
pub struct WrapUnwrap {
    contract: Address,
    gas_limit: u64,
    explorer_base: String,
}

impl WrapUnwrap {
    pub fn new(config: &BotConfig) -> Self {
        Self {
            contract: config.wmon_contract,
            gas_limit: config.wrap_gas_limit,
            explorer_base: config.explorer_base.clone(),
        }
    }

    fn wrap_call(&self, amount: U256) -> CallSpec {
        CallSpec {
            op: "wrap",
            to: self.contract,
            data: IWMON::depositCall {}.abi_encode().into(),
            value: Some(amount),
            gas_limit: self.gas_limit,
        }
    }

    fn unwrap_call(&self, amount: U256) -> CallSpec {
        CallSpec {
            op: "unwrap",
            to: self.contract,
            data: IWMON::withdrawCall { wad: amount }.abi_encode().into(),
            value: None,
            gas_limit: self.gas_limit,
        }
    }
}

#[async_trait]
impl ActionPair for WrapUnwrap {
    fn name(&self) -> &'static str {
        "wrap-unwrap"
    }

    fn first_op(&self) -> &'static str {
        "wrap"
    }

    fn second_op(&self) -> &'static str {
        "unwrap"
    }

    async fn first(&self, client: &dyn ChainClient, amount: U256) -> BotResult<Receipt> {
        info!(amount_mon = %format_ether(amount), "wrapping MON into WMON");
        execute_call(client, &self.explorer_base, &self.wrap_call(amount)).await
    }

    fn second_input(&self, amount: U256, _first: &Receipt) -> BotResult<U256> {
        // Unwrap exactly what was just wrapped.
        Ok(amount)
    }

    async fn second(&self, client: &dyn ChainClient, input: U256) -> BotResult<Receipt> {
        info!(amount_mon = %format_ether(input), "unwrapping WMON back to MON");
        execute_call(client, &self.explorer_base, &self.unwrap_call(input)).await
    }
}
