use alloy::primitives::{Address, U256};

use crate::repository::TxOutcome;

/// One of the pool's two tokens together with the balance the pool holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReserve {
    pub token: Address,
    pub decimals: u8,
    /// Raw balance in the token's smallest unit
    pub raw: U256,
    /// Balance formatted with the token's decimals
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub address: Address,
    pub liquidity: u128,
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub token0: TokenReserve,
    pub token1: TokenReserve,
    /// Price of one token0 in token1, adjusted for both tokens' decimals
    pub price: String,
}

impl PoolSnapshot {
    pub fn has_liquidity(&self) -> bool {
        self.liquidity != 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Approvals in submission order: token in, then token out
    pub approvals: Vec<TxOutcome>,
    pub mint: TxOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReport {
    /// `None` when the existing allowance already covered the swap
    pub approval: Option<TxOutcome>,
    /// `Some` when the pool was empty and a position had to be minted first
    pub provision: Option<ProvisionReport>,
    pub swap: TxOutcome,
    pub balance_out: U256,
    pub formatted_balance_out: String,
}

/// Whether a method name is defined on a contract's interface description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSupport {
    pub name: String,
    pub supported: bool,
}
