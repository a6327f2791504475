use alloy::primitives::{Address, TxHash, U256, aliases::U160};

/// Pool state read in one pass after the factory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub liquidity: u128,
    pub token0: Address,
    pub token1: Address,
}

/// A mined transaction with a successful status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Parameters for `NonfungiblePositionManager.mint`.
///
/// `token0` must sort below `token1`; amounts are in base units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintRequest {
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: Address,
    pub deadline: U256,
}

/// Parameters for `SwapRouter.exactInputSingle`.
///
/// A zero `sqrt_price_limit_x96` disables the price limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
    pub recipient: Address,
    pub deadline: U256,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}
