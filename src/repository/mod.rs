pub mod alloy;
pub mod contract;
pub mod error;
pub mod types;

use ::alloy::primitives::{Address, U256};
pub use alloy::AlloyUniswapRepository;
use async_trait::async_trait;
pub use error::RepositoryError;
pub use types::{MintRequest, PoolState, SwapRequest, TxOutcome};

pub(crate) type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Trait for the chain reads and writes the Uniswap V3 programs perform.
///
/// Every write is signed by the repository's own signer and resolves only once the
/// transaction has been mined; a mined transaction with a failed status is reported
/// as [`RepositoryError::TransactionReverted`].
#[async_trait]
pub trait UniswapRepository: Send + Sync {
    /// The address that signs every transaction submitted by this repository.
    fn signer_address(&self) -> Address;

    /// Retrieves the ERC20 balance of `owner` in the token's smallest unit.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let balance = repository.token_balance(weth, wallet).await?;
    /// ```
    async fn token_balance(&self, token: Address, owner: Address) -> RepoResult<U256>;

    /// Retrieves the number of decimals an ERC20 token declares.
    async fn token_decimals(&self, token: Address) -> RepoResult<u8>;

    /// Retrieves how much `spender` may currently pull from `owner`.
    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> RepoResult<U256>;

    /// Submits `approve(spender, amount)` on `token` and waits for it to be mined.
    async fn approve(&self, token: Address, spender: Address, amount: U256)
    -> RepoResult<TxOutcome>;

    /// Resolves the pool for a token pair and fee tier from the factory.
    ///
    /// # Returns
    ///
    /// * `Ok(Address::ZERO)` - The factory knows no such pool
    /// * `Ok(pool)` - The pool contract address
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> RepoResult<Address>;

    /// Reads price, tick, liquidity and token ordering from a pool.
    async fn pool_state(&self, pool: Address) -> RepoResult<PoolState>;

    /// Submits a position mint with a fixed gas limit and waits for it to be mined.
    async fn mint_position(
        &self,
        position_manager: Address,
        request: &MintRequest,
        gas_limit: u64,
    ) -> RepoResult<TxOutcome>;

    /// Submits an exact-input single-pool swap with a fixed gas limit and waits for
    /// it to be mined.
    async fn exact_input_single(
        &self,
        router: Address,
        request: &SwapRequest,
        gas_limit: u64,
    ) -> RepoResult<TxOutcome>;
}
