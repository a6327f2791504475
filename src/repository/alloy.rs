use std::sync::Arc;

use alloy::network::{Ethereum, ReceiptResponse};
use alloy::primitives::{
    Address, U256,
    aliases::{I24, U24},
};
use alloy::providers::{PendingTransactionBuilder, Provider};
use async_trait::async_trait;
use tracing::instrument;

use super::error::RepositoryError;
use crate::repository::contract::{
    IERC20, INonfungiblePositionManager, ISwapRouter, IUniswapV3Factory, IUniswapV3Pool,
};
use crate::repository::{
    MintRequest, PoolState, RepoResult, SwapRequest, TxOutcome, UniswapRepository,
};

pub struct AlloyUniswapRepository<P> {
    provider: Arc<P>,
    signer: Address,
}

impl<P: Provider + Clone + 'static> AlloyUniswapRepository<P> {
    /// `provider` must carry a wallet for `signer`; writes are signed by the provider.
    pub fn new(provider: Arc<P>, signer: Address) -> Self {
        Self { provider, signer }
    }
}

/// Narrows a fee tier to the contracts' `uint24`.
fn fee_tier(fee: u32) -> RepoResult<U24> {
    U24::try_from(fee)
        .map_err(|e| RepositoryError::ParseError(format!("Invalid fee {fee}: {e}")))
}

/// Waits for a submitted transaction and turns its receipt into an outcome.
async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
    action: &str,
) -> RepoResult<TxOutcome> {
    let hash = *pending.tx_hash();
    tracing::info!("{action} submitted: {hash}");

    let receipt = pending.get_receipt().await.map_err(|e| {
        RepositoryError::TransactionError(format!("Failed to confirm {action} {hash}: {e}"))
    })?;

    if !receipt.status() {
        tracing::error!("{action} {hash} reverted");
        return Err(RepositoryError::TransactionReverted(hash.to_string()));
    }

    Ok(TxOutcome {
        hash: receipt.transaction_hash(),
        block_number: receipt.block_number(),
        gas_used: receipt.gas_used(),
    })
}

#[async_trait]
impl<P: Provider + Clone + Send + Sync + 'static> UniswapRepository
    for AlloyUniswapRepository<P>
{
    fn signer_address(&self) -> Address {
        self.signer
    }

    #[instrument(skip(self), err)]
    async fn token_balance(&self, token: Address, owner: Address) -> RepoResult<U256> {
        let contract = IERC20::new(token, self.provider.clone());

        contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(e.to_string()))
    }

    #[instrument(skip(self), err)]
    async fn token_decimals(&self, token: Address) -> RepoResult<u8> {
        let contract = IERC20::new(token, self.provider.clone());

        contract
            .decimals()
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(e.to_string()))
    }

    #[instrument(skip(self), err)]
    async fn token_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> RepoResult<U256> {
        let contract = IERC20::new(token, self.provider.clone());

        contract
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(format!("Failed to get allowance: {e}")))
    }

    #[instrument(skip(self), err)]
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> RepoResult<TxOutcome> {
        let contract = IERC20::new(token, self.provider.clone());

        let pending = contract.approve(spender, amount).send().await.map_err(|e| {
            RepositoryError::TransactionError(format!("Failed to submit approval: {e}"))
        })?;

        confirm(pending, "approval").await
    }

    #[instrument(skip(self), err)]
    async fn get_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> RepoResult<Address> {
        let factory = IUniswapV3Factory::new(factory, self.provider.clone());
        let fee = fee_tier(fee)?;

        factory
            .getPool(token_a, token_b, fee)
            .call()
            .await
            .map_err(|e| RepositoryError::ContractError(format!("Failed to get pool: {e}")))
    }

    #[instrument(skip(self), err)]
    async fn pool_state(&self, pool: Address) -> RepoResult<PoolState> {
        let pool = IUniswapV3Pool::new(pool, self.provider.clone());

        let slot0 =
            pool.slot0().call().await.map_err(|e| {
                RepositoryError::ContractError(format!("Failed to get slot0: {e}"))
            })?;

        let liquidity = pool.liquidity().call().await.map_err(|e| {
            RepositoryError::ContractError(format!("Failed to get liquidity: {e}"))
        })?;

        let token0 =
            pool.token0().call().await.map_err(|e| {
                RepositoryError::ContractError(format!("Failed to get token0: {e}"))
            })?;

        let token1 =
            pool.token1().call().await.map_err(|e| {
                RepositoryError::ContractError(format!("Failed to get token1: {e}"))
            })?;

        let tick = i32::try_from(slot0.tick)
            .map_err(|e| RepositoryError::ParseError(format!("Invalid tick: {e}")))?;

        Ok(PoolState {
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            tick,
            liquidity,
            token0,
            token1,
        })
    }

    #[instrument(skip(self), err)]
    async fn mint_position(
        &self,
        position_manager: Address,
        request: &MintRequest,
        gas_limit: u64,
    ) -> RepoResult<TxOutcome> {
        let manager = INonfungiblePositionManager::new(position_manager, self.provider.clone());

        let fee = fee_tier(request.fee)?;
        let tick_lower = I24::try_from(request.tick_lower)
            .map_err(|e| RepositoryError::ParseError(format!("Invalid lower tick: {e}")))?;
        let tick_upper = I24::try_from(request.tick_upper)
            .map_err(|e| RepositoryError::ParseError(format!("Invalid upper tick: {e}")))?;

        let params = INonfungiblePositionManager::MintParams {
            token0: request.token0,
            token1: request.token1,
            fee,
            tickLower: tick_lower,
            tickUpper: tick_upper,
            amount0Desired: request.amount0_desired,
            amount1Desired: request.amount1_desired,
            amount0Min: request.amount0_min,
            amount1Min: request.amount1_min,
            recipient: request.recipient,
            deadline: request.deadline,
        };

        let pending = manager
            .mint(params)
            .gas(gas_limit)
            .send()
            .await
            .map_err(|e| RepositoryError::TransactionError(format!("Failed to submit mint: {e}")))?;

        confirm(pending, "mint").await
    }

    #[instrument(skip(self), err)]
    async fn exact_input_single(
        &self,
        router: Address,
        request: &SwapRequest,
        gas_limit: u64,
    ) -> RepoResult<TxOutcome> {
        let router = ISwapRouter::new(router, self.provider.clone());
        let fee = fee_tier(request.fee)?;

        let params = ISwapRouter::ExactInputSingleParams {
            tokenIn: request.token_in,
            tokenOut: request.token_out,
            fee,
            recipient: request.recipient,
            deadline: request.deadline,
            amountIn: request.amount_in,
            amountOutMinimum: request.amount_out_minimum,
            sqrtPriceLimitX96: request.sqrt_price_limit_x96,
        };

        let pending = router
            .exactInputSingle(params)
            .gas(gas_limit)
            .send()
            .await
            .map_err(|e| RepositoryError::TransactionError(format!("Failed to submit swap: {e}")))?;

        confirm(pending, "swap").await
    }
}
