use alloy::primitives::Address;
use tracing::instrument;

use crate::config::PoolConfig;
use crate::repository::UniswapRepository;
use crate::service::types::{PoolSnapshot, TokenReserve};
use crate::service::utils::{format_balance, sqrt_price_x96_to_price};
use crate::service::{ServiceError, ServiceResult};

/// Reads liquidity, price and reserves of the configured pool.
pub struct LiquidityInspector<'a> {
    repository: &'a dyn UniswapRepository,
    config: &'a PoolConfig,
}

impl<'a> LiquidityInspector<'a> {
    pub fn new(repository: &'a dyn UniswapRepository, config: &'a PoolConfig) -> Self {
        Self { repository, config }
    }

    /// Resolves the pool from the factory and reads its current state.
    ///
    /// Fails with [`ServiceError::PoolNotFound`] without any further reads when the
    /// factory returns the zero address.
    #[instrument(skip(self), err)]
    pub async fn inspect(&self) -> ServiceResult<PoolSnapshot> {
        let config = self.config;

        let pool_address = self
            .repository
            .get_pool(
                config.factory,
                config.token_in.address,
                config.token_out.address,
                config.fee,
            )
            .await?;

        if pool_address == Address::ZERO {
            return Err(ServiceError::PoolNotFound {
                token0: config.token_in.symbol.clone(),
                token1: config.token_out.symbol.clone(),
                fee: config.fee,
            });
        }

        let state = self.repository.pool_state(pool_address).await?;

        tracing::info!("Pool address: {pool_address}");
        tracing::info!("Pool liquidity: {}", state.liquidity);
        tracing::info!("Pool price (sqrtPriceX96): {}", state.sqrt_price_x96);

        let token0 = self.reserve(pool_address, state.token0).await?;
        let token1 = self.reserve(pool_address, state.token1).await?;

        let price =
            sqrt_price_x96_to_price(state.sqrt_price_x96, token0.decimals, token1.decimals)?;

        tracing::info!(
            "Token 0 reserves ({}): {}",
            self.symbol_of(token0.token),
            token0.formatted
        );
        tracing::info!(
            "Token 1 reserves ({}): {}",
            self.symbol_of(token1.token),
            token1.formatted
        );
        tracing::info!(
            "Price: 1 {} = {} {} (tick {})",
            self.symbol_of(token0.token),
            price,
            self.symbol_of(token1.token),
            state.tick
        );

        Ok(PoolSnapshot {
            address: pool_address,
            liquidity: state.liquidity,
            sqrt_price_x96: state.sqrt_price_x96,
            tick: state.tick,
            token0,
            token1,
            price,
        })
    }

    async fn reserve(&self, pool: Address, token: Address) -> ServiceResult<TokenReserve> {
        let raw = self.repository.token_balance(token, pool).await?;
        let decimals = self.decimals_of(token).await?;

        Ok(TokenReserve {
            token,
            decimals,
            raw,
            formatted: format_balance(raw, decimals),
        })
    }

    /// Configured precision for the pair's tokens, on-chain `decimals()` otherwise.
    async fn decimals_of(&self, token: Address) -> ServiceResult<u8> {
        let config = self.config;
        if token == config.token_in.address {
            Ok(config.token_in.decimals)
        } else if token == config.token_out.address {
            Ok(config.token_out.decimals)
        } else {
            tracing::warn!("Token {token} is not configured, reading decimals on-chain");
            Ok(self.repository.token_decimals(token).await?)
        }
    }

    fn symbol_of(&self, token: Address) -> String {
        let config = self.config;
        if token == config.token_in.address {
            config.token_in.symbol.clone()
        } else if token == config.token_out.address {
            config.token_out.symbol.clone()
        } else {
            token.to_string()
        }
    }
}
