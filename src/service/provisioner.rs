use alloy::primitives::U256;
use tracing::instrument;

use crate::config::PositionConfig;
use crate::repository::{MintRequest, UniswapRepository};
use crate::service::ServiceResult;
use crate::service::types::ProvisionReport;
use crate::service::utils::{deadline_from_now, parse_amount};

/// Approves both tokens to the position manager and mints a new position.
///
/// Amounts and the tick range are the fixed values from the liquidity settings. The
/// minimum amounts are zero, so the mint has no slippage protection.
pub struct LiquidityProvisioner<'a> {
    repository: &'a dyn UniswapRepository,
    config: &'a PositionConfig,
}

impl<'a> LiquidityProvisioner<'a> {
    pub fn new(repository: &'a dyn UniswapRepository, config: &'a PositionConfig) -> Self {
        Self { repository, config }
    }

    #[instrument(skip(self), err)]
    pub async fn provision(&self) -> ServiceResult<ProvisionReport> {
        let config = self.config;
        let amount_in = parse_amount(&config.liquidity.amount_in, config.token_in.decimals)?;
        let amount_out = parse_amount(&config.liquidity.amount_out, config.token_out.decimals)?;

        let approve_in = self
            .repository
            .approve(config.token_in.address, config.position_manager, amount_in)
            .await?;
        tracing::info!("{} approval: {}", config.token_in.symbol, approve_in.hash);

        let approve_out = self
            .repository
            .approve(config.token_out.address, config.position_manager, amount_out)
            .await?;
        tracing::info!("{} approval: {}", config.token_out.symbol, approve_out.hash);

        let deadline = deadline_from_now(config.liquidity.deadline_secs);
        let request = self.mint_request(amount_in, amount_out, deadline);

        let mint = self
            .repository
            .mint_position(config.position_manager, &request, config.liquidity.gas_limit)
            .await?;
        tracing::info!(
            "Add liquidity transaction: {} (block {:?}, gas used {})",
            mint.hash,
            mint.block_number,
            mint.gas_used
        );

        Ok(ProvisionReport {
            approvals: vec![approve_in, approve_out],
            mint,
        })
    }

    /// Builds mint parameters with the pair sorted the way the position manager expects;
    /// each desired amount follows its token.
    pub fn mint_request(&self, amount_in: U256, amount_out: U256, deadline: U256) -> MintRequest {
        let config = self.config;
        let (token_in, token_out) = (config.token_in.address, config.token_out.address);
        let (token0, token1, amount0, amount1) = if token_in < token_out {
            (token_in, token_out, amount_in, amount_out)
        } else {
            (token_out, token_in, amount_out, amount_in)
        };

        MintRequest {
            token0,
            token1,
            fee: config.fee,
            tick_lower: config.liquidity.tick_lower,
            tick_upper: config.liquidity.tick_upper,
            amount0_desired: amount0,
            amount1_desired: amount1,
            amount0_min: U256::ZERO,
            amount1_min: U256::ZERO,
            recipient: self.repository.signer_address(),
            deadline,
        }
    }
}
