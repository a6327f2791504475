use alloy::primitives::{U256, aliases::U160};
use tracing::instrument;

use crate::config::SwapConfig;
use crate::repository::{SwapRequest, UniswapRepository};
use crate::service::inspector::LiquidityInspector;
use crate::service::provisioner::LiquidityProvisioner;
use crate::service::types::SwapReport;
use crate::service::utils::{deadline_from_now, format_balance, parse_amount};
use crate::service::{ServiceError, ServiceResult};

/// The guarded swap workflow: balance check, allowance, liquidity guard, swap.
///
/// Nothing is compensated when a later step fails; an approval granted in step two
/// stays granted.
pub struct SwapOrchestrator<'a> {
    repository: &'a dyn UniswapRepository,
    config: &'a SwapConfig,
}

impl<'a> SwapOrchestrator<'a> {
    pub fn new(repository: &'a dyn UniswapRepository, config: &'a SwapConfig) -> Self {
        Self { repository, config }
    }

    /// Runs the workflow and logs any failure instead of returning it.
    pub async fn run_logged(&self) -> Option<SwapReport> {
        match self.run().await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!("Error performing the swap: {e}");
                None
            }
        }
    }

    #[instrument(skip(self), err)]
    pub async fn run(&self) -> ServiceResult<SwapReport> {
        let config = self.config;
        let token_in = &config.pool.token_in;
        let token_out = &config.pool.token_out;
        let signer = self.repository.signer_address();
        let amount_in = parse_amount(&config.swap.amount_in, token_in.decimals)?;

        // 1. Balance
        let balance = self.repository.token_balance(token_in.address, signer).await?;
        tracing::info!(
            "{} balance: {}",
            token_in.symbol,
            format_balance(balance, token_in.decimals)
        );

        if balance < amount_in {
            return Err(ServiceError::InsufficientBalance {
                symbol: token_in.symbol.clone(),
                required: format_balance(amount_in, token_in.decimals),
                available: format_balance(balance, token_in.decimals),
            });
        }

        // 2. Allowance
        let allowance = self
            .repository
            .token_allowance(token_in.address, signer, config.router)
            .await?;

        let approval = if allowance < amount_in {
            let outcome = self
                .repository
                .approve(token_in.address, config.router, amount_in)
                .await?;
            tracing::info!("Approval transaction: {}", outcome.hash);
            Some(outcome)
        } else {
            tracing::info!("Approval already granted.");
            None
        };

        // 3. Liquidity guard
        let snapshot = LiquidityInspector::new(self.repository, &config.pool)
            .inspect()
            .await?;

        let provision = if snapshot.has_liquidity() {
            None
        } else {
            tracing::info!("The pool has no liquidity. Adding liquidity...");
            let report = LiquidityProvisioner::new(self.repository, &config.position)
                .provision()
                .await?;
            Some(report)
        };

        // 4. Swap
        let request = self.swap_request(amount_in, deadline_from_now(config.swap.deadline_secs));
        tracing::info!("Swap parameters: {request:?}");

        let swap = self
            .repository
            .exact_input_single(config.router, &request, config.swap.gas_limit)
            .await?;
        tracing::info!(
            "Swap transaction: {} (block {:?}, gas used {})",
            swap.hash,
            swap.block_number,
            swap.gas_used
        );

        // 5. Output balance
        let balance_out = self.repository.token_balance(token_out.address, signer).await?;
        let formatted_balance_out = format_balance(balance_out, token_out.decimals);
        tracing::info!("{} balance: {}", token_out.symbol, formatted_balance_out);

        Ok(SwapReport {
            approval,
            provision,
            swap,
            balance_out,
            formatted_balance_out,
        })
    }

    /// Exact-input swap parameters with no minimum output and no price limit.
    pub fn swap_request(&self, amount_in: U256, deadline: U256) -> SwapRequest {
        let config = self.config;

        SwapRequest {
            token_in: config.pool.token_in.address,
            token_out: config.pool.token_out.address,
            fee: config.pool.fee,
            recipient: self.repository.signer_address(),
            deadline,
            amount_in,
            amount_out_minimum: U256::ZERO,
            sqrt_price_limit_x96: U160::ZERO,
        }
    }
}
