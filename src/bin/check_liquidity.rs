use uniswap_v3_ops::config::{CheckLiquidityConfig, DEFAULT_SETTINGS_PATH, Env, Settings};
use uniswap_v3_ops::{LiquidityInspector, connect, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let settings = Settings::from_yaml(DEFAULT_SETTINGS_PATH)?;
    let config = CheckLiquidityConfig::from_env(&Env::load(), &settings)?;

    let repository = connect(&config.chain)?;
    let snapshot = LiquidityInspector::new(&repository, &config.pool)
        .inspect()
        .await?;

    tracing::info!(
        "Pool {} holds liquidity {}",
        snapshot.address,
        snapshot.liquidity
    );

    Ok(())
}
