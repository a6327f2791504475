use uniswap_v3_ops::config::{AddLiquidityConfig, DEFAULT_SETTINGS_PATH, Env, Settings};
use uniswap_v3_ops::{LiquidityProvisioner, connect, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let settings = Settings::from_yaml(DEFAULT_SETTINGS_PATH)?;
    let config = AddLiquidityConfig::from_env(&Env::load(), &settings)?;

    let repository = connect(&config.chain)?;
    let report = LiquidityProvisioner::new(&repository, &config.position)
        .provision()
        .await?;

    tracing::info!("Receipt: {:?}", report.mint);

    Ok(())
}
