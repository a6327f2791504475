use uniswap_v3_ops::config::{Env, VerifyFunctionsConfig};
use uniswap_v3_ops::service::EXPECTED_ROUTER_METHODS;
use uniswap_v3_ops::{RouterProbe, connect_read_only, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = VerifyFunctionsConfig::from_env(&Env::load())?;
    let provider = connect_read_only(&config.rpc_url)?;

    let probe = RouterProbe::new(config.router, provider)?;
    tracing::info!("Router interface loaded for {}", probe.router());

    for method in probe.check(&EXPECTED_ROUTER_METHODS) {
        tracing::info!("{} supported: {}", method.name, method.supported);
    }

    Ok(())
}
