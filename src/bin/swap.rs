use std::process::ExitCode;

use uniswap_v3_ops::config::{DEFAULT_SETTINGS_PATH, Env, Settings, SwapConfig};
use uniswap_v3_ops::{SwapOrchestrator, connect, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    telemetry::init_tracing();

    let settings = Settings::from_yaml(DEFAULT_SETTINGS_PATH)?;
    let config = SwapConfig::from_env(&Env::load(), &settings)?;

    let repository = connect(&config.chain)?;

    // Failures past this point are logged, never retried or rolled back
    match SwapOrchestrator::new(&repository, &config).run_logged().await {
        Some(report) => {
            tracing::info!("Receipt: {:?}", report.swap);
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}
