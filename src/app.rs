use std::str::FromStr;
use std::sync::Arc;

use alloy::network::EthereumWallet;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use anyhow::Context;

use crate::config::ChainConfig;
use crate::repository::AlloyUniswapRepository;

/// Builds a repository whose provider signs every write with the configured key.
pub fn connect(
    chain: &ChainConfig,
) -> anyhow::Result<AlloyUniswapRepository<impl Provider + Clone + 'static>> {
    let signer = PrivateKeySigner::from_str(&chain.private_key)
        .map_err(|e| anyhow::anyhow!("Invalid private key: {e}"))?;
    let address = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(chain.rpc_url.parse().context("Invalid RPC URL")?);

    tracing::info!("Initialized with wallet address: {address}");

    Ok(AlloyUniswapRepository::new(Arc::new(provider), address))
}

/// Builds a provider without a wallet, for programs that never sign.
pub fn connect_read_only(rpc_url: &str) -> anyhow::Result<impl Provider + Clone + 'static> {
    Ok(ProviderBuilder::new().connect_http(rpc_url.parse().context("Invalid RPC URL")?))
}
