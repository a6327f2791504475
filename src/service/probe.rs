use alloy::contract::{ContractInstance, Interface};
use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use alloy::providers::Provider;
use serde::Deserialize;

use crate::service::types::MethodSupport;
use crate::service::{ServiceError, ServiceResult};

/// Compiled interface description of the Uniswap V3 `ISwapRouter`.
const ROUTER_ARTIFACT: &str = include_str!("../../abi/ISwapRouter.json");

/// Methods the swap flow relies on.
pub const EXPECTED_ROUTER_METHODS: [&str; 2] = ["exactInputSingle", "exactOutputSingle"];

#[derive(Deserialize)]
struct Artifact {
    abi: JsonAbi,
}

/// Parses the bundled router artifact into a dynamic contract interface.
pub fn router_interface() -> ServiceResult<Interface> {
    let artifact: Artifact = serde_json::from_str(ROUTER_ARTIFACT)
        .map_err(|e| ServiceError::InterfaceError(format!("Invalid router artifact: {e}")))?;

    Ok(Interface::new(artifact.abi))
}

/// Read-only router proxy built from the bundled interface description.
///
/// Only the local description is inspected; whether the deployed bytecode actually
/// implements a method is never checked.
pub struct RouterProbe<P> {
    contract: ContractInstance<P>,
}

impl<P: Provider> RouterProbe<P> {
    pub fn new(router: Address, provider: P) -> ServiceResult<Self> {
        let contract = ContractInstance::new(router, provider, router_interface()?);
        Ok(Self { contract })
    }

    pub fn router(&self) -> Address {
        *self.contract.address()
    }

    pub fn supports(&self, method: &str) -> bool {
        self.contract.abi().function(method).is_some()
    }

    pub fn check(&self, methods: &[&str]) -> Vec<MethodSupport> {
        methods
            .iter()
            .map(|name| MethodSupport {
                name: name.to_string(),
                supported: self.supports(name),
            })
            .collect()
    }
}
