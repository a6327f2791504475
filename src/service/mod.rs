pub mod error;
pub mod inspector;
pub mod orchestrator;
pub mod probe;
pub mod provisioner;
pub mod types;
pub mod utils;


pub use error::ServiceError;
pub use inspector::LiquidityInspector;
pub use orchestrator::SwapOrchestrator;
pub use probe::{EXPECTED_ROUTER_METHODS, RouterProbe};
pub use provisioner::LiquidityProvisioner;
pub use types::*;

pub(crate) type ServiceResult<T> = std::result::Result<T, ServiceError>;
