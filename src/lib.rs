pub mod app;
pub mod config;
pub mod repository;
pub mod service;
pub mod telemetry;

pub use app::{connect, connect_read_only};

// Re-export commonly used types for the binaries
pub use service::{
    LiquidityInspector, LiquidityProvisioner, PoolSnapshot, RouterProbe, ServiceError,
    SwapOrchestrator, SwapReport,
};
