use thiserror::Error;

use crate::repository::RepositoryError;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    // Business validation errors
    /// The factory has no pool for the configured pair and fee tier.
    #[error("Pool not found for pair {token0}/{token1} with fee {fee}")]
    PoolNotFound {
        token0: String,
        token1: String,
        fee: u32,
    },

    /// The wallet has insufficient balance for the requested operation.
    #[error("Insufficient {symbol} balance: required {required}, available {available}")]
    InsufficientBalance {
        symbol: String,
        required: String,
        available: String,
    },

    /// The requested amount is invalid (e.g., negative or malformed).
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A submitted transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    TransactionReverted(String),

    /// The bundled contract interface description could not be used.
    #[error("Interface error: {0}")]
    InterfaceError(String),

    // Infrastructure errors (abstracted from repository layer)
    /// An error occurred while communicating with the blockchain.
    #[error("Blockchain connection error: {0}")]
    BlockchainError(String),

    /// An unexpected internal error occurred.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ContractError(msg)
            | RepositoryError::TransactionError(msg) => {
                ServiceError::BlockchainError(format!("Failed to interact with blockchain: {msg}"))
            }
            RepositoryError::TransactionReverted(hash) => ServiceError::TransactionReverted(hash),
            RepositoryError::ParseError(msg) => ServiceError::InternalError(msg),
        }
    }
}
