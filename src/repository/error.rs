use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("Contract call error: {0}")]
    ContractError(String),

    /// Submission failed or the receipt could not be obtained.
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// The transaction was mined with a failed status.
    #[error("Transaction {0} reverted")]
    TransactionReverted(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
