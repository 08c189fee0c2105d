//! Validation errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid public key: {0:?}")]
    InvalidPublicKey(String),

    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("unknown transaction type: {0}")]
    UnknownTransactionType(u8),
}
