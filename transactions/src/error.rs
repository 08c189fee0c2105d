use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("amount must be positive")]
    ZeroAmount,

    #[error("vendor field is {len} bytes, at most {max} allowed")]
    VendorFieldTooLong { len: usize, max: usize },

    #[error("invalid delegate username: {0}")]
    InvalidUsername(String),

    #[error("vote transaction carries no votes")]
    EmptyVote,

    #[error("vote transaction carries {count} votes, at most {max} allowed")]
    TooManyVotes { count: usize, max: usize },

    #[error("malformed vote entry: {0}")]
    MalformedVote(String),

    #[error("delegate voted twice in one transaction: {0}")]
    DuplicateVote(String),
}

/// Failures reported by a [`crate::TransactionSigner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("passphrase is empty")]
    EmptyPassphrase,

    #[error("second passphrase required")]
    SecondPassphraseRequired,

    #[error("signing failed: {0}")]
    Backend(String),
}
