//! Delegate registration: claim a username and become eligible for votes.

use serde::{Deserialize, Serialize};

/// Longest username the network accepts.
pub const MAX_USERNAME_LEN: usize = 20;

/// An unsigned delegate registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateRegistrationTx {
    pub username: String,
}

impl DelegateRegistrationTx {
    /// Usernames are lowercase; the network rejects mixed case.
    pub fn new(username: &str) -> Self {
        Self {
            username: username.trim().to_lowercase(),
        }
    }
}
