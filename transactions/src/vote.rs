//! Vote transaction: add or remove delegates from the sender's vote set.

use dpos_types::VoteDiffAssertion;
use serde::{Deserialize, Serialize};

/// An unsigned vote carrying `+<publicKey>` / `-<publicKey>` entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTx {
    pub votes: Vec<String>,
}

impl VoteTx {
    /// Encode one planner batch.
    pub fn from_batch(batch: &[VoteDiffAssertion]) -> Self {
        Self {
            votes: batch.iter().map(VoteDiffAssertion::to_asset_string).collect(),
        }
    }
}
