//! Vote sets and vote diff assertions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::delegate::DelegateInfo;
use crate::keys::PublicKey;

/// The minimal identifying triple of a delegate an account votes for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VotedDelegate {
    pub username: String,
    pub address: Address,
    pub public_key: PublicKey,
}

impl From<&DelegateInfo> for VotedDelegate {
    fn from(d: &DelegateInfo) -> Self {
        Self {
            username: d.username.clone(),
            address: d.address.clone(),
            public_key: d.public_key.clone(),
        }
    }
}

impl From<DelegateInfo> for VotedDelegate {
    fn from(d: DelegateInfo) -> Self {
        Self {
            username: d.username,
            address: d.address,
            public_key: d.public_key,
        }
    }
}

/// Whether an assertion adds or removes a delegate from the vote set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteDirection {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Remove,
}

impl VoteDirection {
    pub fn sign(self) -> char {
        match self {
            VoteDirection::Add => '+',
            VoteDirection::Remove => '-',
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sign())
    }
}

/// One vote or unvote instruction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteDiffAssertion {
    pub username: String,
    pub address: Address,
    pub public_key: PublicKey,
    pub vote: VoteDirection,
}

impl VoteDiffAssertion {
    pub fn new(delegate: VotedDelegate, vote: VoteDirection) -> Self {
        Self {
            username: delegate.username,
            address: delegate.address,
            public_key: delegate.public_key,
            vote,
        }
    }

    /// Wire form used in a vote transaction asset, e.g. `+02ab…`.
    pub fn to_asset_string(&self) -> String {
        format!("{}{}", self.vote.sign(), self.public_key)
    }
}

/// The assertions carried by a single vote transaction.
pub type VoteBatch = Vec<VoteDiffAssertion>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_string_prefixes_direction() {
        let d = VotedDelegate {
            username: "genesis_1".into(),
            address: Address::parse("AGenesis1").unwrap(),
            public_key: PublicKey::parse("02".to_string() + &"11".repeat(32)).unwrap(),
        };
        let add = VoteDiffAssertion::new(d.clone(), VoteDirection::Add);
        let rm = VoteDiffAssertion::new(d, VoteDirection::Remove);
        assert_eq!(add.to_asset_string(), format!("+02{}", "11".repeat(32)));
        assert!(rm.to_asset_string().starts_with('-'));
    }

    #[test]
    fn direction_serializes_as_sign() {
        assert_eq!(serde_json::to_string(&VoteDirection::Add).unwrap(), "\"+\"");
        assert_eq!(serde_json::to_string(&VoteDirection::Remove).unwrap(), "\"-\"");
    }
}
