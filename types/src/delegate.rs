//! Delegate information.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::keys::PublicKey;

/// A registered delegate, as last reported by the peer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelegateInfo {
    pub address: Address,
    pub public_key: PublicKey,
    pub username: String,
    /// Forging rank (1 = highest approval).
    pub rank: u32,
    /// Total vote weight in smallest units.
    pub vote: u64,
    pub produced_blocks: u64,
    pub missed_blocks: u64,
    /// Approval percentage.
    pub approval: f64,
    /// Productivity percentage.
    pub productivity: f64,
}
