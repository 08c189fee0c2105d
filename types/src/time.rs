//! Timestamp types.
//!
//! The network records times as seconds since its own epoch
//! ([`NETWORK_EPOCH`]); the wallet converts them to Unix seconds before
//! display or comparison with the system clock.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::params::NETWORK_EPOCH;

/// A Unix timestamp in seconds since 1970-01-01T00:00:00Z.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Current system time. A clock set before 1970 reads as zero.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Seconds since the network epoch, as reported by the peer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkTimestamp(u64);

impl NetworkTimestamp {
    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Convert to wall-clock Unix time by adding the network epoch.
    pub fn to_unix(self) -> Timestamp {
        Timestamp(self.0.saturating_add(NETWORK_EPOCH))
    }

    /// Convert a Unix time to network time; times before the epoch clamp to zero.
    pub fn from_unix(ts: Timestamp) -> Self {
        Self(ts.0.saturating_sub(NETWORK_EPOCH))
    }
}

impl fmt::Display for NetworkTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
