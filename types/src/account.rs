//! Cached account record.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::delegate::DelegateInfo;
use crate::keys::PublicKey;
use crate::transaction::Transaction;
use crate::virtual_ledger::VirtualLedger;

/// An account as the wallet knows it.
///
/// Only the core fields are persisted under the account's own key; the
/// satellite fields (`username`, `delegate`, `transactions`,
/// `virtual_ledger`) live under their own keys and are filled in when the
/// account is read back from the cache.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub address: Address,
    pub public_key: Option<PublicKey>,
    /// Confirmed balance in smallest units.
    pub balance: u64,
    pub second_signature: bool,
    #[serde(skip)]
    pub username: Option<String>,
    #[serde(skip)]
    pub delegate: Option<DelegateInfo>,
    #[serde(skip)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(skip)]
    pub virtual_ledger: Option<VirtualLedger>,
}

impl Account {
    /// Zero-balance stand-in for an address the peer has never seen.
    pub fn placeholder(address: Address) -> Self {
        Self {
            address,
            public_key: None,
            balance: 0,
            second_signature: false,
            username: None,
            delegate: None,
            transactions: None,
            virtual_ledger: None,
        }
    }

    /// An account is cold until it has revealed a public key by sending.
    pub fn is_cold(&self) -> bool {
        self.public_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_is_cold_and_empty() {
        let a = Account::placeholder(Address::parse("AUexKjGtgsSpVzPLs6jNMM6vJ6znEVTQWK").unwrap());
        assert!(a.is_cold());
        assert_eq!(a.balance, 0);
        assert!(!a.second_signature);
    }

    #[test]
    fn public_key_makes_account_warm() {
        let mut a = Account::placeholder(Address::parse("AUexKjGtgsSpVzPLs6jNMM6vJ6znEVTQWK").unwrap());
        a.public_key = Some(
            PublicKey::parse("03".to_string() + &"ab".repeat(32)).unwrap(),
        );
        assert!(!a.is_cold());
    }
}
