//! Key layout of the local cache.
//!
//! | key                           | value                      |
//! |-------------------------------|----------------------------|
//! | `<address>`                   | `Account` record           |
//! | `transactions-<address>`      | `Vec<Transaction>`         |
//! | `username-<address>`          | `String`                   |
//! | `delegate-<address>`          | `DelegateInfo`             |
//! | `virtual-<address>`           | `VirtualLedger`            |
//! | `passphrase-<address>`        | `String`                   |
//! | `secondpassphrase-<address>`  | `String`                   |
//! | `voted-<address>`             | `Vec<VotedDelegate>`       |
//! | `addresses`                   | `AddressIndex`             |

use dpos_types::Address;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheKey<'a> {
    Account(&'a Address),
    Transactions(&'a Address),
    Username(&'a Address),
    Delegate(&'a Address),
    Virtual(&'a Address),
    Passphrase(&'a Address),
    SecondPassphrase(&'a Address),
    Voted(&'a Address),
    Addresses,
}

impl<'a> CacheKey<'a> {
    /// Every per-address key other than the account record itself.
    pub fn satellites(address: &'a Address) -> [CacheKey<'a>; 7] {
        [
            CacheKey::Transactions(address),
            CacheKey::Username(address),
            CacheKey::Delegate(address),
            CacheKey::Virtual(address),
            CacheKey::Passphrase(address),
            CacheKey::SecondPassphrase(address),
            CacheKey::Voted(address),
        ]
    }

    fn prefix(&self) -> Option<&'static str> {
        match self {
            CacheKey::Account(_) | CacheKey::Addresses => None,
            CacheKey::Transactions(_) => Some("transactions"),
            CacheKey::Username(_) => Some("username"),
            CacheKey::Delegate(_) => Some("delegate"),
            CacheKey::Virtual(_) => Some("virtual"),
            CacheKey::Passphrase(_) => Some("passphrase"),
            CacheKey::SecondPassphrase(_) => Some("secondpassphrase"),
            CacheKey::Voted(_) => Some("voted"),
        }
    }
}

impl fmt::Display for CacheKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Addresses => f.write_str("addresses"),
            CacheKey::Account(a) => f.write_str(a.as_str()),
            CacheKey::Transactions(a)
            | CacheKey::Username(a)
            | CacheKey::Delegate(a)
            | CacheKey::Virtual(a)
            | CacheKey::Passphrase(a)
            | CacheKey::SecondPassphrase(a)
            | CacheKey::Voted(a) => {
                write!(f, "{}-{}", self.prefix().unwrap_or_default(), a)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_documented_keys() {
        let a = Address::parse("AUexKj").unwrap();
        assert_eq!(CacheKey::Account(&a).to_string(), "AUexKj");
        assert_eq!(CacheKey::Transactions(&a).to_string(), "transactions-AUexKj");
        assert_eq!(CacheKey::Username(&a).to_string(), "username-AUexKj");
        assert_eq!(CacheKey::Delegate(&a).to_string(), "delegate-AUexKj");
        assert_eq!(CacheKey::Virtual(&a).to_string(), "virtual-AUexKj");
        assert_eq!(CacheKey::Passphrase(&a).to_string(), "passphrase-AUexKj");
        assert_eq!(
            CacheKey::SecondPassphrase(&a).to_string(),
            "secondpassphrase-AUexKj"
        );
        assert_eq!(CacheKey::Voted(&a).to_string(), "voted-AUexKj");
        assert_eq!(CacheKey::Addresses.to_string(), "addresses");
    }

    #[test]
    fn satellites_exclude_record_and_index() {
        let a = Address::parse("AUexKj").unwrap();
        let sats = CacheKey::satellites(&a);
        assert_eq!(sats.len(), 7);
        assert!(!sats.contains(&CacheKey::Account(&a)));
        assert!(!sats.contains(&CacheKey::Addresses));
    }
}
