//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An account address on the network.
///
/// Addresses are base58-style strings. Validation only checks the character
/// set (`[1-9A-Za-z]`); checksum verification belongs to the signing library.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and validate a raw address string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if Self::is_well_formed(&s) {
            Ok(Self(s))
        } else {
            Err(TypesError::InvalidAddress(s))
        }
    }

    /// Whether `s` uses only the address alphabet and is non-empty.
    pub fn is_well_formed(s: &str) -> bool {
        !s.is_empty()
            && s
                .bytes()
                .all(|b| matches!(b, b'1'..=b'9' | b'A'..=b'Z' | b'a'..=b'z'))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_base58_style_addresses() {
        let a = Address::parse("AUexKjGtgsSpVzPLs6jNMM6vJ6znEVTQWK").unwrap();
        assert_eq!(a.as_str(), "AUexKjGtgsSpVzPLs6jNMM6vJ6znEVTQWK");
    }

    #[test]
    fn rejects_empty_and_foreign_characters() {
        assert!(Address::parse("").is_err());
        assert!(Address::parse("AUex0").is_err());
        assert!(Address::parse("AUex Kj").is_err());
        assert!(Address::parse("AUex-Kj").is_err());
    }

    #[test]
    fn serde_validates_on_deserialize() {
        let ok: Address = serde_json::from_str("\"DAbc123\"").unwrap();
        assert_eq!(ok.to_string(), "DAbc123");
        assert!(serde_json::from_str::<Address>("\"not valid!\"").is_err());
    }
}
