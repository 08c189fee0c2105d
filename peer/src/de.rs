//! Lenient deserializers for peer payloads.
//!
//! Peers report balances as decimal strings, amounts as numbers, and flags
//! as either booleans or `0`/`1` depending on the endpoint and version.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrString {
    Num(u64),
    Str(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrNum {
    Bool(bool),
    Num(u64),
}

/// Deserialize a `u64` given either as a JSON number or a decimal string.
pub fn u64_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    match NumOrString::deserialize(d)? {
        NumOrString::Num(n) => Ok(n),
        NumOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a decimal integer")),
    }
}

/// Deserialize a flag given as a boolean or as `0`/`1`.
pub fn bool_lenient<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match BoolOrNum::deserialize(d)? {
        BoolOrNum::Bool(b) => Ok(b),
        BoolOrNum::Num(n) => Ok(n != 0),
    }
}

/// Deserialize an optional string, treating `""` and `null` as absent.
pub fn non_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s: Option<String> = Option::deserialize(d)?;
    Ok(s.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "u64_lenient")]
        amount: u64,
        #[serde(deserialize_with = "bool_lenient")]
        flag: bool,
        #[serde(default, deserialize_with = "non_empty")]
        name: Option<String>,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"amount":"245","flag":1,"name":""}"#).unwrap();
        assert_eq!(p.amount, 245);
        assert!(p.flag);
        assert_eq!(p.name, None);

        let p: Probe = serde_json::from_str(r#"{"amount":7,"flag":false}"#).unwrap();
        assert_eq!(p.amount, 7);
        assert!(!p.flag);
        assert_eq!(p.name, None);
    }

    #[test]
    fn rejects_garbage_amounts() {
        assert!(serde_json::from_str::<Probe>(r#"{"amount":"12a","flag":true}"#).is_err());
    }
}
