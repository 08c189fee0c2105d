//! Transaction validation logic.
//!
//! Stateless checks only. Balance sufficiency and key ownership depend on the
//! sender's account and are checked by the wallet's transaction builder.

use std::collections::HashSet;

use dpos_types::params::MAX_VOTES_PER_TRANSACTION;
use dpos_types::PublicKey;

use crate::delegate::MAX_USERNAME_LEN;
use crate::error::TransactionError;
use crate::send::MAX_VENDOR_FIELD_LEN;
use crate::UnsignedTransaction;

/// Validate an unsigned transaction's structure before it reaches the signer.
pub fn validate_transaction(tx: &UnsignedTransaction) -> Result<(), TransactionError> {
    match tx {
        UnsignedTransaction::Transfer(t) => validate_transfer(t),
        UnsignedTransaction::DelegateRegistration(t) => validate_username(&t.username),
        UnsignedTransaction::Vote(t) => validate_votes(&t.votes),
    }
}

pub fn validate_transfer(tx: &crate::send::TransferTx) -> Result<(), TransactionError> {
    if tx.amount == 0 {
        return Err(TransactionError::ZeroAmount);
    }
    if let Some(vendor) = &tx.vendor_field {
        if vendor.len() > MAX_VENDOR_FIELD_LEN {
            return Err(TransactionError::VendorFieldTooLong {
                len: vendor.len(),
                max: MAX_VENDOR_FIELD_LEN,
            });
        }
    }
    Ok(())
}

/// Lowercase letters, digits and `!@$&_.`, at most 20 characters.
pub fn validate_username(username: &str) -> Result<(), TransactionError> {
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || "!@$&_.".contains(c);
    if username.is_empty()
        || username.chars().count() > MAX_USERNAME_LEN
        || !username.chars().all(allowed)
    {
        return Err(TransactionError::InvalidUsername(username.to_string()));
    }
    Ok(())
}

pub fn validate_votes(votes: &[String]) -> Result<(), TransactionError> {
    if votes.is_empty() {
        return Err(TransactionError::EmptyVote);
    }
    if votes.len() > MAX_VOTES_PER_TRANSACTION {
        return Err(TransactionError::TooManyVotes {
            count: votes.len(),
            max: MAX_VOTES_PER_TRANSACTION,
        });
    }

    let mut seen = HashSet::new();
    for vote in votes {
        let key = vote
            .strip_prefix('+')
            .or_else(|| vote.strip_prefix('-'))
            .ok_or_else(|| TransactionError::MalformedVote(vote.clone()))?;
        PublicKey::parse(key).map_err(|_| TransactionError::MalformedVote(vote.clone()))?;
        if !seen.insert(key) {
            return Err(TransactionError::DuplicateVote(key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::send::TransferTx;
    use dpos_types::Address;

    fn key(n: u8) -> String {
        PublicKey::from_bytes(&[n; 33]).to_string()
    }

    fn transfer(amount: u64, vendor: Option<&str>) -> TransferTx {
        TransferTx {
            recipient_id: Address::parse("Arecipient").unwrap(),
            amount,
            vendor_field: vendor.map(str::to_string),
        }
    }

    #[test]
    fn transfer_amount_must_be_positive() {
        assert_eq!(
            validate_transfer(&transfer(0, None)),
            Err(TransactionError::ZeroAmount)
        );
        assert!(validate_transfer(&transfer(1, Some("rent"))).is_ok());
    }

    #[test]
    fn vendor_field_is_bounded() {
        let long = "x".repeat(MAX_VENDOR_FIELD_LEN + 1);
        assert!(matches!(
            validate_transfer(&transfer(1, Some(&long))),
            Err(TransactionError::VendorFieldTooLong { len: 65, max: 64 })
        ));
    }

    #[test]
    fn usernames() {
        assert!(validate_username("genesis_1").is_ok());
        assert!(validate_username("a.b@c$d&e!").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("Alice").is_err());
        assert!(validate_username("with space").is_err());
        assert!(validate_username(&"a".repeat(21)).is_err());
    }

    #[test]
    fn votes_must_be_signed_keys() {
        assert!(validate_votes(&[format!("+{}", key(1)), format!("-{}", key(2))]).is_ok());
        assert_eq!(validate_votes(&[]), Err(TransactionError::EmptyVote));
        assert!(matches!(
            validate_votes(&[key(1)]),
            Err(TransactionError::MalformedVote(_))
        ));
        assert!(matches!(
            validate_votes(&["+zz".to_string()]),
            Err(TransactionError::MalformedVote(_))
        ));
    }

    #[test]
    fn votes_are_capped_and_unique() {
        let many: Vec<String> = (0..34).map(|n| format!("+{}", key(n))).collect();
        assert!(matches!(
            validate_votes(&many),
            Err(TransactionError::TooManyVotes { count: 34, max: 33 })
        ));
        let dup = vec![format!("+{}", key(1)), format!("-{}", key(1))];
        assert!(matches!(
            validate_votes(&dup),
            Err(TransactionError::DuplicateVote(_))
        ));
    }

    #[test]
    fn dispatch_by_type() {
        let tx = UnsignedTransaction::Transfer(transfer(0, None));
        assert!(validate_transaction(&tx).is_err());
        let tx = UnsignedTransaction::DelegateRegistration(
            crate::delegate::DelegateRegistrationTx::new("ok_name"),
        );
        assert!(validate_transaction(&tx).is_ok());
    }
}
