//! DPoS transaction payloads and their validation.
//!
//! Transaction types the wallet builds:
//! - **Transfer** (type 0): send coins to another address
//! - **DelegateRegistration** (type 2): register the sender as a delegate
//! - **Vote** (type 3): add or remove up to 33 delegates from the vote set
//!
//! Signing is delegated to a [`TransactionSigner`].

pub mod delegate;
pub mod error;
pub mod send;
pub mod signer;
pub mod validation;
pub mod vote;

pub use error::{SignerError, TransactionError};
pub use signer::TransactionSigner;

use dpos_types::params::{SEND_FEE, UNITS_PER_COIN};
use dpos_types::{Address, NetworkTimestamp, PublicKey, TransactionType};
use serde::{Deserialize, Serialize};

/// Fee of a delegate registration.
pub const DELEGATE_REGISTRATION_FEE: u64 = 25 * UNITS_PER_COIN;

/// Fee of a vote transaction.
pub const VOTE_FEE: u64 = UNITS_PER_COIN;

/// A transaction ready to be handed to the signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnsignedTransaction {
    Transfer(send::TransferTx),
    DelegateRegistration(delegate::DelegateRegistrationTx),
    Vote(vote::VoteTx),
}

impl UnsignedTransaction {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Send,
            Self::DelegateRegistration(_) => TransactionType::DelegateRegistration,
            Self::Vote(_) => TransactionType::Vote,
        }
    }

    /// Amount moved to the recipient; zero for everything but transfers.
    pub fn amount(&self) -> u64 {
        match self {
            Self::Transfer(tx) => tx.amount,
            _ => 0,
        }
    }

    pub fn fee(&self) -> u64 {
        match self {
            Self::Transfer(_) => SEND_FEE,
            Self::DelegateRegistration(_) => DELEGATE_REGISTRATION_FEE,
            Self::Vote(_) => VOTE_FEE,
        }
    }

    pub fn recipient_id(&self) -> Option<&Address> {
        match self {
            Self::Transfer(tx) => Some(&tx.recipient_id),
            _ => None,
        }
    }

    pub fn vendor_field(&self) -> Option<&str> {
        match self {
            Self::Transfer(tx) => tx.vendor_field.as_deref(),
            _ => None,
        }
    }

    /// The type-specific asset as it appears in the signed payload.
    pub fn asset(&self, sender_public_key: &PublicKey) -> TransactionAsset {
        match self {
            Self::Transfer(_) => TransactionAsset::default(),
            Self::DelegateRegistration(tx) => TransactionAsset {
                delegate: Some(DelegateAsset {
                    username: tx.username.clone(),
                    public_key: sender_public_key.clone(),
                }),
                votes: Vec::new(),
            },
            Self::Vote(tx) => TransactionAsset {
                delegate: None,
                votes: tx.votes.clone(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<DelegateAsset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub votes: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateAsset {
    pub username: String,
    pub public_key: PublicKey,
}

/// A signed transaction in the shape the peer accepts for broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: u64,
    pub fee: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<Address>,
    pub sender_public_key: PublicKey,
    /// Filled in by the builder once the key has been checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<Address>,
    pub timestamp: NetworkTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_field: Option<String>,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_signature: Option<String>,
    #[serde(default)]
    pub asset: TransactionAsset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pk() -> PublicKey {
        PublicKey::from_bytes(&[2; 33])
    }

    #[test]
    fn fees_follow_type() {
        let transfer = UnsignedTransaction::Transfer(send::TransferTx {
            recipient_id: Address::parse("Arecipient").unwrap(),
            amount: 5,
            vendor_field: None,
        });
        let reg = UnsignedTransaction::DelegateRegistration(delegate::DelegateRegistrationTx::new(
            "alice",
        ));
        let vote = UnsignedTransaction::Vote(vote::VoteTx { votes: vec![] });
        assert_eq!(transfer.fee(), SEND_FEE);
        assert_eq!(reg.fee(), DELEGATE_REGISTRATION_FEE);
        assert_eq!(vote.fee(), VOTE_FEE);
        assert_eq!(transfer.amount(), 5);
        assert_eq!(vote.amount(), 0);
        assert_eq!(reg.tx_type(), TransactionType::DelegateRegistration);
    }

    #[test]
    fn registration_asset_carries_sender_key() {
        let reg = UnsignedTransaction::DelegateRegistration(delegate::DelegateRegistrationTx::new(
            " Alice ",
        ));
        let asset = reg.asset(&pk());
        let delegate = asset.delegate.unwrap();
        assert_eq!(delegate.username, "alice");
        assert_eq!(delegate.public_key, pk());
    }

    #[test]
    fn signed_payload_uses_wire_names() {
        let tx = SignedTransaction {
            id: "abc".into(),
            tx_type: TransactionType::Vote,
            amount: 0,
            fee: VOTE_FEE,
            recipient_id: None,
            sender_public_key: pk(),
            sender_id: None,
            timestamp: NetworkTimestamp::new(10),
            vendor_field: None,
            signature: "sig".into(),
            sign_signature: None,
            asset: TransactionAsset {
                delegate: None,
                votes: vec![format!("+{}", pk())],
            },
        };
        let v = serde_json::to_value(&tx).unwrap();
        assert_eq!(v["type"], json!(3));
        assert_eq!(v["senderPublicKey"], json!(pk().as_hex()));
        assert_eq!(v["timestamp"], json!(10));
        assert!(v.get("recipientId").is_none());
        assert_eq!(v["asset"]["votes"].as_array().unwrap().len(), 1);
    }
}
