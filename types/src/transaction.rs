//! Transaction history entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::error::TypesError;
use crate::keys::PublicKey;
use crate::time::{NetworkTimestamp, Timestamp};

/// On-chain transaction type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionType {
    Send = 0,
    SecondSignature = 1,
    DelegateRegistration = 2,
    Vote = 3,
    MultiSignature = 4,
}

impl TransactionType {
    /// Human-readable label for the transaction type.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Send => "Send ARK",
            TransactionType::SecondSignature => "Second Signature Creation",
            TransactionType::DelegateRegistration => "Delegate Registration",
            TransactionType::Vote => "Vote",
            TransactionType::MultiSignature => "Multisignature Creation",
        }
    }
}

impl TryFrom<u8> for TransactionType {
    type Error = TypesError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(TransactionType::Send),
            1 => Ok(TransactionType::SecondSignature),
            2 => Ok(TransactionType::DelegateRegistration),
            3 => Ok(TransactionType::Vote),
            4 => Ok(TransactionType::MultiSignature),
            other => Err(TypesError::UnknownTransactionType(other)),
        }
    }
}

impl From<TransactionType> for u8 {
    fn from(t: TransactionType) -> Self {
        t as u8
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label shown for a transfer received by the viewed account.
pub const RECEIVE_LABEL: &str = "Receive ARK";

/// A transaction as listed in an account's history.
///
/// `label`, `date` and `total` are derived relative to the account whose
/// history is being viewed; call [`Transaction::annotate`] again if that
/// account changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub tx_type: TransactionType,
    pub amount: u64,
    pub fee: u64,
    pub sender_id: Address,
    pub recipient_id: Option<Address>,
    pub sender_public_key: Option<PublicKey>,
    pub timestamp: NetworkTimestamp,
    pub vendor_field: Option<String>,
    pub confirmations: u64,
    pub label: String,
    pub date: Timestamp,
    /// Signed effect on the viewed account's balance.
    pub total: i64,
}

impl Transaction {
    /// Recompute the derived fields for the account at `viewed`.
    ///
    /// Incoming amounts count positive; outgoing amounts plus fee count
    /// negative. A transfer to oneself is treated as outgoing.
    pub fn annotate(&mut self, viewed: &Address) {
        self.label = self.tx_type.label().to_string();
        self.date = self.timestamp.to_unix();
        self.total = 0;

        if self.recipient_id.as_ref() == Some(viewed) {
            self.total = clamp_i64(i128::from(self.amount));
            if self.tx_type == TransactionType::Send {
                self.label = RECEIVE_LABEL.to_string();
            }
        }
        if &self.sender_id == viewed {
            self.total = clamp_i64(-(i128::from(self.amount) + i128::from(self.fee)));
        }
    }

    pub fn is_incoming(&self, viewed: &Address) -> bool {
        self.recipient_id.as_ref() == Some(viewed) && &self.sender_id != viewed
    }
}

fn clamp_i64(v: i128) -> i64 {
    v.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
