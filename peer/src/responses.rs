//! Wire payloads returned by the peer and their conversion into wallet types.
//!
//! Every peer response carries a `success` flag. `success: false` is a normal
//! answer ("no such account", "not a delegate"), not a transport failure.

use serde::Deserialize;

use dpos_types::{
    Account, Address, DelegateInfo, NetworkTimestamp, PublicKey, Timestamp, Transaction,
    TransactionType, TypesError,
};

use crate::de::{bool_lenient, non_empty, u64_lenient};

// ── Envelopes ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub success: bool,
    #[serde(default)]
    pub account: Option<RemoteAccount>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsResponse {
    pub success: bool,
    #[serde(default)]
    pub transactions: Vec<RemoteTransaction>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegateResponse {
    pub success: bool,
    #[serde(default)]
    pub delegate: Option<RemoteDelegate>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DelegatesResponse {
    pub success: bool,
    #[serde(default)]
    pub delegates: Vec<RemoteDelegate>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One entry of a published sponsor list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SponsorEntry {
    pub public_key: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Account ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAccount {
    pub address: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub public_key: Option<String>,
    #[serde(deserialize_with = "u64_lenient")]
    pub balance: u64,
    #[serde(default, deserialize_with = "bool_lenient")]
    pub second_signature: bool,
}

impl TryFrom<RemoteAccount> for Account {
    type Error = TypesError;

    fn try_from(r: RemoteAccount) -> Result<Self, Self::Error> {
        let mut account = Account::placeholder(Address::parse(r.address)?);
        account.public_key = r.public_key.map(PublicKey::parse).transpose()?;
        account.balance = r.balance;
        account.second_signature = r.second_signature;
        Ok(account)
    }
}

// ── Transaction ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTransaction {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: u8,
    #[serde(deserialize_with = "u64_lenient")]
    pub amount: u64,
    #[serde(deserialize_with = "u64_lenient")]
    pub fee: u64,
    pub sender_id: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub recipient_id: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub sender_public_key: Option<String>,
    pub timestamp: u64,
    #[serde(default, deserialize_with = "non_empty")]
    pub vendor_field: Option<String>,
    #[serde(default)]
    pub confirmations: u64,
}

impl RemoteTransaction {
    /// Convert and annotate relative to the account being viewed.
    pub fn into_transaction(self, viewed: &Address) -> Result<Transaction, TypesError> {
        let mut tx = Transaction {
            id: self.id,
            tx_type: TransactionType::try_from(self.tx_type)?,
            amount: self.amount,
            fee: self.fee,
            sender_id: Address::parse(self.sender_id)?,
            recipient_id: self.recipient_id.map(Address::parse).transpose()?,
            sender_public_key: self.sender_public_key.map(PublicKey::parse).transpose()?,
            timestamp: NetworkTimestamp::new(self.timestamp),
            vendor_field: self.vendor_field,
            confirmations: self.confirmations,
            label: String::new(),
            date: Timestamp::default(),
            total: 0,
        };
        tx.annotate(viewed);
        Ok(tx)
    }
}

// ── Delegate ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDelegate {
    pub username: String,
    pub address: String,
    pub public_key: String,
    #[serde(default, alias = "rate")]
    pub rank: u32,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub vote: u64,
    #[serde(default, alias = "producedblocks")]
    pub produced_blocks: u64,
    #[serde(default, alias = "missedblocks")]
    pub missed_blocks: u64,
    #[serde(default)]
    pub approval: f64,
    #[serde(default)]
    pub productivity: f64,
}

impl TryFrom<RemoteDelegate> for DelegateInfo {
    type Error = TypesError;

    fn try_from(r: RemoteDelegate) -> Result<Self, Self::Error> {
        Ok(DelegateInfo {
            address: Address::parse(r.address)?,
            public_key: PublicKey::parse(r.public_key)?,
            username: r.username,
            rank: r.rank,
            vote: r.vote,
            produced_blocks: r.produced_blocks,
            missed_blocks: r.missed_blocks,
            approval: r.approval,
            productivity: r.productivity,
        })
    }
}
