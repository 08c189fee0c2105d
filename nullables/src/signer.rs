//! Nullable signer: deterministic key derivation from a registration table.

use dpos_transactions::{SignedTransaction, SignerError, TransactionSigner, UnsignedTransaction};
use dpos_types::{Address, NetworkTimestamp, PublicKey};
use std::collections::HashMap;
use std::sync::Mutex;

/// A signer that knows a fixed set of passphrases.
///
/// Signatures are placeholders; the transaction id counts up from 1.
pub struct NullSigner {
    keys: Mutex<HashMap<String, (Address, PublicKey)>>,
    signed: Mutex<Vec<SignedTransaction>>,
    timestamp: NetworkTimestamp,
}

impl NullSigner {
    pub fn new() -> Self {
        Self {
            keys: Mutex::new(HashMap::new()),
            signed: Mutex::new(Vec::new()),
            timestamp: NetworkTimestamp::new(0),
        }
    }

    /// Associate `passphrase` with an address and public key.
    pub fn register(&self, passphrase: &str, address: Address, public_key: PublicKey) {
        self.keys
            .lock()
            .unwrap()
            .insert(passphrase.to_string(), (address, public_key));
    }

    /// Every transaction signed so far.
    pub fn signed(&self) -> Vec<SignedTransaction> {
        self.signed.lock().unwrap().clone()
    }

    fn lookup(&self, passphrase: &str) -> Result<(Address, PublicKey), SignerError> {
        if passphrase.is_empty() {
            return Err(SignerError::EmptyPassphrase);
        }
        self.keys
            .lock()
            .unwrap()
            .get(passphrase)
            .cloned()
            .ok_or_else(|| SignerError::Backend("unknown passphrase".to_string()))
    }
}

impl Default for NullSigner {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionSigner for NullSigner {
    fn address_from_passphrase(&self, passphrase: &str) -> Result<Address, SignerError> {
        self.lookup(passphrase).map(|(address, _)| address)
    }

    fn address_from_public_key(&self, public_key: &PublicKey) -> Result<Address, SignerError> {
        self.keys
            .lock()
            .unwrap()
            .values()
            .find(|(_, pk)| pk == public_key)
            .map(|(address, _)| address.clone())
            .ok_or_else(|| SignerError::Backend(format!("unknown public key {public_key}")))
    }

    fn sign(
        &self,
        tx: &UnsignedTransaction,
        passphrase: &str,
        second_passphrase: Option<&str>,
    ) -> Result<SignedTransaction, SignerError> {
        let (_, public_key) = self.lookup(passphrase)?;
        let mut signed = self.signed.lock().unwrap();
        let out = SignedTransaction {
            id: format!("{:064x}", signed.len() + 1),
            tx_type: tx.tx_type(),
            amount: tx.amount(),
            fee: tx.fee(),
            recipient_id: tx.recipient_id().cloned(),
            asset: tx.asset(&public_key),
            sender_public_key: public_key,
            sender_id: None,
            timestamp: self.timestamp,
            vendor_field: tx.vendor_field().map(str::to_string),
            signature: "00".repeat(64),
            sign_signature: second_passphrase.map(|_| "11".repeat(64)),
        };
        signed.push(out.clone());
        Ok(out)
    }
}
