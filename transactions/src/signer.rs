//! The seam to key derivation and signing.
//!
//! Nothing in this workspace implements elliptic-curve cryptography; a
//! signer is supplied by the embedding application.

use dpos_types::{Address, PublicKey};

use crate::error::SignerError;
use crate::{SignedTransaction, UnsignedTransaction};

pub trait TransactionSigner: Send + Sync {
    /// Address controlled by `passphrase`.
    fn address_from_passphrase(&self, passphrase: &str) -> Result<Address, SignerError>;

    /// Address derived from a public key.
    fn address_from_public_key(&self, public_key: &PublicKey) -> Result<Address, SignerError>;

    /// Sign `tx`, with the second passphrase when the account has one.
    fn sign(
        &self,
        tx: &UnsignedTransaction,
        passphrase: &str,
        second_passphrase: Option<&str>,
    ) -> Result<SignedTransaction, SignerError>;
}
