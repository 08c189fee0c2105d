//! Typed access to the wallet cache.
//!
//! Each entity is encoded with `bincode` under its own key (see
//! [`crate::keys`]); nothing polymorphic is ever stored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use dpos_types::{Account, Address, DelegateInfo, Transaction, VirtualLedger, VotedDelegate};

use crate::keys::CacheKey;
use crate::kv::KeyValueStore;
use crate::StoreError;

/// The set of every address the wallet has cached, in the order the
/// addresses were first added.
///
/// Uniqueness is enforced on insert; the backing sequence never holds the
/// same address twice.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressIndex(Vec<Address>);

impl AddressIndex {
    /// Returns `true` if the address was not already present.
    pub fn insert(&mut self, address: Address) -> bool {
        if self.contains(&address) {
            return false;
        }
        self.0.push(address);
        true
    }

    /// Returns `true` if the address was present.
    pub fn remove(&mut self, address: &Address) -> bool {
        let before = self.0.len();
        self.0.retain(|a| a != address);
        self.0.len() != before
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains(address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}

/// Typed cache over a raw [`KeyValueStore`].
pub struct WalletCache<S> {
    store: S,
    /// Serializes read-modify-write of the address index.
    index_lock: Mutex<()>,
}

impl<S: KeyValueStore> WalletCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            index_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: CacheKey<'_>) -> Result<Option<T>, StoreError> {
        let key = key.to_string();
        match self.store.get(&key)? {
            Some(bytes) => bincode::deserialize(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Corruption(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: CacheKey<'_>, value: &T) -> Result<(), StoreError> {
        let bytes = bincode::serialize(value)?;
        self.store.put(&key.to_string(), &bytes)
    }

    fn remove(&self, key: CacheKey<'_>) -> Result<(), StoreError> {
        self.store.delete(&key.to_string())
    }

    // ── Account record ──────────────────────────────────────────────────

    /// The bare account record, without satellite data.
    pub fn account(&self, address: &Address) -> Result<Option<Account>, StoreError> {
        self.read(CacheKey::Account(address))
    }

    pub fn put_account(&self, account: &Account) -> Result<(), StoreError> {
        self.write(CacheKey::Account(&account.address), account)
    }

    /// The account record with transactions, username, delegate and virtual
    /// ledger filled in from their own keys.
    pub fn hydrated_account(&self, address: &Address) -> Result<Option<Account>, StoreError> {
        let Some(mut account) = self.account(address)? else {
            return Ok(None);
        };
        account.transactions = self.transactions(address)?;
        account.username = self.username(address)?;
        account.delegate = self.delegate(address)?;
        account.virtual_ledger = self.virtual_ledger(address)?;
        Ok(Some(account))
    }

    /// Delete the account record and every satellite key.
    pub fn delete_account_data(&self, address: &Address) -> Result<(), StoreError> {
        self.remove(CacheKey::Account(address))?;
        for key in CacheKey::satellites(address) {
            self.remove(key)?;
        }
        Ok(())
    }

    // ── Satellites ──────────────────────────────────────────────────────

    pub fn transactions(&self, address: &Address) -> Result<Option<Vec<Transaction>>, StoreError> {
        self.read(CacheKey::Transactions(address))
    }

    /// Replace the cached history for `address`.
    pub fn put_transactions(
        &self,
        address: &Address,
        transactions: &[Transaction],
    ) -> Result<(), StoreError> {
        self.write(CacheKey::Transactions(address), transactions)
    }

    pub fn username(&self, address: &Address) -> Result<Option<String>, StoreError> {
        self.read(CacheKey::Username(address))
    }

    pub fn put_username(&self, address: &Address, username: &str) -> Result<(), StoreError> {
        self.write(CacheKey::Username(address), username)
    }

    pub fn delegate(&self, address: &Address) -> Result<Option<DelegateInfo>, StoreError> {
        self.read(CacheKey::Delegate(address))
    }

    pub fn put_delegate(&self, delegate: &DelegateInfo) -> Result<(), StoreError> {
        self.write(CacheKey::Delegate(&delegate.address), delegate)
    }

    pub fn virtual_ledger(&self, address: &Address) -> Result<Option<VirtualLedger>, StoreError> {
        self.read(CacheKey::Virtual(address))
    }

    pub fn put_virtual_ledger(
        &self,
        address: &Address,
        ledger: &VirtualLedger,
    ) -> Result<(), StoreError> {
        self.write(CacheKey::Virtual(address), ledger)
    }

    pub fn clear_virtual_ledger(&self, address: &Address) -> Result<(), StoreError> {
        self.remove(CacheKey::Virtual(address))
    }

    pub fn passphrases(
        &self,
        address: &Address,
    ) -> Result<(Option<String>, Option<String>), StoreError> {
        Ok((
            self.read(CacheKey::Passphrase(address))?,
            self.read(CacheKey::SecondPassphrase(address))?,
        ))
    }

    /// Store both passphrases; a `None` second passphrase clears any old one.
    pub fn put_passphrases(
        &self,
        address: &Address,
        passphrase: &str,
        second: Option<&str>,
    ) -> Result<(), StoreError> {
        self.write(CacheKey::Passphrase(address), passphrase)?;
        match second {
            Some(second) => self.write(CacheKey::SecondPassphrase(address), second),
            None => self.remove(CacheKey::SecondPassphrase(address)),
        }
    }

    pub fn clear_passphrases(&self, address: &Address) -> Result<(), StoreError> {
        self.remove(CacheKey::Passphrase(address))?;
        self.remove(CacheKey::SecondPassphrase(address))
    }

    pub fn voted_delegates(&self, address: &Address) -> Result<Option<Vec<VotedDelegate>>, StoreError> {
        self.read(CacheKey::Voted(address))
    }

    /// Replace the cached vote set for `address`.
    pub fn put_voted_delegates(
        &self,
        address: &Address,
        delegates: &[VotedDelegate],
    ) -> Result<(), StoreError> {
        self.write(CacheKey::Voted(address), delegates)
    }

    // ── Address index ───────────────────────────────────────────────────

    pub fn addresses(&self) -> Result<AddressIndex, StoreError> {
        Ok(self.read(CacheKey::Addresses)?.unwrap_or_default())
    }

    /// Add `address` to the index. Returns `true` if it was new.
    pub fn index_address(&self, address: &Address) -> Result<bool, StoreError> {
        self.update_index(|index| index.insert(address.clone()))
    }

    /// Remove `address` from the index. Returns `true` if it was present.
    pub fn unindex_address(&self, address: &Address) -> Result<bool, StoreError> {
        self.update_index(|index| index.remove(address))
    }

    fn update_index(&self, f: impl FnOnce(&mut AddressIndex) -> bool) -> Result<bool, StoreError> {
        let _guard = self
            .index_lock
            .lock()
            .map_err(|_| StoreError::Backend("address index lock poisoned".to_string()))?;
        let mut index = self.addresses()?;
        let changed = f(&mut index);
        if changed {
            self.write(CacheKey::Addresses, &index)?;
            tracing::debug!(addresses = index.len(), "address index updated");
        }
        Ok(changed)
    }
}
