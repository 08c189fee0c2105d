//! Accounts opened from a passphrase, and stored passphrases.

use dpos_peer::PeerApi;
use dpos_store::KeyValueStore;
use dpos_transactions::TransactionSigner;
use dpos_types::{Account, Address, VirtualLedger};

use crate::reconciler::AccountService;
use crate::WalletError;

impl<P: PeerApi, S: KeyValueStore> AccountService<P, S> {
    /// Open the account controlled by `passphrase`, fetching and caching it.
    pub async fn create_account<G: TransactionSigner>(
        &self,
        signer: &G,
        passphrase: &str,
    ) -> Result<Account, WalletError> {
        let address = signer.address_from_passphrase(passphrase)?;
        let account = self.fetch_account(&address).await?;
        self.ensure_virtual_ledger(&address)?;
        Ok(self.get_account(&address)?.unwrap_or(account))
    }

    /// Store the passphrases of `address`, or clear them when `passphrase`
    /// is `None`.
    ///
    /// The passphrase must derive to `address`. Storing also makes sure the
    /// account has a virtual ledger; clearing removes it.
    pub async fn save_passphrases<G: TransactionSigner>(
        &self,
        signer: &G,
        address: &Address,
        passphrase: Option<&str>,
        second_passphrase: Option<&str>,
    ) -> Result<Option<Account>, WalletError> {
        let Some(passphrase) = passphrase else {
            self.cache().clear_virtual_ledger(address)?;
            self.cache().clear_passphrases(address)?;
            tracing::debug!(%address, "passphrases cleared");
            return Ok(None);
        };

        if signer.address_from_passphrase(passphrase)? != *address {
            return Err(WalletError::PassphraseMismatch(address.clone()));
        }
        self.fetch_account(address).await?;
        self.ensure_virtual_ledger(address)?;
        self.cache()
            .put_passphrases(address, passphrase, second_passphrase)?;
        tracing::debug!(%address, second = second_passphrase.is_some(), "passphrases stored");
        self.get_account(address)
    }

    pub fn get_passphrases(
        &self,
        address: &Address,
    ) -> Result<(Option<String>, Option<String>), WalletError> {
        Ok(self.cache().passphrases(address)?)
    }

    /// The virtual ledger of the cached account controlled by `passphrase`.
    pub fn create_virtual<G: TransactionSigner>(
        &self,
        signer: &G,
        passphrase: &str,
    ) -> Result<VirtualLedger, WalletError> {
        let address = signer.address_from_passphrase(passphrase)?;
        if self.cache().account(&address)?.is_none() {
            return Err(WalletError::PassphraseMismatch(address));
        }
        self.ensure_virtual_ledger(&address)
    }

    pub(crate) fn ensure_virtual_ledger(&self, address: &Address) -> Result<VirtualLedger, WalletError> {
        if let Some(ledger) = self.cache().virtual_ledger(address)? {
            return Ok(ledger);
        }
        let ledger = VirtualLedger::new();
        self.cache().put_virtual_ledger(address, &ledger)?;
        Ok(ledger)
    }
}
