//! Virtual ledger folders kept per address.

use dpos_peer::PeerApi;
use dpos_store::KeyValueStore;
use dpos_types::{Address, VirtualLedger};

use crate::reconciler::AccountService;
use crate::WalletError;

impl<P: PeerApi, S: KeyValueStore> AccountService<P, S> {
    /// Set the amount budgeted in `folder`, creating the folder if needed.
    pub fn set_to_folder(
        &self,
        address: &Address,
        folder: &str,
        amount: u64,
    ) -> Result<VirtualLedger, WalletError> {
        let mut ledger = self.ensure_virtual_ledger(address)?;
        ledger.set_amount(folder, amount);
        self.cache().put_virtual_ledger(address, &ledger)?;
        Ok(ledger)
    }

    /// Remove `folder`. Removing a missing folder leaves the ledger unchanged.
    pub fn delete_folder(&self, address: &Address, folder: &str) -> Result<VirtualLedger, WalletError> {
        let mut ledger = self.ensure_virtual_ledger(address)?;
        if ledger.remove(folder).is_some() {
            self.cache().put_virtual_ledger(address, &ledger)?;
        }
        Ok(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_nullables::{NullPeer, NullStore};
    use std::time::Duration;

    #[test]
    fn folders_persist() {
        let svc = AccountService::new(NullPeer::new(), NullStore::new(), Duration::from_secs(1));
        let a = Address::parse("Abudget").unwrap();

        svc.set_to_folder(&a, "rent", 500).unwrap();
        let ledger = svc.set_to_folder(&a, "food", 200).unwrap();
        assert_eq!(ledger.folders(), vec!["food", "rent"]);
        assert_eq!(ledger.total(), 700);

        let ledger = svc.delete_folder(&a, "rent").unwrap();
        assert_eq!(ledger.folders(), vec!["food"]);
        assert_eq!(svc.cache().virtual_ledger(&a).unwrap(), Some(ledger));

        let unchanged = svc.delete_folder(&a, "missing").unwrap();
        assert_eq!(unchanged.folders(), vec!["food"]);
    }
}
