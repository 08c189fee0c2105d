//! LMDB environment setup and the `KeyValueStore` implementation.

use std::path::Path;
use std::sync::Arc;

use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};

use dpos_store::{KeyValueStore, StoreError};

use crate::LmdbError;

const CACHE_DB: &str = "wallet_cache";
const MAX_DBS: u32 = 4;

/// Wraps the LMDB environment and the cache database handle.
#[derive(Clone)]
pub struct LmdbEnvironment {
    env: Arc<Env>,
    cache_db: Database<Str, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment in the directory `path`.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per process per directory and
        // the memory map is never modified outside of LMDB transactions.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(MAX_DBS)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let cache_db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some(CACHE_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self {
            env: Arc::new(env),
            cache_db,
        })
    }

    /// Flush dirty pages to disk.
    pub fn force_sync(&self) -> Result<(), LmdbError> {
        self.env.force_sync()?;
        Ok(())
    }

    /// Number of keys in the cache database.
    pub fn len(&self) -> Result<u64, LmdbError> {
        let rtxn = self.env.read_txn()?;
        Ok(self.cache_db.len(&rtxn)?)
    }

    pub fn is_empty(&self) -> Result<bool, LmdbError> {
        Ok(self.len()? == 0)
    }
}

impl KeyValueStore for LmdbEnvironment {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .cache_db
            .get(&rtxn, key)
            .map_err(LmdbError::from)?
            .map(<[u8]>::to_vec);
        Ok(val)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.cache_db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.cache_db
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_store::WalletCache;
    use dpos_types::{Account, Address};

    fn temp_env() -> (tempfile::TempDir, LmdbEnvironment) {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).expect("open env");
        (dir, env)
    }

    #[test]
    fn put_get_delete() {
        let (_dir, env) = temp_env();
        assert_eq!(env.get("k").unwrap(), None);
        env.put("k", b"value").unwrap();
        assert_eq!(env.get("k").unwrap().as_deref(), Some(&b"value"[..]));
        assert!(env.contains("k").unwrap());
        env.delete("k").unwrap();
        assert_eq!(env.get("k").unwrap(), None);
    }

    #[test]
    fn deleting_missing_key_is_ok() {
        let (_dir, env) = temp_env();
        env.delete("never-written").unwrap();
        assert!(env.is_empty().unwrap());
    }

    #[test]
    fn typed_cache_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("temp dir");
        let address = Address::parse("AUexKjGtgsSpVzPLs6jNMM6vJ6znEVTQWK").unwrap();
        {
            let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).unwrap();
            let cache = WalletCache::new(env.clone());
            let mut account = Account::placeholder(address.clone());
            account.balance = 42;
            cache.put_account(&account).unwrap();
            cache.index_address(&address).unwrap();
            env.force_sync().unwrap();
        }

        let env = LmdbEnvironment::open(dir.path(), 16 * 1024 * 1024).unwrap();
        let cache = WalletCache::new(env);
        let account = cache.account(&address).unwrap().unwrap();
        assert_eq!(account.balance, 42);
        assert!(cache.addresses().unwrap().contains(&address));
    }
}
