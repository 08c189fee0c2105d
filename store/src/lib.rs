//! Storage for the wallet's local cache.
//!
//! Every backend (LMDB, in-memory for testing) implements the raw
//! [`KeyValueStore`] trait. [`WalletCache`] sits on top of it, owns the key
//! layout, and is the only place entity records are encoded or decoded.

pub mod cache;
pub mod error;
pub mod keys;
pub mod kv;

pub use cache::{AddressIndex, WalletCache};
pub use error::StoreError;
pub use keys::CacheKey;
pub use kv::KeyValueStore;
