//! LMDB storage backend for the DPoS wallet cache.
//!
//! Implements [`dpos_store::KeyValueStore`] using the `heed` LMDB bindings.
//! The whole cache lives in a single named database inside one environment.

pub mod environment;
pub mod error;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
