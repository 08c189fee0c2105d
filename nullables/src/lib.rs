//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the wallet (storage, peer, signer) sits
//! behind a trait. This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be scripted and inspected programmatically
//! - Never touch the filesystem or network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod peer;
pub mod signer;
pub mod store;

pub use peer::NullPeer;
pub use signer::NullSigner;
pub use store::NullStore;
