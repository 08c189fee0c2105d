//! Wallet core library for a DPoS network.
//!
//! Provides everything a wallet front end needs:
//! - Account cache reconciliation against a remote peer ([`AccountService`])
//! - Vote diff planning in protocol-sized batches ([`planner`])
//! - Transaction building in front of an external signer
//! - Sponsor delegate discovery
//! - Stored passphrases and local virtual ledger folders

pub mod config;
pub mod error;
pub mod folders;
pub mod passphrases;
pub mod planner;
pub mod reconciler;
pub mod sponsors;
pub mod transaction_builder;

pub use config::WalletConfig;
pub use error::WalletError;
pub use planner::{diff_votes, plan_vote_diff, PlanError};
pub use reconciler::AccountService;
pub use sponsors::{SponsorFailure, SponsorReport};
pub use transaction_builder::{Passphrases, TransactionBuilder};
