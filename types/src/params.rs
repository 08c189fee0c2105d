//! Protocol constants the wallet must replicate to fail fast.
//!
//! These are fixed by the network, not configurable.

/// Maximum vote/unvote assertions carried by a single vote transaction.
pub const MAX_VOTES_PER_TRANSACTION: usize = 33;

/// Maximum number of delegates an account may vote for at once.
pub const MAX_VOTES: usize = 101;

/// Network epoch as Unix seconds: 2016-05-24T17:00:00Z.
pub const NETWORK_EPOCH: u64 = 1_464_109_200;

/// Smallest units per whole coin.
pub const UNITS_PER_COIN: u64 = 100_000_000;

/// Number of fractional digits in the display form.
pub const UNIT_DECIMALS: usize = 8;

/// Fee charged on a transfer.
pub const SEND_FEE: u64 = 10_000_000;

/// Balance required to register as a delegate (25 coins).
pub const DELEGATE_REGISTRATION_MIN_BALANCE: u64 = 25 * UNITS_PER_COIN;

/// Balance required to cast a vote (1 coin).
pub const VOTE_MIN_BALANCE: u64 = UNITS_PER_COIN;

/// Default page size for transaction history.
pub const DEFAULT_TRANSACTION_LIMIT: u32 = 100;
