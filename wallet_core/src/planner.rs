//! Vote diff planning.
//!
//! Turns the cached vote set of an account and a desired final vote set into
//! the ordered vote/unvote assertions that get there, batched per
//! transaction. Additions come first in target order, then removals in
//! current order.

use std::collections::HashSet;

use thiserror::Error;

use dpos_store::{KeyValueStore, StoreError, WalletCache};
use dpos_types::params::{MAX_VOTES, MAX_VOTES_PER_TRANSACTION};
use dpos_types::{Address, PublicKey, VoteBatch, VoteDiffAssertion, VoteDirection, VotedDelegate};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cannot vote for {requested} delegates, at most {max} allowed")]
    TooManyVotes { requested: usize, max: usize },

    #[error("cannot read cached votes: {0}")]
    Store(#[from] StoreError),
}

/// Plan the batches that move `address` from its cached vote set to `target`.
///
/// Reads `voted-<address>` and nothing else; an account with no cached vote
/// set is treated as voting for nobody.
pub fn plan_vote_diff<S: KeyValueStore>(
    cache: &WalletCache<S>,
    address: &Address,
    target: &[VotedDelegate],
) -> Result<Vec<VoteBatch>, PlanError> {
    let current = cache.voted_delegates(address)?.unwrap_or_default();
    let batches = diff_votes(&current, target)?;
    tracing::debug!(
        %address,
        current = current.len(),
        target = target.len(),
        batches = batches.len(),
        "planned vote diff"
    );
    Ok(batches)
}

/// The pure part of [`plan_vote_diff`].
pub fn diff_votes(
    current: &[VotedDelegate],
    target: &[VotedDelegate],
) -> Result<Vec<VoteBatch>, PlanError> {
    let current = dedup_by_key(current);
    let target = dedup_by_key(target);

    if target.len() > MAX_VOTES {
        return Err(PlanError::TooManyVotes {
            requested: target.len(),
            max: MAX_VOTES,
        });
    }

    let current_keys: HashSet<&PublicKey> = current.iter().map(|d| &d.public_key).collect();
    let mut retained: HashSet<&PublicKey> = HashSet::new();
    let mut assertions = Vec::new();

    for delegate in &target {
        if current_keys.contains(&delegate.public_key) {
            retained.insert(&delegate.public_key);
        } else {
            assertions.push(VoteDiffAssertion::new(
                (*delegate).clone(),
                VoteDirection::Add,
            ));
        }
    }
    for delegate in &current {
        if !retained.contains(&delegate.public_key) {
            assertions.push(VoteDiffAssertion::new(
                (*delegate).clone(),
                VoteDirection::Remove,
            ));
        }
    }

    Ok(assertions
        .chunks(MAX_VOTES_PER_TRANSACTION)
        .map(<[VoteDiffAssertion]>::to_vec)
        .collect())
}

/// Keep the first delegate seen for each public key.
fn dedup_by_key(delegates: &[VotedDelegate]) -> Vec<&VotedDelegate> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(delegates.len());
    for delegate in delegates {
        if seen.insert(&delegate.public_key) {
            out.push(delegate);
        }
    }
    out
}
