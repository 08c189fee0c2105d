//! Transaction building helpers.
//!
//! Every builder runs the client-side checks (recipient format, sender known,
//! balance covers amount and fee) before handing the payload to the signer,
//! then checks that the signing key belongs to the sender.

use dpos_peer::PeerApi;
use dpos_store::{KeyValueStore, WalletCache};
use dpos_transactions::delegate::DelegateRegistrationTx;
use dpos_transactions::send::TransferTx;
use dpos_transactions::validation::validate_transaction;
use dpos_transactions::vote::VoteTx;
use dpos_transactions::{
    SignedTransaction, SignerError, TransactionSigner, UnsignedTransaction, VOTE_FEE,
};
use dpos_types::params::{DELEGATE_REGISTRATION_MIN_BALANCE, SEND_FEE, VOTE_MIN_BALANCE};
use dpos_types::{Account, Address, VoteDiffAssertion, VotedDelegate};

use crate::planner::plan_vote_diff;
use crate::reconciler::AccountService;
use crate::WalletError;

/// The passphrases that authorize a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Passphrases<'a> {
    pub first: &'a str,
    pub second: Option<&'a str>,
}

impl<'a> Passphrases<'a> {
    pub fn new(first: &'a str, second: Option<&'a str>) -> Self {
        Self { first, second }
    }
}

/// Builds signed transactions for accounts in the cache.
pub struct TransactionBuilder<'a, S, G> {
    cache: &'a WalletCache<S>,
    signer: &'a G,
}

impl<'a, S: KeyValueStore, G: TransactionSigner> TransactionBuilder<'a, S, G> {
    pub fn new(cache: &'a WalletCache<S>, signer: &'a G) -> Self {
        Self { cache, signer }
    }

    /// Build a transfer of `amount` to `recipient`.
    pub fn transfer(
        &self,
        sender: &Address,
        recipient: &str,
        amount: u64,
        vendor_field: Option<&str>,
        passphrases: Passphrases<'_>,
    ) -> Result<SignedTransaction, WalletError> {
        let recipient = Address::parse(recipient.trim())
            .map_err(|_| WalletError::InvalidAddress(recipient.to_string()))?;
        let account = self.sender(sender)?;
        let needed = amount.saturating_add(SEND_FEE);
        require_balance(&account, needed)?;

        let tx = UnsignedTransaction::Transfer(TransferTx {
            recipient_id: recipient,
            amount,
            vendor_field: vendor_field.map(str::to_string),
        });
        self.sign(&account, tx, passphrases)
    }

    /// Register the sender as a delegate named `username`.
    pub fn delegate_registration(
        &self,
        sender: &Address,
        username: &str,
        passphrases: Passphrases<'_>,
    ) -> Result<SignedTransaction, WalletError> {
        let account = self.sender(sender)?;
        require_balance(&account, DELEGATE_REGISTRATION_MIN_BALANCE)?;
        let tx = UnsignedTransaction::DelegateRegistration(DelegateRegistrationTx::new(username));
        self.sign(&account, tx, passphrases)
    }

    /// Build one vote transaction carrying `batch`.
    pub fn vote(
        &self,
        sender: &Address,
        batch: &[VoteDiffAssertion],
        passphrases: Passphrases<'_>,
    ) -> Result<SignedTransaction, WalletError> {
        let account = self.sender(sender)?;
        require_balance(&account, VOTE_MIN_BALANCE)?;
        let tx = UnsignedTransaction::Vote(VoteTx::from_batch(batch));
        self.sign(&account, tx, passphrases)
    }

    /// Plan the move from the cached vote set to `target` and build one vote
    /// transaction per batch, in order.
    ///
    /// The balance must cover the fees of every batch before anything is
    /// signed.
    pub fn build_vote_transactions(
        &self,
        sender: &Address,
        target: &[VotedDelegate],
        passphrases: Passphrases<'_>,
    ) -> Result<Vec<SignedTransaction>, WalletError> {
        let batches = plan_vote_diff(self.cache, sender, target)?;
        if !batches.is_empty() {
            let account = self.sender(sender)?;
            let total_fees = (batches.len() as u64).saturating_mul(VOTE_FEE);
            require_balance(&account, total_fees)?;
        }
        batches
            .iter()
            .map(|batch| self.vote(sender, batch, passphrases))
            .collect()
    }

    fn sender(&self, sender: &Address) -> Result<Account, WalletError> {
        self.cache
            .account(sender)?
            .ok_or_else(|| WalletError::AccountNotCached(sender.clone()))
    }

    fn sign(
        &self,
        account: &Account,
        tx: UnsignedTransaction,
        passphrases: Passphrases<'_>,
    ) -> Result<SignedTransaction, WalletError> {
        validate_transaction(&tx)?;
        if account.second_signature && passphrases.second.is_none() {
            return Err(SignerError::SecondPassphraseRequired.into());
        }
        let sender = &account.address;
        let mut signed = self
            .signer
            .sign(&tx, passphrases.first, passphrases.second)?;

        let signer_address = self
            .signer
            .address_from_public_key(&signed.sender_public_key)?;
        if signer_address != *sender {
            tracing::warn!(%sender, %signer_address, "passphrase does not control sender");
            return Err(WalletError::PassphraseMismatch(sender.clone()));
        }
        signed.sender_id = Some(signer_address);
        tracing::debug!(%sender, id = %signed.id, tx_type = %signed.tx_type, "transaction signed");
        Ok(signed)
    }
}

impl<P: PeerApi, S: KeyValueStore> AccountService<P, S> {
    /// A builder over this service's cache.
    pub fn transaction_builder<'a, G: TransactionSigner>(
        &'a self,
        signer: &'a G,
    ) -> TransactionBuilder<'a, S, G> {
        TransactionBuilder::new(self.cache(), signer)
    }
}

fn require_balance(account: &Account, needed: u64) -> Result<(), WalletError> {
    if account.balance < needed {
        return Err(WalletError::InsufficientBalance {
            needed,
            available: account.balance,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpos_nullables::{NullSigner, NullStore};
    use dpos_transactions::TransactionError;
    use dpos_types::params::UNITS_PER_COIN;
    use dpos_types::{PublicKey, TransactionType};

    const PASS: &str = "alice passphrase";

    struct Fixture {
        cache: WalletCache<NullStore>,
        signer: NullSigner,
        alice: Address,
    }

    fn fixture(balance: u64) -> Fixture {
        let alice = Address::parse("Aalice").unwrap();
        let signer = NullSigner::new();
        signer.register(PASS, alice.clone(), PublicKey::from_bytes(&[2; 33]));
        signer.register(
            "bob passphrase",
            Address::parse("Bbob").unwrap(),
            PublicKey::from_bytes(&[3; 33]),
        );
        let cache = WalletCache::new(NullStore::new());
        let mut account = Account::placeholder(alice.clone());
        account.balance = balance;
        cache.put_account(&account).unwrap();
        Fixture {
            cache,
            signer,
            alice,
        }
    }

    fn delegate(n: u8) -> VotedDelegate {
        VotedDelegate {
            username: format!("d{n}"),
            address: Address::parse(format!("D{n}").replace('0', "o")).unwrap(),
            public_key: PublicKey::from_bytes(&[n; 33]),
        }
    }

    #[test]
    fn transfer_sets_sender_id() {
        let f = fixture(UNITS_PER_COIN);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let tx = builder
            .transfer(&f.alice, "Bbob", 1000, Some("rent"), Passphrases::new(PASS, None))
            .unwrap();
        assert_eq!(tx.tx_type, TransactionType::Send);
        assert_eq!(tx.fee, SEND_FEE);
        assert_eq!(tx.sender_id, Some(f.alice.clone()));
        assert_eq!(tx.vendor_field.as_deref(), Some("rent"));
    }

    #[test]
    fn transfer_rejects_bad_recipient_first() {
        let f = fixture(0);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.transfer(&f.alice, "not an address!", 1, None, Passphrases::new(PASS, None)),
            Err(WalletError::InvalidAddress(_))
        ));
        assert!(f.signer.signed().is_empty());
    }

    #[test]
    fn transfer_must_cover_fee() {
        let f = fixture(1000 + SEND_FEE - 1);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let err = builder
            .transfer(&f.alice, "Bbob", 1000, None, Passphrases::new(PASS, None))
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientBalance { needed, .. } if needed == 1000 + SEND_FEE
        ));
    }

    #[test]
    fn zero_transfer_is_rejected_before_signing() {
        let f = fixture(UNITS_PER_COIN);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.transfer(&f.alice, "Bbob", 0, None, Passphrases::new(PASS, None)),
            Err(WalletError::Transaction(TransactionError::ZeroAmount))
        ));
        assert!(f.signer.signed().is_empty());
    }

    #[test]
    fn unknown_sender_is_reported() {
        let f = fixture(UNITS_PER_COIN);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let stranger = Address::parse("Cstranger").unwrap();
        assert!(matches!(
            builder.transfer(&stranger, "Bbob", 1, None, Passphrases::new(PASS, None)),
            Err(WalletError::AccountNotCached(_))
        ));
    }

    #[test]
    fn foreign_passphrase_is_a_mismatch() {
        let f = fixture(UNITS_PER_COIN);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.transfer(&f.alice, "Bbob", 1, None, Passphrases::new("bob passphrase", None)),
            Err(WalletError::PassphraseMismatch(_))
        ));
    }

    #[test]
    fn second_signature_accounts_need_the_second_passphrase() {
        let f = fixture(UNITS_PER_COIN);
        let mut account = f.cache.account(&f.alice).unwrap().unwrap();
        account.second_signature = true;
        f.cache.put_account(&account).unwrap();

        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.transfer(&f.alice, "Bbob", 1, None, Passphrases::new(PASS, None)),
            Err(WalletError::Signing(SignerError::SecondPassphraseRequired))
        ));
        let tx = builder
            .transfer(&f.alice, "Bbob", 1, None, Passphrases::new(PASS, Some("second")))
            .unwrap();
        assert!(tx.sign_signature.is_some());
    }

    #[test]
    fn delegate_registration_needs_25_coins() {
        let f = fixture(DELEGATE_REGISTRATION_MIN_BALANCE - 1);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.delegate_registration(&f.alice, "alice", Passphrases::new(PASS, None)),
            Err(WalletError::InsufficientBalance { .. })
        ));

        let f = fixture(DELEGATE_REGISTRATION_MIN_BALANCE);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let tx = builder
            .delegate_registration(&f.alice, "alice", Passphrases::new(PASS, Some("second")))
            .unwrap();
        assert_eq!(tx.asset.delegate.unwrap().username, "alice");
        assert!(tx.sign_signature.is_some());
    }

    #[test]
    fn vote_needs_one_coin() {
        let f = fixture(VOTE_MIN_BALANCE - 1);
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let batch = vec![VoteDiffAssertion::new(
            delegate(1),
            dpos_types::VoteDirection::Add,
        )];
        assert!(matches!(
            builder.vote(&f.alice, &batch, Passphrases::new(PASS, None)),
            Err(WalletError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn one_vote_transaction_per_batch() {
        let f = fixture(10 * UNITS_PER_COIN);
        f.cache
            .put_voted_delegates(&f.alice, &[delegate(200)])
            .unwrap();
        let target: Vec<_> = (1..=40).map(delegate).collect();
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let txs = builder
            .build_vote_transactions(&f.alice, &target, Passphrases::new(PASS, None))
            .unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].asset.votes.len(), 33);
        assert_eq!(txs[1].asset.votes.len(), 8);
        assert!(txs[1].asset.votes.last().unwrap().starts_with('-'));
        assert!(txs.iter().all(|t| t.tx_type == TransactionType::Vote));
    }

    #[test]
    fn balance_must_cover_every_vote_fee() {
        let f = fixture(UNITS_PER_COIN);
        let target: Vec<_> = (1..=40).map(delegate).collect();
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        let err = builder
            .build_vote_transactions(&f.alice, &target, Passphrases::new(PASS, None))
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::InsufficientBalance { needed, available }
                if needed == 2 * VOTE_FEE && available == UNITS_PER_COIN
        ));
        assert!(f.signer.signed().is_empty());
    }

    #[test]
    fn too_many_targets_builds_nothing() {
        let f = fixture(10 * UNITS_PER_COIN);
        let target: Vec<_> = (1..=102).map(delegate).collect();
        let builder = TransactionBuilder::new(&f.cache, &f.signer);
        assert!(matches!(
            builder.build_vote_transactions(&f.alice, &target, Passphrases::new(PASS, None)),
            Err(WalletError::Plan(crate::planner::PlanError::TooManyVotes { .. }))
        ));
        assert!(f.signer.signed().is_empty());
    }
}
