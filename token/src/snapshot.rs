//! Token snapshots: the complete persisted state of a token instance.
//!
//! A snapshot holds everything needed to resume: balances and supply, the
//! governed price, the proposal book (including its sequence counter), voter
//! records, the active epoch, the fee accumulator, the owner and the
//! parameters. The treasury is external, so only its reserve is recorded.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::VotableError;
use crate::token::VotableToken;
use votable_exchange::ExchangeEngine;
use votable_fees::FeeAccumulator;
use votable_governance::GovernanceEngine;
use votable_ledger::{AccountLedger, Ledger, Treasury, Vault};
use votable_types::{Clock, CurrencyAmount, Price, ProtocolParams, Timestamp};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSnapshot {
    /// Snapshot version for compatibility.
    pub version: u32,
    pub taken_at: Timestamp,
    pub params: ProtocolParams,
    pub ledger: Ledger,
    pub price: Price,
    pub fees: FeeAccumulator,
    pub exchange: ExchangeEngine,
    pub governance: GovernanceEngine,
    pub treasury_reserve: CurrencyAmount,
}

impl TokenSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, VotableError> {
        bincode::serialize(self).map_err(|e| VotableError::Storage(e.to_string()))
    }

    /// Decode and check a snapshot. Corrupt or inconsistent input is a storage error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VotableError> {
        let snapshot: Self =
            bincode::deserialize(bytes).map_err(|e| VotableError::Storage(e.to_string()))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Write the snapshot to a sibling temp file, then rename it over `path`,
    /// so an interrupted save never leaves a truncated state file behind.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), VotableError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let storage = |e: std::io::Error| VotableError::Storage(format!("{}: {e}", path.display()));

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(storage)?;
        staged.write_all(&bytes).map_err(storage)?;
        staged.as_file().sync_all().map_err(storage)?;
        staged.persist(path).map_err(|e| storage(e.error))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, VotableError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| VotableError::Storage(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    fn check(&self) -> Result<(), VotableError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(VotableError::Storage(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        if !self.ledger.is_consistent() {
            return Err(VotableError::Storage(
                "total supply does not match balances".into(),
            ));
        }
        if self.exchange.owner() != self.governance.owner() {
            return Err(VotableError::Storage("owner mismatch".into()));
        }
        self.params
            .validate()
            .map_err(|e| VotableError::Storage(e.to_string()))
    }
}

impl<T: Treasury, C: Clock> VotableToken<T, C> {
    /// Capture the full state at the clock's "now".
    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            version: SNAPSHOT_VERSION,
            taken_at: self.clock().now(),
            params: self.params().clone(),
            ledger: self.ledger().clone(),
            price: self.token_price(),
            fees: self.fees().clone(),
            exchange: self.exchange().clone(),
            governance: self.governance().clone(),
            treasury_reserve: self.treasury_balance(),
        }
    }

    /// Resume from a snapshot over an existing treasury.
    pub fn restore_with(
        snapshot: TokenSnapshot,
        treasury: T,
        clock: C,
    ) -> Result<Self, VotableError> {
        snapshot.check()?;
        tracing::info!(
            taken_at = %snapshot.taken_at,
            price = %snapshot.price,
            supply = %snapshot.ledger.total_supply(),
            "token restored"
        );
        Ok(Self::from_parts(
            snapshot.params,
            snapshot.ledger,
            snapshot.price,
            snapshot.fees,
            snapshot.exchange,
            snapshot.governance,
            treasury,
            clock,
        ))
    }
}

impl<C: Clock> VotableToken<Vault, C> {
    /// Resume from a snapshot with an in-memory vault holding the recorded reserve.
    pub fn restore(snapshot: TokenSnapshot, clock: C) -> Result<Self, VotableError> {
        let vault = Vault::with_reserve(snapshot.treasury_reserve);
        Self::restore_with(snapshot, vault, clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use votable_fees::FeeSchedule;
    use votable_types::{Address, ReferralChain};

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now(&self) -> Timestamp {
            Timestamp::new(self.0)
        }
    }

    fn owner() -> Address {
        Address::from_label("owner")
    }

    fn busy_token() -> VotableToken<Vault, FixedClock> {
        let mut token =
            VotableToken::new(owner(), ProtocolParams::default(), Vault::new(), FixedClock(10))
                .unwrap();
        let alice = Address::from_label("alice");
        token
            .buy(&alice, CurrencyAmount::new(1_000_000), &ReferralChain::empty())
            .unwrap();
        token.vote(&alice, 3, &ReferralChain::empty()).unwrap();
        token.vote(&owner(), 5, &ReferralChain::empty()).unwrap();
        token
    }

    #[test]
    fn restored_token_matches_the_original() {
        let token = busy_token();
        let snapshot = token.snapshot();
        let bytes = snapshot.to_bytes().unwrap();
        let restored = VotableToken::restore(TokenSnapshot::from_bytes(&bytes).unwrap(), FixedClock(20))
            .unwrap();

        assert_eq!(restored.total_supply(), token.total_supply());
        assert_eq!(restored.prices_list(), token.prices_list());
        assert_eq!(restored.amount_to_burn(), token.amount_to_burn());
        assert_eq!(restored.treasury_balance(), CurrencyAmount::new(1_000_000));
        assert_eq!(restored.current_epoch(), token.current_epoch());
        assert_eq!(restored.snapshot().governance, snapshot.governance);
    }

    #[test]
    fn sequence_counter_survives_a_restore() {
        let token = busy_token();
        let mut restored = VotableToken::restore(token.snapshot(), FixedClock(20)).unwrap();
        let receipt = restored.vote(&owner(), 11, &ReferralChain::empty()).unwrap();
        assert_eq!(receipt.first_seen_order, 2);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        let token = busy_token();
        token.snapshot().save_to(&path).unwrap();
        let loaded = TokenSnapshot::load_from(&path).unwrap();
        assert_eq!(loaded, token.snapshot());
    }

    #[test]
    fn saving_replaces_the_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.bin");
        std::fs::write(&path, b"stale").unwrap();

        let token = busy_token();
        token.snapshot().save_to(&path).unwrap();
        token.snapshot().save_to(&path).unwrap();

        assert_eq!(TokenSnapshot::load_from(&path).unwrap(), token.snapshot());
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("state.bin")]);
    }

    #[test]
    fn failed_save_keeps_the_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("state.bin");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();

        let err = busy_token().snapshot().save_to(&target).unwrap_err();
        assert!(matches!(err, VotableError::Storage(_)));
        assert!(target.join("keep").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn corrupt_bytes_are_a_storage_error() {
        let err = TokenSnapshot::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, VotableError::Storage(_)));
    }

    #[test]
    fn owner_mismatch_is_rejected() {
        let mut snapshot = busy_token().snapshot();
        snapshot.exchange = ExchangeEngine::new(Address::from_label("mallory"), FeeSchedule::new(100));
        let bytes = snapshot.to_bytes().unwrap();
        assert!(matches!(
            TokenSnapshot::from_bytes(&bytes),
            Err(VotableError::Storage(_))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut snapshot = busy_token().snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;
        assert!(VotableToken::restore(snapshot, FixedClock(0)).is_err());
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let err = TokenSnapshot::load_from("/nonexistent/state.bin").unwrap_err();
        assert!(matches!(err, VotableError::Storage(_)));
    }
}
