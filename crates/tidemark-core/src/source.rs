// crates/tidemark-core/src/source.rs

use async_trait::async_trait;

use crate::error::TidemarkError;
use crate::event::StakeEvent;
use crate::registration::SlashRegistration;
use crate::slash::ValidatorSlashHistory;

/// Trait for fetching a vesting contract's staking history.
///
/// Implemented by the indexer/chain-query collaborator (and by
/// `tidemark_engine::HistorySnapshot` for fixtures). The engine treats every
/// accessor's result as a read-only snapshot taken at one instant; mixing
/// snapshots from different instants is the caller's defect.
#[async_trait]
pub trait StakeHistorySource: Send + Sync {
    /// The contract's full delegate/undelegate/redelegate history.
    /// Not required to be pre-sorted.
    async fn stake_events(&self) -> Result<Vec<StakeEvent>, TidemarkError>;

    /// Slash amounts already acknowledged by the vesting contract.
    async fn slash_registrations(&self) -> Result<Vec<SlashRegistration>, TidemarkError>;

    /// Per-validator slashing-module history.
    async fn validator_slashes(&self) -> Result<Vec<ValidatorSlashHistory>, TidemarkError>;

    /// The staking module's unbonding duration, in seconds.
    async fn unbonding_duration_seconds(&self) -> Result<u64, TidemarkError>;
}
