// crates/tidemark-engine/src/snapshot.rs
//
// An owned, serializable bundle of the four reconciliation inputs.
//
// Implements `StakeHistorySource`, so indexer responses can be persisted and
// replayed byte-for-byte: capture once, reconcile anywhere.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tidemark_core::{
    SlashRegistration, StakeEvent, StakeHistorySource, TidemarkError, ValidatorSlashHistory,
};

/// A point-in-time capture of everything `reconcile` needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub stake_events: Vec<StakeEvent>,
    pub slash_registrations: Vec<SlashRegistration>,
    pub validator_slashes: Vec<ValidatorSlashHistory>,
    pub unbonding_duration_seconds: u64,
}

impl HistorySnapshot {
    /// Deserialize a snapshot previously captured with [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, TidemarkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the snapshot for persistence.
    pub fn to_json(&self) -> Result<String, TidemarkError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[async_trait]
impl StakeHistorySource for HistorySnapshot {
    async fn stake_events(&self) -> Result<Vec<StakeEvent>, TidemarkError> {
        Ok(self.stake_events.clone())
    }

    async fn slash_registrations(&self) -> Result<Vec<SlashRegistration>, TidemarkError> {
        Ok(self.slash_registrations.clone())
    }

    async fn validator_slashes(&self) -> Result<Vec<ValidatorSlashHistory>, TidemarkError> {
        Ok(self.validator_slashes.clone())
    }

    async fn unbonding_duration_seconds(&self) -> Result<u64, TidemarkError> {
        Ok(self.unbonding_duration_seconds)
    }
}
