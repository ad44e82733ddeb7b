// crates/tidemark-core/src/slash.rs
//
// Validator slash records from the chain's slashing module.
//
// A slash is recorded at an infraction height and applied at a later
// registration height. `effective_fraction` already accounts for the
// compounding of earlier slashes on the staked balance; `slash_factor` is the
// raw per-slash fraction applied to currently-unbonding amounts, which are
// not subject to the same compounding.

use cosmwasm_std::{Decimal, Timestamp};
use serde::{Deserialize, Serialize};

/// One slash applied to a validator. Both fractions are in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSlash {
    /// Height of the block containing the misbehavior.
    pub infraction_block_height: u64,
    /// Height of the block at which the slash was applied.
    pub registered_block_height: u64,
    /// Time of the registration block in Unix milliseconds.
    pub registered_block_time_unix_ms: u64,
    /// Raw fraction removed from unbonding amounts by this slash.
    pub slash_factor: Decimal,
    /// Fraction of the current (already-compounded) staked balance removed.
    pub effective_fraction: Decimal,
}

impl ValidatorSlash {
    /// The registration instant as a nanosecond chain timestamp. This is the
    /// key the vesting contract stores registrations under.
    pub fn registered_at(&self) -> Timestamp {
        Timestamp::from_nanos(self.registered_block_time_unix_ms * 1_000_000)
    }
}

/// The slashing-module history for one validator, as reported by the indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorSlashHistory {
    /// Validator operator address (`...valoper...`).
    pub validator: String,
    pub slashes: Vec<ValidatorSlash>,
}
