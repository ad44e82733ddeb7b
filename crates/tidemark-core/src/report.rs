// crates/tidemark-core/src/report.rs
//
// Reconciliation output: per-validator slash legs with the amount still
// outstanding against the vesting contract.
//
// `unregistered_amount` is signed. A negative value means the contract has
// more registered for a slash leg than the replay attributes to it — a
// data-integrity mismatch that is surfaced, never clamped.

use chrono::{DateTime, Utc};
use cosmwasm_std::{Int128, Uint128};
use serde::{Deserialize, Serialize};

/// One leg (staked or unbonding) of a slash attributed to the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingValidatorSlash {
    /// Registration block time in Unix milliseconds.
    pub time_ms: u64,
    /// Amount of this leg actually slashed, per the replay.
    pub amount: Uint128,
    /// `amount` minus the sum of matching on-chain registrations.
    pub unregistered_amount: Int128,
    /// Whether this leg covers amounts that were mid-unbonding.
    pub during_unbonding: bool,
}

impl VestingValidatorSlash {
    /// The portion of `amount` already registered on-chain. `None` only if
    /// `amount` exceeds the signed range.
    pub fn registered_amount(&self) -> Option<Int128> {
        Int128::try_from(self.amount)
            .ok()?
            .checked_sub(self.unregistered_amount)
            .ok()
    }

    /// Registration time for display.
    pub fn registered_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.time_ms as i64)
    }
}

/// All slash legs attributed to one validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestingValidatorWithSlashes {
    pub validator_operator_address: String,
    pub slashes: Vec<VestingValidatorSlash>,
}

impl VestingValidatorWithSlashes {
    /// Signed sum of outstanding amounts across all legs.
    pub fn total_unregistered(&self) -> Int128 {
        self.slashes
            .iter()
            .fold(Int128::zero(), |total, leg| {
                total.saturating_add(leg.unregistered_amount)
            })
    }

    /// Whether any leg still has a strictly positive outstanding amount,
    /// i.e. whether a "register slash" action should be offered.
    pub fn has_unregistered(&self) -> bool {
        self.slashes
            .iter()
            .any(|leg| leg.unregistered_amount > Int128::zero())
    }
}
