// crates/tidemark-core/src/event.rs
//
// Stake events: the vesting contract's historical delegate/undelegate/
// redelegate actions, as reported by the indexer.
//
// Events are immutable and append-only. The ordering key is `block_height`,
// tie-broken by arrival order; the engine sorts with a stable sort so equal
// heights keep their reported order.

use cosmwasm_std::Uint128;
use serde::{Deserialize, Serialize};

/// One staking action taken by the vesting contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeEvent {
    /// Height of the block that included the action.
    pub block_height: u64,
    /// Block time in Unix milliseconds.
    pub block_time_unix_ms: u64,
    /// What the action did and which validators it touched.
    #[serde(flatten)]
    pub kind: StakeEventKind,
}

/// The staking action itself.
///
/// `Delegate` and `Redelegate` (destination side) increase the balance staked
/// with a validator; `Undelegate` and `Redelegate` (source side) decrease it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StakeEventKind {
    /// Tokens bonded to `validator`.
    Delegate { validator: String, amount: Uint128 },
    /// Tokens unbonded from `validator`; subject to the unbonding window.
    Undelegate { validator: String, amount: Uint128 },
    /// Tokens moved between validators; the source side is subject to the
    /// unbonding window like an undelegation.
    #[serde(rename_all = "camelCase")]
    Redelegate {
        from_validator: String,
        to_validator: String,
        amount: Uint128,
    },
}

impl StakeEvent {
    /// The amount this event adds to the balance staked with `validator`,
    /// if any.
    pub fn bonds_to(&self, validator: &str) -> Option<Uint128> {
        match &self.kind {
            StakeEventKind::Delegate {
                validator: v,
                amount,
            } if v == validator => Some(*amount),
            StakeEventKind::Redelegate {
                to_validator,
                amount,
                ..
            } if to_validator == validator => Some(*amount),
            _ => None,
        }
    }

    /// The amount this event removes from the balance staked with
    /// `validator`, if any. These are the amounts that enter the unbonding
    /// window.
    pub fn unbonds_from(&self, validator: &str) -> Option<Uint128> {
        match &self.kind {
            StakeEventKind::Undelegate {
                validator: v,
                amount,
            } if v == validator => Some(*amount),
            StakeEventKind::Redelegate {
                from_validator,
                amount,
                ..
            } if from_validator == validator => Some(*amount),
            _ => None,
        }
    }

    /// Whether this event touches `validator` on either side.
    pub fn involves(&self, validator: &str) -> bool {
        self.bonds_to(validator).is_some() || self.unbonds_from(validator).is_some()
    }
}
