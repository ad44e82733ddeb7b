// crates/tidemark-engine/src/unbonding.rs
//
// Unbonding-window membership: how much of the contract's balance was
// mid-unbonding, and still slashable, when a slash was registered.
//
// An undelegation (or the source side of a redelegation) is at risk for a
// slash iff it happened at or after the infraction, at or before the
// registration, and its unbonding period had not yet completed at the
// registration instant.

use cosmwasm_std::Uint128;
use tidemark_core::{StakeEvent, TidemarkError, ValidatorSlash};

/// Whether `event` is an unbond from `validator` still inside the unbonding
/// window at the slash's registration instant.
fn at_risk(
    event: &StakeEvent,
    slash: &ValidatorSlash,
    unbonding_duration_seconds: u64,
) -> bool {
    if event.block_height < slash.infraction_block_height
        || event.block_height > slash.registered_block_height
    {
        return false;
    }
    // Widen before adding: timestamps near the u64 edge must not wrap.
    let completes_at_ms =
        event.block_time_unix_ms as u128 + unbonding_duration_seconds as u128 * 1_000;
    completes_at_ms > slash.registered_block_time_unix_ms as u128
}

/// Sum the unbonding amounts from `validator` at risk for `slash`.
/// Returns zero when nothing was mid-unbonding.
pub fn unstaking_at_risk(
    events: &[StakeEvent],
    slash: &ValidatorSlash,
    unbonding_duration_seconds: u64,
    validator: &str,
) -> Result<Uint128, TidemarkError> {
    events
        .iter()
        .filter(|event| at_risk(event, slash, unbonding_duration_seconds))
        .filter_map(|event| event.unbonds_from(validator))
        .try_fold(Uint128::zero(), |total, amount| {
            Ok(total.checked_add(amount)?)
        })
}
