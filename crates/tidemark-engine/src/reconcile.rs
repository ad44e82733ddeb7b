// crates/tidemark-engine/src/reconcile.rs
//
// Registration reconciliation: the full per-validator pipeline, from raw
// histories to the list of slash legs with their outstanding amounts.
//
// For each slash the staked balance is replayed (balance), the mid-unbonding
// amount summed (unbonding), both fractions applied (attribution), and the
// result netted against the registrations the vesting contract already
// holds. A registered sum exceeding the computed amount yields a negative
// outstanding amount; it is logged and emitted as-is, never clamped, since
// clamping would hide either bad upstream data or a logic defect.

use cosmwasm_std::{Int128, Timestamp, Uint128};
use tidemark_core::{
    SlashRegistration, StakeEvent, StakeHistorySource, TidemarkError, ValidatorSlash,
    ValidatorSlashHistory, VestingValidatorSlash, VestingValidatorWithSlashes,
};

use crate::attribution::attribute;
use crate::balance::staked_balance_at;
use crate::unbonding::unstaking_at_risk;

/// Sums of the registrations matching one slash, split by leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RegisteredSums {
    staked: Uint128,
    unstaking: Uint128,
}

/// Sum the registrations recorded for `validator` at `registered_at`,
/// partitioned by leg. Duplicate registrations are summed as found; the
/// contract is the ground truth and this layer does not second-guess it.
fn registered_sums(
    registrations: &[SlashRegistration],
    validator: &str,
    registered_at: Timestamp,
) -> Result<RegisteredSums, TidemarkError> {
    let mut sums = RegisteredSums {
        staked: Uint128::zero(),
        unstaking: Uint128::zero(),
    };
    for registration in registrations {
        if !registration.matches(validator, registered_at) {
            continue;
        }
        if registration.during_unbonding {
            sums.unstaking = sums.unstaking.checked_add(registration.amount)?;
        } else {
            sums.staked = sums.staked.checked_add(registration.amount)?;
        }
    }
    Ok(sums)
}

/// Build one output leg, netting the computed amount against what the
/// contract already has registered.
fn build_leg(
    validator: &str,
    slash: &ValidatorSlash,
    amount: Uint128,
    registered: Uint128,
    during_unbonding: bool,
) -> Result<VestingValidatorSlash, TidemarkError> {
    let unregistered_amount =
        Int128::try_from(amount)?.checked_sub(Int128::try_from(registered)?)?;
    if unregistered_amount.is_negative() {
        tracing::warn!(
            validator,
            registered_height = slash.registered_block_height,
            during_unbonding,
            %amount,
            %registered,
            "registered slash total exceeds the replayed amount"
        );
    }
    Ok(VestingValidatorSlash {
        time_ms: slash.registered_block_time_unix_ms,
        amount,
        unregistered_amount,
        during_unbonding,
    })
}

/// Reconcile one validator's slash history against the contract's events and
/// registrations. `sorted_events` must already be in stable block-height
/// order.
fn reconcile_validator(
    sorted_events: &[StakeEvent],
    registrations: &[SlashRegistration],
    unbonding_duration_seconds: u64,
    history: &ValidatorSlashHistory,
) -> Result<VestingValidatorWithSlashes, TidemarkError> {
    let mut legs = Vec::new();
    for slash in &history.slashes {
        let prior: Vec<&ValidatorSlash> = history
            .slashes
            .iter()
            .filter(|earlier| earlier.registered_block_height < slash.registered_block_height)
            .collect();

        let staked_balance =
            staked_balance_at(sorted_events, slash, &prior, &history.validator)?;
        let unstaking = unstaking_at_risk(
            sorted_events,
            slash,
            unbonding_duration_seconds,
            &history.validator,
        )?;
        let attribution = attribute(staked_balance, unstaking, slash)?;
        if attribution.is_empty() {
            continue;
        }
        tracing::debug!(
            validator = %history.validator,
            registered_height = slash.registered_block_height,
            staked = %attribution.staked_slashed,
            unstaking = %attribution.unstaking_slashed,
            "attributed slash"
        );

        let registered =
            registered_sums(registrations, &history.validator, slash.registered_at())?;
        if !attribution.staked_slashed.is_zero() {
            legs.push(build_leg(
                &history.validator,
                slash,
                attribution.staked_slashed,
                registered.staked,
                false,
            )?);
        }
        if !attribution.unstaking_slashed.is_zero() {
            legs.push(build_leg(
                &history.validator,
                slash,
                attribution.unstaking_slashed,
                registered.unstaking,
                true,
            )?);
        }
    }
    Ok(VestingValidatorWithSlashes {
        validator_operator_address: history.validator.clone(),
        slashes: legs,
    })
}

/// Reconcile a vesting contract's staking history against the chain's slash
/// records.
///
/// Inputs are read-only snapshots; `stake_events` need not be pre-sorted
/// (they are sorted once here, stable on block height, and reused across all
/// slashes). Returns one entry per validator history, in input order, each
/// holding zero or more slash legs with the amount still unregistered. Pure:
/// identical inputs always produce identical, order-stable outputs.
pub fn reconcile(
    stake_events: &[StakeEvent],
    slash_registrations: &[SlashRegistration],
    unbonding_duration_seconds: u64,
    validator_slashes: &[ValidatorSlashHistory],
) -> Result<Vec<VestingValidatorWithSlashes>, TidemarkError> {
    let mut sorted_events = stake_events.to_vec();
    sorted_events.sort_by_key(|event| event.block_height);

    validator_slashes
        .iter()
        .map(|history| {
            reconcile_validator(
                &sorted_events,
                slash_registrations,
                unbonding_duration_seconds,
                history,
            )
        })
        .collect()
}

/// Fetch a snapshot from `source` and reconcile it. This is the entry point
/// for callers holding an indexer-backed [`StakeHistorySource`].
pub async fn reconcile_from_source(
    source: &dyn StakeHistorySource,
) -> Result<Vec<VestingValidatorWithSlashes>, TidemarkError> {
    let stake_events = source.stake_events().await?;
    let slash_registrations = source.slash_registrations().await?;
    let validator_slashes = source.validator_slashes().await?;
    let unbonding_duration_seconds = source.unbonding_duration_seconds().await?;
    reconcile(
        &stake_events,
        &slash_registrations,
        unbonding_duration_seconds,
        &validator_slashes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::Decimal;
    use tidemark_core::StakeEventKind;

    fn delegate(height: u64, time_ms: u64, amount: u128) -> StakeEvent {
        StakeEvent {
            block_height: height,
            block_time_unix_ms: time_ms,
            kind: StakeEventKind::Delegate {
                validator: "valoper1".to_string(),
                amount: Uint128::new(amount),
            },
        }
    }

    fn slash(registered_height: u64, registered_ms: u64) -> ValidatorSlash {
        ValidatorSlash {
            infraction_block_height: registered_height.saturating_sub(8),
            registered_block_height: registered_height,
            registered_block_time_unix_ms: registered_ms,
            slash_factor: Decimal::percent(10),
            effective_fraction: Decimal::percent(10),
        }
    }

    fn registration(amount: u128, time_ns: u64, during_unbonding: bool) -> SlashRegistration {
        SlashRegistration {
            validator: "valoper1".to_string(),
            time: Timestamp::from_nanos(time_ns),
            amount: Uint128::new(amount),
            during_unbonding,
        }
    }

    fn history(slashes: Vec<ValidatorSlash>) -> ValidatorSlashHistory {
        ValidatorSlashHistory {
            validator: "valoper1".to_string(),
            slashes,
        }
    }

    #[test]
    fn test_registration_matching_converts_ms_to_ns() {
        let events = vec![delegate(10, 10_000, 1_000)];
        // Registered at 20_000 ms == 20_000_000_000 ns.
        let registrations = vec![
            registration(40, 20_000_000_000, false),
            // Same validator, different instant: must not match.
            registration(40, 20_000_000_001, false),
        ];
        let out = reconcile(&events, &registrations, 100, &[history(vec![slash(20, 20_000)])])
            .unwrap();
        assert_eq!(out[0].slashes.len(), 1);
        assert_eq!(out[0].slashes[0].amount, Uint128::new(100));
        assert_eq!(out[0].slashes[0].unregistered_amount, Int128::new(60));
    }

    #[test]
    fn test_duplicate_registrations_are_summed_not_deduplicated() {
        let events = vec![delegate(10, 10_000, 1_000)];
        let registrations = vec![
            registration(40, 20_000_000_000, false),
            registration(40, 20_000_000_000, false),
        ];
        let out = reconcile(&events, &registrations, 100, &[history(vec![slash(20, 20_000)])])
            .unwrap();
        assert_eq!(out[0].slashes[0].unregistered_amount, Int128::new(20));
    }

    #[test]
    fn test_over_registration_surfaces_negative_outstanding() {
        let events = vec![delegate(10, 10_000, 1_000)];
        let registrations = vec![registration(150, 20_000_000_000, false)];
        let out = reconcile(&events, &registrations, 100, &[history(vec![slash(20, 20_000)])])
            .unwrap();
        // Not clamped: the mismatch must stay visible to the caller.
        assert_eq!(out[0].slashes[0].unregistered_amount, Int128::new(-50));
    }

    #[test]
    fn test_registrations_on_the_wrong_leg_do_not_net() {
        let events = vec![delegate(10, 10_000, 1_000)];
        // An unbonding-leg registration must not offset the staked leg.
        let registrations = vec![registration(40, 20_000_000_000, true)];
        let out = reconcile(&events, &registrations, 100, &[history(vec![slash(20, 20_000)])])
            .unwrap();
        assert!(!out[0].slashes[0].during_unbonding);
        assert_eq!(out[0].slashes[0].unregistered_amount, Int128::new(100));
    }

    #[test]
    fn test_validator_with_no_attributable_slashes_yields_empty_entry() {
        let out = reconcile(&[], &[], 100, &[history(vec![slash(20, 20_000)])]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].validator_operator_address, "valoper1");
        assert!(out[0].slashes.is_empty());
    }
}
