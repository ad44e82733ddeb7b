// crates/tidemark-engine/src/balance.rs
//
// Staked-balance reconstruction: replay stake events and prior slashes in
// block-height order to derive the balance staked with a validator at the
// instant a given slash was registered.
//
// Prior slashes compound multiplicatively; the interim balance is therefore
// fractional and kept exact in a signed decimal until the attributor
// truncates it.

use cosmwasm_std::SignedDecimal256;
use tidemark_core::{StakeEvent, TidemarkError, ValidatorSlash};

use crate::math::{retained_fraction, signed_amount};

/// One step of the merged replay sequence.
enum ReplayItem<'a> {
    Event(&'a StakeEvent),
    PriorSlash(&'a ValidatorSlash),
}

impl ReplayItem<'_> {
    /// Merge key: events sort by their block, prior slashes by the block
    /// they were registered in.
    fn block_height(&self) -> u64 {
        match self {
            ReplayItem::Event(event) => event.block_height,
            ReplayItem::PriorSlash(slash) => slash.registered_block_height,
        }
    }
}

/// Reconstruct the balance staked with `validator` at the instant
/// `evaluated` was registered.
///
/// `events` must already be sorted by block height (stable, arrival order
/// preserved on ties); the caller sorts once and reuses the slice across all
/// of a validator's slashes. `prior` holds the slashes for this validator
/// with a registration height strictly below `evaluated`'s.
///
/// The merge is stable with events listed first, so at equal heights a stake
/// event is folded before a slash registered in the same block. An empty or
/// entirely-future event list yields zero — valid, since the slash may still
/// attribute to the unbonding balance.
pub fn staked_balance_at(
    events: &[StakeEvent],
    evaluated: &ValidatorSlash,
    prior: &[&ValidatorSlash],
    validator: &str,
) -> Result<SignedDecimal256, TidemarkError> {
    let mut sequence: Vec<ReplayItem> = events
        .iter()
        .map(ReplayItem::Event)
        .chain(prior.iter().copied().map(ReplayItem::PriorSlash))
        .collect();
    sequence.sort_by_key(ReplayItem::block_height);

    sequence
        .iter()
        .try_fold(SignedDecimal256::zero(), |balance, item| match item {
            ReplayItem::PriorSlash(slash) => {
                let kept = retained_fraction(slash.effective_fraction)?;
                Ok(balance.checked_mul(kept)?)
            }
            ReplayItem::Event(event)
                if event.block_time_unix_ms <= evaluated.registered_block_time_unix_ms =>
            {
                if let Some(amount) = event.bonds_to(validator) {
                    Ok(balance.checked_add(signed_amount(amount)?)?)
                } else if let Some(amount) = event.unbonds_from(validator) {
                    Ok(balance.checked_sub(signed_amount(amount)?)?)
                } else {
                    Ok(balance)
                }
            }
            // Events after the registration instant do not exist yet from
            // the slash's point of view.
            ReplayItem::Event(_) => Ok(balance),
        })
}
