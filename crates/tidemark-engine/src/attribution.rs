// crates/tidemark-engine/src/attribution.rs
//
// Slash attribution: apply a slash's fractions to the reconstructed staked
// and unstaking balances.
//
// The staked leg uses `effective_fraction` (compounded with prior slashes by
// the balance replay); the unstaking leg uses the raw `slash_factor`, since
// unbonding amounts do not compound. Both truncate toward zero, matching the
// chain's deterministic truncation.

use cosmwasm_std::{SignedDecimal256, Uint128};
use tidemark_core::{TidemarkError, ValidatorSlash};

use crate::math::{signed_fraction, trunc_to_amount};

/// How much one slash took from each leg of the contract's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashAttribution {
    /// Amount removed from the staked balance.
    pub staked_slashed: Uint128,
    /// Amount removed from balances mid-unbonding.
    pub unstaking_slashed: Uint128,
}

impl SlashAttribution {
    /// A slash that attributes to neither leg contributes nothing and must
    /// produce no output entry.
    pub fn is_empty(&self) -> bool {
        self.staked_slashed.is_zero() && self.unstaking_slashed.is_zero()
    }
}

/// Apply `slash` to the reconstructed balances.
pub fn attribute(
    staked_balance: SignedDecimal256,
    unstaking_at_risk: Uint128,
    slash: &ValidatorSlash,
) -> Result<SlashAttribution, TidemarkError> {
    let staked_product = staked_balance.checked_mul(signed_fraction(slash.effective_fraction)?)?;
    let staked_slashed = trunc_to_amount(staked_product)?;
    let unstaking_slashed = unstaking_at_risk.checked_mul_floor(slash.slash_factor)?;
    Ok(SlashAttribution {
        staked_slashed,
        unstaking_slashed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::signed_amount;
    use cosmwasm_std::Decimal;

    fn slash(effective: Decimal, factor: Decimal) -> ValidatorSlash {
        ValidatorSlash {
            infraction_block_height: 12,
            registered_block_height: 20,
            registered_block_time_unix_ms: 20_000,
            slash_factor: factor,
            effective_fraction: effective,
        }
    }

    fn balance(amount: u128) -> SignedDecimal256 {
        signed_amount(Uint128::new(amount)).unwrap()
    }

    #[test]
    fn test_both_legs_truncate_toward_zero() {
        let attribution = attribute(
            balance(999),
            Uint128::new(995),
            &slash(Decimal::percent(10), Decimal::percent(10)),
        )
        .unwrap();
        // 99.9 and 99.5 both truncate, never round half-up.
        assert_eq!(attribution.staked_slashed, Uint128::new(99));
        assert_eq!(attribution.unstaking_slashed, Uint128::new(99));
        assert!(!attribution.is_empty());
    }

    #[test]
    fn test_zero_fractions_attribute_nothing() {
        let attribution = attribute(
            balance(1_000),
            Uint128::new(1_000),
            &slash(Decimal::zero(), Decimal::zero()),
        )
        .unwrap();
        assert!(attribution.is_empty());
    }

    #[test]
    fn test_full_slash_takes_everything() {
        let attribution = attribute(
            balance(1_000),
            Uint128::new(500),
            &slash(Decimal::one(), Decimal::one()),
        )
        .unwrap();
        assert_eq!(attribution.staked_slashed, Uint128::new(1_000));
        assert_eq!(attribution.unstaking_slashed, Uint128::new(500));
    }

    #[test]
    fn test_negative_staked_balance_attributes_zero() {
        let negative = SignedDecimal256::zero()
            .checked_sub(balance(100))
            .unwrap();
        let attribution = attribute(
            negative,
            Uint128::zero(),
            &slash(Decimal::percent(10), Decimal::percent(10)),
        )
        .unwrap();
        assert!(attribution.is_empty());
    }

    #[test]
    fn test_sub_unit_products_truncate_to_zero() {
        // 9 * 0.1 = 0.9: too small to slash a whole unit.
        let attribution = attribute(
            balance(9),
            Uint128::new(9),
            &slash(Decimal::percent(10), Decimal::percent(10)),
        )
        .unwrap();
        assert!(attribution.is_empty());
    }
}
