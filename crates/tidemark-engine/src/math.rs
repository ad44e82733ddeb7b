// crates/tidemark-engine/src/math.rs
//
// Conversions between the chain's unsigned fixed-point types and the signed
// replay accumulator.
//
// The replay balance is a `SignedDecimal256`: compounding leaves fractional
// values, and rounding skew in upstream data can drive transient negatives
// that must propagate exactly rather than saturate.

use cosmwasm_std::{Decimal, Int256, SignedDecimal256, Uint128, Uint256};
use tidemark_core::TidemarkError;

/// Widen an unsigned fraction into the signed accumulator type.
pub fn signed_fraction(fraction: Decimal) -> Result<SignedDecimal256, TidemarkError> {
    let widened = SignedDecimal256::from_atomics(
        Int256::from(fraction.atomics()),
        fraction.decimal_places(),
    )?;
    Ok(widened)
}

/// Widen an amount in the smallest denomination into the accumulator type.
pub fn signed_amount(amount: Uint128) -> Result<SignedDecimal256, TidemarkError> {
    let widened = SignedDecimal256::from_atomics(Int256::from(amount), 0)?;
    Ok(widened)
}

/// The complement `1 - fraction`, used for compounding prior slashes.
pub fn retained_fraction(fraction: Decimal) -> Result<SignedDecimal256, TidemarkError> {
    let kept = SignedDecimal256::one().checked_sub(signed_fraction(fraction)?)?;
    Ok(kept)
}

/// Truncate toward zero into an unsigned amount, exactly as the chain's
/// staking module does. A negative value truncates to zero: a slash cannot
/// attribute a negative amount.
pub fn trunc_to_amount(value: SignedDecimal256) -> Result<Uint128, TidemarkError> {
    let whole = value.to_int_trunc();
    if whole.is_negative() {
        return Ok(Uint128::zero());
    }
    let amount = Uint128::try_from(Uint256::try_from(whole)?)?;
    Ok(amount)
}
