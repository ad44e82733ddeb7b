// crates/tidemark-core/src/registration.rs
//
// Slash amounts already acknowledged by the on-chain vesting contract.
//
// Mirrors the vesting contract's `RegisterSlash` execute message: the
// contract keys registrations by validator and nanosecond timestamp, split
// into a staked leg and an unbonding leg.

use cosmwasm_std::{Timestamp, Uint128};
use serde::{Deserialize, Serialize};

/// One slash amount already reported to the vesting contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashRegistration {
    /// Validator operator address the slash was registered against.
    pub validator: String,
    /// Registration timestamp, in nanoseconds (the contract's native unit).
    pub time: Timestamp,
    /// Registered amount in the chain's smallest denomination.
    pub amount: Uint128,
    /// Whether the registered amount was mid-unbonding when slashed.
    pub during_unbonding: bool,
}

impl SlashRegistration {
    /// Whether this registration belongs to the slash registered for
    /// `validator` at `registered_at`.
    pub fn matches(&self, validator: &str, registered_at: Timestamp) -> bool {
        self.validator == validator && self.time == registered_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_on_validator_and_time() {
        let registration = SlashRegistration {
            validator: "valoper1".to_string(),
            time: Timestamp::from_nanos(20_000_000_000),
            amount: Uint128::new(40),
            during_unbonding: false,
        };
        assert!(registration.matches("valoper1", Timestamp::from_nanos(20_000_000_000)));
        assert!(!registration.matches("valoper2", Timestamp::from_nanos(20_000_000_000)));
        assert!(!registration.matches("valoper1", Timestamp::from_nanos(20_000_000_001)));
    }

    #[test]
    fn test_time_travels_as_nanosecond_string() {
        let registration = SlashRegistration {
            validator: "valoper1".to_string(),
            time: Timestamp::from_nanos(20_000_000_000),
            amount: Uint128::new(40),
            during_unbonding: true,
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["time"], "20000000000");
        assert_eq!(json["amount"], "40");
        assert_eq!(json["duringUnbonding"], true);
    }
}
