// crates/tidemark-engine/src/lib.rs
//
// tidemark-engine: The vesting-stake slash reconciliation pipeline.
//
// Replays a vesting contract's delegate/undelegate/redelegate history
// against the chain's validator slash records to compute, per slash and per
// leg (staked vs. mid-unbonding), how much was actually lost and how much of
// that loss the vesting contract has yet to have registered.
//
// The pipeline is pure: balance replay (balance) -> unbonding-window sum
// (unbonding) -> fraction application with chain-exact truncation
// (attribution) -> netting against on-chain registrations (reconcile).
// Validators are independent; callers may fan out across them.

pub mod attribution;
pub mod balance;
pub mod math;
pub mod reconcile;
pub mod snapshot;
pub mod unbonding;

// Re-export the public surface.
pub use attribution::{attribute, SlashAttribution};
pub use balance::staked_balance_at;
pub use reconcile::{reconcile, reconcile_from_source};
pub use snapshot::HistorySnapshot;
pub use unbonding::unstaking_at_risk;
