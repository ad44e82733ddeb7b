// crates/tidemark-core/src/lib.rs
//
// tidemark-core: Canonical stake-event, slash, and registration types for
// Tidemark, the vesting-stake slash reconciliation engine.
//
// This is the leaf crate the engine depends on. It defines the event and
// slash data model, the reconciliation output types, the workspace error
// type, and the history-source trait the indexer collaborator implements.

pub mod error;
pub mod event;
pub mod registration;
pub mod report;
pub mod slash;
pub mod source;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use tidemark_core::StakeEvent;`

// Event types
pub use event::{StakeEvent, StakeEventKind};

// Slash types
pub use slash::{ValidatorSlash, ValidatorSlashHistory};

// Registration types
pub use registration::SlashRegistration;

// Output types
pub use report::{VestingValidatorSlash, VestingValidatorWithSlashes};

// Error type
pub use error::TidemarkError;

// Traits
pub use source::StakeHistorySource;
