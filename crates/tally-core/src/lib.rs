//! # tally-core
//!
//! The Numeric Aggregator for Tally - THE LOGIC.
//!
//! A set of independent, stateless reductions over caller-owned sequences:
//! - [`average`] / [`average_fold`]: arithmetic mean, two bit-identical strategies
//! - [`count_weighted`]: sum of record quantities
//! - [`remove_by_id`]: stable, copy-on-write removal by identifier
//! - [`mean_squared_error`]: mean of squared pairwise differences
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no logging, no shared state
//! - Inputs are borrowed read-only; every result is a new owned value
//! - Empty or mismatched input fails with [`TallyError`], never `NaN`

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod primitives;
pub mod types;
pub mod user;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use aggregate::{
    AverageMethod, average, average_fold, average_with, count_weighted, mean_squared_error,
    remove_by_id,
};
pub use types::{CartItem, Identified, ItemId, NamedItem, TallyError, Weighted};
pub use user::User;
