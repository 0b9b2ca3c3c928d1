//! # Core Type Definitions
//!
//! This module contains the record shapes and error type shared by the
//! aggregator and the binary:
//! - Record capabilities (`Weighted`, `Identified`)
//! - Concrete cart records (`ItemId`, `CartItem`, `NamedItem`)
//! - Error types (`TallyError`)
//!
//! ## Record Shapes
//!
//! Operations never take one polymorphic "object". Each operation names the
//! single capability it reads: `count_weighted` reads a quantity through
//! `Weighted`, `remove_by_id` reads an identifier through `Identified`.
//! Any caller type implementing the trait can be aggregated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD CAPABILITIES
// =============================================================================

/// A record carrying a non-negative quantity.
pub trait Weighted {
    /// The quantity this record contributes to a weighted count.
    fn quantity(&self) -> u64;
}

/// A record carrying an identifying field.
pub trait Identified {
    /// The identifier type. Only equality is required.
    type Id: PartialEq + ?Sized;

    /// Borrow the identifier of this record.
    fn id(&self) -> &Self::Id;
}

// =============================================================================
// CART RECORDS
// =============================================================================

/// Identifier of an item in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// A cart entry keyed by a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The item identifier.
    pub id: ItemId,
    /// Human readable name. Not used by any reduction.
    #[serde(default)]
    pub name: String,
    /// How many units of this item the cart holds.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new cart item.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
        }
    }
}

impl Weighted for CartItem {
    fn quantity(&self) -> u64 {
        u64::from(self.quantity)
    }
}

impl Identified for CartItem {
    type Id = ItemId;

    fn id(&self) -> &ItemId {
        &self.id
    }
}

/// A cart entry keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedItem {
    /// The item name, which doubles as its identifier.
    pub name: String,
    /// How many units of this item the cart holds.
    pub quantity: u32,
}

impl NamedItem {
    /// Create a new named item.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl Weighted for NamedItem {
    fn quantity(&self) -> u64 {
        u64::from(self.quantity)
    }
}

impl Identified for NamedItem {
    type Id = str;

    fn id(&self) -> &str {
        &self.name
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Tally system.
///
/// The aggregator itself only produces `InvalidArgument` and
/// `LengthMismatch`. The remaining variants belong to the binary's
/// configuration and input handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// The input cannot be reduced (empty where non-empty is required, or
    /// containing a non-finite number).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Paired sequences have different lengths.
    #[error("Length mismatch: actual has {actual} elements, predicted has {predicted}")]
    LengthMismatch { actual: usize, predicted: usize },

    /// The configuration file or environment is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input or output could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
