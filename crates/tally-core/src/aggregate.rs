//! # Numeric Aggregator
//!
//! Pure, single-pass reductions over caller-owned sequences.
//!
//! Every function borrows its input and returns a freshly computed value.
//! Nothing is cached between calls, so repeated calls with the same input
//! return the same output and concurrent callers need no coordination.
//!
//! ## Failure Policy
//!
//! - An empty numeric sequence has no mean: `InvalidArgument`.
//! - A NaN or infinite element poisons the mean: `InvalidArgument`.
//! - Finite elements whose sum overflows `f64`: `InvalidArgument`.
//! - Paired sequences of different lengths: `LengthMismatch`.
//!
//! No operation ever returns `NaN` or `inf` as a sentinel.

use crate::types::{Identified, TallyError, Weighted};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// AVERAGE
// =============================================================================

/// Strategy used to accumulate the sum behind an average.
///
/// Both strategies add the elements left to right starting from `+0.0`,
/// so they produce bit-identical results for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageMethod {
    /// Explicit accumulation loop with a running total and count.
    #[default]
    Loop,
    /// `Iterator::fold` over the slice.
    Fold,
}

impl AverageMethod {
    /// Lowercase name, as accepted by `FromStr`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Fold => "fold",
        }
    }
}

impl fmt::Display for AverageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AverageMethod {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "fold" => Ok(Self::Fold),
            other => Err(TallyError::InvalidArgument(format!(
                "unknown average method '{}', expected 'loop' or 'fold'",
                other
            ))),
        }
    }
}

/// Reject empty input and non-finite elements.
fn validate_finite(values: &[f64], what: &str) -> Result<(), TallyError> {
    if values.is_empty() {
        return Err(TallyError::InvalidArgument(format!(
            "{} must contain at least one number",
            what
        )));
    }
    match values.iter().position(|x| !x.is_finite()) {
        Some(index) => Err(TallyError::InvalidArgument(format!(
            "{} contains a non-finite number at index {}",
            what, index
        ))),
        None => Ok(()),
    }
}

/// Reject a result that left the finite range while accumulating.
///
/// Elements are already known to be finite, so a non-finite result can only
/// come from the running total overflowing.
fn finite_result(value: f64, what: &str) -> Result<f64, TallyError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TallyError::InvalidArgument(format!(
            "{} overflowed the range of f64",
            what
        )))
    }
}

/// Arithmetic mean computed with an explicit accumulation loop.
///
/// # Errors
///
/// `InvalidArgument` if `values` is empty, holds NaN/±∞, or sums past
/// `f64::MAX`.
///
/// # Examples
///
/// ```
/// use tally_core::aggregate::average;
/// assert_eq!(average(&[1.0, 2.0, 3.0, 4.0, 5.0]), Ok(3.0));
/// assert!(average(&[]).is_err());
/// ```
pub fn average(values: &[f64]) -> Result<f64, TallyError> {
    validate_finite(values, "average input")?;

    let mut total = 0.0_f64;
    let mut count = 0_usize;
    for &value in values {
        total += value;
        count += 1;
    }
    finite_result(total / count as f64, "average")
}

/// Arithmetic mean computed with `Iterator::fold`.
///
/// Always bit-identical to [`average`] for the same input.
pub fn average_fold(values: &[f64]) -> Result<f64, TallyError> {
    validate_finite(values, "average input")?;

    let total = values.iter().fold(0.0_f64, |acc, &value| acc + value);
    finite_result(total / values.len() as f64, "average")
}

/// Arithmetic mean using the chosen accumulation strategy.
pub fn average_with(method: AverageMethod, values: &[f64]) -> Result<f64, TallyError> {
    match method {
        AverageMethod::Loop => average(values),
        AverageMethod::Fold => average_fold(values),
    }
}

// =============================================================================
// RECORD REDUCTIONS
// =============================================================================

/// Sum of the quantities of all records.
///
/// An empty slice yields 0. The sum saturates at `u64::MAX` instead of
/// wrapping.
pub fn count_weighted<R: Weighted>(records: &[R]) -> u64 {
    records
        .iter()
        .fold(0_u64, |total, record| total.saturating_add(record.quantity()))
}

/// Every record whose identifier differs from `id`, in original order.
///
/// The input is left untouched; the result is a new vector. If nothing
/// matches, the result equals the input by value.
pub fn remove_by_id<R>(records: &[R], id: &R::Id) -> Vec<R>
where
    R: Identified + Clone,
{
    records
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect()
}

// =============================================================================
// MEAN SQUARED ERROR
// =============================================================================

/// Mean of the squared positional differences between two sequences.
///
/// # Errors
///
/// - `LengthMismatch` if the sequences differ in length (checked first).
/// - `InvalidArgument` if both are empty, either holds NaN/±∞, or the
///   squared differences sum past `f64::MAX`.
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64, TallyError> {
    if actual.len() != predicted.len() {
        return Err(TallyError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    validate_finite(actual, "actual values")?;
    validate_finite(predicted, "predicted values")?;

    let total = actual
        .iter()
        .zip(predicted)
        .fold(0.0_f64, |acc, (&a, &p)| {
            let diff = a - p;
            acc + diff * diff
        });
    finite_result(total / actual.len() as f64, "mean squared error")
}

// =============================================================================
// TESTS
// =============================================================================
