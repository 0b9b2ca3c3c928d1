//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, the aggregator is INVALID.
//!
//! ## Tiers
//! - T0: Boundary Handling
//! - T1: Average
//! - T2: Record Reductions
//! - T3: Paired Sequences

use tally_core::{CartItem, ItemId, NamedItem, TallyError};

// =============================================================================
// TIER T0: BOUNDARY HANDLING
// =============================================================================

mod t0_boundaries {
    use super::*;
    use tally_core::{average, average_fold};

    /// T0.1: Empty average is an error, never zero.
    #[test]
    fn empty_average_rejected() {
        let result = average(&[]);
        assert!(matches!(result, Err(TallyError::InvalidArgument(_))));
        assert_ne!(result, Ok(0.0));
    }

    /// T0.2: Both strategies agree on the empty failure.
    #[test]
    fn empty_average_rejected_by_fold() {
        assert_eq!(average(&[]), average_fold(&[]));
    }

    /// T0.3: NaN never leaks out as a result.
    #[test]
    fn nan_input_rejected() {
        assert!(average(&[f64::NAN]).is_err());
    }
}

// =============================================================================
// TIER T1: AVERAGE
// =============================================================================

mod t1_average {
    use tally_core::{AverageMethod, average, average_fold, average_with};

    /// T1.1: Known means.
    #[test]
    fn known_means() {
        assert_eq!(average(&[1.0, 2.0, 3.0, 4.0, 5.0]), Ok(3.0));
        assert_eq!(average(&[1.5, 2.5, 3.5]), Ok(2.5));
        assert_eq!(average(&[42.0]), Ok(42.0));
    }

    /// T1.2: Both strategies give the same result on the same cases.
    #[test]
    fn strategies_agree() {
        let cases: [&[f64]; 4] = [
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[1.5, 2.5, 3.5],
            &[42.0],
            &[0.1, 0.2, 0.3, 1e-17, 1e17],
        ];
        for values in cases {
            let a = average(values).expect("loop");
            let b = average_fold(values).expect("fold");
            assert_eq!(a.to_bits(), b.to_bits(), "input {:?}", values);
        }
    }

    /// T1.3: Dispatch by method name.
    #[test]
    fn dispatch_by_name() {
        let method: AverageMethod = "fold".parse().expect("parse");
        assert_eq!(average_with(method, &[2.0, 4.0]), Ok(3.0));
    }
}

// =============================================================================
// TIER T2: RECORD REDUCTIONS
// =============================================================================

mod t2_records {
    use super::*;
    use tally_core::{count_weighted, remove_by_id};

    fn cart() -> Vec<CartItem> {
        vec![
            CartItem::new(ItemId(1), "apple", 2),
            CartItem::new(ItemId(2), "bread", 1),
            CartItem::new(ItemId(3), "milk", 3),
        ]
    }

    /// T2.1: Weighted count of the reference cart.
    #[test]
    fn weighted_count() {
        assert_eq!(count_weighted(&cart()), 6);
    }

    /// T2.2: Removing a present id shrinks by one.
    #[test]
    fn remove_present() {
        let items = cart();
        let remaining = remove_by_id(&items, &ItemId(1));
        assert_eq!(remaining.len(), items.len() - 1);
        assert_eq!(count_weighted(&remaining), 4);
    }

    /// T2.3: Removing an absent id is a value-equal copy.
    #[test]
    fn remove_absent() {
        let items = cart();
        assert_eq!(remove_by_id(&items, &ItemId(42)), items);
    }

    /// T2.4: Records keyed by name work the same way.
    #[test]
    fn remove_by_name() {
        let items = vec![NamedItem::new("tea", 1), NamedItem::new("cake", 5)];
        assert_eq!(count_weighted(&items), 6);
        assert_eq!(remove_by_id(&items, "tea"), vec![NamedItem::new("cake", 5)]);
    }

    /// T2.5: Calling twice gives identical output.
    #[test]
    fn idempotent() {
        let items = cart();
        assert_eq!(
            remove_by_id(&items, &ItemId(2)),
            remove_by_id(&items, &ItemId(2))
        );
        assert_eq!(count_weighted(&items), count_weighted(&items));
    }
}

// =============================================================================
// TIER T3: PAIRED SEQUENCES
// =============================================================================

mod t3_paired {
    use super::*;
    use tally_core::mean_squared_error;

    /// T3.1: Known error.
    #[test]
    fn known_error() {
        assert_eq!(mean_squared_error(&[0.0, 0.0], &[1.0, 3.0]), Ok(5.0));
    }

    /// T3.2: Mismatched lengths fail loudly.
    #[test]
    fn mismatch() {
        assert_eq!(
            mean_squared_error(&[1.0], &[1.0, 2.0]),
            Err(TallyError::LengthMismatch {
                actual: 1,
                predicted: 2
            })
        );
    }
}
