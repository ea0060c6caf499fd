//! Reduction of per-keyword results into one engine-level snapshot.

use crate::types::{KeywordVisibility, VisibilitySnapshot};

/// Reduce the successful per-keyword results of one run.
///
/// A pure commutative reduction over an unordered multiset: the output is
/// identical for any permutation of `results`, so task completion order
/// never matters. With `n = results.len()`:
///
/// - `total_appearances`: count of results where the brand appeared.
/// - `distinct_brands`: floor of the mean via integer division; 0 when n = 0.
/// - `avg_visibility_position`: arithmetic mean; 0.0 when n = 0.
///
/// Failed queries must not be passed in — excluding them here is what keeps
/// a failure from contributing a zero that would skew the denominators.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn aggregate(results: &[KeywordVisibility]) -> VisibilitySnapshot {
    if results.is_empty() {
        return VisibilitySnapshot::default();
    }

    let n = results.len() as i64;
    let total_appearances = results.iter().filter(|r| r.has_brand_appeared).count() as i64;
    let distinct_brands = results.iter().map(|r| r.distinct_brands).sum::<i64>() / n;
    let avg_visibility_position =
        results.iter().map(|r| r.avg_visibility_position).sum::<f64>() / results.len() as f64;

    VisibilitySnapshot {
        total_appearances,
        distinct_brands,
        avg_visibility_position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(appeared: bool, brands: i64, position: f64) -> KeywordVisibility {
        KeywordVisibility {
            has_brand_appeared: appeared,
            distinct_brands: brands,
            avg_visibility_position: position,
        }
    }

    #[test]
    fn empty_input_yields_zeroed_snapshot() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot, VisibilitySnapshot::default());
        assert_eq!(snapshot.total_appearances, 0);
        assert_eq!(snapshot.distinct_brands, 0);
        assert!((snapshot.avg_visibility_position - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn distinct_brands_uses_floor_truncation() {
        // Rounding-mode decision: 7 / 3 floors to 2, never rounds to 2.33 → 2.
        let results = [result(true, 2, 1.0), result(true, 2, 1.0), result(true, 3, 1.0)];
        assert_eq!(aggregate(&results).distinct_brands, 2);
    }

    #[test]
    fn appearances_count_successes_where_brand_appeared() {
        let results = [
            result(true, 1, 1.0),
            result(false, 1, 1.0),
            result(true, 1, 1.0),
        ];
        assert_eq!(aggregate(&results).total_appearances, 2);
    }

    #[test]
    fn two_keyword_run_matches_expected_means() {
        let results = [result(true, 3, 2.0), result(false, 1, 5.0)];
        let snapshot = aggregate(&results);

        assert_eq!(snapshot.total_appearances, 1);
        assert_eq!(snapshot.distinct_brands, 2);
        assert!((snapshot.avg_visibility_position - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn aggregation_is_invariant_under_permutation() {
        let a = result(true, 3, 2.0);
        let b = result(false, 1, 5.0);
        let c = result(true, 4, 1.5);

        let orders = [
            [a.clone(), b.clone(), c.clone()],
            [a.clone(), c.clone(), b.clone()],
            [b.clone(), a.clone(), c.clone()],
            [b.clone(), c.clone(), a.clone()],
            [c.clone(), a.clone(), b.clone()],
            [c, b, a],
        ];

        let baseline = aggregate(&orders[0]);
        for order in &orders {
            assert_eq!(aggregate(order), baseline);
        }
    }
}
