//! Empirical distribution lookup over draws in `[0, 99]`.
//!
//! A [`ProbabilityTable`] is turned into contiguous integer buckets, one per
//! outcome, sized by the cumulative probability rounded to two places. A
//! draw picks the outcome whose bucket contains it.
//!
//! Bucket bounds come from truncating `cumulative * 100`, so binary
//! artifacts such as `0.29 * 100 == 28.999...` shrink a bucket by one, and
//! a table whose probabilities round to less than 1.00 leaves the top of the
//! draw range uncovered. Draws that land above every bucket resolve to the
//! last outcome. This is a known approximation and is kept as is.

use queuesim_types::{round_hundredths, ProbabilityTable};
use serde::Serialize;
use tracing::trace;

/// An inclusive bucket `[lower, upper]` of draws.
///
/// `upper < lower` for outcomes whose cumulative step rounds to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeRange {
    pub lower: i32,
    pub upper: i32,
}

impl CumulativeRange {
    pub fn contains(&self, draw: u32) -> bool {
        i64::from(self.lower) <= i64::from(draw) && i64::from(draw) <= i64::from(self.upper)
    }
}

/// Running sum of `probabilities`, rounded to two places after every step.
pub fn build_cumulative(probabilities: &[f64]) -> Vec<f64> {
    probabilities
        .iter()
        .scan(0.0, |total, &p| {
            *total += p;
            Some(round_hundredths(*total))
        })
        .collect()
}

/// Buckets for a cumulative sequence: `upper = floor(cp * 100) - 1`, each
/// `lower` one past the previous `upper`, the first `lower` zero.
pub fn build_ranges(cumulative: &[f64]) -> Vec<CumulativeRange> {
    let mut lower = 0;
    cumulative
        .iter()
        .map(|&cp| {
            // Truncation of the float product is intentional.
            let upper = (cp * 100.0) as i32 - 1;
            let range = CumulativeRange { lower, upper };
            lower = upper + 1;
            range
        })
        .collect()
}

/// Outcome for `draw`: the first bucket containing it, else the last
/// outcome. `None` only when `outcomes` is empty.
pub fn resolve(draw: u32, ranges: &[CumulativeRange], outcomes: &[u32]) -> Option<u32> {
    ranges
        .iter()
        .zip(outcomes)
        .find(|(range, _)| range.contains(draw))
        .map(|(_, &outcome)| outcome)
        .or_else(|| {
            let last = outcomes.last().copied();
            trace!(draw, ?last, "draw above every bucket, falling back to last outcome");
            last
        })
}

/// Precomputed lookup for one probability table.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable {
    outcomes: Vec<u32>,
    cumulative: Vec<f64>,
    ranges: Vec<CumulativeRange>,
}

impl DistributionTable {
    pub fn new(table: &ProbabilityTable) -> Self {
        let cumulative = build_cumulative(table.probabilities());
        let ranges = build_ranges(&cumulative);
        Self {
            outcomes: table.outcomes().to_vec(),
            cumulative,
            ranges,
        }
    }

    /// Map a draw to an outcome.
    pub fn sample(&self, draw: u32) -> u32 {
        // Probability tables are never empty, so `resolve` always answers.
        resolve(draw, &self.ranges, &self.outcomes).unwrap_or_default()
    }

    pub fn outcomes(&self) -> &[u32] {
        &self.outcomes
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn ranges(&self) -> &[CumulativeRange] {
        &self.ranges
    }

    /// Whether every draw in `[0, 99]` lands in an explicit bucket, i.e. the
    /// fallback never fires.
    pub fn covers_all_draws(&self) -> bool {
        self.ranges.last().is_some_and(|r| r.upper >= 99)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuesim_test_helpers::{reference_inter_arrival, reference_service};

    #[test]
    fn test_reference_cumulative_and_ranges() {
        let table = DistributionTable::new(&reference_inter_arrival());
        assert_eq!(table.cumulative(), &[0.15, 0.40, 0.60, 0.85, 1.00]);
        let bounds: Vec<(i32, i32)> = table.ranges().iter().map(|r| (r.lower, r.upper)).collect();
        assert_eq!(bounds, vec![(0, 14), (15, 39), (40, 59), (60, 84), (85, 99)]);
        assert!(table.covers_all_draws());
    }

    #[test]
    fn test_reference_service_ranges() {
        let table = DistributionTable::new(&reference_service());
        let bounds: Vec<(i32, i32)> = table.ranges().iter().map(|r| (r.lower, r.upper)).collect();
        assert_eq!(bounds, vec![(0, 9), (10, 34), (35, 64), (65, 84), (85, 99)]);
    }

    #[test]
    fn test_ranges_are_contiguous() {
        let tables = [
            vec![0.15, 0.25, 0.20, 0.25, 0.15],
            vec![0.10, 0.25, 0.30, 0.20, 0.15],
            vec![0.29, 0.28, 0.43],
            vec![0.33, 0.33, 0.33],
            vec![1.0],
        ];
        for probabilities in tables {
            let ranges = build_ranges(&build_cumulative(&probabilities));
            assert_eq!(ranges[0].lower, 0);
            for pair in ranges.windows(2) {
                assert_eq!(pair[1].lower, pair[0].upper + 1, "{probabilities:?}");
            }
        }
    }

    #[test]
    fn test_cumulative_rounds_each_step() {
        let cumulative = build_cumulative(&[0.333, 0.333, 0.334]);
        assert_eq!(cumulative, vec![0.33, 0.67, 1.0]);
    }

    #[test]
    fn test_truncation_artifact_is_preserved() {
        // 0.29 * 100 evaluates just below 29.
        let ranges = build_ranges(&[0.29, 1.0]);
        assert_eq!(ranges[0], CumulativeRange { lower: 0, upper: 27 });
        assert_eq!(ranges[1], CumulativeRange { lower: 28, upper: 99 });
    }

    #[test]
    fn test_resolve_reference_draw() {
        let table = DistributionTable::new(&reference_inter_arrival());
        assert_eq!(table.sample(84), 5);
        assert_eq!(table.sample(85), 6);
        assert_eq!(table.sample(0), 2);
        assert_eq!(table.sample(14), 2);
        assert_eq!(table.sample(15), 3);
    }

    #[test]
    fn test_every_draw_resolves() {
        let table = DistributionTable::new(&reference_service());
        for draw in 0..100 {
            assert!(table.outcomes().contains(&table.sample(draw)));
        }
    }

    #[test]
    fn test_fallback_only_above_last_bucket() {
        let ranges = build_ranges(&build_cumulative(&[0.33, 0.33, 0.33]));
        let outcomes = [10, 20, 30];
        assert_eq!(ranges.last().map(|r| r.upper), Some(98));
        assert_eq!(resolve(98, &ranges, &outcomes), Some(30));
        assert_eq!(resolve(99, &ranges, &outcomes), Some(30));
        assert_eq!(resolve(0, &ranges, &outcomes), Some(10));
        assert_eq!(resolve(65, &ranges, &outcomes), Some(20));
    }

    #[test]
    fn test_resolve_empty_outcomes() {
        assert_eq!(resolve(5, &[], &[]), None);
    }

    #[test]
    fn test_short_table_does_not_cover_all_draws() {
        let table = ProbabilityTable::new(vec![1, 2, 3], vec![0.33, 0.33, 0.33]).unwrap();
        let dist = DistributionTable::new(&table);
        assert!(!dist.covers_all_draws());
        assert_eq!(dist.sample(99), 3);
    }
}
