use crate::models::{Branch, StatsResult};

/// Ratings at or above this value count as "high"
pub const HIGH_RATING_FLOOR: f64 = 4.0;

/// Round to two decimals, halves up.
///
/// Decimal ties such as 1.005 are stored just below the midpoint, so the
/// scaled value is bumped when the next half-step still fits under `value`.
#[inline]
pub fn round2(value: f64) -> f64 {
    let mut scaled = (value * 100.0).round();
    if (scaled + 0.5) / 100.0 <= value {
        scaled += 1.0;
    }
    scaled / 100.0
}

/// Aggregates descriptive statistics over a branch collection
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Compute registry statistics. Never fails; an empty slice yields zeros.
    ///
    /// The average only covers rated branches, while the high-rating
    /// percentage is taken over every branch, rated or not.
    pub fn compute(&self, branches: &[Branch]) -> StatsResult {
        let total_branches = branches.len();
        if total_branches == 0 {
            return StatsResult::default();
        }

        let (rated, rating_sum) = branches
            .iter()
            .filter_map(|b| b.rating)
            .fold((0usize, 0.0), |(n, sum), r| (n + 1, sum + r));

        let average_rating = if rated > 0 {
            round2(rating_sum / rated as f64)
        } else {
            0.0
        };

        let high_rating_count = branches
            .iter()
            .filter(|b| b.rating.is_some_and(|r| r >= HIGH_RATING_FLOOR))
            .count();

        let high_rating_percentage =
            round2(high_rating_count as f64 / total_branches as f64 * 100.0);

        StatsResult {
            total_branches,
            average_rating,
            high_rating_count,
            high_rating_percentage,
        }
    }
}
