// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod resolver;
pub mod stats;

pub use distance::{haversine_distance, distance, EARTH_RADIUS_KM, MAX_DISTANCE_KM};
pub use filters::{with_min_rating, sort_by_rating_desc};
pub use resolver::{ProximityResolver, ResolutionError, DEFAULT_THRESHOLD_KM};
pub use stats::{StatsAggregator, HIGH_RATING_FLOOR, round2};
