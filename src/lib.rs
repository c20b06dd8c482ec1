//! Branch Locator - bank branch registry with proximity lookup
//!
//! Finds the branch nearest to a point using great-circle distance, flags
//! results beyond a distance threshold (raising an alert through a pluggable
//! sink) and aggregates rating statistics over the registry.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{ProximityResolver, ResolutionError, StatsAggregator, distance::haversine_distance};
pub use models::{Branch, NewBranch, GeoPoint, ProximityResult, StatsResult, DistanceAlert};
pub use services::{BranchRepository, InMemoryBranchRepository, NotificationSink};
