// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Branch, NewBranch, GeoPoint, ProximityResult, StatsResult, DistanceAlert, DEFAULT_RADIUS_KM};
pub use requests::{CreateBranchRequest, NearestQuery, ListBranchesQuery, validation_messages};
pub use responses::{ApiResponse, BranchView, NearestResponse, HealthResponse, ErrorResponse};
