use serde::{Deserialize, Serialize};

/// Radius used by `Branch::within_default_radius`, in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// True when latitude is in [-90, 90] and longitude in [-180, 180].
    /// NaN is never valid.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A registered bank branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    /// Customer rating in [0, 5]; `None` means unrated
    #[serde(default)]
    pub rating: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Branch {
    /// Great-circle distance from this branch to `point`, in kilometers
    pub fn distance_to(&self, point: &GeoPoint) -> f64 {
        crate::core::distance::distance(&self.location, point)
    }

    /// Whether `point` lies within `radius_km` of this branch (inclusive)
    pub fn within_radius(&self, point: &GeoPoint, radius_km: f64) -> bool {
        self.distance_to(point) <= radius_km
    }

    pub fn within_default_radius(&self, point: &GeoPoint) -> bool {
        self.within_radius(point, DEFAULT_RADIUS_KM)
    }
}

/// Validated attributes of a branch that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBranch {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub rating: Option<f64>,
}

/// Outcome of a nearest-branch lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityResult {
    pub branch: Branch,
    pub distance_km: f64,
    pub exceeds_threshold: bool,
    pub threshold_km: f64,
}

/// Descriptive statistics over the registry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsResult {
    pub total_branches: usize,
    pub average_rating: f64,
    pub high_rating_count: usize,
    pub high_rating_percentage: f64,
}

/// Alert emitted when the nearest branch is farther than the requested threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceAlert {
    pub branch_name: String,
    pub distance_km: f64,
    pub query_point: GeoPoint,
    pub threshold_km: f64,
}

impl std::fmt::Display for DistanceAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nearest branch '{}' is {:.2}km from {}, over the {}km limit",
            self.branch_name, self.distance_km, self.query_point, self.threshold_km
        )
    }
}
