use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use crate::core::distance::distance;
use crate::models::{Branch, DistanceAlert, GeoPoint, ProximityResult};
use crate::services::notify::{LogNotifier, NotificationSink};

/// Threshold applied when the caller does not supply one
pub const DEFAULT_THRESHOLD_KM: f64 = 10.0;

/// Reasons a nearest-branch lookup produces no result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    #[error("latitude and longitude are required")]
    MissingCoordinates,

    #[error("coordinates out of range (latitude {latitude}, longitude {longitude}); latitude must be in -90..90 and longitude in -180..180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("no branches available")]
    NoBranchesAvailable,
}

/// Nearest-branch resolver
///
/// Scans the supplied branches in order, picks the closest one and raises a
/// [`DistanceAlert`] through the configured sink when it is farther than the
/// threshold. The sink never influences the returned result.
#[derive(Clone)]
pub struct ProximityResolver {
    sink: Arc<dyn NotificationSink>,
    default_threshold_km: f64,
}

impl ProximityResolver {
    pub fn new(sink: Arc<dyn NotificationSink>, default_threshold_km: f64) -> Self {
        Self {
            sink,
            default_threshold_km,
        }
    }

    pub fn with_sink(sink: Arc<dyn NotificationSink>) -> Self {
        Self::new(sink, DEFAULT_THRESHOLD_KM)
    }

    pub fn default_threshold_km(&self) -> f64 {
        self.default_threshold_km
    }

    /// Find the branch closest to the query coordinates
    ///
    /// # Arguments
    /// * `latitude` / `longitude` - Query point in degrees; both are required
    /// * `threshold_km` - Alert threshold, falls back to the configured default.
    ///   Negative values are accepted and make every result exceed.
    /// * `branches` - Registry snapshot; iteration order decides ties
    pub fn resolve(
        &self,
        latitude: Option<f64>,
        longitude: Option<f64>,
        threshold_km: Option<f64>,
        branches: &[Branch],
    ) -> Result<ProximityResult, ResolutionError> {
        let query = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude),
            _ => return Err(ResolutionError::MissingCoordinates),
        };

        self.resolve_point(query, threshold_km.unwrap_or(self.default_threshold_km), branches)
    }

    /// Same as [`resolve`](Self::resolve) for an already assembled point
    pub fn resolve_point(
        &self,
        query: GeoPoint,
        threshold_km: f64,
        branches: &[Branch],
    ) -> Result<ProximityResult, ResolutionError> {
        if !query.is_valid() {
            return Err(ResolutionError::InvalidCoordinates {
                latitude: query.latitude,
                longitude: query.longitude,
            });
        }

        let (nearest, distance_km) = nearest_branch(&query, branches)
            .ok_or(ResolutionError::NoBranchesAvailable)?;

        let exceeds_threshold = distance_km > threshold_km;

        tracing::debug!(
            branch_id = nearest.id,
            distance_km,
            threshold_km,
            exceeds_threshold,
            scanned = branches.len(),
            "Resolved nearest branch"
        );

        if exceeds_threshold {
            let alert = DistanceAlert {
                branch_name: nearest.name.clone(),
                distance_km,
                query_point: query,
                threshold_km,
            };
            // A sink panic must not take the lookup down with it
            match panic::catch_unwind(AssertUnwindSafe(|| self.sink.notify(&alert))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::warn!(branch = %alert.branch_name, "Failed to deliver distance alert: {}", e);
                }
                Err(_) => {
                    tracing::warn!(branch = %alert.branch_name, "Notification sink panicked while delivering distance alert");
                }
            }
        }

        Ok(ProximityResult {
            branch: nearest.clone(),
            distance_km,
            exceeds_threshold,
            threshold_km,
        })
    }
}

impl Default for ProximityResolver {
    fn default() -> Self {
        Self::with_sink(Arc::new(LogNotifier))
    }
}

impl std::fmt::Debug for ProximityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProximityResolver")
            .field("default_threshold_km", &self.default_threshold_km)
            .finish_non_exhaustive()
    }
}

/// Full scan for the minimum distance. Only a strictly smaller distance replaces
/// the current best, so the first of several equidistant branches wins.
fn nearest_branch<'a>(query: &GeoPoint, branches: &'a [Branch]) -> Option<(&'a Branch, f64)> {
    let mut best: Option<(&Branch, f64)> = None;

    for branch in branches {
        let d = distance(query, &branch.location);
        match best {
            Some((_, best_distance)) if d >= best_distance => {}
            _ => best = Some((branch, d)),
        }
    }

    best
}
