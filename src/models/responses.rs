use serde::{Deserialize, Serialize};
use crate::models::domain::{Branch, ProximityResult};

/// Success envelope shared by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Public representation of a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchView {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Branch> for BranchView {
    fn from(branch: Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name,
            address: branch.address,
            latitude: branch.location.latitude,
            longitude: branch.location.longitude,
            rating: branch.rating,
            created_at: branch.created_at,
            updated_at: branch.updated_at,
        }
    }
}

/// Response for the nearest-branch endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestResponse {
    pub branch: BranchView,
    pub distance_km: f64,
    pub exceeds_threshold: bool,
    pub threshold_km: f64,
}

impl From<ProximityResult> for NearestResponse {
    fn from(result: ProximityResult) -> Self {
        Self {
            branch: result.branch.into(),
            // Display precision only, the comparison already happened on the raw value
            distance_km: crate::core::stats::round2(result.distance_km),
            exceeds_threshold: result.exceeds_threshold,
            threshold_km: result.threshold_km,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            status_code,
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }
}
