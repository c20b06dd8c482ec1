use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::{GeoPoint, NewBranch};

/// Request to register a branch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBranchRequest {
    #[validate(
        length(min = 2, max = 100, message = "name must be between 2 and 100 characters"),
        custom(function = "not_blank", message = "name can't be blank")
    )]
    #[serde(default)]
    pub name: String,
    #[validate(
        length(min = 5, max = 200, message = "address must be between 5 and 200 characters"),
        custom(function = "not_blank", message = "address can't be blank")
    )]
    #[serde(default)]
    pub address: String,
    #[validate(
        required(message = "latitude is required"),
        range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90")
    )]
    pub latitude: Option<f64>,
    #[validate(
        required(message = "longitude is required"),
        range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180")
    )]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0, max = 5.0, message = "rating must be between 0 and 5"))]
    #[serde(default)]
    pub rating: Option<f64>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

impl CreateBranchRequest {
    /// Convert a validated request into repository input.
    ///
    /// Returns `None` when the coordinates are missing, which `validate` already rejects.
    pub fn into_new_branch(self) -> Option<NewBranch> {
        let (latitude, longitude) = match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return None,
        };

        Some(NewBranch {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            location: GeoPoint::new(latitude, longitude),
            rating: self.rating,
        })
    }
}

/// Query string for the nearest-branch lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearestQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(alias = "thresholdKm")]
    pub threshold_km: Option<f64>,
}

/// Query string for listing branches
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListBranchesQuery {
    #[serde(alias = "minRating")]
    pub min_rating: Option<f64>,
}

/// Flatten validation errors into human-readable messages, sorted for stable output
pub fn validation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{} is invalid ({})", field, e.code),
            })
        })
        .collect();
    messages.sort();
    messages
}
