use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{sort_by_rating_desc, with_min_rating, ProximityResolver, ResolutionError, StatsAggregator};
use crate::models::{
    validation_messages, ApiResponse, BranchView, CreateBranchRequest, ErrorResponse,
    HealthResponse, ListBranchesQuery, NearestQuery, NearestResponse,
};
use crate::services::{BranchRepository, RepositoryError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn BranchRepository>,
    pub resolver: ProximityResolver,
    pub stats: StatsAggregator,
}

impl AppState {
    pub fn new(repository: Arc<dyn BranchRepository>, resolver: ProximityResolver) -> Self {
        Self {
            repository,
            resolver,
            stats: StatsAggregator::new(),
        }
    }
}

/// Configure all branch-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/docs", web::get().to(documentation))
        .route("/branches", web::post().to(create_branch))
        .route("/branches", web::get().to(list_branches))
        // Literal segments must be registered before `{id}`
        .route("/branches/nearest", web::get().to(nearest_branch))
        .route("/branches/stats", web::get().to(branch_stats))
        .route("/branches/{id}", web::get().to(get_branch));
}

fn storage_error(context: &str, e: RepositoryError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(context, e.to_string(), 500))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let storage_healthy = state.repository.health_check().await.unwrap_or(false);

    let status = if storage_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Endpoint catalogue
///
/// GET /api/docs
async fn documentation(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ApiResponse::ok(serde_json::json!({
        "name": "Branch Locator API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Bank branch registry with nearest-branch lookup",
        "endpoints": [
            {
                "method": "POST",
                "path": "/api/branches",
                "description": "Register a branch",
                "body": {
                    "name": "string (required, 2-100 characters)",
                    "address": "string (required, 5-200 characters)",
                    "latitude": "number (required, -90 to 90)",
                    "longitude": "number (required, -180 to 180)",
                    "rating": "number (optional, 0 to 5)"
                }
            },
            {
                "method": "GET",
                "path": "/api/branches",
                "description": "List branches ordered by rating",
                "query": { "min_rating": "number (optional)" }
            },
            {
                "method": "GET",
                "path": "/api/branches/{id}",
                "description": "Fetch a branch by id"
            },
            {
                "method": "GET",
                "path": "/api/branches/nearest",
                "description": "Find the branch closest to a point",
                "query": {
                    "latitude": "number (required, -90 to 90)",
                    "longitude": "number (required, -180 to 180)",
                    "threshold_km": format!(
                        "number (optional, default {})",
                        state.resolver.default_threshold_km()
                    )
                },
                "example": "/api/branches/nearest?latitude=4.7110&longitude=-74.0721&threshold_km=5.0"
            },
            {
                "method": "GET",
                "path": "/api/branches/stats",
                "description": "Branch count and rating statistics"
            }
        ],
        "status_codes": {
            "200": "OK",
            "201": "Created",
            "400": "Bad Request - missing or invalid parameters",
            "404": "Not Found",
            "422": "Unprocessable Entity - validation failed"
        }
    })))
}

/// Register a branch
///
/// POST /api/branches
///
/// Request body:
/// ```json
/// {
///   "name": "Banco de Bogotá",
///   "address": "Calle 72 # 10-07, Bogotá",
///   "latitude": 4.7110,
///   "longitude": -74.0721,
///   "rating": 4.5
/// }
/// ```
async fn create_branch(
    state: web::Data<AppState>,
    req: web::Json<CreateBranchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        let details = validation_messages(&errors);
        tracing::info!("Rejected branch registration: {:?}", details);
        return HttpResponse::UnprocessableEntity().json(
            ErrorResponse::new("Validation failed", "Branch could not be created", 422)
                .with_details(details),
        );
    }

    let new_branch = match req.into_inner().into_new_branch() {
        Some(branch) => branch,
        None => {
            return HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
                "Validation failed",
                "latitude and longitude are required",
                422,
            ));
        }
    };

    match state.repository.create(new_branch).await {
        Ok(branch) => {
            tracing::info!("Created branch {} ({})", branch.id, branch.name);
            HttpResponse::Created().json(ApiResponse::with_message(
                BranchView::from(branch),
                "Branch created",
            ))
        }
        Err(e) => storage_error("Failed to create branch", e),
    }
}

/// List branches, best rated first
///
/// GET /api/branches?min_rating={rating}
async fn list_branches(
    state: web::Data<AppState>,
    query: web::Query<ListBranchesQuery>,
) -> impl Responder {
    let mut branches = match state.repository.find_all().await {
        Ok(branches) => branches,
        Err(e) => return storage_error("Failed to list branches", e),
    };

    if let Some(min_rating) = query.min_rating {
        branches = with_min_rating(branches, min_rating);
    }
    sort_by_rating_desc(&mut branches);

    let views: Vec<BranchView> = branches.into_iter().map(BranchView::from).collect();
    HttpResponse::Ok().json(ApiResponse::ok(views))
}

/// Fetch a single branch
///
/// GET /api/branches/{id}
async fn get_branch(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    match state.repository.find_by_id(id).await {
        Ok(Some(branch)) => HttpResponse::Ok().json(ApiResponse::ok(BranchView::from(branch))),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Branch not found",
            format!("No branch with id {}", id),
            404,
        )),
        Err(e) => storage_error("Failed to fetch branch", e),
    }
}

/// Nearest branch to a point
///
/// GET /api/branches/nearest?latitude={lat}&longitude={lon}&threshold_km={km}
async fn nearest_branch(
    state: web::Data<AppState>,
    query: web::Query<NearestQuery>,
) -> impl Responder {
    let branches = match state.repository.find_all().await {
        Ok(branches) => branches,
        Err(e) => return storage_error("Failed to load branches", e),
    };

    match state
        .resolver
        .resolve(query.latitude, query.longitude, query.threshold_km, &branches)
    {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::ok(NearestResponse::from(result))),
        Err(e @ ResolutionError::MissingCoordinates) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("Missing coordinates", e.to_string(), 400))
        }
        Err(e @ ResolutionError::InvalidCoordinates { .. }) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid coordinates", e.to_string(), 400))
        }
        Err(e @ ResolutionError::NoBranchesAvailable) => {
            tracing::debug!("Nearest-branch lookup on an empty registry");
            HttpResponse::NotFound().json(ErrorResponse::new("No branches available", e.to_string(), 404))
        }
    }
}

/// Registry statistics
///
/// GET /api/branches/stats
async fn branch_stats(state: web::Data<AppState>) -> impl Responder {
    match state.repository.find_all().await {
        Ok(branches) => HttpResponse::Ok().json(ApiResponse::ok(state.stats.compute(&branches))),
        Err(e) => storage_error("Failed to load branches", e),
    }
}
