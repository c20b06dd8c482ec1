use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{Branch, GeoPoint, NewBranch};
use crate::services::repository::{BranchRepository, RepositoryError};

/// PostgreSQL-backed branch repository
///
/// Migrations under `migrations/` are applied on connect.
pub struct PostgresBranchRepository {
    pool: PgPool,
}

impl PostgresBranchRepository {
    /// Create a new PostgreSQL repository from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL repository from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, RepositoryError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool. Migrations are not run.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn branch_from_row(row: &PgRow) -> Result<Branch, sqlx::Error> {
    Ok(Branch {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        address: row.try_get("address")?,
        location: GeoPoint::new(row.try_get("latitude")?, row.try_get("longitude")?),
        rating: row.try_get("rating")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl BranchRepository for PostgresBranchRepository {
    async fn create(&self, branch: NewBranch) -> Result<Branch, RepositoryError> {
        let query = r#"
            INSERT INTO branches (name, address, latitude, longitude, rating, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, name, address, latitude, longitude, rating, created_at, updated_at
        "#;

        let row = sqlx::query(query)
            .bind(&branch.name)
            .bind(&branch.address)
            .bind(branch.location.latitude)
            .bind(branch.location.longitude)
            .bind(branch.rating)
            .fetch_one(&self.pool)
            .await?;

        let stored = branch_from_row(&row)?;
        tracing::debug!("Inserted branch {} ({})", stored.id, stored.name);

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>, RepositoryError> {
        let query = r#"
            SELECT id, name, address, latitude, longitude, rating, created_at, updated_at
            FROM branches
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(branch_from_row).transpose()?)
    }

    async fn find_all(&self) -> Result<Vec<Branch>, RepositoryError> {
        let query = r#"
            SELECT id, name, address, latitude, longitude, rating, created_at, updated_at
            FROM branches
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let branches = rows
            .iter()
            .map(branch_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} branches", branches.len());

        Ok(branches)
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM branches").execute(&self.pool).await?;

        tracing::info!("Deleted {} branches", result.rows_affected());

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
