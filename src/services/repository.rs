use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::{Branch, NewBranch};

/// Errors that can occur when reading or writing branches
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Storage for branch records
///
/// `find_all` returns branches in creation order; the nearest-branch
/// tie-break relies on that order being stable between calls.
#[async_trait]
pub trait BranchRepository: Send + Sync {
    /// Store a new branch, assigning its id and timestamps
    async fn create(&self, branch: NewBranch) -> Result<Branch, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<Branch>, RepositoryError>;

    /// Remove every branch, returning how many were deleted
    async fn delete_all(&self) -> Result<u64, RepositoryError>;

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}

/// In-process repository used for tests and database-less deployments
#[derive(Debug, Default)]
pub struct InMemoryBranchRepository {
    inner: RwLock<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    branches: Vec<Branch>,
    next_id: i64,
}

impl InMemoryBranchRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BranchRepository for InMemoryBranchRepository {
    async fn create(&self, branch: NewBranch) -> Result<Branch, RepositoryError> {
        let mut state = self.inner.write().await;
        state.next_id += 1;

        let now = Utc::now();
        let stored = Branch {
            id: state.next_id,
            name: branch.name,
            address: branch.address,
            location: branch.location,
            rating: branch.rating,
            created_at: now,
            updated_at: now,
        };
        state.branches.push(stored.clone());

        tracing::debug!("Stored branch {} ({})", stored.id, stored.name);

        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Branch>, RepositoryError> {
        let state = self.inner.read().await;
        Ok(state.branches.iter().find(|b| b.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Branch>, RepositoryError> {
        Ok(self.inner.read().await.branches.clone())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut state = self.inner.write().await;
        let removed = state.branches.len() as u64;
        state.branches.clear();
        Ok(removed)
    }
}
