// Service exports
pub mod notify;
pub mod postgres;
pub mod repository;
pub mod seed;

pub use notify::{NotificationSink, NotifyError, LogNotifier, WebhookNotifier, FanoutNotifier};
pub use postgres::PostgresBranchRepository;
pub use repository::{BranchRepository, InMemoryBranchRepository, RepositoryError};
pub use seed::{demo_branches, seed_repository};
