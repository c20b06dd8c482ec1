use actix_cors::Cors;
use actix_web::{middleware, App, HttpServer};
use branch_locator::config::{LoggingSettings, NotificationSettings, Settings};
use branch_locator::core::ProximityResolver;
use branch_locator::routes::{self, AppState};
use branch_locator::services::{
    seed_repository, BranchRepository, FanoutNotifier, InMemoryBranchRepository, LogNotifier,
    NotificationSink, PostgresBranchRepository, WebhookNotifier,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_notifier(settings: &NotificationSettings) -> Arc<dyn NotificationSink> {
    let mut fanout = FanoutNotifier::default();

    if settings.log_alerts {
        fanout.push(Arc::new(LogNotifier));
    }

    if let Some(url) = &settings.webhook_url {
        match WebhookNotifier::new(url.clone(), Duration::from_secs(settings.webhook_timeout_secs)) {
            Ok(webhook) => {
                info!("Distance alerts will be posted to {}", webhook.url());
                fanout.push(Arc::new(webhook));
            }
            Err(e) => error!("Failed to create alert webhook client, webhook disabled: {}", e),
        }
    }

    if fanout.is_empty() {
        warn!("All alert sinks are disabled; distance alerts will be dropped");
    }

    Arc::new(fanout)
}

async fn build_repository(settings: &Settings) -> std::io::Result<Arc<dyn BranchRepository>> {
    let db = &settings.database;

    let repository: Arc<dyn BranchRepository> = match &db.url {
        Some(url) => {
            let repo = PostgresBranchRepository::from_settings(
                url,
                db.max_connections,
                db.min_connections,
                db.acquire_timeout_secs,
                db.idle_timeout_secs,
            )
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, e)
            })?;
            info!("PostgreSQL repository initialized (max: {} connections)", db.max_connections.unwrap_or(10));
            Arc::new(repo)
        }
        None => {
            info!("No database configured, keeping branches in memory");
            Arc::new(InMemoryBranchRepository::new())
        }
    };

    if db.seed_demo_data {
        seed_repository(repository.as_ref()).await.map_err(|e| {
            error!("Failed to seed demo branches: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;
    }

    Ok(repository)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    init_logging(&settings.logging);

    info!("Starting branch locator service...");

    let repository = build_repository(&settings).await?;

    let resolver = ProximityResolver::new(
        build_notifier(&settings.notifications),
        settings.proximity.default_threshold_km,
    );

    info!("Resolver initialized with default threshold {}km", resolver.default_threshold_km());

    let app_state = AppState::new(repository, resolver);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .configure(routes::configure_app(app_state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
