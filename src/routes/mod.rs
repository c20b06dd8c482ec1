// Route exports
pub mod branches;
pub mod errors;

use actix_web::web;

pub use branches::AppState;
pub use errors::{handle_json_payload_error, handle_query_payload_error, JsonError};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(branches::configure),
    );
}

/// Register shared state, extractor error handlers and routes
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .configure(configure_routes);
    }
}
