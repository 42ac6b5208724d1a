//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: collection registry, snapshot cache, session store
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs and query-string filter parsing
//! - `errors.rs`: consistent error responses

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Runtime configuration (read from the environment by `main.rs`).
pub struct AppConfig {
    /// The shared report password.
    pub password: String,
    /// Directory holding one `<COLLECTION_ID>.json` document file per
    /// collection.
    pub data_dir: PathBuf,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(config)?);
    let auth_state = middleware::AuthState {
        services: Arc::clone(&services),
    };

    // Protected routes: everything that touches report data sits behind the
    // session gate.
    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::session_middleware,
    ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/session", post(routes::session::login))
        .merge(protected)
        .layer(Extension(services))
        .layer(ServiceBuilder::new()))
}
