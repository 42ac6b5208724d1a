use axum::{routing::get, Router};

pub mod reports;
pub mod session;
pub mod system;

/// The protected routing tree (everything behind the session gate).
pub fn router() -> Router {
    Router::new()
        .route("/collections", get(reports::list_collections))
        .route("/collections/:id/report", get(reports::report))
}
