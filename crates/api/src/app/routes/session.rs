use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::app::errors::json_error;
use crate::app::services::AppServices;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// `POST /auth/session` — exchange the shared password for a session token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> Response {
    match services.login(body.password.as_bytes()) {
        Ok(token) => {
            tracing::info!("report session opened");
            (StatusCode::CREATED, Json(json!({ "token": token }))).into_response()
        }
        Err(_) => {
            tracing::warn!("rejected login attempt");
            json_error(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "password incorrect",
            )
        }
    }
}
