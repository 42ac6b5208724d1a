use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::app::services::ReportError;

pub fn report_error_to_response(err: ReportError) -> axum::response::Response {
    match err {
        ReportError::UnknownCollection(id) => json_error(
            StatusCode::NOT_FOUND,
            "unknown_collection",
            format!("no collection named '{id}'"),
        ),
        ReportError::Fetch(e) => {
            tracing::error!(error = %e, "snapshot fetch failed");
            json_error(StatusCode::BAD_GATEWAY, "fetch_failed", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
