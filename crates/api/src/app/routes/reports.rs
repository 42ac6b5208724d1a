use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use stockage_core::CollectionId;

use crate::app::dto::{self, ReportResponse};
use crate::app::errors::{json_error, report_error_to_response};
use crate::app::services::AppServices;

/// `GET /collections` — the registered collection ids.
pub async fn list_collections(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    Json(services.collections())
}

/// `GET /collections/{id}/report` — one full report render.
///
/// Filters come in as query parameters (`country`, `code`, `year`, `month`,
/// `style`), repeated and/or comma-separated; `now` is the wall clock, so
/// the same stock drifts one bucket boundary further every 30 days.
pub async fn report(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let collection = match id.parse::<CollectionId>() {
        Ok(c) => c,
        Err(e) => {
            return json_error(StatusCode::BAD_REQUEST, "invalid_collection", e.to_string())
        }
    };

    let filters = match dto::parse_filters(&params) {
        Ok(f) => f,
        Err(response) => return response,
    };

    match services.report(&collection, &filters, Utc::now()).await {
        Ok(report) => Json(ReportResponse::from_report(&collection, report)).into_response(),
        Err(err) => report_error_to_response(err),
    }
}
