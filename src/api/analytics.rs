//! Aggregate export handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::analytics::AggregateKind;

use super::handlers::{api_error, dashboard_for, AppState, DashboardQuery};

/// Download one aggregate of the current filtered view as CSV
pub async fn export_aggregate(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let Some(kind) = AggregateKind::from_slug(&kind) else {
        return api_error(
            StatusCode::NOT_FOUND,
            format!("Unknown aggregate '{}'", kind),
        )
        .into_response();
    };

    let dashboard = dashboard_for(&state, query).await;
    match dashboard.export(kind) {
        Ok(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", kind.file_name()),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to export {}: {}", kind.slug(), e);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to export aggregate",
            )
            .into_response()
        }
    }
}
