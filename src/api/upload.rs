//! Upload handlers

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::upload::UploadedTable;

use super::handlers::{api_error, ApiError, AppState};

/// Parse an uploaded CSV body and keep it for display
pub async fn upload_table(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Arc<UploadedTable>>, ApiError> {
    match UploadedTable::parse(&body) {
        Ok(table) => {
            info!(
                "Accepted upload with {} columns and {} rows",
                table.headers.len(),
                table.row_count()
            );
            let table = Arc::new(table);
            *state.upload.write().await = Some(Arc::clone(&table));
            Ok(Json(table))
        }
        Err(e) => {
            warn!("Rejected upload: {}", e);
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}

/// The most recent successful upload
pub async fn get_upload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Arc<UploadedTable>>, ApiError> {
    state
        .upload
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No file uploaded"))
}
