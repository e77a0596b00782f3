use axum::{extract::Query, extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::analytics::{Dashboard, DashboardCache};
use crate::filter::FilterCriteria;
use crate::store::{RecordStore, StoreHandle, StoreInfo};
use crate::upload::UploadedTable;

pub struct AppState {
    pub store: Arc<StoreHandle>,
    pub cache: DashboardCache,
    /// Most recent successful upload, shown separately from the dashboard
    pub upload: RwLock<Option<Arc<UploadedTable>>>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Filter selections as sent by the dashboard controls
///
/// Sets are comma separated; missing dates default to the store's range.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub countries: Option<String>,
    pub sports: Option<String>,
}

fn split_set(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

impl DashboardQuery {
    pub fn into_criteria(self, store: &RecordStore) -> FilterCriteria {
        let defaults = store.default_criteria();
        FilterCriteria::new(
            self.start_date.unwrap_or(defaults.start_date),
            self.end_date.unwrap_or(defaults.end_date),
        )
        .with_countries(split_set(self.countries.as_deref()))
        .with_sports(split_set(self.sports.as_deref()))
    }
}

#[derive(Serialize)]
pub struct FiltersResponse {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub countries: Vec<String>,
    pub sports: Vec<String>,
    pub store: StoreInfo,
}

#[derive(Serialize)]
pub struct ReloadResponse {
    pub message: String,
    pub generation: u64,
    pub record_count: usize,
}

/// Options for the date pickers and multi-selects
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FiltersResponse> {
    let snapshot = state.store.snapshot().await;
    let store = &snapshot.store;
    let bounds = store.date_bounds();

    Json(FiltersResponse {
        start_date: bounds.map(|(start, _)| start),
        end_date: bounds.map(|(_, end)| end),
        countries: store.countries(),
        sports: store.sports(),
        store: store.info(),
    })
}

/// Compute (or fetch the memoized) dashboard for a set of filters
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Json<Arc<Dashboard>> {
    Json(dashboard_for(&state, query).await)
}

pub(crate) async fn dashboard_for(state: &AppState, query: DashboardQuery) -> Arc<Dashboard> {
    let snapshot = state.store.snapshot().await;
    let criteria = query.into_criteria(&snapshot.store);
    state
        .cache
        .get_or_compute(snapshot.generation, &snapshot.store, criteria)
        .await
}

/// Reload the base dataset from its source
pub async fn reload(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReloadResponse>, ApiError> {
    match state.store.reload().await {
        Ok(snapshot) => {
            state.cache.invalidate_all();
            Ok(Json(ReloadResponse {
                message: "Dataset reloaded".to_string(),
                generation: snapshot.generation,
                record_count: snapshot.store.len(),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to reload dataset: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to reload dataset: {}", e),
            ))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        message: "OK".to_string(),
    })
}
