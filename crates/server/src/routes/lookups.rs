// crates/server/src/routes/lookups.rs
//! Lookup-table listings backing the portal's dropdowns.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use parceltrack_db::{Branch, LookupEntry};

use crate::auth::CurrentStaff;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/job-types
pub async fn list_job_types(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
) -> ApiResult<Json<Vec<LookupEntry>>> {
    Ok(Json(state.db.list_job_types().await?))
}

/// GET /api/job-statuses
pub async fn list_job_statuses(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
) -> ApiResult<Json<Vec<LookupEntry>>> {
    Ok(Json(state.db.list_job_statuses().await?))
}

/// GET /api/parcel-statuses
pub async fn list_parcel_statuses(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
) -> ApiResult<Json<Vec<LookupEntry>>> {
    Ok(Json(state.db.list_parcel_statuses().await?))
}

/// GET /api/branches
pub async fn list_branches(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
) -> ApiResult<Json<Vec<Branch>>> {
    Ok(Json(state.db.list_branches().await?))
}

/// Build the lookups router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/job-types", get(list_job_types))
        .route("/job-statuses", get(list_job_statuses))
        .route("/parcel-statuses", get(list_parcel_statuses))
        .route("/branches", get(list_branches))
}
