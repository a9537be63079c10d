// crates/server/src/routes/parcels.rs
//! Parcel listing endpoints (form population and status lookup).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use parceltrack_db::Parcel;

use crate::auth::CurrentStaff;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/parcels — all parcels with their status names.
pub async fn list_parcels(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
) -> ApiResult<Json<Vec<Parcel>>> {
    Ok(Json(state.db.list_parcels().await?))
}

/// GET /api/parcels/{id} — a single parcel.
pub async fn get_parcel(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
    Path(id): Path<String>,
) -> ApiResult<Json<Parcel>> {
    let parcel = state
        .db
        .get_parcel(&id)
        .await?
        .ok_or_else(|| ApiError::BadRequest(format!("unknown parcel: {id}")))?;
    Ok(Json(parcel))
}

/// Build the parcels router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/parcels", get(list_parcels))
        .route("/parcels/{id}", get(get_parcel))
}
