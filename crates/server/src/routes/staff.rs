// crates/server/src/routes/staff.rs
//! Staff listing for the job-creation form.
//!
//! Administrators can assign anyone; other creating roles only see staff in
//! their own branch, matching the portal's assignment dropdown.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use parceltrack_db::Staff;
use parceltrack_types::Role;

use crate::auth::CurrentStaff;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/staff — assignable staff for the caller.
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
    staff: CurrentStaff,
) -> ApiResult<Json<Vec<Staff>>> {
    staff.require_any(&[
        Role::Administrator,
        Role::WarehouseManager,
        Role::LogisticsAgent,
    ])?;

    let listing = if staff.role == Role::Administrator {
        state.db.list_staff().await?
    } else {
        state.db.list_staff_for_branch(staff.staff.branch_id).await?
    };
    Ok(Json(listing))
}

/// Build the staff router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/staff", get(list_staff))
}
