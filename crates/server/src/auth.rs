// crates/server/src/auth.rs
//! Staff identity resolution and role gating.
//!
//! The portal runs behind the company SSO proxy, which authenticates every
//! request and injects the `x-staff-username` header. Handlers extract
//! [`CurrentStaff`] to learn who is calling and gate on their role with
//! [`CurrentStaff::require_any`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use parceltrack_db::Staff;
use parceltrack_types::Role;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Header the SSO proxy injects with the authenticated staff username.
pub const STAFF_HEADER: &str = "x-staff-username";

/// The authenticated staff member making the request.
#[derive(Debug, Clone)]
pub struct CurrentStaff {
    pub staff: Staff,
    pub role: Role,
}

impl CurrentStaff {
    /// Reject with 403 unless the caller's role is in the allow list.
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "role {} may not perform this action",
                self.role
            )))
        }
    }
}

impl FromRequestParts<Arc<AppState>> for CurrentStaff {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(STAFF_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                ApiError::Unauthorized(format!("missing {STAFF_HEADER} header"))
            })?;

        let staff = state
            .db
            .get_staff(username)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(format!("unknown staff: {username}")))?;

        // A role code outside the lookup table means corrupt staff data.
        let role = Role::from_code(staff.role_id).ok_or_else(|| {
            ApiError::Internal(format!(
                "staff {} has unknown role code {}",
                staff.username, staff.role_id
            ))
        })?;

        Ok(Self { staff, role })
    }
}
