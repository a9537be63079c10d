//! API route handlers for the parceltrack server.

pub mod health;
pub mod jobs;
pub mod lookups;
pub mod parcels;
pub mod staff;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET    /api/health           - Health check
/// - GET    /api/jobs             - Role-filtered job listing
/// - POST   /api/jobs             - Create a job over selected parcels
/// - GET    /api/jobs/{id}        - Job detail with parcel IDs
/// - PUT    /api/jobs/{id}        - Edit a job; completion triggers routing
/// - DELETE /api/jobs/{id}        - Delete a job
/// - GET    /api/parcels          - List parcels
/// - GET    /api/parcels/{id}     - Parcel detail
/// - GET    /api/staff            - Assignable staff (branch-scoped)
/// - GET    /api/job-types        - Job type lookup
/// - GET    /api/job-statuses     - Job status lookup
/// - GET    /api/parcel-statuses  - Parcel status lookup
/// - GET    /api/branches         - Branch lookup
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", jobs::router())
        .nest("/api", parcels::router())
        .nest("/api", staff::router())
        .nest("/api", lookups::router())
        .with_state(state)
}
