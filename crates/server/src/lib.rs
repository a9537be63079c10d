// crates/server/src/lib.rs
//! Parceltrack server library.
//!
//! This crate provides the Axum-based HTTP server for the parceltrack portal.
//! It serves a role-gated REST API over jobs, parcels, staff and branches,
//! and runs the completion-routing rules when a job is saved as Completed.

pub mod auth;
pub mod dispatch;
pub mod error;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use axum::Router;
use parceltrack_db::Database;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, jobs, parcels, staff, lookups)
/// - CORS for the intranet frontend (allows any origin)
/// - Request tracing
pub fn create_app(db: Database) -> Router {
    let state = AppState::new(db);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// Integration Tests
// ============================================================================
