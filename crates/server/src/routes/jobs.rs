// crates/server/src/routes/jobs.rs
//! Job CRUD endpoints.
//!
//! - GET    /api/jobs      — role-filtered listing
//! - POST   /api/jobs      — create a job over selected parcels
//! - GET    /api/jobs/{id} — job detail
//! - PUT    /api/jobs/{id} — edit; completion triggers follow-on routing
//! - DELETE /api/jobs/{id} — delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use parceltrack_db::{Job, JobUpdate};
use parceltrack_types::{JobStatus, JobType, Role};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentStaff;
use crate::dispatch::route_completed_job;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Roles allowed to create jobs.
const CREATE_ROLES: &[Role] = &[
    Role::Administrator,
    Role::WarehouseManager,
    Role::LogisticsAgent,
];

/// Roles allowed to edit and delete jobs.
const EDIT_ROLES: &[Role] = &[Role::Administrator, Role::WarehouseManager];

/// Body for POST /api/jobs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub staff_username: String,
    pub job_type_id: i64,
    #[serde(default)]
    pub parcel_ids: Vec<String>,
}

/// Body for PUT /api/jobs/{id}.
///
/// The assignee is not editable; `version` is the value the client read,
/// checked against the row to detect concurrent edits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditJobRequest {
    pub job_status_id: i64,
    pub job_type_id: i64,
    #[serde(default)]
    pub date_completed: Option<i64>,
    pub version: i64,
}

/// Response for PUT /api/jobs/{id}: the saved job plus any follow-on jobs
/// completion routing created.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditJobResponse {
    pub job: Job,
    pub spawned: Vec<Job>,
}

/// GET /api/jobs — list jobs scoped by the caller's role.
///
/// Administrators and logistics agents see every job, warehouse managers see
/// their branch, workers and drivers see only their own.
pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    staff: CurrentStaff,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = match staff.role {
        Role::Administrator | Role::LogisticsAgent => state.db.list_jobs().await?,
        Role::WarehouseManager => state.db.list_jobs_for_branch(staff.staff.branch_id).await?,
        Role::WarehouseWorker | Role::DeliveryDriver => {
            state.db.list_jobs_for_staff(&staff.staff.username).await?
        }
    };
    Ok(Json(jobs))
}

/// GET /api/jobs/{id} — job detail with parcel IDs.
pub async fn get_job(
    State(state): State<Arc<AppState>>,
    _staff: CurrentStaff,
    Path(id): Path<i64>,
) -> ApiResult<Json<Job>> {
    let job = state.db.get_job(id).await?.ok_or(ApiError::JobNotFound(id))?;
    Ok(Json(job))
}

/// POST /api/jobs — create a job in status Created over the selected parcels.
pub async fn create_job(
    State(state): State<Arc<AppState>>,
    staff: CurrentStaff,
    Json(body): Json<CreateJobRequest>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    staff.require_any(CREATE_ROLES)?;

    JobType::from_code(body.job_type_id)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown job type code: {}", body.job_type_id)))?;

    if state.db.get_staff(&body.staff_username).await?.is_none() {
        return Err(ApiError::BadRequest(format!(
            "unknown assignee: {}",
            body.staff_username
        )));
    }
    for parcel_id in &body.parcel_ids {
        if state.db.get_parcel(parcel_id).await?.is_none() {
            return Err(ApiError::BadRequest(format!("unknown parcel: {parcel_id}")));
        }
    }

    let job = state
        .db
        .create_job(
            &body.staff_username,
            body.job_type_id,
            &body.parcel_ids,
            Utc::now().timestamp(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/jobs/{id} — edit status/type/completion date.
///
/// Saving with status Completed stamps the completion date and runs the
/// follow-on routing rules. A stale version is 409 when the job still
/// exists, 404 when it vanished.
pub async fn edit_job(
    State(state): State<Arc<AppState>>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
    Json(body): Json<EditJobRequest>,
) -> ApiResult<Json<EditJobResponse>> {
    staff.require_any(EDIT_ROLES)?;

    let status = JobStatus::from_code(body.job_status_id)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown job status code: {}", body.job_status_id)))?;
    JobType::from_code(body.job_type_id)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown job type code: {}", body.job_type_id)))?;

    let job = state.db.get_job(id).await?.ok_or(ApiError::JobNotFound(id))?;

    if let Some(date_completed) = body.date_completed {
        if date_completed < job.date_created {
            return Err(ApiError::BadRequest(
                "completion date precedes creation date".to_string(),
            ));
        }
    }

    // Completing stamps the completion time server-side.
    let date_completed = if status == JobStatus::Completed {
        Some(Utc::now().timestamp())
    } else {
        body.date_completed
    };

    let applied = state
        .db
        .update_job(
            id,
            &JobUpdate {
                job_status_id: status.code(),
                job_type_id: body.job_type_id,
                date_completed,
                expected_version: body.version,
            },
        )
        .await?;
    if !applied {
        return if state.db.job_exists(id).await? {
            Err(ApiError::Conflict(format!("job {id} was modified concurrently")))
        } else {
            Err(ApiError::JobNotFound(id))
        };
    }

    let job = state.db.get_job(id).await?.ok_or(ApiError::JobNotFound(id))?;

    let spawned = if status == JobStatus::Completed {
        route_completed_job(&state.db, &job).await?
    } else {
        Vec::new()
    };

    Ok(Json(EditJobResponse { job, spawned }))
}

/// DELETE /api/jobs/{id} — delete a job. Missing jobs delete silently, as
/// the portal always has.
pub async fn delete_job(
    State(state): State<Arc<AppState>>,
    staff: CurrentStaff,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    staff.require_any(EDIT_ROLES)?;
    state.db.delete_job(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Build the jobs router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/{id}", get(get_job).put(edit_job).delete(delete_job))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::STAFF_HEADER;
    use crate::create_app;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use parceltrack_db::Database;
    use tower::ServiceExt;

    const LJ: i64 = 1;
    const MB: i64 = 2;

    /// In-memory portal with one staff member per role.
    async fn seeded_app() -> (Database, axum::Router) {
        let db = Database::new_in_memory().await.unwrap();
        db.insert_staff("admin", Role::Administrator.code(), LJ).await.unwrap();
        db.insert_staff("manager-lj", Role::WarehouseManager.code(), LJ).await.unwrap();
        db.insert_staff("worker-lj", Role::WarehouseWorker.code(), LJ).await.unwrap();
        db.insert_staff("agent", Role::LogisticsAgent.code(), MB).await.unwrap();
        db.insert_staff("driver-lj", Role::DeliveryDriver.code(), LJ).await.unwrap();
        db.insert_staff("driver-mb", Role::DeliveryDriver.code(), MB).await.unwrap();
        let app = create_app(db.clone());
        (db, app)
    }

    async fn send(
        app: &axum::Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(STAFF_HEADER, user);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_listing_requires_identity() {
        let (_db, app) = seeded_app().await;

        let (status, body) = send(&app, Method::GET, "/api/jobs", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");

        let (status, _) = send(&app, Method::GET, "/api/jobs", Some("ghost"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_listing_is_role_scoped() {
        let (db, app) = seeded_app().await;
        db.create_job("worker-lj", 3, &[], 100).await.unwrap();
        db.create_job("driver-lj", 7, &[], 100).await.unwrap();
        db.create_job("driver-mb", 7, &[], 100).await.unwrap();

        // Admin and logistics agent see all three.
        for user in ["admin", "agent"] {
            let (status, body) = send(&app, Method::GET, "/api/jobs", Some(user), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body.as_array().unwrap().len(), 3, "{user}");
        }

        // Manager sees the LJ branch only.
        let (_, body) = send(&app, Method::GET, "/api/jobs", Some("manager-lj"), None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        // Driver sees only their own.
        let (_, body) = send(&app, Method::GET, "/api/jobs", Some("driver-mb"), None).await;
        let jobs = body.as_array().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["staffUsername"], "driver-mb");
    }

    #[tokio::test]
    async fn test_create_job_role_gate_and_validation() {
        let (db, app) = seeded_app().await;
        db.insert_parcel("P-1", "1000").await.unwrap();

        let body = serde_json::json!({
            "staffUsername": "worker-lj",
            "jobTypeId": 3,
            "parcelIds": ["P-1"],
        });

        // Drivers may not create jobs.
        let (status, _) = send(&app, Method::POST, "/api/jobs", Some("driver-lj"), Some(body.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Unknown job type.
        let bad_type = serde_json::json!({ "staffUsername": "worker-lj", "jobTypeId": 99 });
        let (status, resp) = send(&app, Method::POST, "/api/jobs", Some("agent"), Some(bad_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["details"].as_str().unwrap().contains("99"));

        // Unknown assignee.
        let bad_assignee = serde_json::json!({ "staffUsername": "ghost", "jobTypeId": 3 });
        let (status, _) = send(&app, Method::POST, "/api/jobs", Some("agent"), Some(bad_assignee)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Unknown parcel.
        let bad_parcel = serde_json::json!({
            "staffUsername": "worker-lj", "jobTypeId": 3, "parcelIds": ["missing"],
        });
        let (status, _) = send(&app, Method::POST, "/api/jobs", Some("agent"), Some(bad_parcel)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // Happy path.
        let (status, created) = send(&app, Method::POST, "/api/jobs", Some("agent"), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["jobStatus"], "Created");
        assert_eq!(created["parcelIds"], serde_json::json!(["P-1"]));
    }

    #[tokio::test]
    async fn test_get_job_detail_and_404() {
        let (db, app) = seeded_app().await;
        db.insert_parcel("P-1", "1000").await.unwrap();
        let job = db.create_job("worker-lj", 3, &["P-1".into()], 100).await.unwrap();

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/jobs/{}", job.id),
            Some("worker-lj"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobType"], "Warehouse sorting");

        let (status, body) = send(&app, Method::GET, "/api/jobs/999", Some("admin"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Job not found");
    }

    #[tokio::test]
    async fn test_edit_validation_and_conflicts() {
        let (db, app) = seeded_app().await;
        let job = db.create_job("worker-lj", 1, &[], 1_000).await.unwrap();
        let uri = format!("/api/jobs/{}", job.id);

        // Workers may not edit.
        let edit = serde_json::json!({ "jobStatusId": 1, "jobTypeId": 1, "version": 1 });
        let (status, _) = send(&app, Method::PUT, &uri, Some("worker-lj"), Some(edit.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Completion date before creation date.
        let backdated = serde_json::json!({
            "jobStatusId": 1, "jobTypeId": 1, "dateCompleted": 500, "version": 1,
        });
        let (status, body) = send(&app, Method::PUT, &uri, Some("manager-lj"), Some(backdated)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].as_str().unwrap().contains("precedes"));

        // Stale version conflicts once someone else saved.
        let (status, _) = send(&app, Method::PUT, &uri, Some("manager-lj"), Some(edit.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, Method::PUT, &uri, Some("manager-lj"), Some(edit.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");

        // Editing a missing job is 404.
        let (status, _) = send(&app, Method::PUT, "/api/jobs/999", Some("admin"), Some(edit)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_completion_stamps_date_and_routes() {
        let (db, app) = seeded_app().await;
        db.insert_parcel("P-1", "9500").await.unwrap();
        // Driver job in the cargo chain.
        let job = db
            .create_job("driver-mb", JobType::CargoDeparture.code(), &["P-1".into()], 100)
            .await
            .unwrap();

        let edit = serde_json::json!({
            "jobStatusId": JobStatus::Completed.code(),
            "jobTypeId": JobType::CargoDeparture.code(),
            "version": job.version,
        });
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/jobs/{}", job.id),
            Some("manager-lj"),
            Some(edit),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job"]["jobStatus"], "Completed");
        assert!(body["job"]["dateCompleted"].is_i64());

        // Completion routing spawned the arrival confirmation.
        let spawned = body["spawned"].as_array().unwrap();
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0]["jobType"], "Cargo arrival confirmation");
        assert_eq!(spawned[0]["staffUsername"], "driver-mb");
    }

    #[tokio::test]
    async fn test_delete_job() {
        let (db, app) = seeded_app().await;
        let job = db.create_job("worker-lj", 1, &[], 100).await.unwrap();
        let uri = format!("/api/jobs/{}", job.id);

        let (status, _) = send(&app, Method::DELETE, &uri, Some("driver-lj"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, Method::DELETE, &uri, Some("manager-lj"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(db.get_job(job.id).await.unwrap().is_none());

        // Deleting again is still a success.
        let (status, _) = send(&app, Method::DELETE, &uri, Some("manager-lj"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
