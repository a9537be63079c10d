// crates/server/src/dispatch.rs
//! Completion routing: what a job spawns when it reaches Completed.
//!
//! Runs from the edit handler whenever the saved status is Completed. The
//! rule table branches on the assignee's role and the job's type:
//!
//! - Warehouse worker finishing a sorting job: each parcel is bucketed by
//!   recipient postal code and handed to a random delivery driver at the
//!   destination warehouse. A local destination yields a delivery job and
//!   moves the parcel out for delivery; a remote one yields a cargo
//!   departure job.
//! - Delivery driver finishing a cargo departure: a cargo arrival job for
//!   the same driver.
//! - Delivery driver finishing a cargo arrival: a delivery job for the same
//!   driver, parcels marked Delivered.
//! - Delivery driver finishing a delivery: parcels marked Completed, no
//!   follow-on job.
//!
//! Every other role/type combination is a no-op.

use chrono::Utc;
use parceltrack_db::{Database, Job, Staff};
use parceltrack_types::{JobType, ParcelStatus, Role, WarehouseBucket};
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};

/// Apply the completion rule table to a just-completed job.
///
/// Returns the spawned follow-on jobs (possibly none).
pub async fn route_completed_job(db: &Database, job: &Job) -> ApiResult<Vec<Job>> {
    let Some(assignee) = db.get_staff(&job.staff_username).await? else {
        warn!(job_id = job.id, assignee = %job.staff_username, "Completed job has no staff row, skipping routing");
        return Ok(Vec::new());
    };
    let role = Role::from_code(assignee.role_id).ok_or_else(|| {
        ApiError::Internal(format!(
            "staff {} has unknown role code {}",
            assignee.username, assignee.role_id
        ))
    })?;
    let Some(job_type) = JobType::from_code(job.job_type_id) else {
        warn!(job_id = job.id, code = job.job_type_id, "Completed job has unknown type, skipping routing");
        return Ok(Vec::new());
    };

    match (role, job_type) {
        (Role::WarehouseWorker, JobType::WarehouseSorting) => {
            route_sorted_parcels(db, job, &assignee).await
        }
        (Role::DeliveryDriver, JobType::CargoDeparture) => {
            let arrival = spawn_for_driver(db, job, JobType::CargoArrival).await?;
            Ok(vec![arrival])
        }
        (Role::DeliveryDriver, JobType::CargoArrival) => {
            let delivery = spawn_for_driver(db, job, JobType::Delivery).await?;
            db.set_job_parcels_status(job.id, ParcelStatus::Delivered.code())
                .await?;
            Ok(vec![delivery])
        }
        (Role::DeliveryDriver, JobType::Delivery) => {
            db.set_job_parcels_status(job.id, ParcelStatus::Completed.code())
                .await?;
            Ok(Vec::new())
        }
        _ => Ok(Vec::new()),
    }
}

/// Hand every parcel of a finished sorting job to a driver at its
/// destination warehouse.
async fn route_sorted_parcels(db: &Database, job: &Job, sorter: &Staff) -> ApiResult<Vec<Job>> {
    let now = Utc::now().timestamp();
    let mut spawned = Vec::new();

    for parcel_id in &job.parcel_ids {
        let parcel = db.get_parcel(parcel_id).await?.ok_or_else(|| {
            ApiError::Internal(format!("job {} links missing parcel {parcel_id}", job.id))
        })?;
        let postal_code: u32 = parcel.recipient_code.trim().parse().map_err(|_| {
            ApiError::Internal(format!(
                "parcel {parcel_id} has malformed recipient code {:?}",
                parcel.recipient_code
            ))
        })?;

        let bucket = WarehouseBucket::for_postal_code(postal_code);
        let destination = db.branch_by_code(bucket.branch_code()).await?.ok_or_else(|| {
            ApiError::Internal(format!("warehouse branch {} is not seeded", bucket.branch_code()))
        })?;

        // Uniform random pick among the destination's drivers.
        let drivers = db.list_drivers_at_branch(destination.id).await?;
        let Some(driver) = drivers.choose(&mut rand::thread_rng()) else {
            warn!(
                job_id = job.id,
                parcel_id = %parcel_id,
                branch = %destination.code,
                "No delivery drivers at destination branch, parcel left unrouted"
            );
            continue;
        };

        // A local destination goes straight out for delivery; a remote one
        // needs an inter-branch cargo transfer first.
        let follow_on = if destination.id == sorter.branch_id {
            let delivery = db
                .create_job(&driver.username, JobType::Delivery.code(), std::slice::from_ref(parcel_id), now)
                .await?;
            db.set_parcel_status(parcel_id, ParcelStatus::OutForDelivery.code())
                .await?;
            delivery
        } else {
            db.create_job(&driver.username, JobType::CargoDeparture.code(), std::slice::from_ref(parcel_id), now)
                .await?
        };

        info!(
            job_id = job.id,
            follow_on = follow_on.id,
            parcel_id = %parcel_id,
            driver = %driver.username,
            branch = %destination.code,
            "Routed sorted parcel"
        );
        spawned.push(follow_on);
    }

    Ok(spawned)
}

/// Create the next job in the driver chain: same driver, same parcels.
async fn spawn_for_driver(db: &Database, job: &Job, next_type: JobType) -> ApiResult<Job> {
    let now = Utc::now().timestamp();
    let follow_on = db
        .create_job(&job.staff_username, next_type.code(), &job.parcel_ids, now)
        .await?;
    info!(
        job_id = job.id,
        follow_on = follow_on.id,
        driver = %job.staff_username,
        next_type = %next_type,
        "Spawned driver follow-on job"
    );
    Ok(follow_on)
}
