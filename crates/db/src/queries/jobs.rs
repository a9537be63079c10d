//! Job CRUD and role-scoped listing queries.

use crate::{Database, DbError, DbResult};
use parceltrack_types::JobStatus;
use serde::Serialize;

/// A job row with its resolved lookup names and linked parcel IDs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub staff_username: String,
    pub job_type_id: i64,
    pub job_type: String,
    pub job_status_id: i64,
    pub job_status: String,
    pub date_created: i64,
    pub date_completed: Option<i64>,
    pub version: i64,
    pub parcel_ids: Vec<String>,
}

/// Fields an edit may change. The assignee is deliberately absent: edits
/// never reassign a job.
#[derive(Debug, Clone)]
pub struct JobUpdate {
    pub job_status_id: i64,
    pub job_type_id: i64,
    pub date_completed: Option<i64>,
    /// Version the client read; the update only applies if it still matches.
    pub expected_version: i64,
}

type JobRow = (i64, String, i64, String, i64, String, i64, Option<i64>, i64);

const JOB_SELECT: &str = "
SELECT j.id, j.staff_username, j.job_type_id, t.name, j.job_status_id, s.name,
       j.date_created, j.date_completed, j.version
FROM jobs j
JOIN job_types t ON t.id = j.job_type_id
JOIN job_statuses s ON s.id = j.job_status_id
";

fn job_from_row(row: JobRow, parcel_ids: Vec<String>) -> Job {
    Job {
        id: row.0,
        staff_username: row.1,
        job_type_id: row.2,
        job_type: row.3,
        job_status_id: row.4,
        job_status: row.5,
        date_created: row.6,
        date_completed: row.7,
        version: row.8,
        parcel_ids,
    }
}

impl Database {
    /// All jobs (administrators and logistics agents).
    pub async fn list_jobs(&self) -> DbResult<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!("{JOB_SELECT} ORDER BY j.id"))
            .fetch_all(self.pool())
            .await?;
        self.attach_parcels(rows).await
    }

    /// Jobs whose assignee belongs to the given branch (warehouse managers).
    pub async fn list_jobs_for_branch(&self, branch_id: i64) -> DbResult<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            "{JOB_SELECT} JOIN staff a ON a.username = j.staff_username
             WHERE a.branch_id = ? ORDER BY j.id"
        ))
        .bind(branch_id)
        .fetch_all(self.pool())
        .await?;
        self.attach_parcels(rows).await
    }

    /// Jobs assigned to the given username (workers and drivers).
    pub async fn list_jobs_for_staff(&self, username: &str) -> DbResult<Vec<Job>> {
        let rows: Vec<JobRow> = sqlx::query_as(&format!(
            "{JOB_SELECT} WHERE j.staff_username = ? ORDER BY j.id"
        ))
        .bind(username)
        .fetch_all(self.pool())
        .await?;
        self.attach_parcels(rows).await
    }

    /// Fetch a single job with its parcel IDs.
    pub async fn get_job(&self, id: i64) -> DbResult<Option<Job>> {
        let row: Option<JobRow> = sqlx::query_as(&format!("{JOB_SELECT} WHERE j.id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        match row {
            Some(row) => {
                let parcels = self.parcel_ids_for_job(row.0).await?;
                Ok(Some(job_from_row(row, parcels)))
            }
            None => Ok(None),
        }
    }

    pub async fn job_exists(&self, id: i64) -> DbResult<bool> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(count.0 > 0)
    }

    /// Create a job in status Created and link the selected parcels.
    ///
    /// The job row and the link rows are two sequential saves, not one
    /// transaction; a failure in between leaves the job without links,
    /// which is the portal's long-standing behavior.
    pub async fn create_job(
        &self,
        staff_username: &str,
        job_type_id: i64,
        parcel_ids: &[String],
        date_created: i64,
    ) -> DbResult<Job> {
        // First create the job.
        let result = sqlx::query(
            "INSERT INTO jobs (staff_username, job_type_id, job_status_id, date_created)
             VALUES (?, ?, ?, ?)",
        )
        .bind(staff_username)
        .bind(job_type_id)
        .bind(JobStatus::Created.code())
        .bind(date_created)
        .execute(self.pool())
        .await?;
        let job_id = result.last_insert_rowid();

        // Then link the selected parcels.
        for parcel_id in parcel_ids {
            sqlx::query("INSERT INTO jobs_parcels (job_id, parcel_id) VALUES (?, ?)")
                .bind(job_id)
                .bind(parcel_id)
                .execute(self.pool())
                .await?;
        }

        self.get_job(job_id)
            .await?
            .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))
    }

    /// Apply an edit guarded by the version the client read.
    ///
    /// Returns `false` when no row matched, either because the job is gone
    /// or because another edit bumped the version first; callers tell the
    /// two apart with [`Database::job_exists`].
    pub async fn update_job(&self, id: i64, update: &JobUpdate) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE jobs
             SET job_status_id = ?, job_type_id = ?, date_completed = ?, version = version + 1
             WHERE id = ? AND version = ?",
        )
        .bind(update.job_status_id)
        .bind(update.job_type_id)
        .bind(update.date_completed)
        .bind(id)
        .bind(update.expected_version)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a job; parcel links go with it. Deleting a missing job is a no-op.
    pub async fn delete_job(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM jobs WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Parcel IDs linked to a job.
    pub async fn parcel_ids_for_job(&self, job_id: i64) -> DbResult<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT parcel_id FROM jobs_parcels WHERE job_id = ? ORDER BY parcel_id",
        )
        .bind(job_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    async fn attach_parcels(&self, rows: Vec<JobRow>) -> DbResult<Vec<Job>> {
        let mut jobs = Vec::with_capacity(rows.len());
        for row in rows {
            let parcels = self.parcel_ids_for_job(row.0).await?;
            jobs.push(job_from_row(row, parcels));
        }
        Ok(jobs)
    }
}
