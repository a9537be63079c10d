//! Parcel queries.

use crate::{Database, DbResult};
use parceltrack_types::ParcelStatus;
use serde::Serialize;

/// A parcel row with its resolved status name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: String,
    pub recipient_code: String,
    pub parcel_status_id: i64,
    pub parcel_status: String,
}

type ParcelRow = (String, String, i64, String);

const PARCEL_SELECT: &str = "
SELECT p.id, p.recipient_code, p.parcel_status_id, s.name
FROM parcels p
JOIN parcel_statuses s ON s.id = p.parcel_status_id
";

fn parcel_from_row(row: ParcelRow) -> Parcel {
    Parcel {
        id: row.0,
        recipient_code: row.1,
        parcel_status_id: row.2,
        parcel_status: row.3,
    }
}

impl Database {
    pub async fn list_parcels(&self) -> DbResult<Vec<Parcel>> {
        let rows: Vec<ParcelRow> = sqlx::query_as(&format!("{PARCEL_SELECT} ORDER BY p.id"))
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(parcel_from_row).collect())
    }

    pub async fn get_parcel(&self, id: &str) -> DbResult<Option<Parcel>> {
        let row: Option<ParcelRow> = sqlx::query_as(&format!("{PARCEL_SELECT} WHERE p.id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(row.map(parcel_from_row))
    }

    /// Register a parcel at a warehouse (status At warehouse).
    pub async fn insert_parcel(&self, id: &str, recipient_code: &str) -> DbResult<()> {
        sqlx::query("INSERT INTO parcels (id, recipient_code, parcel_status_id) VALUES (?, ?, ?)")
            .bind(id)
            .bind(recipient_code)
            .bind(ParcelStatus::AtWarehouse.code())
            .execute(self.pool())
            .await?;
        Ok(())
    }

    pub async fn set_parcel_status(&self, id: &str, status_id: i64) -> DbResult<()> {
        sqlx::query("UPDATE parcels SET parcel_status_id = ? WHERE id = ?")
            .bind(status_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    /// Advance every parcel linked to a job to the given status.
    pub async fn set_job_parcels_status(&self, job_id: i64, status_id: i64) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE parcels SET parcel_status_id = ?
             WHERE id IN (SELECT parcel_id FROM jobs_parcels WHERE job_id = ?)",
        )
        .bind(status_id)
        .bind(job_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected())
    }
}
