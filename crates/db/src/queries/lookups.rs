//! Lookup-table listings for form population.

use crate::{Database, DbResult};
use serde::Serialize;

/// A generic `(id, name)` lookup row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupEntry {
    pub id: i64,
    pub name: String,
}

/// A company branch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    pub code: String,
    pub name: String,
}

impl Database {
    pub async fn list_job_types(&self) -> DbResult<Vec<LookupEntry>> {
        self.list_lookup("job_types").await
    }

    pub async fn list_job_statuses(&self) -> DbResult<Vec<LookupEntry>> {
        self.list_lookup("job_statuses").await
    }

    pub async fn list_parcel_statuses(&self) -> DbResult<Vec<LookupEntry>> {
        self.list_lookup("parcel_statuses").await
    }

    pub async fn list_branches(&self) -> DbResult<Vec<Branch>> {
        let rows: Vec<(i64, String, String)> =
            sqlx::query_as("SELECT id, code, name FROM branches ORDER BY id")
                .fetch_all(self.pool())
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, code, name)| Branch { id, code, name })
            .collect())
    }

    /// Resolve a branch by its warehouse code (`LJ`, `MB`, `KP`, `NM`).
    pub async fn branch_by_code(&self, code: &str) -> DbResult<Option<Branch>> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, code, name FROM branches WHERE code = ?")
                .bind(code)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(|(id, code, name)| Branch { id, code, name }))
    }

    async fn list_lookup(&self, table: &str) -> DbResult<Vec<LookupEntry>> {
        // `table` is always one of our own fixed table names, never user input.
        let rows: Vec<(i64, String)> =
            sqlx::query_as(&format!("SELECT id, name FROM {table} ORDER BY id"))
                .fetch_all(self.pool())
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name)| LookupEntry { id, name })
            .collect())
    }
}
