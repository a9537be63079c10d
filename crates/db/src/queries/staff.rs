//! Staff queries: identity resolution, branch scoping, driver selection.

use crate::{Database, DbResult};
use parceltrack_types::Role;
use serde::Serialize;

/// A staff member with their role and branch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub username: String,
    pub role_id: i64,
    pub role: String,
    pub branch_id: i64,
    pub branch: String,
}

type StaffRow = (String, i64, String, i64, String);

const STAFF_SELECT: &str = "
SELECT s.username, s.role_id, r.name, s.branch_id, b.name
FROM staff s
JOIN roles r ON r.id = s.role_id
JOIN branches b ON b.id = s.branch_id
";

fn staff_from_row(row: StaffRow) -> Staff {
    Staff {
        username: row.0,
        role_id: row.1,
        role: row.2,
        branch_id: row.3,
        branch: row.4,
    }
}

impl Database {
    pub async fn get_staff(&self, username: &str) -> DbResult<Option<Staff>> {
        let row: Option<StaffRow> =
            sqlx::query_as(&format!("{STAFF_SELECT} WHERE s.username = ?"))
                .bind(username)
                .fetch_optional(self.pool())
                .await?;
        Ok(row.map(staff_from_row))
    }

    pub async fn list_staff(&self) -> DbResult<Vec<Staff>> {
        let rows: Vec<StaffRow> = sqlx::query_as(&format!("{STAFF_SELECT} ORDER BY s.username"))
            .fetch_all(self.pool())
            .await?;
        Ok(rows.into_iter().map(staff_from_row).collect())
    }

    pub async fn list_staff_for_branch(&self, branch_id: i64) -> DbResult<Vec<Staff>> {
        let rows: Vec<StaffRow> = sqlx::query_as(&format!(
            "{STAFF_SELECT} WHERE s.branch_id = ? ORDER BY s.username"
        ))
        .bind(branch_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(staff_from_row).collect())
    }

    /// Delivery drivers stationed at a branch, for random assignment.
    pub async fn list_drivers_at_branch(&self, branch_id: i64) -> DbResult<Vec<Staff>> {
        let rows: Vec<StaffRow> = sqlx::query_as(&format!(
            "{STAFF_SELECT} WHERE s.branch_id = ? AND s.role_id = ? ORDER BY s.username"
        ))
        .bind(branch_id)
        .bind(Role::DeliveryDriver.code())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(staff_from_row).collect())
    }

    pub async fn insert_staff(&self, username: &str, role_id: i64, branch_id: i64) -> DbResult<()> {
        sqlx::query("INSERT INTO staff (username, role_id, branch_id) VALUES (?, ?, ?)")
            .bind(username)
            .bind(role_id)
            .bind(branch_id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
