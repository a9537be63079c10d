/// Inline SQL migrations for the parceltrack schema.
///
/// We use simple inline migrations rather than sqlx migration files
/// because the schema is small and self-contained. Lookup tables are
/// seeded here with `INSERT OR IGNORE` so re-running is harmless.
pub const MIGRATIONS: &[&str] = &[
    // Migration 1: branches and lookup tables
    r#"
CREATE TABLE IF NOT EXISTS branches (
    id   INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS roles (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS job_statuses (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS job_types (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS parcel_statuses (
    id   INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
"#,
    // Migration 2: staff, parcels, jobs
    r#"
CREATE TABLE IF NOT EXISTS staff (
    username  TEXT PRIMARY KEY,
    role_id   INTEGER NOT NULL REFERENCES roles(id),
    branch_id INTEGER NOT NULL REFERENCES branches(id)
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS parcels (
    id               TEXT PRIMARY KEY,
    recipient_code   TEXT NOT NULL,
    parcel_status_id INTEGER NOT NULL DEFAULT 1 REFERENCES parcel_statuses(id)
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS jobs (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    staff_username TEXT NOT NULL REFERENCES staff(username),
    job_type_id    INTEGER NOT NULL REFERENCES job_types(id),
    job_status_id  INTEGER NOT NULL DEFAULT 1 REFERENCES job_statuses(id),
    date_created   INTEGER NOT NULL,
    date_completed INTEGER,
    version        INTEGER NOT NULL DEFAULT 1
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS jobs_parcels (
    job_id    INTEGER NOT NULL REFERENCES jobs(id) ON DELETE CASCADE,
    parcel_id TEXT NOT NULL REFERENCES parcels(id),
    PRIMARY KEY (job_id, parcel_id)
);
"#,
    // Migration 3: query-path indexes
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_staff ON jobs(staff_username);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_staff_branch ON staff(branch_id, role_id);"#,
    r#"CREATE INDEX IF NOT EXISTS idx_jobs_parcels_parcel ON jobs_parcels(parcel_id);"#,
    // Migration 4: lookup seeds
    r#"
INSERT OR IGNORE INTO roles (id, name) VALUES
    (1, 'Administrator'),
    (2, 'Warehouse manager'),
    (3, 'Warehouse worker'),
    (4, 'Logistics agent'),
    (5, 'Delivery driver');
"#,
    r#"
INSERT OR IGNORE INTO job_statuses (id, name) VALUES
    (1, 'Created'),
    (2, 'Completed');
"#,
    r#"
INSERT OR IGNORE INTO job_types (id, name) VALUES
    (1, 'Parcel intake'),
    (2, 'Parcel pickup'),
    (3, 'Warehouse sorting'),
    (4, 'Branch transfer'),
    (5, 'Cargo departure confirmation'),
    (6, 'Cargo arrival confirmation'),
    (7, 'Delivery confirmation');
"#,
    r#"
INSERT OR IGNORE INTO parcel_statuses (id, name) VALUES
    (1, 'At warehouse'),
    (2, 'Out for delivery'),
    (3, 'Delivered'),
    (4, 'Completed');
"#,
    r#"
INSERT OR IGNORE INTO branches (id, code, name) VALUES
    (1, 'LJ', 'Warehouse LJ'),
    (2, 'MB', 'Warehouse MB'),
    (3, 'KP', 'Warehouse KP'),
    (4, 'NM', 'Warehouse NM');
"#,
];
