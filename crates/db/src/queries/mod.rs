// crates/db/src/queries/mod.rs
// Entity query methods for the parceltrack SQLite database.

pub(crate) mod jobs;
pub(crate) mod lookups;
pub(crate) mod parcels;
pub(crate) mod staff;
