// crates/types/src/lib.rs
//! Domain vocabulary shared by the db and server crates.
//!
//! The portal's relational schema keys roles, job statuses, job types and
//! parcel statuses by small integer codes (lookup tables seeded at migration
//! time). These enums give the codes symbolic names; converting a stored code
//! back into an enum is fallible because the database is the source of truth.

mod bucket;
mod codes;

pub use bucket::WarehouseBucket;
pub use codes::{CodeError, JobStatus, JobType, ParcelStatus, Role};
