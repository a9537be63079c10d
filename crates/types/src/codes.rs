// crates/types/src/codes.rs
//! Integer-coded lookup enums for staff roles, job lifecycle and parcels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored integer code that does not map to any known enum variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {table} code: {code}")]
pub struct CodeError {
    pub table: &'static str,
    pub code: i64,
}

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident, $table:literal, { $($variant:ident = $code:literal => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The integer code stored in the database.
            pub fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            /// Resolve a stored code, or `None` for codes this build does not know.
            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable name, as seeded in the lookup table.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = CodeError;

            fn try_from(code: i64) -> Result<Self, CodeError> {
                Self::from_code(code).ok_or(CodeError { table: $table, code })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

coded_enum!(
    /// Staff role, one row per staff member.
    Role, "roles", {
        Administrator = 1 => "Administrator",
        WarehouseManager = 2 => "Warehouse manager",
        WarehouseWorker = 3 => "Warehouse worker",
        LogisticsAgent = 4 => "Logistics agent",
        DeliveryDriver = 5 => "Delivery driver",
    }
);

coded_enum!(
    /// Job lifecycle status. Completion is what triggers follow-on routing.
    JobStatus, "job_statuses", {
        Created = 1 => "Created",
        Completed = 2 => "Completed",
    }
);

coded_enum!(
    /// Job type. Types 5-7 form the driver chain: a completed departure
    /// spawns an arrival, a completed arrival spawns a delivery.
    JobType, "job_types", {
        ParcelIntake = 1 => "Parcel intake",
        ParcelPickup = 2 => "Parcel pickup",
        WarehouseSorting = 3 => "Warehouse sorting",
        BranchTransfer = 4 => "Branch transfer",
        CargoDeparture = 5 => "Cargo departure confirmation",
        CargoArrival = 6 => "Cargo arrival confirmation",
        Delivery = 7 => "Delivery confirmation",
    }
);

coded_enum!(
    /// Parcel status, advanced as the parcel moves through routing.
    ParcelStatus, "parcel_statuses", {
        AtWarehouse = 1 => "At warehouse",
        OutForDelivery = 2 => "Out for delivery",
        Delivered = 3 => "Delivered",
        Completed = 4 => "Completed",
    }
);
