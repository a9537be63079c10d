// crates/types/src/bucket.rs
//! Warehouse bucket lookup for sorting completed jobs.
//!
//! Parcels leaving a sorting job are partitioned into one of four fixed
//! warehouse destinations by the recipient's postal code. The ranges are a
//! fixed company rule, not derived data.

use serde::{Deserialize, Serialize};

/// One of the four sorting destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarehouseBucket {
    Lj,
    Mb,
    Kp,
    Nm,
}

impl WarehouseBucket {
    /// Map a recipient postal code to its warehouse bucket.
    ///
    /// - [1000, 2000) and [4000, 5000) go to LJ
    /// - [2000, 4000) and [9000, 10000) go to MB
    /// - [5000, 8000) goes to KP
    /// - everything else goes to NM
    pub fn for_postal_code(code: u32) -> Self {
        match code {
            1000..=1999 | 4000..=4999 => Self::Lj,
            2000..=3999 | 9000..=9999 => Self::Mb,
            5000..=7999 => Self::Kp,
            _ => Self::Nm,
        }
    }

    /// Branch code of the destination warehouse, as stored in `branches.code`.
    pub fn branch_code(self) -> &'static str {
        match self {
            Self::Lj => "LJ",
            Self::Mb => "MB",
            Self::Kp => "KP",
            Self::Nm => "NM",
        }
    }

    /// All buckets, in seed order.
    pub fn all() -> [Self; 4] {
        [Self::Lj, Self::Mb, Self::Kp, Self::Nm]
    }
}

impl std::fmt::Display for WarehouseBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.branch_code())
    }
}
