//! Aggregate counters served by `/admin/stats`.

use serde::{Deserialize, Serialize};

/// Dashboard-wide totals
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdminStats {
    #[serde(default)]
    pub users_number: u64,
    #[serde(default)]
    pub activities_number: u64,
    /// Summed distance of all activities, in meters
    #[serde(default)]
    pub distance_summary: f64,
}
