//! Activity snapshot as served by `/admin/activities`.

use serde::{Deserialize, Serialize};

use super::User;

/// A recorded workout
///
/// `user` is an embedded copy of the owner at fetch time, not a reference
/// into the user cache.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
    pub activity_type: ActivityKind,
    /// Distance in meters
    pub distance: f64,
    /// Duration in seconds
    pub time: u64,
    /// Minutes per kilometer
    pub pace: f64,
    /// Kilometers per hour
    pub speed: f64,
    pub created_at: String,
    pub updated_at: String,
    pub user: User,
}

/// Kind of workout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Run,
    Ride,
    Walk,
    Swim,
    /// Anything the server sends that is not one of the known kinds
    #[serde(other)]
    Other,
}

impl ActivityKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [ActivityKind] {
        &[
            ActivityKind::Run,
            ActivityKind::Ride,
            ActivityKind::Walk,
            ActivityKind::Swim,
            ActivityKind::Other,
        ]
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityKind::Run => write!(f, "run"),
            ActivityKind::Ride => write!(f, "ride"),
            ActivityKind::Walk => write!(f, "walk"),
            ActivityKind::Swim => write!(f, "swim"),
            ActivityKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "run" => Ok(ActivityKind::Run),
            "ride" => Ok(ActivityKind::Ride),
            "walk" => Ok(ActivityKind::Walk),
            "swim" => Ok(ActivityKind::Swim),
            "other" => Ok(ActivityKind::Other),
            _ => Err(format!("Unknown activity kind: {}", s)),
        }
    }
}
