use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical three-state health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,  // Healthy
    Warning, // Degraded but reachable
    Offline, // Unreachable or reported down
}

impl Status {
    /// Severity rank, higher is worse. Offline dominates warning dominates online.
    pub fn severity(self) -> u8 {
        match self {
            Status::Online => 0,
            Status::Warning => 1,
            Status::Offline => 2,
        }
    }
}

/// One camera as reported by its owning application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub id: String,
    pub name: String,
    pub status: Status,
}

/// One recognition application snapshot, rebuilt in full on every poll.
/// `id` is the polled source URL and doubles as the display name.
/// A `last_recognition_at` of the Unix epoch means no response was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    pub last_recognition_at: DateTime<Utc>,
    pub core_status: Status,
    pub server_status: Status,
    pub cameras: Vec<Camera>,
}

/// Fleet-wide counts derived fresh from each snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub applications_online: usize,
    pub applications_warning: usize,
    pub applications_offline: usize,
    pub total_cameras: usize,
}
