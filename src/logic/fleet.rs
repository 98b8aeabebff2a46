//! Fleet aggregation: display-level rollups over a snapshot of normalized
//! applications. Everything here is pure and recomputed on every poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::logic::types::{Application, FleetSummary, Status};

/// Per-application camera counts, partitioned by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraCounts {
    pub online: usize,
    pub warning: usize,
    pub offline: usize,
}

impl CameraCounts {
    pub fn total(&self) -> usize {
        self.online + self.warning + self.offline
    }
}

/// Overall status of one application, used for the per-card badge and the
/// status filter. Fixed precedence: either process offline wins, then either
/// process warning, then online. Cameras never affect it.
pub fn overall_status(app: &Application) -> Status {
    if app.core_status == Status::Offline || app.server_status == Status::Offline {
        Status::Offline
    } else if app.core_status == Status::Warning || app.server_status == Status::Warning {
        Status::Warning
    } else {
        Status::Online
    }
}

/// Partition an application's cameras by status. Counts always sum to
/// `app.cameras.len()`.
pub fn camera_counts(app: &Application) -> CameraCounts {
    let mut counts = CameraCounts {
        online: 0,
        warning: 0,
        offline: 0,
    };
    for camera in &app.cameras {
        match camera.status {
            Status::Online => counts.online += 1,
            Status::Warning => counts.warning += 1,
            Status::Offline => counts.offline += 1,
        }
    }
    counts
}

/// Fleet-wide counts. Application counts go by core status alone, not by
/// [`overall_status`]: core health is the fleet-level signal, while the
/// per-card badge also considers the server process. The two rules are
/// intentionally kept separate.
pub fn fleet_summary(apps: &[Application]) -> FleetSummary {
    let mut summary = FleetSummary {
        applications_online: 0,
        applications_warning: 0,
        applications_offline: 0,
        total_cameras: 0,
    };
    for app in apps {
        match app.core_status {
            Status::Online => summary.applications_online += 1,
            Status::Warning => summary.applications_warning += 1,
            Status::Offline => summary.applications_offline += 1,
        }
        summary.total_cameras += app.cameras.len();
    }
    summary
}

/// Elapsed-time bucket for a "last recognition" timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSince {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

/// Bucket the elapsed time between `timestamp` and an injected `now`.
/// Exactly 60 elapsed minutes lands in the hours bucket, 1440 in days.
pub fn time_since(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> TimeSince {
    let minutes = now.signed_duration_since(timestamp).num_minutes();
    if minutes < 1 {
        TimeSince::JustNow
    } else if minutes < 60 {
        TimeSince::Minutes(minutes)
    } else if minutes < 1440 {
        TimeSince::Hours(minutes / 60)
    } else {
        TimeSince::Days(minutes / 1440)
    }
}

impl fmt::Display for TimeSince {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSince::JustNow => write!(f, "just now"),
            TimeSince::Minutes(m) => write!(f, "{m}m ago"),
            TimeSince::Hours(h) => write!(f, "{h}h ago"),
            TimeSince::Days(d) => write!(f, "{d}d ago"),
        }
    }
}
