//! Status normalization: upstream vocabulary and per-source fetch errors
//! collapse into the canonical three-state model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::logic::types::{Application, Camera, Status};

/// Upstream camera vocabulary. The backend reports four states; standby and
/// inactive both collapse to warning. Anything not in the table is treated as
/// offline, worst case, so vocabulary drift never crashes the normalizer.
const CAMERA_STATUS_TABLE: &[(&str, Status)] = &[
    ("online", Status::Online),
    ("standby", Status::Warning),
    ("inactive", Status::Warning),
    ("offline", Status::Offline),
];

/// Upstream core/server process vocabulary, same fail-safe default.
const APPLICATION_STATUS_TABLE: &[(&str, Status)] = &[
    ("online", Status::Online),
    ("warning", Status::Warning),
];

fn lookup(table: &[(&str, Status)], raw: &str) -> Status {
    table
        .iter()
        .find(|(name, _)| raw.eq_ignore_ascii_case(name))
        .map(|(_, status)| *status)
        .unwrap_or(Status::Offline)
}

/// Map a raw camera status string, any casing, to its canonical status.
/// Total over all strings; unknown values map to offline.
pub fn map_camera_status(raw: &str) -> Status {
    lookup(CAMERA_STATUS_TABLE, raw)
}

/// Map a raw core/server status string, any casing, to its canonical status.
/// Total over all strings; unknown values map to offline.
pub fn map_application_status(raw: &str) -> Status {
    lookup(APPLICATION_STATUS_TABLE, raw)
}

/// One per-source record from the `/applications` payload: either the backend
/// reached the source (`data`) or it could not (`error`).
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<RawApplicationData>,
}

/// Raw per-source payload. Fields are optional at the wire level so that a
/// missing one surfaces as a [`MalformedRecord`] naming the field instead of
/// an opaque decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApplicationData {
    #[serde(default)]
    pub core_status: Option<String>,
    #[serde(default)]
    pub server_status: Option<String>,
    #[serde(default)]
    pub last_recognition: Option<String>,
    #[serde(default)]
    pub camera_status: Option<Vec<RawCameraEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCameraEntry {
    #[serde(default)]
    pub image_source_id: Option<i64>,
    #[serde(default)]
    pub image_source_label: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    // Reported by the backend but not used for normalization
    #[serde(default)]
    pub last_recognition_event_date_time: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub inactive_minutes: Option<i64>,
}

/// A success record that breaks the backend contract. Distinct from an
/// unrecognized status value, which is always resolved via the fail-safe
/// default and never an error.
#[derive(Debug, thiserror::Error)]
pub enum MalformedRecord {
    #[error("source {url}: missing required field `{field}`")]
    MissingField { url: String, field: String },
    #[error("source {url}: unparseable timestamp `{value}`")]
    BadTimestamp { url: String, value: String },
}

fn require<T>(value: Option<T>, url: &str, field: &str) -> Result<T, MalformedRecord> {
    value.ok_or_else(|| MalformedRecord::MissingField {
        url: url.to_string(),
        field: field.to_string(),
    })
}

/// Convert one upstream per-source record into a normalized [`Application`].
///
/// An error record becomes a fully offline application (epoch timestamp, no
/// cameras) so the fleet keeps accounting for every known source. "We could
/// not reach this source" is not the same as "this source reports offline",
/// but both end up offline in the three-state model. When a record carries
/// both `error` and `data`, the error wins.
pub fn normalize_source_record(record: SourceRecord) -> Result<Application, MalformedRecord> {
    let SourceRecord { url, error, data } = record;

    if error.is_some() {
        return Ok(Application {
            id: url.clone(),
            name: url,
            last_recognition_at: DateTime::<Utc>::UNIX_EPOCH,
            core_status: Status::Offline,
            server_status: Status::Offline,
            cameras: Vec::new(),
        });
    }

    let data = require(data, &url, "data")?;
    let core_raw = require(data.core_status, &url, "data.coreStatus")?;
    let server_raw = require(data.server_status, &url, "data.serverStatus")?;
    let ts_raw = require(data.last_recognition, &url, "data.lastRecognition")?;
    let entries = require(data.camera_status, &url, "data.cameraStatus")?;

    let last_recognition_at = DateTime::parse_from_rfc3339(&ts_raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| MalformedRecord::BadTimestamp {
            url: url.clone(),
            value: ts_raw,
        })?;

    let mut cameras = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        let id = require(
            entry.image_source_id,
            &url,
            &format!("data.cameraStatus[{idx}].imageSourceId"),
        )?;
        let name = require(
            entry.image_source_label,
            &url,
            &format!("data.cameraStatus[{idx}].imageSourceLabel"),
        )?;
        let status_raw = require(
            entry.status,
            &url,
            &format!("data.cameraStatus[{idx}].status"),
        )?;
        cameras.push(Camera {
            id: id.to_string(),
            name,
            status: map_camera_status(&status_raw),
        });
    }

    Ok(Application {
        id: url.clone(),
        name: url,
        last_recognition_at,
        core_status: map_application_status(&core_raw),
        server_status: map_application_status(&server_raw),
        cameras,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camera_status_mapping_is_case_insensitive() {
        assert_eq!(map_camera_status("ONLINE"), Status::Online);
        assert_eq!(map_camera_status("Standby"), Status::Warning);
        assert_eq!(map_camera_status("inactive"), Status::Warning);
        assert_eq!(map_camera_status("oFFline"), Status::Offline);
    }

    #[test]
    fn unknown_camera_status_defaults_to_offline() {
        assert_eq!(map_camera_status("garbage"), Status::Offline);
        assert_eq!(map_camera_status(""), Status::Offline);
        assert_eq!(map_camera_status("online "), Status::Offline); // no trimming
    }

    #[test]
    fn camera_vocabulary_collapses_as_expected() {
        let raw = ["Online", "Standby", "Inactive", "Offline", "weird"];
        let want = [
            Status::Online,
            Status::Warning,
            Status::Warning,
            Status::Offline,
            Status::Offline,
        ];
        for (r, w) in raw.iter().zip(want) {
            assert_eq!(map_camera_status(r), w, "raw value {r:?}");
        }
    }

    #[test]
    fn application_status_mapping() {
        assert_eq!(map_application_status("online"), Status::Online);
        assert_eq!(map_application_status("Warning"), Status::Warning);
        assert_eq!(map_application_status(""), Status::Offline);
        assert_eq!(map_application_status("standby"), Status::Offline);
    }

    fn record_from_json(value: serde_json::Value) -> SourceRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn error_record_synthesizes_offline_application() {
        let record = record_from_json(json!({
            "url": "http://x",
            "error": "connection refused"
        }));
        let app = normalize_source_record(record).unwrap();
        assert_eq!(app.id, "http://x");
        assert_eq!(app.name, "http://x");
        assert_eq!(app.core_status, Status::Offline);
        assert_eq!(app.server_status, Status::Offline);
        assert!(app.cameras.is_empty());
        assert_eq!(app.last_recognition_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn error_wins_over_data() {
        let record = record_from_json(json!({
            "url": "http://x",
            "error": "timeout",
            "data": {
                "coreStatus": "online",
                "serverStatus": "online",
                "lastRecognition": "2026-08-28T10:00:00Z",
                "cameraStatus": []
            }
        }));
        let app = normalize_source_record(record).unwrap();
        assert_eq!(app.core_status, Status::Offline);
        assert!(app.cameras.is_empty());
    }

    #[test]
    fn success_record_normalizes_cameras() {
        let record = record_from_json(json!({
            "url": "http://plant-a:9000",
            "data": {
                "coreStatus": "Online",
                "serverStatus": "warning",
                "lastRecognition": "2026-08-28T09:58:00Z",
                "cameraStatus": [
                    {
                        "imageSourceId": 7,
                        "imageSourceLabel": "Entrance",
                        "status": "Online",
                        "lastRecognitionEventDateTime": "2026-08-28T09:57:12Z",
                        "url": "rtsp://cam7",
                        "inactiveMinutes": 0
                    },
                    { "imageSourceId": 8, "imageSourceLabel": "Parking", "status": "Standby" }
                ]
            }
        }));
        let app = normalize_source_record(record).unwrap();
        assert_eq!(app.id, "http://plant-a:9000");
        assert_eq!(app.core_status, Status::Online);
        assert_eq!(app.server_status, Status::Warning);
        assert_eq!(app.cameras.len(), 2);
        assert_eq!(app.cameras[0].id, "7");
        assert_eq!(app.cameras[0].name, "Entrance");
        assert_eq!(app.cameras[0].status, Status::Online);
        assert_eq!(app.cameras[1].status, Status::Warning);
    }

    #[test]
    fn record_without_error_or_data_is_malformed() {
        let record = record_from_json(json!({ "url": "http://x" }));
        let err = normalize_source_record(record).unwrap_err();
        assert!(matches!(err, MalformedRecord::MissingField { ref field, .. } if field == "data"));
    }

    #[test]
    fn missing_required_fields_are_loud() {
        for (payload, field) in [
            (json!({ "serverStatus": "online", "lastRecognition": "2026-08-28T10:00:00Z", "cameraStatus": [] }), "data.coreStatus"),
            (json!({ "coreStatus": "online", "lastRecognition": "2026-08-28T10:00:00Z", "cameraStatus": [] }), "data.serverStatus"),
            (json!({ "coreStatus": "online", "serverStatus": "online", "cameraStatus": [] }), "data.lastRecognition"),
            (json!({ "coreStatus": "online", "serverStatus": "online", "lastRecognition": "2026-08-28T10:00:00Z" }), "data.cameraStatus"),
        ] {
            let record = record_from_json(json!({ "url": "http://x", "data": payload }));
            let err = normalize_source_record(record).unwrap_err();
            assert!(
                matches!(err, MalformedRecord::MissingField { field: ref f, .. } if f == field),
                "expected missing {field}, got {err}"
            );
        }
    }

    #[test]
    fn missing_camera_fields_are_loud() {
        let record = record_from_json(json!({
            "url": "http://x",
            "data": {
                "coreStatus": "online",
                "serverStatus": "online",
                "lastRecognition": "2026-08-28T10:00:00Z",
                "cameraStatus": [{ "imageSourceId": 3, "status": "online" }]
            }
        }));
        let err = normalize_source_record(record).unwrap_err();
        assert!(matches!(
            err,
            MalformedRecord::MissingField { ref field, .. }
                if field == "data.cameraStatus[0].imageSourceLabel"
        ));
    }

    #[test]
    fn bad_timestamp_is_loud() {
        let record = record_from_json(json!({
            "url": "http://x",
            "data": {
                "coreStatus": "online",
                "serverStatus": "online",
                "lastRecognition": "yesterday-ish",
                "cameraStatus": []
            }
        }));
        let err = normalize_source_record(record).unwrap_err();
        assert!(matches!(err, MalformedRecord::BadTimestamp { ref value, .. } if value == "yesterday-ish"));
    }

    #[test]
    fn unknown_process_status_is_not_an_error() {
        let record = record_from_json(json!({
            "url": "http://x",
            "data": {
                "coreStatus": "rebooting",
                "serverStatus": "ONLINE",
                "lastRecognition": "2026-08-28T10:00:00+02:00",
                "cameraStatus": []
            }
        }));
        let app = normalize_source_record(record).unwrap();
        assert_eq!(app.core_status, Status::Offline);
        assert_eq!(app.server_status, Status::Online);
    }
}
