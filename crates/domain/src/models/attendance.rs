//! Attendance domain models: check-in records, requests, and row views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::{PageInfo, PageParams};
use uuid::Uuid;
use validator::Validate;

use super::summary::AttendanceSummary;

/// Minimum people a single check-in can represent.
pub const HEADCOUNT_MIN: i32 = 1;

/// Maximum people a single check-in can represent.
pub const HEADCOUNT_MAX: i32 = 10;

/// Clamps a requested headcount into `[HEADCOUNT_MIN, HEADCOUNT_MAX]`.
///
/// Out-of-range input is coerced to the nearest bound rather than
/// rejected, matching the stepper behavior of the check-in UI.
pub fn clamp_headcount(headcount: i32) -> i32 {
    headcount.clamp(HEADCOUNT_MIN, HEADCOUNT_MAX)
}

/// How a guest relates to the invited list at check-in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceSource {
    /// The guest was on the pre-invited list when checked in.
    Invited,
    /// Walk-in: the guest was not on the invited list.
    Manual,
}

impl AttendanceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceSource::Invited => "invited",
            AttendanceSource::Manual => "manual",
        }
    }
}

/// The capture path a check-in arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMethod {
    /// QR scan at the entrance.
    Qr,
    /// Staff typed the guest in on the manual-entry form.
    Manual,
}

/// Whether a unified guest row has checked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// A persisted check-in. At most one exists per guest per invitation;
/// re-check-ins overwrite headcount and timestamp in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub guest_name: String,
    pub source: AttendanceSource,
    pub headcount: i32,
    pub checked_in_at: DateTime<Utc>,
    pub photo_url: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// True when this record was created by the check-in that returned it
    /// (as opposed to an update of an earlier check-in).
    pub fn is_first_check_in(&self) -> bool {
        self.checked_in_at == self.created_at
    }
}

/// Request body for submitting a check-in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CheckInRequest {
    /// Guest name as scanned or typed; matched case-insensitively.
    #[validate(custom(function = "shared::validation::validate_guest_name"))]
    pub guest_name: String,

    /// People this check-in represents; clamped to 1-10.
    pub headcount: i32,

    /// Which capture path produced this check-in.
    pub entry: EntryMethod,

    /// Captured verification photo, base64-encoded JPEG bytes.
    /// Required for manual entries.
    pub photo_base64: Option<String>,

    /// Free-text note; stored for walk-in guests only.
    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: Option<String>,
}

/// Request body for resolving a scanned QR payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ScanRequest {
    /// The raw decoded string delivered by the scanner device.
    #[validate(length(min = 1, max = 2048, message = "Scan payload must be 1-2048 characters"))]
    pub raw_text: String,
}

/// One row of the unified guest-list view: every invited guest (present
/// or absent) plus every walk-in attendee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceRow {
    pub name: String,
    pub contact: Option<String>,
    pub status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<AttendanceSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headcount: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Sort order for the guest-list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Most-recent check-in first; absent guests last, by name.
    #[default]
    Recent,
    /// Alphabetical by guest name.
    Name,
}

/// Query-string parameters for the guest-list view.
///
/// Page fields are kept inline (not flattened) so they survive
/// urlencoded deserialization from `Query`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceQuery {
    pub status: Option<AttendanceStatus>,
    pub source: Option<AttendanceSource>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortOrder,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl AttendanceQuery {
    /// The effective pagination parameters.
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

/// Response envelope for the guest-list view: one page of rows plus the
/// live summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceListResponse {
    pub data: Vec<AttendanceRow>,
    pub summary: AttendanceSummary,
    pub pagination: PageInfo,
}
