//! Invited-guest model and the resolver's result type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::attendance::AttendanceRecord;

/// A guest seeded onto an invitation's list by its owner.
///
/// Read-only from this core's perspective; the guest-list editor lives
/// in the invitation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InvitedGuest {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub name: String,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// What the resolver knows about a guest name before check-in is
/// confirmed. Drives the "first check-in" vs. "update headcount"
/// confirmation screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GuestResolution {
    /// The cleaned guest name that will be recorded.
    pub guest_name: String,
    /// Whether the name matches the pre-invited list.
    pub invited: bool,
    /// Whether an attendance record already exists for this name.
    pub already_checked_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invited_guest: Option<InvitedGuest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceRecord>,
}

impl GuestResolution {
    /// Builds a resolution from the two lookups.
    pub fn new(
        guest_name: String,
        invited_guest: Option<InvitedGuest>,
        attendance: Option<AttendanceRecord>,
    ) -> Self {
        Self {
            guest_name,
            invited: invited_guest.is_some(),
            already_checked_in: attendance.is_some(),
            invited_guest,
            attendance,
        }
    }
}
