//! Attendance entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::attendance::{AttendanceSource, AttendanceStatus};
use domain::models::{AttendanceRecord, AttendanceRow, AttendanceSummary};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum mapping for the attendance_source PostgreSQL type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "attendance_source", rename_all = "lowercase")]
pub enum AttendanceSourceDb {
    Invited,
    Manual,
}

impl From<AttendanceSourceDb> for AttendanceSource {
    fn from(db_source: AttendanceSourceDb) -> Self {
        match db_source {
            AttendanceSourceDb::Invited => AttendanceSource::Invited,
            AttendanceSourceDb::Manual => AttendanceSource::Manual,
        }
    }
}

impl From<AttendanceSource> for AttendanceSourceDb {
    fn from(source: AttendanceSource) -> Self {
        match source {
            AttendanceSource::Invited => AttendanceSourceDb::Invited,
            AttendanceSource::Manual => AttendanceSourceDb::Manual,
        }
    }
}

/// Database row mapping for the attendance_records table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRecordEntity {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub guest_name: String,
    pub name_key: String,
    pub source: AttendanceSourceDb,
    pub headcount: i32,
    pub checked_in_at: DateTime<Utc>,
    pub photo_url: Option<String>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AttendanceRecordEntity> for AttendanceRecord {
    fn from(entity: AttendanceRecordEntity) -> Self {
        Self {
            id: entity.id,
            invitation_id: entity.invitation_id,
            guest_name: entity.guest_name,
            source: entity.source.into(),
            headcount: entity.headcount,
            checked_in_at: entity.checked_in_at,
            photo_url: entity.photo_url,
            note: entity.note,
            created_at: entity.created_at,
        }
    }
}

/// One row of the merged guest-list projection (invited guests FULL
/// OUTER JOIN attendance records).
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceRowEntity {
    pub name: String,
    pub contact_info: Option<String>,
    pub present: bool,
    pub source: Option<AttendanceSourceDb>,
    pub headcount: Option<i32>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub photo_url: Option<String>,
    pub note: Option<String>,
}

impl From<AttendanceRowEntity> for AttendanceRow {
    fn from(entity: AttendanceRowEntity) -> Self {
        Self {
            name: entity.name,
            contact: entity.contact_info,
            status: if entity.present {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            },
            source: entity.source.map(Into::into),
            headcount: entity.headcount,
            checked_in_at: entity.checked_in_at,
            photo_url: entity.photo_url,
            note: entity.note,
        }
    }
}

/// Aggregate counts row backing the attendance summary.
#[derive(Debug, Clone, FromRow)]
pub struct SummaryCountsEntity {
    pub total_invited: i64,
    pub unique_present: i64,
    pub total_present_people: i64,
    pub invited_present: i64,
    pub manual_present_count: i64,
    pub manual_present_people: i64,
}

impl From<SummaryCountsEntity> for AttendanceSummary {
    fn from(counts: SummaryCountsEntity) -> Self {
        AttendanceSummary::from_counts(
            counts.total_invited,
            counts.unique_present,
            counts.total_present_people,
            counts.invited_present,
            counts.manual_present_count,
            counts.manual_present_people,
        )
    }
}
