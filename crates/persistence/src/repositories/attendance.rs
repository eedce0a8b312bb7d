//! Repository for attendance-record operations.
//!
//! The write path is a single keyed upsert: at most one record exists
//! per `(invitation_id, name_key)`, enforced by a unique index. Two
//! scanners submitting the same guest concurrently resolve to one
//! insert and one in-place update inside PostgreSQL, never a duplicate.

use chrono::{DateTime, Utc};
use domain::models::attendance::SortOrder;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    AttendanceRecordEntity, AttendanceRowEntity, AttendanceSourceDb, SummaryCountsEntity,
};
use crate::metrics::QueryTimer;

/// Filters for the merged guest-list projection.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// `Some(true)` keeps present rows, `Some(false)` absent rows.
    pub present: Option<bool>,
    /// Restricts to one attendance source (implies present).
    pub source: Option<AttendanceSourceDb>,
    /// ILIKE pattern over guest name and contact info, already escaped.
    pub search_pattern: Option<String>,
}

/// Repository for attendance-record operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new attendance repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the attendance record for a guest by normalized name key.
    pub async fn find_by_name_key(
        &self,
        invitation_id: Uuid,
        name_key: &str,
    ) -> Result<Option<AttendanceRecordEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceRecordEntity>(
            r#"
            SELECT id, invitation_id, guest_name, name_key, source, headcount,
                   checked_in_at, photo_url, note, created_at
            FROM attendance_records
            WHERE invitation_id = $1 AND name_key = $2
            "#,
        )
        .bind(invitation_id)
        .bind(name_key)
        .fetch_optional(&self.pool)
        .await
    }

    /// Records a check-in as an atomic keyed upsert.
    ///
    /// First check-in inserts the record with `created_at` equal to
    /// `checked_in_at`; a re-check-in for the same name key overwrites
    /// headcount and timestamp in place, keeping photo and note when the
    /// new call does not supply them. `checked_in_at` is bound once so
    /// callers can distinguish insert from update by comparing it with
    /// `created_at`.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        invitation_id: Uuid,
        guest_name: &str,
        name_key: &str,
        source: AttendanceSourceDb,
        headcount: i32,
        checked_in_at: DateTime<Utc>,
        photo_url: Option<&str>,
        note: Option<&str>,
    ) -> Result<AttendanceRecordEntity, sqlx::Error> {
        let timer = QueryTimer::new("attendance_upsert");
        let result = sqlx::query_as::<_, AttendanceRecordEntity>(
            r#"
            INSERT INTO attendance_records
                (invitation_id, guest_name, name_key, source, headcount, checked_in_at, photo_url, note, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $6)
            ON CONFLICT (invitation_id, name_key) DO UPDATE SET
                guest_name = EXCLUDED.guest_name,
                source = EXCLUDED.source,
                headcount = EXCLUDED.headcount,
                checked_in_at = EXCLUDED.checked_in_at,
                photo_url = COALESCE(EXCLUDED.photo_url, attendance_records.photo_url),
                note = COALESCE(EXCLUDED.note, attendance_records.note)
            RETURNING id, invitation_id, guest_name, name_key, source, headcount,
                      checked_in_at, photo_url, note, created_at
            "#,
        )
        .bind(invitation_id)
        .bind(guest_name)
        .bind(name_key)
        .bind(source)
        .bind(headcount)
        .bind(checked_in_at)
        .bind(photo_url)
        .bind(note)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Computes the aggregate attendance counts for an invitation.
    pub async fn summary_counts(
        &self,
        invitation_id: Uuid,
    ) -> Result<SummaryCountsEntity, sqlx::Error> {
        let timer = QueryTimer::new("attendance_summary");
        let result = sqlx::query_as::<_, SummaryCountsEntity>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM invitation_guests g WHERE g.invitation_id = $1) AS total_invited,
                COUNT(a.id) AS unique_present,
                COALESCE(SUM(a.headcount), 0)::BIGINT AS total_present_people,
                COUNT(a.id) FILTER (WHERE a.source = 'invited') AS invited_present,
                COUNT(a.id) FILTER (WHERE a.source = 'manual') AS manual_present_count,
                COALESCE(SUM(a.headcount) FILTER (WHERE a.source = 'manual'), 0)::BIGINT AS manual_present_people
            FROM attendance_records a
            WHERE a.invitation_id = $1
            "#,
        )
        .bind(invitation_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists one page of the merged guest-list projection.
    ///
    /// Invited guests without a record appear as absent rows; walk-in
    /// records without a guest-list entry appear as present rows with no
    /// contact info.
    pub async fn list_rows(
        &self,
        invitation_id: Uuid,
        filter: &RowFilter,
        sort: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AttendanceRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("attendance_rows");
        let result = sqlx::query_as::<_, AttendanceRowEntity>(
            r#"
            WITH merged AS (
                SELECT COALESCE(a.guest_name, g.name) AS name,
                       g.contact_info,
                       (a.id IS NOT NULL) AS present,
                       a.source,
                       a.headcount,
                       a.checked_in_at,
                       a.photo_url,
                       a.note
                FROM invitation_guests g
                FULL OUTER JOIN attendance_records a
                    ON a.invitation_id = g.invitation_id AND a.name_key = g.name_key
                WHERE COALESCE(g.invitation_id, a.invitation_id) = $1
            )
            SELECT name, contact_info, present, source, headcount, checked_in_at, photo_url, note
            FROM merged
            WHERE ($2::BOOLEAN IS NULL OR present = $2)
              AND ($3::attendance_source IS NULL OR source = $3)
              AND ($4::TEXT IS NULL OR name ILIKE $4 OR contact_info ILIKE $4)
            ORDER BY
                CASE WHEN $5::TEXT = 'name' THEN NULL ELSE checked_in_at END DESC NULLS LAST,
                name ASC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(invitation_id)
        .bind(filter.present)
        .bind(filter.source)
        .bind(filter.search_pattern.as_deref())
        .bind(sort_key(sort))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Counts rows of the merged projection under the same filter.
    pub async fn count_rows(
        &self,
        invitation_id: Uuid,
        filter: &RowFilter,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as(
            r#"
            WITH merged AS (
                SELECT COALESCE(a.guest_name, g.name) AS name,
                       g.contact_info,
                       (a.id IS NOT NULL) AS present,
                       a.source
                FROM invitation_guests g
                FULL OUTER JOIN attendance_records a
                    ON a.invitation_id = g.invitation_id AND a.name_key = g.name_key
                WHERE COALESCE(g.invitation_id, a.invitation_id) = $1
            )
            SELECT COUNT(*)
            FROM merged
            WHERE ($2::BOOLEAN IS NULL OR present = $2)
              AND ($3::attendance_source IS NULL OR source = $3)
              AND ($4::TEXT IS NULL OR name ILIKE $4 OR contact_info ILIKE $4)
            "#,
        )
        .bind(invitation_id)
        .bind(filter.present)
        .bind(filter.source)
        .bind(filter.search_pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }
}

fn sort_key(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Recent => "recent",
        SortOrder::Name => "name",
    }
}
