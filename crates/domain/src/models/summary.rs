//! Derived attendance summary counts.

use serde::Serialize;

/// Aggregate attendance counts for an invitation. Computed on demand,
/// never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AttendanceSummary {
    /// Number of guests on the invited list.
    pub total_invited: i64,
    /// Number of attendance records (one per guest regardless of headcount).
    pub unique_present: i64,
    /// Sum of headcounts over all records.
    pub total_present_people: i64,
    /// Invited guests without a record. Walk-ins never reduce this,
    /// since they were never counted as invited.
    pub total_absent: i64,
    /// Number of walk-in records.
    pub manual_present_count: i64,
    /// Sum of headcounts over walk-in records.
    pub manual_present_people: i64,
}

impl AttendanceSummary {
    /// Builds the summary from raw aggregate counts.
    ///
    /// `invited_present` is the number of records whose guest was on the
    /// invited list; it determines the absent count and is not itself
    /// part of the summary.
    pub fn from_counts(
        total_invited: i64,
        unique_present: i64,
        total_present_people: i64,
        invited_present: i64,
        manual_present_count: i64,
        manual_present_people: i64,
    ) -> Self {
        Self {
            total_invited,
            unique_present,
            total_present_people,
            total_absent: (total_invited - invited_present).max(0),
            manual_present_count,
            manual_present_people,
        }
    }
}
