//! Check-in submission and guest-list routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::attendance::{
    AttendanceListResponse, AttendanceQuery, AttendanceStatus, CheckInRequest,
};
use domain::models::{AttendanceRecord, AttendanceRow, AttendanceSummary};
use persistence::repositories::attendance::RowFilter;
use persistence::repositories::AttendanceRepository;
use shared::pagination::PageInfo;
use shared::validation::escape_like;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_check_in;
use crate::routes::find_invitation;

/// Submit a check-in.
///
/// POST /api/v1/invitations/:slug/attendance
///
/// Returns 201 when the guest's record was created, 200 when an earlier
/// check-in was updated in place.
pub async fn submit_check_in(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<AttendanceRecord>), ApiError> {
    request.validate()?;

    let invitation = find_invitation(&state, &slug).await?;

    let service = state.check_in_service();
    let record = service.record(invitation.id, &request).await?;

    let first = record.is_first_check_in();
    record_check_in(record.source.as_str(), first);

    info!(
        invitation = %invitation.slug,
        guest = %record.guest_name,
        headcount = record.headcount,
        first_check_in = first,
        "Check-in submitted"
    );

    let status = if first {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(record)))
}

/// Fetch one page of the merged guest list plus the live summary.
///
/// GET /api/v1/invitations/:slug/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<AttendanceListResponse>, ApiError> {
    let invitation = find_invitation(&state, &slug).await?;

    let filter = RowFilter {
        present: query.status.map(|s| s == AttendanceStatus::Present),
        source: query.source.map(Into::into),
        search_pattern: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s))),
    };

    let params = query.page_params();
    let repo = AttendanceRepository::new(state.pool.clone());

    let rows = repo
        .list_rows(
            invitation.id,
            &filter,
            query.sort,
            i64::from(params.limit()),
            params.offset(),
        )
        .await?;
    let total = repo.count_rows(invitation.id, &filter).await?;
    let summary: AttendanceSummary = repo.summary_counts(invitation.id).await?.into();

    let data: Vec<AttendanceRow> = rows.into_iter().map(Into::into).collect();

    Ok(Json(AttendanceListResponse {
        data,
        summary,
        pagination: PageInfo::new(&params, total),
    }))
}
