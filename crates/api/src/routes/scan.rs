//! Scan and guest-resolution routes.
//!
//! Both endpoints are read-only: they tell the operator who is about to
//! be checked in so the confirmation UI can offer "first check-in" or
//! "update headcount". Cancelling after either call mutates nothing.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use domain::models::attendance::ScanRequest;
use domain::models::GuestResolution;
use domain::services::scan;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_scan;
use crate::routes::find_invitation;

/// Resolve a raw QR payload against an invitation.
///
/// POST /api/v1/invitations/:slug/scan
pub async fn resolve_scan(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<GuestResolution>, ApiError> {
    request.validate()?;

    let invitation = find_invitation(&state, &slug).await?;

    let scanned = match scan::decode(&request.raw_text, &invitation.slug) {
        Ok(scanned) => {
            record_scan("ok");
            scanned
        }
        Err(err) => {
            record_scan(match err {
                scan::DecodeError::MalformedPayload => "malformed",
                scan::DecodeError::WrongInvitation => "wrong_invitation",
            });
            return Err(err.into());
        }
    };

    let service = state.check_in_service();
    let resolution = service.resolve(invitation.id, &scanned.guest_name).await?;

    info!(
        invitation = %invitation.slug,
        guest = %resolution.guest_name,
        invited = resolution.invited,
        already_checked_in = resolution.already_checked_in,
        "Scan resolved"
    );

    Ok(Json(resolution))
}

/// Query parameters for resolving a typed guest name.
#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub name: String,
}

/// Resolve a manually typed guest name against an invitation.
///
/// GET /api/v1/invitations/:slug/resolve?name=
pub async fn resolve_guest(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ResolveParams>,
) -> Result<Json<GuestResolution>, ApiError> {
    shared::validation::validate_guest_name(&params.name)
        .map_err(|e| ApiError::Validation(e.message.map(|m| m.to_string()).unwrap_or_default()))?;

    let invitation = find_invitation(&state, &slug).await?;

    let service = state.check_in_service();
    let resolution = service.resolve(invitation.id, &params.name).await?;

    Ok(Json(resolution))
}
