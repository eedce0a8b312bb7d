//! Invited-guest listing route.
//!
//! Backs the manual-entry form's typeahead: staff pick from the invited
//! list instead of retyping names that then fail to match.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use domain::models::InvitedGuest;
use persistence::repositories::GuestRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::routes::find_invitation;

/// Response for listing invited guests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListGuestsResponse {
    pub data: Vec<InvitedGuest>,
}

/// List the invited guests of an invitation, sorted by name.
///
/// GET /api/v1/invitations/:slug/guests
pub async fn list_guests(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ListGuestsResponse>, ApiError> {
    let invitation = find_invitation(&state, &slug).await?;

    let guests = GuestRepository::new(state.pool.clone())
        .list_by_invitation(invitation.id)
        .await?;

    Ok(Json(ListGuestsResponse {
        data: guests.into_iter().map(Into::into).collect(),
    }))
}
