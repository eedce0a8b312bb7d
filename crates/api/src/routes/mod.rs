//! HTTP route handlers.

pub mod attendance;
pub mod guests;
pub mod health;
pub mod scan;

use persistence::entities::InvitationEntity;
use persistence::repositories::InvitationRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// Resolves a path slug to its invitation, validating the format first
/// so malformed slugs never reach the database.
pub(crate) async fn find_invitation(
    state: &AppState,
    slug: &str,
) -> Result<InvitationEntity, ApiError> {
    domain::models::invitation::validate_slug(slug)
        .map_err(|_| ApiError::NotFound(format!("Invitation '{}' not found", slug)))?;

    InvitationRepository::new(state.pool.clone())
        .find_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Invitation '{}' not found", slug)))
}
