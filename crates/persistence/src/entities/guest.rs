//! Invited-guest entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::InvitedGuest;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitation_guests table.
///
/// `name_key` is the normalized lookup key maintained alongside the
/// display name; all case-insensitive matching goes through it.
#[derive(Debug, Clone, FromRow)]
pub struct InvitedGuestEntity {
    pub id: Uuid,
    pub invitation_id: Uuid,
    pub name: String,
    pub name_key: String,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<InvitedGuestEntity> for InvitedGuest {
    fn from(entity: InvitedGuestEntity) -> Self {
        Self {
            id: entity.id,
            invitation_id: entity.invitation_id,
            name: entity.name,
            contact_info: entity.contact_info,
            created_at: entity.created_at,
        }
    }
}
