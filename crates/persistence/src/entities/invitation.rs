//! Invitation entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::Invitation;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the invitations table.
#[derive(Debug, Clone, FromRow)]
pub struct InvitationEntity {
    pub id: Uuid,
    pub slug: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvitationEntity> for Invitation {
    fn from(entity: InvitationEntity) -> Self {
        Self {
            id: entity.id,
            slug: entity.slug,
            display_name: entity.display_name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
