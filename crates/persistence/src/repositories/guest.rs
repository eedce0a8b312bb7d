//! Repository for invited-guest lookups.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::InvitedGuestEntity;

/// Repository for invited-guest read operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Creates a new guest repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an invited guest by normalized name key.
    pub async fn find_by_name_key(
        &self,
        invitation_id: Uuid,
        name_key: &str,
    ) -> Result<Option<InvitedGuestEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitedGuestEntity>(
            r#"
            SELECT id, invitation_id, name, name_key, contact_info, created_at
            FROM invitation_guests
            WHERE invitation_id = $1 AND name_key = $2
            "#,
        )
        .bind(invitation_id)
        .bind(name_key)
        .fetch_optional(&self.pool)
        .await
    }

    /// Lists all invited guests for an invitation, by name.
    pub async fn list_by_invitation(
        &self,
        invitation_id: Uuid,
    ) -> Result<Vec<InvitedGuestEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitedGuestEntity>(
            r#"
            SELECT id, invitation_id, name, name_key, contact_info, created_at
            FROM invitation_guests
            WHERE invitation_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(invitation_id)
        .fetch_all(&self.pool)
        .await
    }

}
