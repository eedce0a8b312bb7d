//! Repository for invitation lookups.
//!
//! Invitations are created and edited by the microsite service; this
//! core only resolves slugs to scope check-in requests.

use sqlx::PgPool;

use crate::entities::InvitationEntity;

/// Repository for invitation read operations.
#[derive(Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Creates a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds an invitation by its public slug (exact, lowercase).
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<InvitationEntity>, sqlx::Error> {
        sqlx::query_as::<_, InvitationEntity>(
            r#"
            SELECT id, slug, display_name, created_at, updated_at
            FROM invitations
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
    }
}
