//! Invitation domain model.
//!
//! Invitations are owned by the microsite/editor service; this core only
//! reads them to scope guest lists and attendance records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidationError;

/// An invitation microsite, identified by its public slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Invitation {
    pub id: Uuid,
    pub slug: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

lazy_static::lazy_static! {
    static ref SLUG_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Maximum slug length accepted in a path parameter.
pub const MAX_SLUG_LEN: usize = 64;

/// Validates an invitation slug: lowercase kebab-case, 1-64 characters.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() <= MAX_SLUG_LEN && SLUG_REGEX.is_match(slug) {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug_format");
        err.message = Some("Slug must be lowercase kebab-case (a-z, 0-9, -)".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_slug_accepts_kebab_case() {
        assert!(validate_slug("ana-budi").is_ok());
        assert!(validate_slug("wedding2024").is_ok());
        assert!(validate_slug("a").is_ok());
        assert!(validate_slug("a-b-c-1-2-3").is_ok());
    }

    #[test]
    fn test_validate_slug_rejects_bad_input() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("Ana-Budi").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
        assert!(validate_slug("double--dash").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("under_score").is_err());
        assert!(validate_slug(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_invitation_serde_roundtrip() {
        let invitation = Invitation {
            id: Uuid::new_v4(),
            slug: "ana-budi".to_string(),
            display_name: Some("Ana & Budi".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&invitation).unwrap();
        let back: Invitation = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, invitation.id);
        assert_eq!(back.slug, "ana-budi");
    }
}
