//! Check-in orchestration: guest resolution and attendance recording.
//!
//! The recorder is the only writer in this service. Its correctness
//! contract: at most one attendance record per normalized guest name per
//! invitation, with re-check-ins updating headcount and timestamp in
//! place. The write itself is an atomic keyed upsert in the repository;
//! this layer derives the source, enforces the photo rule, clamps the
//! headcount, and retries the benign unique-violation race.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use domain::models::attendance::{clamp_headcount, AttendanceSource, CheckInRequest, EntryMethod};
use domain::models::{AttendanceRecord, GuestResolution};
use persistence::repositories::{AttendanceRepository, GuestRepository};
use shared::validation::{clean_name, name_key};

use crate::services::photo_store::PhotoStore;

/// Upsert attempts before a unique-violation race is surfaced.
const MAX_UPSERT_ATTEMPTS: u32 = 3;

/// Recording failure. Surfaced to the submitting client with a retry
/// affordance; nothing here leaves partial state behind.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("A photo is required for manual check-in entries")]
    MissingPhoto,

    #[error("Guest name must not be empty")]
    InvalidGuest,

    #[error("Photo payload is not valid base64: {0}")]
    InvalidPhoto(#[from] base64::DecodeError),

    #[error("Photo exceeds the maximum allowed size")]
    PhotoTooLarge,

    #[error("Failed to store photo")]
    PhotoStorage(#[source] std::io::Error),

    #[error("Storage error: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Orchestrates the scan → resolve → record flow for one invitation.
pub struct CheckInService {
    guests: GuestRepository,
    attendance: AttendanceRepository,
    photos: Arc<dyn PhotoStore>,
    max_photo_bytes: usize,
}

impl CheckInService {
    /// Creates a check-in service over the given pool and photo sink.
    pub fn new(pool: PgPool, photos: Arc<dyn PhotoStore>, max_photo_bytes: usize) -> Self {
        Self {
            guests: GuestRepository::new(pool.clone()),
            attendance: AttendanceRepository::new(pool),
            photos,
            max_photo_bytes,
        }
    }

    /// Resolves a guest name against the invited list and existing
    /// attendance. Read-only; feeds the confirmation UI.
    pub async fn resolve(
        &self,
        invitation_id: Uuid,
        guest_name: &str,
    ) -> Result<GuestResolution, sqlx::Error> {
        let key = name_key(guest_name);
        let invited = self.guests.find_by_name_key(invitation_id, &key).await?;
        let attendance = self
            .attendance
            .find_by_name_key(invitation_id, &key)
            .await?;

        Ok(GuestResolution::new(
            clean_name(guest_name),
            invited.map(Into::into),
            attendance.map(Into::into),
        ))
    }

    /// Records a check-in, creating or updating the guest's single
    /// attendance record.
    pub async fn record(
        &self,
        invitation_id: Uuid,
        request: &CheckInRequest,
    ) -> Result<AttendanceRecord, RecordError> {
        let guest_name = clean_name(&request.guest_name);
        let key = name_key(&request.guest_name);
        if key.is_empty() {
            return Err(RecordError::InvalidGuest);
        }

        let headcount = clamp_headcount(request.headcount);

        // Source reflects the invited list at check-in time, not what the
        // client claims: a scanned name that is not on the list is a
        // walk-in even if it arrived through the QR path.
        let invited = self.guests.find_by_name_key(invitation_id, &key).await?;
        let source = if invited.is_some() {
            AttendanceSource::Invited
        } else {
            AttendanceSource::Manual
        };

        let photo_url = match &request.photo_base64 {
            Some(encoded) => Some(self.store_photo(encoded).await?),
            None => {
                if source == AttendanceSource::Manual || request.entry == EntryMethod::Manual {
                    return Err(RecordError::MissingPhoto);
                }
                None
            }
        };

        // Notes are only meaningful for walk-ins.
        let note = match source {
            AttendanceSource::Manual => request.note.as_deref(),
            AttendanceSource::Invited => None,
        };

        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self
                .attendance
                .upsert(
                    invitation_id,
                    &guest_name,
                    &key,
                    source.into(),
                    headcount,
                    Utc::now(),
                    photo_url.as_deref(),
                    note,
                )
                .await;

            match result {
                Ok(entity) => {
                    let record: AttendanceRecord = entity.into();
                    info!(
                        invitation_id = %invitation_id,
                        guest = %record.guest_name,
                        source = source.as_str(),
                        headcount = record.headcount,
                        first_check_in = record.is_first_check_in(),
                        "Attendance recorded"
                    );
                    return Ok(record);
                }
                Err(err) if attempt < MAX_UPSERT_ATTEMPTS && is_unique_violation(&err) => {
                    // Two scanners hit the insert path at once; the loser
                    // retries and lands on the update path.
                    warn!(
                        invitation_id = %invitation_id,
                        attempt,
                        "Check-in upsert raced, retrying"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Decodes and persists a photo, returning its public URL.
    ///
    /// Accepts bare base64 or a `data:*;base64,` URL as produced by
    /// canvas captures.
    async fn store_photo(&self, encoded: &str) -> Result<String, RecordError> {
        let encoded = match encoded.split_once("base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => encoded,
        };

        let bytes = BASE64.decode(encoded.trim())?;
        if bytes.len() > self.max_photo_bytes {
            return Err(RecordError::PhotoTooLarge);
        }

        self.photos
            .store(&bytes)
            .await
            .map_err(RecordError::PhotoStorage)
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
