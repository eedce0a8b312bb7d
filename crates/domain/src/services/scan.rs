//! QR payload decoding.
//!
//! Scanned payloads arrive in one of two encodings, depending on which
//! generation path produced the QR code: a JSON object with the
//! invitation slug and guest name, or a shareable deep-link URL. The
//! decoder accepts both and canonicalizes them before anything else in
//! the check-in flow sees the data.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Decode failure. Always recoverable: the operator re-arms the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Payload is not a recognized QR format or carries no guest name")]
    MalformedPayload,
    #[error("Payload belongs to a different invitation")]
    WrongInvitation,
}

/// Canonical result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedGuest {
    pub guest_name: String,
}

/// A parsed payload before canonicalization, tagged by encoding.
#[derive(Debug)]
enum RawPayload {
    Json {
        slug: Option<String>,
        guest: Option<String>,
    },
    Link {
        slug: Option<String>,
        guest: Option<String>,
    },
}

/// JSON payload shape. `tamu` is the localized alternate for the guest
/// field emitted by older QR generators.
#[derive(Debug, Deserialize)]
struct JsonPayload {
    slug: Option<String>,
    #[serde(alias = "tamu")]
    guest: Option<String>,
}

fn parse(raw: &str) -> Option<RawPayload> {
    let trimmed = raw.trim();

    if let Ok(json) = serde_json::from_str::<JsonPayload>(trimmed) {
        return Some(RawPayload::Json {
            slug: json.slug,
            guest: json.guest,
        });
    }

    if let Ok(link) = Url::parse(trimmed) {
        let slug = link
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string);
        let guest = link
            .query_pairs()
            .find(|(key, _)| key == "guest" || key == "tamu")
            .map(|(_, value)| value.into_owned());
        return Some(RawPayload::Link { slug, guest });
    }

    None
}

/// Decodes a raw scanned string against the invitation being staffed.
///
/// Pure function. An empty or unparseable payload is
/// [`DecodeError::MalformedPayload`]; a payload whose invitation key
/// does not match `expected_slug` (case-insensitive) is
/// [`DecodeError::WrongInvitation`]. On success the trimmed guest name
/// is returned.
pub fn decode(raw_text: &str, expected_slug: &str) -> Result<ScannedGuest, DecodeError> {
    let payload = parse(raw_text).ok_or(DecodeError::MalformedPayload)?;
    debug!(payload = ?payload, "Parsed scan payload");

    let (slug, guest) = match payload {
        RawPayload::Json { slug, guest } | RawPayload::Link { slug, guest } => (slug, guest),
    };

    let guest_name = shared::validation::clean_name(guest.as_deref().unwrap_or_default());
    if guest_name.is_empty() {
        return Err(DecodeError::MalformedPayload);
    }

    match slug {
        Some(ref s) if s.trim().eq_ignore_ascii_case(expected_slug.trim()) => {
            Ok(ScannedGuest { guest_name })
        }
        _ => Err(DecodeError::WrongInvitation),
    }
}
