//! Common validation and normalization utilities.

use validator::ValidationError;

/// Maximum length of a guest name after trimming.
pub const MAX_GUEST_NAME_LEN: usize = 120;

/// Normalizes a guest name into its lookup key.
///
/// The key is the trimmed, lowercased name with runs of inner whitespace
/// collapsed to a single space. Guest-list entries, QR payloads, and
/// manually typed names all resolve through this key, so "Jane  Doe" and
/// "jane doe" address the same attendance record.
pub fn name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Cleans a guest name for display: trimmed, inner whitespace collapsed,
/// original casing preserved.
pub fn clean_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escapes `%`, `_`, and `\` so user-supplied search text can be embedded
/// in an ILIKE pattern without acting as wildcards.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Validates a guest name: non-empty after normalization and within length.
pub fn validate_guest_name(name: &str) -> Result<(), ValidationError> {
    let cleaned = clean_name(name);
    if cleaned.is_empty() {
        let mut err = ValidationError::new("guest_name_empty");
        err.message = Some("Guest name must not be empty".into());
        return Err(err);
    }
    if cleaned.len() > MAX_GUEST_NAME_LEN {
        let mut err = ValidationError::new("guest_name_length");
        err.message = Some("Guest name is too long".into());
        return Err(err);
    }
    Ok(())
}
