//! Centralized validation and helper functions.

/// Maximum number of records read from a single input file
pub const MAX_RECORDS: usize = 100_000;

/// Maximum motif length accepted from a motif file
pub const MAX_MOTIF_LENGTH: usize = 1_000;

/// Largest alignment start allowed by SAM (POS is in `[0, 2^31 - 1]`)
pub const MAX_POSITION: usize = (1 << 31) - 1;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Check a motif against [`MAX_MOTIF_LENGTH`].
///
/// Returns an error message if the motif is too long, None otherwise.
///
/// # Examples
///
/// ```
/// use motif_mark::utils::validation::check_motif_length;
///
/// assert!(check_motif_length("YGCY").is_none());
/// assert!(check_motif_length(&"N".repeat(1_001)).is_some());
/// ```
#[must_use]
pub fn check_motif_length(motif: &str) -> Option<String> {
    let len = motif.chars().count();
    if len > MAX_MOTIF_LENGTH {
        Some(format!(
            "Motif length {len} exceeds maximum of {MAX_MOTIF_LENGTH}"
        ))
    } else {
        None
    }
}

/// Check a 1-based alignment start against [`MAX_POSITION`].
///
/// Returns an error message if the position is out of range, None otherwise.
#[must_use]
pub fn check_position(position: usize) -> Option<String> {
    if position > MAX_POSITION {
        Some(format!(
            "Position {position} exceeds maximum of {MAX_POSITION}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
    }

    #[test]
    fn test_check_motif_length() {
        assert!(check_motif_length(&"A".repeat(MAX_MOTIF_LENGTH)).is_none());
        let msg = check_motif_length(&"A".repeat(MAX_MOTIF_LENGTH + 1)).unwrap();
        assert!(msg.contains("1001"));
    }

    #[test]
    fn test_check_position() {
        assert!(check_position(1).is_none());
        assert!(check_position(MAX_POSITION).is_none());
        assert!(check_position(MAX_POSITION + 1).is_some());
    }
}
