//! Phred+33 base quality decoding.

use crate::core::error::AnnotateError;

/// Offset of the Phred+33 (Sanger/Illumina 1.8+) encoding
pub const PHRED_OFFSET: i64 = 33;

// Quality sums and base counts stay far below 2^52
#[allow(clippy::cast_precision_loss)]
fn to_f64(value: i64) -> f64 {
    value as f64
}

/// Convert one Phred+33 encoded character into its quality score.
#[must_use]
pub fn convert_phred(encoded: char) -> i64 {
    i64::from(u32::from(encoded)) - PHRED_OFFSET
}

/// Mean Phred+33 quality over every character of `encoded`.
///
/// # Errors
///
/// Returns `AnnotateError::EmptyInput` if `encoded` is empty.
///
/// # Examples
///
/// ```
/// use motif_mark::core::quality::average_quality;
///
/// assert_eq!(average_quality("IIII").unwrap(), 40.0);
/// ```
pub fn average_quality(encoded: &str) -> Result<f64, AnnotateError> {
    let mut total: i64 = 0;
    let mut count: i64 = 0;
    for c in encoded.chars() {
        total += convert_phred(c);
        count += 1;
    }

    if count == 0 {
        return Err(AnnotateError::EmptyInput(
            "quality string is empty".to_string(),
        ));
    }

    Ok(to_f64(total) / to_f64(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_phred() {
        assert_eq!(convert_phred('I'), 40);
        assert_eq!(convert_phred('C'), 34);
        assert_eq!(convert_phred('2'), 17);
        assert_eq!(convert_phred('@'), 31);
        assert_eq!(convert_phred('$'), 3);
        assert_eq!(convert_phred('!'), 0);
    }

    #[test]
    fn test_average_quality_uniform() {
        assert!((average_quality("IIII").unwrap() - 40.0).abs() < f64::EPSILON);
        assert!((average_quality("@@@@").unwrap() - 31.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_quality_mixed() {
        // (40 + 0) / 2
        assert!((average_quality("I!").unwrap() - 20.0).abs() < f64::EPSILON);
        // (34 + 17 + 3) / 3
        assert!((average_quality("C2$").unwrap() - 18.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_quality_empty() {
        assert!(matches!(
            average_quality(""),
            Err(AnnotateError::EmptyInput(_))
        ));
    }
}
