//! Legacy score normalization for values read back from storage
//!
//! Early records stored raw 1-5 averages instead of percentages. Any stored
//! value below 20 that is also at most 5 is treated as a raw 1-5 value and
//! rescaled to a percentage. Freshly computed scores never pass through here.
//!
//! Known limitation: a genuine percentage between 1 and 5 is indistinguishable
//! from a raw value and gets rescaled too. The threshold is kept as-is so
//! existing stored data displays the same way it always has.

/// Upper bound of the raw answer scale
pub const LEGACY_SCALE_MAX: f64 = 5.0;

/// Values at or above this are always treated as percentages
pub const LEGACY_THRESHOLD: f64 = 20.0;

/// Normalize a stored score for display
///
/// ```
/// use lsa_common::legacy::rescale_stored_score;
///
/// assert_eq!(rescale_stored_score(4.0), 80);
/// assert_eq!(rescale_stored_score(25.0), 25);
/// ```
pub fn rescale_stored_score(stored: f64) -> i64 {
    if stored < LEGACY_THRESHOLD && stored <= LEGACY_SCALE_MAX {
        round_half_up(stored / LEGACY_SCALE_MAX * 100.0)
    } else {
        round_half_up(stored)
    }
}

/// Round to nearest integer, halves toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_rescaled() {
        assert_eq!(rescale_stored_score(4.0), 80);
        assert_eq!(rescale_stored_score(5.0), 100);
        assert_eq!(rescale_stored_score(1.0), 20);
        assert_eq!(rescale_stored_score(3.5), 70);
        assert_eq!(rescale_stored_score(0.0), 0);
    }

    #[test]
    fn test_percentages_unchanged() {
        assert_eq!(rescale_stored_score(25.0), 25);
        assert_eq!(rescale_stored_score(100.0), 100);
        assert_eq!(rescale_stored_score(20.0), 20);
    }

    #[test]
    fn test_between_five_and_twenty_unchanged() {
        // Fails the <= 5 check even though it is below 20
        assert_eq!(rescale_stored_score(6.0), 6);
        assert_eq!(rescale_stored_score(19.0), 19);
        assert_eq!(rescale_stored_score(12.0), 12);
    }

    #[test]
    fn test_low_percentage_misread_as_raw() {
        // Documented limitation: a genuine 3% is read back as 60%
        assert_eq!(rescale_stored_score(3.0), 60);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(62.5), 63);
        assert_eq!(round_half_up(62.49), 62);
        assert_eq!(round_half_up(-2.5), -2);
    }
}
