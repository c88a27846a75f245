// Integer linear interpolation between two closed ranges.

/// Zero-width source range: the projection would divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("source range {low}..{high} has zero width")]
pub struct InvalidRange {
    pub low: i32,
    pub high: i32,
}

/// Re-map `value` from one range onto another.
///
/// A value of `from_low` maps to `to_low`, `from_high` to `to_high`, and
/// values in between proportionally, with division truncating toward zero.
/// Either range may be inverted (low above high). Values outside the source
/// range extrapolate linearly; nothing is clamped here.
pub fn remap(
    value: i32,
    from_low: i32,
    from_high: i32,
    to_low: i32,
    to_high: i32,
) -> Result<i32, InvalidRange> {
    let from_delta = from_high - from_low;
    if from_delta == 0 {
        return Err(InvalidRange {
            low: from_low,
            high: from_high,
        });
    }
    let to_delta = to_high - to_low;

    Ok((value - from_low) * to_delta / from_delta + to_low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_source_positive_target() {
        assert_eq!(remap(10, 10, 20, 100, 200), Ok(100));
        assert_eq!(remap(20, 10, 20, 100, 200), Ok(200));
    }

    #[test]
    fn test_negative_source_positive_target() {
        assert_eq!(remap(10, 20, 10, 100, 200), Ok(200));
        assert_eq!(remap(20, 20, 10, 100, 200), Ok(100));
    }

    #[test]
    fn test_positive_source_negative_target() {
        assert_eq!(remap(10, 10, 20, 200, 100), Ok(200));
        assert_eq!(remap(20, 10, 20, 200, 100), Ok(100));
    }

    #[test]
    fn test_negative_source_negative_target() {
        assert_eq!(remap(10, 20, 10, 200, 100), Ok(100));
        assert_eq!(remap(20, 20, 10, 200, 100), Ok(200));
    }

    #[test]
    fn test_zero_width_source_range_is_rejected() {
        assert_eq!(
            remap(5, 7, 7, 0, 100),
            Err(InvalidRange { low: 7, high: 7 })
        );
    }

    #[test]
    fn test_midpoint_truncates_toward_zero() {
        // 512 on a 10-bit axis lands exactly on the signed zero; one count
        // below truncates to -1 rather than rounding
        assert_eq!(remap(512, 0, 1023, -255, 255), Ok(0));
        assert_eq!(remap(511, 0, 1023, -255, 255), Ok(-1));
    }

    #[test]
    fn test_values_outside_source_range_extrapolate() {
        assert_eq!(remap(30, 10, 20, 100, 200), Ok(300));
        assert_eq!(remap(0, 10, 20, 100, 200), Ok(0));
    }
}
