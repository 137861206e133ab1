//! Integer helpers for the fixed-point motion maths.
//!
//! The host reports vehicle motion as scaled integers. These helpers keep the
//! arithmetic in `i64` and narrow back to the map's `i32` domain explicitly.

/// Divide and round toward negative infinity.
///
/// Integer `/` truncates toward zero, which would snap a vehicle drifting
/// backwards onto the wrong tile. `divisor` must be positive.
///
/// # Examples
///
/// ```
/// use minecart_loading::numeric::floor_div;
/// assert_eq!(floor_div(7, 2), 3);
/// assert_eq!(floor_div(-1, 2), -1);
/// assert_eq!(floor_div(-4, 2), -2);
/// ```
#[must_use]
pub const fn floor_div(dividend: i64, divisor: i64) -> i64 {
    debug_assert!(divisor > 0, "floor_div expects a positive divisor");
    dividend.div_euclid(divisor)
}

/// Narrow an `i64` into the `i32` domain, clamping out-of-range values.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn saturate_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 100_000, 0)]
    #[case(99_999, 100_000, 0)]
    #[case(100_000, 100_000, 1)]
    #[case(-1, 100_000, -1)]
    #[case(-100_000, 100_000, -1)]
    #[case(-100_001, 100_000, -2)]
    fn floors_toward_negative_infinity(
        #[case] dividend: i64,
        #[case] divisor: i64,
        #[case] expected: i64,
    ) {
        assert_eq!(floor_div(dividend, divisor), expected);
    }

    #[rstest]
    #[case(5, 5)]
    #[case(i64::MAX, i32::MAX)]
    #[case(i64::MIN, i32::MIN)]
    fn saturates_into_i32(#[case] value: i64, #[case] expected: i32) {
        assert_eq!(saturate_i32(value), expected);
    }
}
