//! Checked float-to-pixel conversions

use crate::{Error, Result};

/// Safely convert f64 to i32 with bounds checking
///
/// Truncates toward zero, like a plain `as` cast, once the value is known to fit.
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Convert a video property (frame width, height) to a positive pixel extent
///
/// # Errors
///
/// Returns an error if the value is not finite, not positive, or too large
pub fn f64_to_extent(value: f64) -> Result<i32> {
    match f64_to_i32(value) {
        Ok(extent) if extent > 0 => Ok(extent),
        _ => Err(Error::InvalidInput(format!("Invalid frame extent: {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f64_to_i32() {
        assert_eq!(f64_to_i32(42.9).unwrap(), 42);
        assert_eq!(f64_to_i32(-42.9).unwrap(), -42);
        assert_eq!(f64_to_i32(0.0).unwrap(), 0);

        assert!(f64_to_i32(f64::INFINITY).is_err());
        assert!(f64_to_i32(f64::NEG_INFINITY).is_err());
        assert!(f64_to_i32(f64::NAN).is_err());
        assert!(f64_to_i32(f64::from(i32::MAX) * 2.0).is_err());
    }

    #[test]
    fn test_f64_to_extent() {
        assert_eq!(f64_to_extent(1920.0).unwrap(), 1920);
        assert!(f64_to_extent(0.0).is_err());
        assert!(f64_to_extent(-5.0).is_err());
        assert!(f64_to_extent(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_f64_to_i32_in_range(value in -1e9f64..1e9) {
            let converted = f64_to_i32(value).unwrap();
            prop_assert!((f64::from(converted) - value.trunc()).abs() < 1.0);
        }
    }
}
