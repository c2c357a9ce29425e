//! Quantized rate keys for subscription matching
//!
//! Targets are matched after rounding to 2 decimal places. Both the subscribe
//! path and the poll path must build keys through [`QuantizedRate::from_f64`];
//! a second rounding rule anywhere silently drops matches.

use std::fmt;

/// A target rate rounded half-up to 2 decimal places
/// Stored as i64 where value = real_value * 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct QuantizedRate(i64);

impl QuantizedRate {
    /// Number of decimal places
    pub const DECIMALS: u8 = 2;

    /// Scale factor (10^2)
    pub const SCALE: i64 = 100;

    /// Quantize a rate with the canonical rounding rule (round-half-up)
    ///
    /// Returns None if the rate is not a finite positive number. Total over
    /// all finite positive reals.
    #[inline]
    pub fn from_f64(rate: f64) -> Option<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return None;
        }
        // f64::round is half-away-from-zero, which equals half-up for the
        // positive inputs accepted here.
        let scaled = (rate * Self::SCALE as f64).round();
        if scaled > i64::MAX as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    /// Create from raw i64 value (hundredths)
    #[inline(always)]
    pub const fn from_raw(value: i64) -> Self {
        Self(value)
    }

    /// Get raw i64 value (hundredths)
    #[inline(always)]
    pub const fn as_raw(&self) -> i64 {
        self.0
    }

    /// Convert back to f64
    #[inline(always)]
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }
}

impl fmt::Display for QuantizedRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(QuantizedRate::from_f64(233.194), Some(QuantizedRate::from_raw(23319)));
        assert_eq!(QuantizedRate::from_f64(233.196), Some(QuantizedRate::from_raw(23320)));
        // 1.125 is exactly representable in binary, so the half case is real
        assert_eq!(QuantizedRate::from_f64(1.125), Some(QuantizedRate::from_raw(113)));
    }

    #[test]
    fn test_nearby_rates_share_a_key() {
        let a = QuantizedRate::from_f64(233.194).unwrap();
        let b = QuantizedRate::from_f64(233.191).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "233.19");
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert_eq!(QuantizedRate::from_f64(0.0), None);
        assert_eq!(QuantizedRate::from_f64(-1.5), None);
        assert_eq!(QuantizedRate::from_f64(f64::NAN), None);
        assert_eq!(QuantizedRate::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn test_display_pads_fraction() {
        assert_eq!(QuantizedRate::from_raw(15050).to_string(), "150.50");
        assert_eq!(QuantizedRate::from_raw(205).to_string(), "2.05");
        assert_eq!(QuantizedRate::from_raw(23319).to_string(), "233.19");
    }

    #[test]
    fn test_as_f64_round_trip() {
        let q = QuantizedRate::from_f64(150.503).unwrap();
        assert_eq!(q.as_f64(), 150.50);
    }

    proptest! {
        #[test]
        fn quantization_is_idempotent(rate in 0.01f64..1e9) {
            let q = QuantizedRate::from_f64(rate).unwrap();
            prop_assert_eq!(QuantizedRate::from_f64(q.as_f64()), Some(q));
        }
    }
}
