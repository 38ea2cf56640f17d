//! Fixed three-decimal rendering of real numbers.
//!
//! Console output shows every value as `integer.fff`, built from an integer
//! part and a millesimal fraction instead of float formatting. Both parts are
//! truncated toward zero.

use std::fmt;

/// 2^64. Magnitudes from here up do not fit [`DecimalParts::integer`] and
/// carry no fractional part.
const INTEGER_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A real number split into sign, integer part and thousandths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalParts {
    pub negative: bool,
    pub integer: u64,
    /// Thousandths, `0..1000`
    pub millis: u32,
}

impl DecimalParts {
    /// Split `value`. Returns `None` for NaN, infinities and magnitudes of
    /// 2^64 or more.
    pub fn split(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() >= INTEGER_LIMIT {
            return None;
        }
        let magnitude = value.abs();
        let integer = magnitude.trunc();
        let millis = ((magnitude - integer) * 1000.0).trunc() as u32;
        let parts = Self {
            negative: value < 0.0,
            integer: integer as u64,
            millis: millis.min(999),
        };
        Some(parts.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.integer == 0 && self.millis == 0 {
            self.negative = false;
        }
        self
    }
}

impl fmt::Display for DecimalParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "{sign}{}.{:03}", self.integer, self.millis)
    }
}

/// Render one value as `integer.fff`; non-finite values render as `nan`/`inf`.
pub fn decimal(value: f64) -> String {
    match DecimalParts::split(value) {
        Some(parts) => parts.to_string(),
        None if value.is_nan() => "nan".to_string(),
        None if value == f64::INFINITY => "inf".to_string(),
        None if value == f64::NEG_INFINITY => "-inf".to_string(),
        None => format!("{value:.0}.000"),
    }
}

/// Render a sequence as `[a, b, c]`.
pub fn decimal_list(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|&v| decimal(v)).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_number() {
        assert_eq!(decimal(10.0), "10.000");
        assert_eq!(decimal(0.0), "0.000");
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(decimal(3.14159), "3.141");
        assert_eq!(decimal(0.9999), "0.999");
        assert_eq!(decimal(12.05), "12.050");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(decimal(-1.5), "-1.500");
        assert_eq!(decimal(-0.25), "-0.250");
        assert_eq!(decimal(-0.0001), "0.000");
    }

    #[test]
    fn test_parts() {
        let parts = DecimalParts::split(-42.125).unwrap();
        assert!(parts.negative);
        assert_eq!(parts.integer, 42);
        assert_eq!(parts.millis, 125);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(DecimalParts::split(f64::NAN), None);
        assert_eq!(decimal(f64::NAN), "nan");
        assert_eq!(decimal(f64::INFINITY), "inf");
        assert_eq!(decimal(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_beyond_u64_keeps_every_digit() {
        assert_eq!(DecimalParts::split(1e20), None);
        assert_eq!(decimal(1e20), "100000000000000000000.000");
        assert_eq!(decimal(-1e20), "-100000000000000000000.000");
        assert_eq!(decimal(INTEGER_LIMIT), "18446744073709551616.000");
        let huge = decimal(1e70);
        assert!(huge.ends_with(".000"));
        assert!(!huge.starts_with("18446744073709551615"));
        assert_eq!(decimal(18_446_744_073_709_549_568.0), "18446744073709549568.000");
    }

    #[test]
    fn test_list() {
        assert_eq!(decimal_list(&[1.0, 0.75, 0.5]), "[1.000, 0.750, 0.500]");
        assert_eq!(decimal_list(&[]), "[]");
    }
}
