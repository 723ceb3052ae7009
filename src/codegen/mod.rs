//! Emission of the generated C++ translation unit pair.
//!
//! The header declares `scale_input` and `predict`; their definitions come
//! from two different emitters. Both sides reference the signature constants
//! below, so declaration and definition cannot drift apart.

pub mod scaler;
pub mod trees;

pub(crate) const SCALE_INPUT_SIGNATURE: &str = "void scale_input(double* x)";
pub(crate) const PREDICT_SIGNATURE: &str = "double predict(const double* x)";

pub(crate) fn tree_signature(index: usize) -> String {
    format!("double tree_{index}(const double* x)")
}

/// Format a model constant as a C++ floating literal.
///
/// `f64::Display` yields the shortest decimal that round-trips to the same
/// bit pattern, so thresholds and leaf values survive translation exactly.
/// Integral values get a `.0` suffix so they still read as doubles.
pub(crate) fn format_float(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_float_keeps_fractions() {
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(-0.0123), "-0.0123");
    }

    #[test]
    fn test_format_float_suffixes_integral_values() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-1.0), "-1.0");
        assert_eq!(format_float(0.0), "0.0");
    }

    #[test]
    fn test_format_float_round_trips() {
        for value in [0.1, 1.0 / 3.0, -2.5e-7, 123456.789, f64::MIN_POSITIVE] {
            let parsed: f64 = format_float(value).parse().unwrap();
            assert_eq!(parsed.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_tree_signature() {
        assert_eq!(tree_signature(12), "double tree_12(const double* x)");
    }
}
