//! Textual rendering of real and imaginary numbers
//!
//! Negative values take a `- ` prefix rather than a fused sign, and the
//! non-finite sentinels render as `infinity` and `undefined`.

/// Renders a real with six fixed decimals.
pub fn real_to_string(value: f64) -> String {
    if value.is_infinite() {
        if value < 0.0 { "- infinity".into() } else { "infinity".into() }
    } else if value.is_nan() {
        "undefined".into()
    } else if value < 0.0 {
        format!("- {:.6}", -value)
    } else {
        format!("{value:.6}")
    }
}

/// Renders an imaginary magnitude with the trailing `i`.
pub fn imaginary_to_string(value: f64) -> String {
    if value.is_infinite() {
        if value < 0.0 { "- (infinity)i".into() } else { "(infinity)i".into() }
    } else if value.is_nan() {
        "(undefined)i".into()
    } else if value < 0.0 {
        format!("- {:.6}i", -value)
    } else {
        format!("{value:.6}i")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reals() {
        assert_eq!(real_to_string(3.75), "3.750000");
        assert_eq!(real_to_string(-2.5), "- 2.500000");
        assert_eq!(real_to_string(0.0), "0.000000");
        assert_eq!(real_to_string(f64::INFINITY), "infinity");
        assert_eq!(real_to_string(f64::NEG_INFINITY), "- infinity");
        assert_eq!(real_to_string(f64::NAN), "undefined");
    }

    #[test]
    fn imaginaries() {
        assert_eq!(imaginary_to_string(4.0), "4.000000i");
        assert_eq!(imaginary_to_string(-4.0), "- 4.000000i");
        assert_eq!(imaginary_to_string(f64::INFINITY), "(infinity)i");
        assert_eq!(imaginary_to_string(f64::NEG_INFINITY), "- (infinity)i");
        assert_eq!(imaginary_to_string(f64::NAN), "(undefined)i");
    }
}
