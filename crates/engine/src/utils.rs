use num_complex::Complex64;

#[must_use]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Renders a complex number the way a formula would spell it, e.g. `2`, `-i`, `1-2.5i`.
#[must_use]
pub fn format_complex(value: Complex64) -> String {
    // Adding zero folds negative zero into zero
    let (re, im) = (value.re + 0.0, value.im + 0.0);
    let imaginary = if im == 1.0 {
        "i".to_string()
    } else if im == -1.0 {
        "-i".to_string()
    } else {
        format!("{im}i")
    };
    match (re == 0.0, im == 0.0) {
        (_, true) => format!("{re}"),
        (true, false) => imaginary,
        (false, false) if im < 0.0 => format!("{re}{imaginary}"),
        (false, false) => format!("{re}+{imaginary}"),
    }
}

/// Renders an optional evaluation result.
#[must_use]
pub fn format_value(value: Option<Complex64>) -> String {
    value.map_or_else(|| "undefined".to_string(), format_complex)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Panics unless both parts of `actual` lie within `tolerance` of `expected`.
    pub fn assert_near(expected: Complex64, actual: Complex64, tolerance: f64) {
        assert!(
            (expected.re - actual.re).abs() <= tolerance
                && (expected.im - actual.im).abs() <= tolerance,
            "expected {expected} but got {actual} (tolerance {tolerance})"
        );
    }

    #[test]
    fn complex_formatting() {
        assert_eq!("0", format_complex(Complex64::new(-0.0, 0.0)));
        assert_eq!("2", format_complex(Complex64::new(2.0, 0.0)));
        assert_eq!("-3.5", format_complex(Complex64::new(-3.5, -0.0)));
        assert_eq!("i", format_complex(Complex64::new(0.0, 1.0)));
        assert_eq!("-i", format_complex(Complex64::new(0.0, -1.0)));
        assert_eq!("0.4i", format_complex(Complex64::new(0.0, 0.4)));
        assert_eq!("1+2i", format_complex(Complex64::new(1.0, 2.0)));
        assert_eq!("1-2.5i", format_complex(Complex64::new(1.0, -2.5)));
        assert_eq!("-1+i", format_complex(Complex64::new(-1.0, 1.0)));
    }

    #[test]
    fn values() {
        assert_eq!("undefined", format_value(None));
        assert_eq!("120i", format_value(Some(Complex64::new(0.0, 120.0))));
    }

    #[test]
    fn plurals() {
        assert_eq!("", plural_s(1));
        assert_eq!("s", plural_s(0));
        assert_eq!("s", plural_s(441));
    }
}
