//! Currency truncation and formatting
//!
//! Every currency amount in the response contract is truncated to 2 decimal
//! places before being reported. Truncation means floor, not round: a raw
//! 100.999 reports as "100.99".

/// Truncate a raw amount to 2 decimal places without rounding.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Format a currency amount as a string with exactly 2 fraction digits,
/// truncated per [`truncate2`].
pub fn money(value: f64) -> String {
    format!("{:.2}", truncate2(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_never_rounds_up() {
        assert_eq!(money(100.999), "100.99");
        assert_eq!(money(1798.6515754582708), "1798.65");
        assert_eq!(money(0.009), "0.00");
    }

    #[test]
    fn test_exact_values_pass_through() {
        assert_eq!(money(0.0), "0.00");
        assert_eq!(money(150.0), "150.00");
        assert_eq!(money(17550.0), "17550.00");
    }

    #[test]
    fn test_two_fraction_digits_always() {
        assert_eq!(money(5.5), "5.50");
        assert_eq!(money(23.25), "23.25");
    }
}
