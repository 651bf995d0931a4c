/// Relative tolerance used by the `~=` operator.
///
/// The comparison accepts `a` and `b` when `|a - b| <= max(|a|, |b|) * 1e-6`,
/// which keeps `1.0000001 ~= 1.0000002` true while rejecting differences that
/// are large relative to the operands themselves.
pub const REL_TOLERANCE: f64 = 1e-6;

/// Compares two numbers for approximate equality using [`REL_TOLERANCE`].
///
/// The check is symmetric and exact equality always passes, including
/// `0 ~= 0` where the scaled tolerance collapses to zero.
///
/// # Example
/// ```
/// use kbasic::util::num::float_equal_rel;
///
/// assert!(float_equal_rel(1.0000001, 1.0000002));
/// assert!(!float_equal_rel(1.0, 1.1));
/// ```
#[must_use]
pub fn float_equal_rel(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    let largest = a.abs().max(b.abs());
    diff <= largest * REL_TOLERANCE
}

/// Renders a number in its canonical decimal form.
///
/// Integer-valued doubles print without a fraction (`120`, not `120.0`);
/// everything else uses the shortest decimal that round-trips. Negative zero
/// collapses to `0`.
///
/// # Example
/// ```
/// use kbasic::util::num::number_to_string;
///
/// assert_eq!(number_to_string(120.0), "120");
/// assert_eq!(number_to_string(123.456), "123.456");
/// ```
#[must_use]
pub fn number_to_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // f64 holds exact integers up to 2^53; beyond that the fraction test is
    // meaningless and the float formatter takes over.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        return format!("{}", value as i64);
    }
    format!("{value}")
}

/// Parses the leading numeric prefix of a string, as the `val` builtin does.
///
/// Skips leading whitespace, accepts an optional sign, digits, and one
/// fractional part. Anything after the prefix is ignored; a string with no
/// numeric prefix yields `0`.
#[must_use]
pub fn parse_leading_number(text: &str) -> f64 {
    let mut chars = text.chars().peekable();

    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }

    let sign = match chars.peek() {
        Some('-') => {
            chars.next();
            -1.0
        },
        Some('+') => {
            chars.next();
            1.0
        },
        _ => 1.0,
    };

    let mut number = 0.0;
    while let Some(c) = chars.peek().copied() {
        let Some(digit) = c.to_digit(10) else { break };
        number = number * 10.0 + f64::from(digit);
        chars.next();
    }

    if chars.peek() == Some(&'.') {
        chars.next();
        let mut power = 1.0;
        while let Some(c) = chars.peek().copied() {
            let Some(digit) = c.to_digit(10) else { break };
            number = number * 10.0 + f64::from(digit);
            power *= 10.0;
            chars.next();
        }
        return sign * number / power;
    }

    sign * number
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1024.0), "1024");
        assert_eq!(number_to_string(-7.0), "-7");
    }

    #[test]
    fn fractions_round_trip() {
        assert_eq!(number_to_string(123.456), "123.456");
        assert_eq!(number_to_string(0.5), "0.5");
    }

    #[test]
    fn leading_number_parse_matches_val() {
        assert_eq!(parse_leading_number("123.456"), 123.456);
        assert_eq!(parse_leading_number("  -12abc"), -12.0);
        assert_eq!(parse_leading_number("abc"), 0.0);
    }

    #[test]
    fn relative_equality_is_symmetric() {
        assert!(float_equal_rel(0.0, 0.0));
        assert!(float_equal_rel(1.0000002, 1.0000001));
        assert!(!float_equal_rel(100.0, 100.1));
    }
}
