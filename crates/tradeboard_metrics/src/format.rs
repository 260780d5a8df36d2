//! Number formatting shared by every numeric display.
//!
//! Integral amounts render without decimals, anything else with exactly two.
//! Thousands are grouped with `,`.

/// Currency suffix used by the backends' amounts.
pub const CURRENCY_SUFFIX: &str = "Bs.";

/// Formats an amount: two decimals when non-integral, none otherwise.
///
/// Non-finite values render as `0`.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let value = finite_or_zero(value);
    if value.fract() == 0.0 {
        format_int(value)
    } else {
        format_number(value)
    }
}

/// Formats an amount followed by the currency suffix, e.g. `"1,234.50 Bs."`.
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("{} {CURRENCY_SUFFIX}", format_amount(value))
}

/// Formats with exactly two decimals and grouping, e.g. `"1,234.00"`.
#[must_use]
pub fn format_number(value: f64) -> String {
    let rendered = format!("{:.2}", finite_or_zero(value).abs());
    let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, "00"));
    let sign = if is_negative(value, &rendered) { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Formats rounded to an integer with grouping, e.g. `"12,500"`.
#[must_use]
pub fn format_int(value: f64) -> String {
    let rounded = finite_or_zero(value).round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&digits))
}

/// Formats a percentage with one decimal, e.g. `"12.5%"`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", finite_or_zero(value))
}

/// Inserts `,` every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

// "-0.00" is not a thing.
fn is_negative(value: f64, rendered_abs: &str) -> bool {
    value < 0.0 && rendered_abs.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_switches_on_fraction() {
        assert_eq!(format_currency(1234.5), "1,234.50 Bs.");
        assert_eq!(format_currency(1235.0), "1,235 Bs.");
        assert_eq!(format_currency(0.0), "0 Bs.");
    }

    #[test]
    fn grouping() {
        assert_eq!(format_int(999.0), "999");
        assert_eq!(format_int(1000.0), "1,000");
        assert_eq!(format_int(1_234_567.0), "1,234,567");
        assert_eq!(format_int(-45_000.0), "-45,000");
        assert_eq!(format_int(12.6), "13");
    }

    #[test]
    fn two_decimals() {
        assert_eq!(format_number(1234.0), "1,234.00");
        assert_eq!(format_number(0.5), "0.50");
        assert_eq!(format_number(-1234.567), "-1,234.57");
        assert_eq!(format_number(-0.001), "0.00");
    }

    #[test]
    fn non_finite_renders_zero() {
        assert_eq!(format_amount(f64::NAN), "0");
        assert_eq!(format_number(f64::INFINITY), "0.00");
    }

    #[test]
    fn percent() {
        assert_eq!(format_percent(12.345), "12.3%");
        assert_eq!(format_percent(-3.0), "-3.0%");
    }
}
