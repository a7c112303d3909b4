//! Number formatting for console output and chart labels.

/// Insert thousands separators into a string of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format a cent amount as `1,234,567.89`, exactly.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!(
        "{sign}{}.{:02}",
        group_thousands(&(abs / 100).to_string()),
        abs % 100
    )
}

/// Format a monetary value with two decimals and thousands separators.
pub fn format_amount(value: f64) -> String {
    format_cents((value * 100.0).round() as i64)
}

pub fn format_count<T: ToString>(count: T) -> String {
    let text = count.to_string();
    match text.strip_prefix('-') {
        Some(digits) => format!("-{}", group_thousands(digits)),
        None => group_thousands(&text),
    }
}

/// Short axis label: `950`, `12.5K`, `3.2M`, `1.1B`.
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(123_456), "1,234.56");
        assert_eq!(format_cents(123_456_789_00), "123,456,789.00");
        assert_eq!(format_cents(-100_050), "-1,000.50");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(270.0), "270.00");
        assert_eq!(format_amount(1_500_000.5), "1,500,000.50");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(4_321usize), "4,321");
        assert_eq!(format_count(-12_000i64), "-12,000");
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(12_500.0), "12.5K");
        assert_eq!(compact(3_200_000.0), "3.2M");
        assert_eq!(compact(1_100_000_000.0), "1.1B");
    }
}
