// Utility functions
use chrono::{DateTime, SecondsFormat, Utc};

/// Converts a provider timestamp in milliseconds into `DateTime<Utc>`, if possible.
pub fn datetime_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// ISO-8601 with a trailing `Z`, second precision.
pub fn iso_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Groups the integer part with commas: `1234567.891` with 2 decimals -> `1,234,567.89`.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Dollar amount with thousands separators.
pub fn format_usd(value: f64, decimals: usize) -> String {
    format!("${}", format_thousands(value, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(50_000.0, 2), "50,000.00");
        assert_eq!(format_thousands(1_000_000.0, 0), "1,000,000");
        assert_eq!(format_thousands(999.6, 0), "1,000");
        assert_eq!(format_thousands(12.346, 2), "12.35");
        assert_eq!(format_thousands(-1234.5, 1), "-1,234.5");
        assert_eq!(format_usd(49_000.0, 2), "$49,000.00");
    }

    #[test]
    fn converts_millis() {
        let dt = datetime_from_millis(1_704_067_200_000.0).unwrap();
        assert_eq!(iso_utc(dt), "2024-01-01T00:00:00Z");
        assert!(datetime_from_millis(f64::NAN).is_none());
    }
}
