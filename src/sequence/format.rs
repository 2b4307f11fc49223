//! Code string formatting: `TYPE-YYYY-DDMM-NNNNNN`.

use super::doc_type::DocType;
use chrono::{Datelike, NaiveDate};

/// Format an issued counter.
///
/// `DDMM` is day first (31 December is `3112`). The counter is zero-padded
/// to `width` digits and never truncated. Any width is accepted.
pub fn format_code(doc_type: &DocType, date: NaiveDate, counter: u64, width: usize) -> String {
    format!(
        "{}-{}-{:02}{:02}-{}",
        doc_type,
        date.year(),
        date.day(),
        date.month(),
        zero_pad(counter, width)
    )
}

/// `{:0width$}` panics for widths above `u16::MAX`, so pad by hand.
fn zero_pad(counter: u64, width: usize) -> String {
    let digits = counter.to_string();
    let mut padded = "0".repeat(width.saturating_sub(digits.len()));
    padded.push_str(&digits);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn formats_day_before_month() {
        let inv = DocType::parse("INV").unwrap();
        assert_eq!(
            format_code(&inv, date(2025, 3, 5), 8, 4),
            "INV-2025-0503-0008"
        );
        assert_eq!(
            format_code(&inv, date(2025, 12, 31), 1, 6),
            "INV-2025-3112-000001"
        );
    }

    #[test]
    fn wide_counters_are_not_truncated() {
        let dev = DocType::parse("DEV").unwrap();
        assert_eq!(
            format_code(&dev, date(2024, 1, 1), 1_234_567, 6),
            "DEV-2024-0101-1234567"
        );
    }

    #[test]
    fn zero_width_means_no_padding() {
        let dev = DocType::parse("DEV").unwrap();
        assert_eq!(format_code(&dev, date(2024, 7, 9), 42, 0), "DEV-2024-0907-42");
    }

    #[test]
    fn very_wide_padding_is_supported() {
        let inv = DocType::parse("INV").unwrap();
        let code = format_code(&inv, date(2025, 3, 5), 7, 70_000);

        let counter = code.strip_prefix("INV-2025-0503-").unwrap();
        assert_eq!(counter.len(), 70_000);
        assert!(counter.ends_with("07"));
        assert!(counter[..69_999].bytes().all(|b| b == b'0'));
    }

    #[test]
    fn zero_pad_matches_std_padding_for_small_widths() {
        for width in [0, 1, 3, 6, 20] {
            for counter in [0, 9, 42, 123_456, u64::MAX] {
                assert_eq!(zero_pad(counter, width), format!("{:0width$}", counter));
            }
        }
    }
}
