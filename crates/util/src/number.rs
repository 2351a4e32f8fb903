//! Number formatting and aggregation helpers.

use std::fmt::Display;

const BYTE_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Truncate (not round) `n` to `point` decimal places.
///
/// ```
/// use zutil::number::to_fixed;
///
/// assert_eq!(to_fixed(5.5555555, 3), 5.555);
/// assert_eq!(to_fixed(-1.239, 2), -1.23);
/// ```
pub fn to_fixed(n: f64, point: u32) -> f64 {
    let m = 10f64.powi(point as i32);
    (n * m).trunc() / m
}

/// Format a byte count with a binary unit, keeping at most `point`
/// decimals.
///
/// Returns an empty string for `NaN` and negative input.
///
/// ```
/// use zutil::number::bytes_to_text;
///
/// assert_eq!(bytes_to_text(5555.0, 1), "5.4 KB");
/// assert_eq!(bytes_to_text(1024.0, 2), "1 KB");
/// assert_eq!(bytes_to_text(0.0, 2), "0 B");
/// ```
pub fn bytes_to_text(bytes: f64, point: usize) -> String {
    if bytes.is_nan() || bytes < 0.0 {
        return String::new();
    }
    let exp = bytes.log2().floor();
    let exp = if exp < 1.0 { 0.0 } else { exp };
    let index = ((exp / 10.0).floor() as usize).min(BYTE_UNITS.len() - 1);
    let scaled = bytes / 2f64.powi(10 * index as i32);

    let plain = scaled.to_string();
    let fixed = format!("{:.*}", point, scaled);
    let text = if plain.len() > fixed.len() { fixed } else { plain };
    format!("{} {}", text, BYTE_UNITS[index])
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean; `0` for an empty slice.
pub fn average(values: &[f64]) -> f64 {
    sum(values) / values.len().max(1) as f64
}

/// Smallest value; `+inf` for an empty slice.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Largest value; `-inf` for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Group the trailing run of digits in threes with commas.
///
/// ```
/// use zutil::number::to_currency;
///
/// assert_eq!(to_currency(1234567), "1,234,567");
/// assert_eq!(to_currency(-1234), "-1,234");
/// assert_eq!(to_currency(1234.5), "1234.5");
/// ```
pub fn to_currency(n: impl Display) -> String {
    let text = n.to_string();
    let digits_start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map_or(text.len(), |(i, _)| i);

    let (head, digits) = text.split_at(digits_start);
    let mut out = String::with_capacity(text.len() + digits.len() / 3);
    out.push_str(head);
    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        if i > 0 && remaining % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Ascending sorted copy.
pub fn sort_asc(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Descending sorted copy.
pub fn sort_desc(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0, 2), 1.0);
        assert_eq!(to_fixed(1.999, 0), 1.0);
        assert_eq!(to_fixed(3.14159, 2), 3.14);
    }

    #[test]
    fn test_bytes_to_text_units() {
        assert_eq!(bytes_to_text(1.0, 2), "1 B");
        assert_eq!(bytes_to_text(1023.0, 2), "1023 B");
        assert_eq!(bytes_to_text(1536.0, 2), "1.5 KB");
        assert_eq!(bytes_to_text(1_048_576.0, 2), "1 MB");
        assert_eq!(bytes_to_text(5_000_000_000.0, 2), "4.66 GB");
    }

    #[test]
    fn test_bytes_to_text_clamps_unit() {
        let huge = 2f64.powi(100);
        assert!(bytes_to_text(huge, 0).ends_with(" YB"));
    }

    #[test]
    fn test_bytes_to_text_invalid() {
        assert_eq!(bytes_to_text(f64::NAN, 2), "");
        assert_eq!(bytes_to_text(-1.0, 2), "");
    }

    #[test]
    fn test_sum_and_average() {
        assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min(&[3.0, -1.0, 2.0]), -1.0);
        assert_eq!(max(&[3.0, -1.0, 2.0]), 3.0);
        assert_eq!(min(&[]), f64::INFINITY);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_to_currency() {
        assert_eq!(to_currency(0), "0");
        assert_eq!(to_currency(123), "123");
        assert_eq!(to_currency(1000), "1,000");
        assert_eq!(to_currency(-123), "-123");
        assert_eq!(to_currency(123456), "123,456");
        assert_eq!(to_currency("12345678"), "12,345,678");
        assert_eq!(to_currency(""), "");
    }

    #[test]
    fn test_sort() {
        assert_eq!(sort_asc(&[3.0, 1.0, 2.0]), vec![1.0, 2.0, 3.0]);
        assert_eq!(sort_desc(&[3.0, 1.0, 2.0]), vec![3.0, 2.0, 1.0]);
        assert!(sort_asc(&[]).is_empty());
    }
}
