//! Display formatting helpers.
//!
//! The pricing API reports balances as wei-scale decimal strings; everything
//! here degrades to a zero display instead of failing when a value is missing
//! or malformed, matching how the dashboard should behave on partial data.

use std::time::Duration;

/// Format a numeric amount with commas as thousand separators.
pub fn format_amount(amount: f64, decimal_places: usize) -> String {
    let formatted = format!("{:.*}", decimal_places, amount.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted, None),
    };

    let mut grouped = String::new();
    for (count, digit) in int_part.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let mut result: String = grouped.chars().rev().collect();

    if let Some(frac) = frac_part {
        result.push('.');
        result.push_str(&frac);
    }
    if amount < 0.0 {
        result.insert(0, '-');
    }
    result
}

/// Format a percentage value, e.g. `12.34%`.
pub fn format_percentage(percentage: f64, decimal_places: usize) -> String {
    format!("{:.*}%", decimal_places, percentage)
}

/// Convert a wei-scale decimal string to a token amount with the given
/// decimals. Returns 0.0 for missing or malformed input.
pub fn wei_to_token(wei_amount: &str, decimals: u32) -> f64 {
    match wei_amount.parse::<f64>() {
        Ok(wei) => wei / 10f64.powi(decimals as i32),
        Err(_) => 0.0,
    }
}

/// Truncate an Ethereum address for display: `0x1234...abcd`.
///
/// `chars` is the number of hex characters kept on each side (the leading
/// `0x` is kept in addition). Addresses too short to truncate are returned
/// unchanged.
pub fn truncate_address(address: &str, chars: usize) -> String {
    if address.len() <= 2 * chars + 2 {
        return address.to_string();
    }
    format!(
        "{}...{}",
        &address[..chars + 2],
        &address[address.len() - chars..]
    )
}

/// Render a cache entry age for the staleness footer, e.g. `45s ago` or
/// `3m 10s ago`.
pub fn format_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m {}s ago", secs / 60, secs % 60)
    } else {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_amount(0.5, 6), "0.500000");
        assert_eq!(format_amount(999.0, 0), "999");
        assert_eq!(format_amount(-1234.5, 1), "-1,234.5");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.345, 2), "12.35%");
        assert_eq!(format_percentage(0.0, 2), "0.00%");
    }

    #[test]
    fn test_wei_to_token() {
        assert_eq!(wei_to_token("1000000000000000000", 18), 1.0);
        assert_eq!(wei_to_token("2500000", 6), 2.5);
        assert_eq!(wei_to_token("", 18), 0.0);
        assert_eq!(wei_to_token("garbage", 18), 0.0);
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("0x1234567890abcdef1234567890abcdef12345678", 4),
            "0x1234...5678"
        );
        // Too short to truncate
        assert_eq!(truncate_address("0x1234", 4), "0x1234");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::from_secs(45)), "45s ago");
        assert_eq!(format_age(Duration::from_secs(190)), "3m 10s ago");
        assert_eq!(format_age(Duration::from_secs(7500)), "2h 5m ago");
    }
}
