//! Display Formatting
//!
//! Currency, dates, percentages and file sizes as shown in tables and cards.

use chrono::{DateTime, NaiveDate};

/// Format an amount in the given ISO currency, rounded to two decimals.
///
/// INR uses Indian grouping (`₹1,23,45,678.50`); other known currencies use
/// thousands grouping; unknown codes are prefixed verbatim.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();
    let whole = cents / 100;
    let fraction = cents % 100;

    let code = currency.to_ascii_uppercase();
    let grouped = if code == "INR" {
        group_indian(whole)
    } else {
        group_thousands(whole)
    };
    let symbol = match code.as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{} ", other),
    };

    format!("{}{}{}.{:02}", if negative { "-" } else { "" }, symbol, grouped, fraction)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Last three digits, then groups of two
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// `17 Oct 2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "—".to_string())
}

/// RFC 3339 timestamp as `17 Oct 2026, 14:05` (UTC); unparsable input is
/// returned unchanged
pub fn format_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.naive_utc().format("%d %b %Y, %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Human distance between `date` and `today`
pub fn relative_days(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        d if d > 1 => format!("in {} days", d),
        d => format!("{} days ago", -d),
    }
}

/// `part / whole` as 0-100, clamped; 0 when `whole` is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    (part / whole * 100.0).clamp(0.0, 100.0)
}

/// `42.5%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_file_size(size: u64) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{:.1} KB", size as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_currency(12345678.5, "INR"), "₹1,23,45,678.50");
        assert_eq!(format_currency(999.0, "inr"), "₹999.00");
        assert_eq!(format_currency(1000.0, "INR"), "₹1,000.00");
        assert_eq!(format_currency(-150000.126, "INR"), "-₹1,50,000.13");
    }

    #[test]
    fn test_other_currencies() {
        assert_eq!(format_currency(1234567.0, "USD"), "$1,234,567.00");
        assert_eq!(format_currency(12.3, "AED"), "AED 12.30");
        assert_eq!(format_currency(0.0, "EUR"), "€0.00");
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date(d(2026, 10, 7)), "07 Oct 2026");
        assert_eq!(format_timestamp("2026-10-17T14:05:09Z"), "17 Oct 2026, 14:05");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_optional_date(None), "—");
    }

    #[test]
    fn test_relative_days() {
        let today = d(2026, 10, 17);
        assert_eq!(relative_days(today, today), "today");
        assert_eq!(relative_days(d(2026, 10, 18), today), "tomorrow");
        assert_eq!(relative_days(d(2026, 10, 16), today), "yesterday");
        assert_eq!(relative_days(d(2026, 10, 27), today), "in 10 days");
        assert_eq!(relative_days(d(2026, 10, 1), today), "16 days ago");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(3.0, 4.0), 75.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(12.0, 10.0), 100.0);
        assert_eq!(format_percent(66.666), "66.7%");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
    }
}
