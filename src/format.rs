//! Display formatting helpers
//!
//! String formatting for currency amounts, plain numbers, percentages
//! and dates, matching the display conventions of the web front end
//! (KRW amounts are whole-won, other currencies two decimals, Korean
//! compact units for large values).

use chrono::{NaiveDate, NaiveDateTime};

/// Thousands-grouped rendering of `|value|` with a fixed number of
/// decimals.
fn grouped_abs(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (rendered, None),
    };

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*digit as char);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", out, frac),
        None => out,
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "KRW" => Some("₩"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Format a currency amount: `₩1,000,000`, `$1,234.56`. KRW renders
/// whole units, other currencies two decimals. Negative amounts carry
/// the minus after the symbol (`₩-5,000`); with `show_sign` the sign
/// leads (`+₩1,000`), and zero is never signed.
pub fn format_currency(value: f64, currency: &str, show_sign: bool) -> String {
    let decimals = if currency == "KRW" { 0 } else { 2 };
    let number = grouped_abs(value, decimals);

    let unsigned = match currency_symbol(currency) {
        Some(symbol) => format!("{}{}", symbol, number),
        None => format!("{} {}", currency, number),
    };

    if show_sign && value != 0.0 {
        return if value > 0.0 {
            format!("+{}", unsigned)
        } else {
            format!("-{}", unsigned)
        };
    }

    if value < 0.0 {
        match currency_symbol(currency) {
            Some(symbol) => format!("{}-{}", symbol, number),
            None => format!("{} -{}", currency, number),
        }
    } else {
        unsigned
    }
}

/// Thousands-grouped number with fixed decimals; `show_sign` adds a
/// leading `+` for positive values.
pub fn format_number(value: f64, decimals: usize, show_sign: bool) -> String {
    let number = grouped_abs(value, decimals);

    if show_sign && value != 0.0 {
        return if value > 0.0 {
            format!("+{}", number)
        } else {
            format!("-{}", number)
        };
    }

    if value < 0.0 {
        format!("-{}", number)
    } else {
        number
    }
}

/// Render a fraction as a percentage: `0.1234` → `"12.34%"`.
pub fn format_percent(value: f64, decimals: usize, show_sign: bool) -> String {
    let formatted = format_number(value * 100.0, decimals, false);

    if show_sign && value > 0.0 {
        format!("+{}%", formatted)
    } else {
        format!("{}%", formatted)
    }
}

/// Whole quantities render bare, fractional ones with four decimals.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0, false)
    } else {
        format_number(value, 4, false)
    }
}

/// Compact rendering with Korean units: 만 (1e4), 억 (1e8), T (1e12).
pub fn format_compact(value: f64) -> String {
    if value.abs() >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if value.abs() >= 1e8 {
        format!("{:.1}억", value / 1e8)
    } else if value.abs() >= 1e4 {
        format!("{:.1}만", value / 1e4)
    } else {
        format_number(value, 0, false)
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_krw() {
        assert_eq!(format_currency(1_000_000.0, "KRW", false), "₩1,000,000");
        assert_eq!(format_currency(0.0, "KRW", false), "₩0");
        assert_eq!(format_currency(-5000.0, "KRW", false), "₩-5,000");
    }

    #[test]
    fn formats_usd() {
        assert_eq!(format_currency(1234.56, "USD", false), "$1,234.56");
        assert_eq!(format_currency(0.0, "USD", false), "$0.00");
    }

    #[test]
    fn currency_sign_mode() {
        assert_eq!(format_currency(1000.0, "KRW", true), "+₩1,000");
        assert_eq!(format_currency(-1000.0, "KRW", true), "-₩1,000");
        assert_eq!(format_currency(0.0, "KRW", true), "₩0");
    }

    #[test]
    fn unknown_currency_uses_code() {
        assert_eq!(format_currency(12.5, "GBP", false), "GBP 12.50");
        assert_eq!(format_currency(-12.5, "GBP", false), "GBP -12.50");
    }

    #[test]
    fn formats_percent() {
        assert_eq!(format_percent(0.1234, 2, false), "12.34%");
        assert_eq!(format_percent(0.5, 2, false), "50.00%");
        assert_eq!(format_percent(-0.075, 2, false), "-7.50%");
        assert_eq!(format_percent(0.1, 2, true), "+10.00%");
    }

    #[test]
    fn formats_numbers_and_quantities() {
        assert_eq!(format_number(1234567.891, 2, false), "1,234,567.89");
        assert_eq!(format_number(-42.0, 0, false), "-42");
        assert_eq!(format_number(42.0, 0, true), "+42");
        assert_eq!(format_quantity(300.0), "300");
        assert_eq!(format_quantity(2.5), "2.5000");
    }

    #[test]
    fn formats_compact() {
        assert_eq!(format_compact(1_500_000_000_000.0), "1.5T");
        assert_eq!(format_compact(250_000_000.0), "2.5억");
        assert_eq!(format_compact(30_000.0), "3.0만");
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(-250_000_000.0), "-2.5억");
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_date(date), "2024-06-01");
        let datetime = date.and_hms_opt(9, 30, 0).unwrap();
        assert_eq!(format_datetime(datetime), "2024-06-01 09:30");
    }
}
