//! Expiry-date parsing.
//!
//! Formats are tried in a fixed order; once a numeric format matches
//! structurally its verdict is final, even if the date turns out invalid.
//! Month-name formats only count as a match when the month token is a real
//! month, so `2 pcs 10` does not block a later `Jan 5 2025`.

use chrono::{Datelike, NaiveDate};
use regex::Captures;

re!(re_expiry_line,
    r"(?i)(?:expiry|expires?|valid\s*until)\s*[:\-]?\s*([^\n]+)");
re!(re_date_iso_like,
    r"([0-9]{4})[/.\-]([0-9]{1,2})[/.\-]([0-9]{1,2})");
re!(re_date_numeric,
    r"([0-9]{1,2})[/.\-]([0-9]{1,2})[/.\-]([0-9]{2,4})");
re!(re_date_day_month_name,
    r"([0-9]{1,2})\s+([A-Za-z]{3,9})\s*,?\s*([0-9]{2,4})");
re!(re_date_month_name_day,
    r"([A-Za-z]{3,9})\s+([0-9]{1,2}),?\s*([0-9]{2,4})");

/// Two-digit years below this land in the 2000s, the rest in the 1900s.
const PIVOT_YEAR: i32 = 50;

/// Expiry date for a voucher text: the remainder of an `Expiry:` /
/// `Valid until` line is tried first, then the text as a whole.
pub fn extract_date(text: &str) -> Option<NaiveDate> {
    if let Some(line) = re_expiry_line().captures(text).and_then(|c| c.get(1)) {
        if let Some(date) = parse_date_candidate(line.as_str()) {
            tracing::trace!(%date, "date taken from expiry line");
            return Some(date);
        }
    }
    parse_date_candidate(text)
}

pub fn parse_date_candidate(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(c) = re_date_iso_like().captures(value) {
        tracing::trace!(matched = &c[0], "iso-like date");
        return to_date(number(&c, 1)?, number(&c, 2)?, number(&c, 3)?);
    }

    if let Some(c) = re_date_numeric().captures(value) {
        tracing::trace!(matched = &c[0], "numeric date");
        let first: u32 = number(&c, 1)?;
        let second: u32 = number(&c, 2)?;
        let year = normalize_year(&c[3])?;
        // Month-first unless the first component cannot be a month.
        let (month, day) = if first > 12 { (second, first) } else { (first, second) };
        return to_date(year, month, day);
    }

    if let Some(c) = re_date_day_month_name().captures(value) {
        if let Some(month) = month_from_name(&c[2]) {
            tracing::trace!(matched = &c[0], "day month-name date");
            return to_date(normalize_year(&c[3])?, month, number(&c, 1)?);
        }
    }

    if let Some(c) = re_date_month_name_day().captures(value) {
        if let Some(month) = month_from_name(&c[1]) {
            tracing::trace!(matched = &c[0], "month-name day date");
            return to_date(normalize_year(&c[3])?, month, number(&c, 2)?);
        }
    }

    None
}

fn number<T: std::str::FromStr>(c: &Captures<'_>, group: usize) -> Option<T> {
    c.get(group)?.as_str().parse().ok()
}

/// Two-digit years pivot around [`PIVOT_YEAR`]; any other width is literal.
fn normalize_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    if raw.len() == 2 {
        Some(if year < PIVOT_YEAR { 2000 + year } else { 1900 + year })
    } else {
        Some(year)
    }
}

/// Build a calendar date, rejecting anything that would roll over (31 April,
/// 29 February outside leap years) rather than normalizing it. Years below 100
/// are not accepted.
fn to_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || year < 100 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .filter(|d| d.year() == year && d.month() == month && d.day() == day)
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    match prefix.as_str() {
        "jan" => Some(1), "feb" => Some(2), "mar" => Some(3), "apr" => Some(4),
        "may" => Some(5), "jun" => Some(6), "jul" => Some(7), "aug" => Some(8),
        "sep" => Some(9), "oct" => Some(10), "nov" => Some(11), "dec" => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parse(s: &str) -> Option<NaiveDate> {
        parse_date_candidate(s)
    }

    // ── ISO-like ──────────────────────────────────────────────────────────────

    #[test]
    fn iso_like_with_any_separator() {
        assert_eq!(parse("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse("2024/3/5"), Some(date(2024, 3, 5)));
        assert_eq!(parse("on 2024.12.01 only"), Some(date(2024, 12, 1)));
    }

    #[test]
    fn leap_years_respected() {
        assert_eq!(parse("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse("2023-02-29"), None);
    }

    #[test]
    fn invalid_structural_match_does_not_fall_through() {
        assert_eq!(parse("2024-04-31, or March 3, 2025"), None);
        assert_eq!(parse("31/04/2024 or May 5, 2024"), None);
    }

    #[test]
    fn years_below_one_hundred_rejected() {
        assert_eq!(parse("0045-01-01"), None);
    }

    // ── Numeric ───────────────────────────────────────────────────────────────

    #[test]
    fn numeric_month_first_by_default() {
        assert_eq!(parse("05/06/2024"), Some(date(2024, 5, 6)));
    }

    #[test]
    fn numeric_day_first_when_first_exceeds_twelve() {
        assert_eq!(parse("13/05/2024"), Some(date(2024, 5, 13)));
        assert_eq!(parse("05/13/2024"), Some(date(2024, 5, 13)));
    }

    #[test]
    fn two_digit_year_pivot() {
        assert_eq!(parse("12/05/49"), Some(date(2049, 12, 5)));
        assert_eq!(parse("12/05/50"), Some(date(1950, 12, 5)));
        assert_eq!(parse("1.2.00"), Some(date(2000, 1, 2)));
    }

    #[test]
    fn numeric_overflow_is_invalid() {
        assert_eq!(parse("99/99/9999"), None);
        assert_eq!(parse("02/30/2024"), None);
    }

    // ── Month names ───────────────────────────────────────────────────────────

    #[test]
    fn day_before_month_name() {
        assert_eq!(parse("31 Dec 2024"), Some(date(2024, 12, 31)));
        assert_eq!(parse("15 january, 24"), Some(date(2024, 1, 15)));
        assert_eq!(parse("1 Feb 75"), Some(date(1975, 2, 1)));
    }

    #[test]
    fn month_name_before_day() {
        assert_eq!(parse("March 15, 2024"), Some(date(2024, 3, 15)));
        assert_eq!(parse("Sept 5 2025"), Some(date(2025, 9, 5)));
    }

    #[test]
    fn unknown_month_word_falls_through() {
        assert_eq!(parse("Qty 2 Pcs 10 then Jan 5 2025"), Some(date(2025, 1, 5)));
    }

    #[test]
    fn no_date_at_all() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("valid on weekends"), None);
    }

    // ── Expiry line preference ────────────────────────────────────────────────

    #[test]
    fn expiry_line_preferred_over_earlier_dates() {
        let text = "Issued 2024-01-01\nExpires: 2024-06-30\n";
        assert_eq!(extract_date(text), Some(date(2024, 6, 30)));
    }

    #[test]
    fn unparseable_expiry_line_falls_back_to_whole_text() {
        let text = "Valid until further notice\nPrinted 03/04/2024";
        assert_eq!(extract_date(text), Some(date(2024, 3, 4)));
    }

    #[test]
    fn valid_until_without_separator() {
        assert_eq!(extract_date("VALID UNTIL 1 Jan 2026"), Some(date(2026, 1, 1)));
    }

    #[test]
    fn extract_date_empty_text() {
        assert_eq!(extract_date(""), None);
    }

    // ── Non-ASCII digits ──────────────────────────────────────────────────────

    #[test]
    fn non_ascii_digits_are_not_date_components() {
        assert_eq!(parse("٢٠٢٤-٠٣-١٥"), None);
        assert_eq!(extract_date("Bill ref ١٢/٠٥/٢٤\nPrinted 05/06/2024"), Some(date(2024, 5, 6)));
    }
}
