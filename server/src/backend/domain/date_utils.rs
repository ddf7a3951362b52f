//! Calendar date helpers for the `MM/DD/YYYY` layout used in every stored
//! record and grid column.

use chrono::{Datelike, Duration, NaiveDate};
use std::cmp::Ordering;

/// Parse the leading integer of a string the way a lenient form field does:
/// optional whitespace, optional sign, then digits. Trailing text is ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parse `M/D/YYYY` (zero padding optional). Returns `None` unless there are
/// exactly three `/`-separated parts forming a real calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    if parts.len() != 3 {
        return None;
    }

    let month = parse_leading_int(parts[0])?;
    let day = parse_leading_int(parts[1])?;
    let year = parse_leading_int(parts[2])?;

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Render a date as zero-padded `MM/DD/YYYY`; `None` renders as "".
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{:02}/{:02}/{}", d.month(), d.day(), d.year()),
        None => String::new(),
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Add `months` calendar months, keeping the day of month.
///
/// When the target month is shorter the surplus days spill into the next
/// month: Jan 31 + 1 month is Mar 2 in a leap year (Mar 3 otherwise).
/// Returns `None` when the result falls outside the representable calendar.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0() as i32)?
        .checked_add(months)?;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;

    let last_day = days_in_month(year, month);
    let overflow = date.day().saturating_sub(last_day);
    let day = date.day().min(last_day);

    NaiveDate::from_ymd_opt(year, month, day)?.checked_add_signed(Duration::days(i64::from(overflow)))
}

/// Order optional dates for sorting: missing dates come first.
pub fn compare_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}
