//! Display formatting for grid columns: money, phone numbers, durations.

use rust_decimal::Decimal;

use super::agreement_calculator::round_cents;

/// Format an amount as US dollars, e.g. `$1,234.56` or `-$12.50`
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Format a 10-digit phone number as `(xxx) xxx-xxxx`.
/// Anything that is not exactly ten digits comes back unchanged.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
}

/// "1 month", "12 months"
pub fn format_duration(months: u32) -> String {
    format!("{} month{}", months, if months > 1 { "s" } else { "" })
}
