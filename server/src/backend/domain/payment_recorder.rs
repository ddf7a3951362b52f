//! Builds payment records from what the user typed.
//!
//! The recorder never rejects a method: anything that is not ACH, credit
//! card or check is kept verbatim as `PaymentMethod::Other`. Amounts are
//! stored exactly as entered and only interpreted when totals are needed.

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use std::fmt;

use super::agreement_calculator::parse_decimal;
use super::models::payment::Payment;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Ach,
    CreditCard,
    Check,
    /// An unrecognized method, kept as submitted
    Other(String),
}

impl PaymentMethod {
    /// Interpret a submitted method; blank means the ACH default
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "ach" => PaymentMethod::Ach,
            "credit card" | "creditcard" | "credit_card" => PaymentMethod::CreditCard,
            "check" => PaymentMethod::Check,
            _ => PaymentMethod::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Ach => "ACH",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Check => "Check",
            PaymentMethod::Other(text) => text,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, PaymentMethod::Other(_))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build a payment from user input. `id` is left empty for storage to assign.
pub fn record_payment(date: NaiveDate, amount: &str, method: &str, note: &str) -> Payment {
    let method = PaymentMethod::parse(method);
    if !method.is_recognized() {
        warn!("Recording payment with unrecognized method: {}", method);
    }

    Payment {
        id: String::new(),
        date,
        amount: amount.trim().to_string(),
        method,
        note: note.to_string(),
    }
}

/// Numeric value of an entered amount; non-numeric amounts count as zero
pub fn amount_value(amount: &str) -> Decimal {
    parse_decimal(amount).unwrap_or(Decimal::ZERO)
}
