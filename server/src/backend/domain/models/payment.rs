use anyhow::anyhow;
use chrono::NaiveDate;

use crate::backend::domain::date_utils::{format_date, parse_date};
pub use crate::backend::domain::payment_recorder::PaymentMethod;

/// Money received against an agreement
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: String,
    pub date: NaiveDate,
    /// As entered by the user
    pub amount: String,
    pub method: PaymentMethod,
    pub note: String,
}

impl Payment {
    pub fn generate_id() -> String {
        format!("payment-{}", uuid::Uuid::new_v4())
    }
}

/// Fails if the date is not a valid MM/DD/YYYY date
impl TryFrom<shared::Payment> for Payment {
    type Error = anyhow::Error;

    fn try_from(record: shared::Payment) -> Result<Self, Self::Error> {
        let date = parse_date(&record.date)
            .ok_or_else(|| anyhow!("Invalid payment date '{}' for payment {}", record.date, record.id))?;

        Ok(Self {
            id: record.id,
            date,
            amount: record.amount,
            method: PaymentMethod::parse(&record.method),
            note: record.note,
        })
    }
}

impl From<Payment> for shared::Payment {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            date: format_date(Some(payment.date)),
            amount: payment.amount,
            method: payment.method.as_str().to_string(),
            note: payment.note,
        }
    }
}
