use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::backend::domain::agreement_calculator::{normalize_duration, AgreementTerms};
use crate::backend::domain::date_utils::{format_date, parse_date};

/// A billing contract between the company and one client
#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    pub id: String,
    /// Sequential per client, starting at 1
    pub agreement_number: u32,
    pub service_codes: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub duration_months: u32,
    pub end_date: Option<NaiveDate>,
    pub rate_per_month: Decimal,
    pub rate_per_year: Decimal,
    pub budget_per_month: Decimal,
}

impl Agreement {
    pub fn generate_id() -> String {
        format!("agreement-{}", uuid::Uuid::new_v4())
    }

    /// Assemble an agreement from freshly computed terms
    pub fn from_terms(
        id: String,
        agreement_number: u32,
        service_codes: Vec<String>,
        start_date: Option<NaiveDate>,
        terms: AgreementTerms,
    ) -> Self {
        Self {
            id,
            agreement_number,
            service_codes,
            start_date,
            duration_months: terms.duration_months,
            end_date: terms.end_date,
            rate_per_month: terms.rate_per_month,
            rate_per_year: terms.rate_per_year,
            budget_per_month: terms.budget_per_month,
        }
    }

    pub fn terms(&self) -> AgreementTerms {
        AgreementTerms {
            rate_per_month: self.rate_per_month,
            rate_per_year: self.rate_per_year,
            end_date: self.end_date,
            duration_months: self.duration_months,
            budget_per_month: self.budget_per_month,
        }
    }
}

/// Unreadable dates become missing; a zero duration becomes 1
impl From<shared::Agreement> for Agreement {
    fn from(record: shared::Agreement) -> Self {
        Self {
            id: record.id,
            agreement_number: record.agreement_number,
            service_codes: record.service_code,
            start_date: parse_date(&record.start_date),
            duration_months: normalize_duration(Some(i64::from(record.duration))),
            end_date: parse_date(&record.end_date),
            rate_per_month: record.rate_per_month,
            rate_per_year: record.rate_per_year,
            budget_per_month: record.budget_per_month,
        }
    }
}

impl From<Agreement> for shared::Agreement {
    fn from(agreement: Agreement) -> Self {
        Self {
            id: agreement.id,
            agreement_number: agreement.agreement_number,
            service_code: agreement.service_codes,
            duration: agreement.duration_months,
            start_date: format_date(agreement.start_date),
            end_date: format_date(agreement.end_date),
            rate_per_month: agreement.rate_per_month,
            rate_per_year: agreement.rate_per_year,
            budget_per_month: agreement.budget_per_month,
        }
    }
}
