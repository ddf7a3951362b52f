use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A billable service offered to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCatalogEntry {
    /// Unique service code, e.g. "HOST"
    pub code: String,
    /// Human-readable label shown in pickers
    pub label: String,
    pub monthly_price: Decimal,
    pub yearly_price: Decimal,
    /// Display colour for service chips (e.g. "#e0f7fa")
    #[serde(default)]
    pub hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListResponse {
    /// Entries sorted by label, case-insensitive
    pub services: Vec<ServiceCatalogEntry>,
}

/// A loosely typed form value: clients may send `12` or `"12"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(f64),
    Text(String),
}

impl FormValue {
    /// The value as the text a user would have typed
    pub fn as_text(&self) -> String {
        match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// Client record as stored in `client.yaml` and returned over the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub contact: String,
    pub due_monthly: Decimal,
    /// MM/DD/YYYY, empty when no payment has been recorded
    pub last_payment_date: String,
}

/// Body for creating or updating a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveClientRequest {
    pub name: String,
    pub address: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub email: String,
    pub phone: String,
    pub cell: String,
    pub contact: String,
    pub due_monthly: Option<FormValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientResponse {
    pub client: Client,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<Client>,
}

/// Agreement record as stored in `agreement.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Agreement {
    pub id: String,
    pub agreement_number: u32,
    pub service_code: Vec<String>,
    /// Duration in months
    pub duration: u32,
    /// MM/DD/YYYY, empty when not set
    pub start_date: String,
    /// MM/DD/YYYY, empty when there is no start date
    pub end_date: String,
    pub rate_per_month: Decimal,
    pub rate_per_year: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub budget_per_month: Decimal,
}

/// Body for creating, updating or previewing an agreement.
/// Numeric fields are kept raw so the server can coerce bad input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveAgreementRequest {
    pub service_code: Vec<String>,
    pub start_date: Option<String>,
    pub duration: Option<FormValue>,
    pub budget_per_month: Option<FormValue>,
}

/// Derived billing figures for an agreement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementTerms {
    pub rate_per_month: Decimal,
    pub rate_per_year: Decimal,
    pub end_date: String,
    pub duration: u32,
    pub budget_per_month: Decimal,
    pub invoice_per_month: Decimal,
}

/// Display strings for an agreement grid row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAgreement {
    pub rate_per_month: String,
    pub rate_per_year: String,
    pub budget_per_month: String,
    pub invoice_per_month: String,
    pub duration: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementRow {
    pub agreement: Agreement,
    pub formatted: FormattedAgreement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementResponse {
    pub agreement: AgreementRow,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementListResponse {
    /// Sorted by agreement number, newest first
    pub agreements: Vec<AgreementRow>,
}

/// Payment record, one row of `payments.csv`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub id: String,
    /// MM/DD/YYYY
    pub date: String,
    /// Amount exactly as entered
    pub amount: String,
    /// "ACH", "Credit Card", "Check", or whatever was submitted
    pub method: String,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavePaymentRequest {
    pub date: String,
    pub amount: Option<FormValue>,
    pub method: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment: Payment,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    /// Sorted by date, oldest first
    pub payments: Vec<Payment>,
    pub total_paid: Decimal,
    pub formatted_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success_message: String,
}

/// Error body returned by the REST layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_value_accepts_numbers_and_text() {
        let from_number: SaveAgreementRequest =
            serde_json::from_str(r#"{"serviceCode":["HOST"],"duration":12}"#).unwrap();
        assert_eq!(from_number.duration.unwrap().as_text(), "12");

        let from_text: SaveAgreementRequest =
            serde_json::from_str(r#"{"duration":"twelve","budgetPerMonth":"99.50"}"#).unwrap();
        assert_eq!(from_text.duration.unwrap().as_text(), "twelve");
        assert_eq!(from_text.budget_per_month.unwrap().as_text(), "99.50");
        assert!(from_text.service_code.is_empty());
    }

    #[test]
    fn test_agreement_uses_document_field_names() {
        let agreement = Agreement {
            id: "a1".to_string(),
            agreement_number: 3,
            service_code: vec!["HOST".to_string()],
            duration: 12,
            start_date: "01/15/2024".to_string(),
            end_date: "12/15/2024".to_string(),
            rate_per_month: Decimal::new(10000, 2),
            rate_per_year: Decimal::new(120000, 2),
            budget_per_month: Decimal::new(5050, 2),
        };

        let json = serde_json::to_value(&agreement).unwrap();
        assert_eq!(json["agreementNumber"], 3);
        assert_eq!(json["serviceCode"][0], "HOST");
        assert_eq!(json["ratePerMonth"], "100.00");
        assert_eq!(json["budgetPerMonth"], 50.5);
        assert_eq!(json["startDate"], "01/15/2024");
    }

    #[test]
    fn test_missing_fields_default() {
        let client: Client = serde_yaml::from_str("id: c1\nname: Acme\n").unwrap();
        assert_eq!(client.name, "Acme");
        assert_eq!(client.due_monthly, Decimal::ZERO);
        assert!(client.last_payment_date.is_empty());
    }
}
