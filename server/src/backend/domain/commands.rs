//! Domain-level command and result types.
//!
//! Services take and return these; the REST layer maps the public DTOs from
//! the `shared` crate onto them and back.

pub mod client {
    use crate::backend::domain::models::client::Client;

    /// Raw client form fields. `due_monthly` is coerced like any other
    /// numeric form input.
    #[derive(Debug, Clone, Default)]
    pub struct SaveClientCommand {
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
        pub due_monthly: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct ClientResult {
        pub client: Client,
        pub success_message: String,
    }
}

pub mod agreement {
    use crate::backend::domain::models::agreement::Agreement;

    /// Raw agreement form fields, used for create, update and preview
    #[derive(Debug, Clone, Default)]
    pub struct SaveAgreementCommand {
        pub service_codes: Vec<String>,
        pub start_date: Option<String>,
        pub duration: Option<String>,
        pub budget_per_month: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct AgreementResult {
        pub agreement: Agreement,
        pub success_message: String,
    }
}

pub mod payment {
    use rust_decimal::Decimal;

    use crate::backend::domain::models::payment::Payment;

    #[derive(Debug, Clone, Default)]
    pub struct SavePaymentCommand {
        /// MM/DD/YYYY
        pub date: String,
        pub amount: String,
        pub method: String,
        pub note: String,
    }

    #[derive(Debug, Clone)]
    pub struct PaymentResult {
        pub payment: Payment,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct PaymentListResult {
        /// Oldest first
        pub payments: Vec<Payment>,
        pub total_paid: Decimal,
    }
}
