//! Payments recorded against an agreement.

use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;

use crate::backend::domain::agreement_service::AgreementService;
use crate::backend::domain::agreement_calculator::round_cents;
use crate::backend::domain::client_service::ClientService;
use crate::backend::domain::commands::payment::{PaymentListResult, PaymentResult, SavePaymentCommand};
use crate::backend::domain::date_utils::{compare_dates, parse_date};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::payment::Payment;
use crate::backend::domain::payment_recorder::{amount_value, record_payment};
use crate::backend::storage::csv::{CsvConnection, PaymentRepository};
use crate::backend::storage::PaymentStorage;

#[derive(Clone)]
pub struct PaymentService {
    payment_repository: PaymentRepository,
    agreement_service: AgreementService,
    client_service: ClientService,
}

impl PaymentService {
    pub fn new(connection: CsvConnection, agreement_service: AgreementService, client_service: ClientService) -> Self {
        Self {
            payment_repository: PaymentRepository::new(connection),
            agreement_service,
            client_service,
        }
    }

    pub async fn create_payment(
        &self,
        client_id: &str,
        agreement_number: u32,
        command: SavePaymentCommand,
    ) -> Result<PaymentResult> {
        let agreement = self.agreement_service.get_agreement(client_id, agreement_number).await?;
        let date = Self::payment_date(&command.date)?;

        let mut payment = record_payment(date, &command.amount, &command.method, &command.note);
        payment.id = Payment::generate_id();

        self.payment_repository
            .store_payment(client_id, &agreement.id, &payment)
            .await?;
        self.client_service.note_payment_date(client_id, date).await?;
        info!(
            "Recorded payment of {} on agreement #{} for client {}",
            payment.amount, agreement_number, client_id
        );

        Ok(PaymentResult {
            payment,
            success_message: "Payment recorded successfully".to_string(),
        })
    }

    /// Payments oldest first, with the sum of their amounts
    pub async fn list_payments(&self, client_id: &str, agreement_number: u32) -> Result<PaymentListResult> {
        let agreement = self.agreement_service.get_agreement(client_id, agreement_number).await?;

        let mut payments = self.payment_repository.list_payments(client_id, &agreement.id).await?;
        payments.sort_by(|a, b| compare_dates(Some(a.date), Some(b.date)));
        let total_paid = Self::total_paid(&payments);

        info!(
            "Found {} payments totalling {} on agreement #{}",
            payments.len(),
            total_paid,
            agreement_number
        );
        Ok(PaymentListResult { payments, total_paid })
    }

    pub async fn update_payment(
        &self,
        client_id: &str,
        agreement_number: u32,
        payment_id: &str,
        command: SavePaymentCommand,
    ) -> Result<PaymentResult> {
        let agreement = self.agreement_service.get_agreement(client_id, agreement_number).await?;
        if self
            .payment_repository
            .get_payment(client_id, &agreement.id, payment_id)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Payment", payment_id).into());
        }

        let date = Self::payment_date(&command.date)?;
        let mut payment = record_payment(date, &command.amount, &command.method, &command.note);
        payment.id = payment_id.to_string();

        self.payment_repository
            .update_payment(client_id, &agreement.id, &payment)
            .await?;
        self.client_service.note_payment_date(client_id, date).await?;
        info!("Updated payment {} on agreement #{}", payment_id, agreement_number);

        Ok(PaymentResult {
            payment,
            success_message: "Payment updated successfully".to_string(),
        })
    }

    pub async fn delete_payment(&self, client_id: &str, agreement_number: u32, payment_id: &str) -> Result<()> {
        let agreement = self.agreement_service.get_agreement(client_id, agreement_number).await?;
        if !self
            .payment_repository
            .delete_payment(client_id, &agreement.id, payment_id)
            .await?
        {
            return Err(DomainError::not_found("Payment", payment_id).into());
        }
        info!("Deleted payment {} on agreement #{}", payment_id, agreement_number);
        Ok(())
    }

    /// Saturates at the largest representable amount
    pub fn total_paid(payments: &[Payment]) -> Decimal {
        round_cents(
            payments
                .iter()
                .map(|p| amount_value(&p.amount))
                .fold(Decimal::ZERO, Decimal::saturating_add),
        )
    }

    fn payment_date(text: &str) -> Result<NaiveDate, DomainError> {
        parse_date(text).ok_or_else(|| {
            DomainError::Validation(format!("Payment date must be MM/DD/YYYY, got '{}'", text.trim()))
        })
    }
}
