use ::csv::{ReaderBuilder, WriterBuilder};
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;

use super::connection::{CsvConnection, PAYMENTS_HEADER};
use crate::backend::domain::models::payment::Payment;
use crate::backend::storage::PaymentStorage;

/// Payment ledger: one `payments.csv` per agreement directory
#[derive(Clone)]
pub struct PaymentRepository {
    connection: CsvConnection,
}

impl PaymentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn check_ids(client_id: &str, agreement_id: &str) -> Result<()> {
        if CsvConnection::is_safe_id(client_id) && CsvConnection::is_safe_id(agreement_id) {
            Ok(())
        } else {
            Err(anyhow::anyhow!("Invalid agreement path: {}/{}", client_id, agreement_id))
        }
    }

    /// Read every payment in the ledger. Rows that cannot be parsed are
    /// skipped with a warning so one bad line does not hide the rest.
    fn read_payments(&self, client_id: &str, agreement_id: &str) -> Result<Vec<Payment>> {
        let file_path = self.connection.payments_file_path(client_id, agreement_id);
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let mut payments = Vec::new();
        for (line, result) in csv_reader.deserialize::<shared::Payment>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping unreadable payment row {} in {}: {}", line + 1, file_path.display(), e);
                    continue;
                }
            };
            match Payment::try_from(row) {
                Ok(payment) => payments.push(payment),
                Err(e) => warn!("Skipping payment row {} in {}: {}", line + 1, file_path.display(), e),
            }
        }

        Ok(payments)
    }

    /// Rewrite the whole ledger atomically
    fn write_payments(&self, client_id: &str, agreement_id: &str, payments: &[Payment]) -> Result<()> {
        self.connection.ensure_payments_file_exists(client_id, agreement_id)?;
        let file_path = self.connection.payments_file_path(client_id, agreement_id);

        let mut csv_writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        csv_writer.write_record(PAYMENTS_HEADER)?;
        for payment in payments {
            csv_writer.serialize(shared::Payment::from(payment.clone()))?;
        }
        let buffer = csv_writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush payment ledger: {}", e))?;

        CsvConnection::write_atomic(&file_path, &buffer)
    }
}

#[async_trait]
impl PaymentStorage for PaymentRepository {
    async fn store_payment(&self, client_id: &str, agreement_id: &str, payment: &Payment) -> Result<()> {
        Self::check_ids(client_id, agreement_id)?;

        let mut payments = self.read_payments(client_id, agreement_id)?;
        if payments.iter().any(|p| p.id == payment.id) {
            return Err(anyhow::anyhow!("Payment already exists: {}", payment.id));
        }
        payments.push(payment.clone());
        self.write_payments(client_id, agreement_id, &payments)?;

        info!("Stored payment {} for agreement {}", payment.id, agreement_id);
        Ok(())
    }

    async fn get_payment(&self, client_id: &str, agreement_id: &str, payment_id: &str) -> Result<Option<Payment>> {
        if Self::check_ids(client_id, agreement_id).is_err() {
            return Ok(None);
        }
        let payments = self.read_payments(client_id, agreement_id)?;
        Ok(payments.into_iter().find(|p| p.id == payment_id))
    }

    async fn list_payments(&self, client_id: &str, agreement_id: &str) -> Result<Vec<Payment>> {
        if Self::check_ids(client_id, agreement_id).is_err() {
            return Ok(Vec::new());
        }
        self.read_payments(client_id, agreement_id)
    }

    async fn update_payment(&self, client_id: &str, agreement_id: &str, payment: &Payment) -> Result<()> {
        Self::check_ids(client_id, agreement_id)?;

        let mut payments = self.read_payments(client_id, agreement_id)?;
        let slot = payments
            .iter_mut()
            .find(|p| p.id == payment.id)
            .ok_or_else(|| anyhow::anyhow!("Payment not found: {}", payment.id))?;
        *slot = payment.clone();
        self.write_payments(client_id, agreement_id, &payments)?;

        info!("Updated payment {} for agreement {}", payment.id, agreement_id);
        Ok(())
    }

    async fn delete_payment(&self, client_id: &str, agreement_id: &str, payment_id: &str) -> Result<bool> {
        if Self::check_ids(client_id, agreement_id).is_err() {
            return Ok(false);
        }

        let mut payments = self.read_payments(client_id, agreement_id)?;
        let before = payments.len();
        payments.retain(|p| p.id != payment_id);
        if payments.len() == before {
            return Ok(false);
        }
        self.write_payments(client_id, agreement_id, &payments)?;

        info!("Deleted payment {} for agreement {}", payment_id, agreement_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::payment::PaymentMethod;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;
    use std::fs;

    fn payment(id: &str, day: u32, note: &str) -> Payment {
        Payment {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            amount: "130.00".to_string(),
            method: PaymentMethod::Ach,
            note: note.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_list_payments() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.payment_repository();

        repo.store_payment("client-1", "agreement-1", &payment("payment-1", 1, "first")).await.unwrap();
        repo.store_payment("client-1", "agreement-1", &payment("payment-2", 15, "second, with comma")).await.unwrap();

        let payments = repo.list_payments("client-1", "agreement-1").await.unwrap();
        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].note, "first");
        assert_eq!(payments[1].note, "second, with comma");

        let content = fs::read_to_string(env.base_path.join(
            "clients/client-1/agreements/agreement-1/payments.csv",
        ))
        .unwrap();
        assert!(content.starts_with("id,date,amount,method,note\n"));
        assert!(content.contains("payment-1,02/01/2024,130.00,ACH,first"));
    }

    #[tokio::test]
    async fn test_duplicate_payment_id_rejected() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.payment_repository();

        repo.store_payment("client-1", "agreement-1", &payment("payment-1", 1, "")).await.unwrap();
        assert!(repo.store_payment("client-1", "agreement-1", &payment("payment-1", 2, "")).await.is_err());
    }

    #[tokio::test]
    async fn test_update_and_delete_payment() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.payment_repository();

        repo.store_payment("client-1", "agreement-1", &payment("payment-1", 1, "")).await.unwrap();

        let mut changed = payment("payment-1", 3, "corrected");
        changed.method = PaymentMethod::Other("Zelle".to_string());
        repo.update_payment("client-1", "agreement-1", &changed).await.unwrap();

        let loaded = repo.get_payment("client-1", "agreement-1", "payment-1").await.unwrap().unwrap();
        assert_eq!(loaded.note, "corrected");
        assert_eq!(loaded.method.as_str(), "Zelle");

        assert!(repo.update_payment("client-1", "agreement-1", &payment("payment-9", 1, "")).await.is_err());

        assert!(repo.delete_payment("client-1", "agreement-1", "payment-1").await.unwrap());
        assert!(!repo.delete_payment("client-1", "agreement-1", "payment-1").await.unwrap());
        assert!(repo.list_payments("client-1", "agreement-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_rows_are_skipped() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.payment_repository();

        env.connection.ensure_payments_file_exists("client-1", "agreement-1").unwrap();
        fs::write(
            env.connection.payments_file_path("client-1", "agreement-1"),
            "id,date,amount,method,note\np1,13/40/2024,5,ACH,\np2,03/01/2024,7,Check,ok\n",
        )
        .unwrap();

        let payments = repo.list_payments("client-1", "agreement-1").await.unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].id, "p2");
    }

    #[tokio::test]
    async fn test_missing_ledger_is_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.payment_repository();
        assert!(repo.list_payments("client-1", "agreement-1").await.unwrap().is_empty());
        assert!(repo.get_payment("client-1", "agreement-1", "p1").await.unwrap().is_none());
    }
}
