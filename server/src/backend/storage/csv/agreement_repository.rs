use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;

use super::connection::CsvConnection;
use crate::backend::domain::models::agreement::Agreement;
use crate::backend::storage::AgreementStorage;

/// Agreement repository: one directory per agreement under its client,
/// holding `agreement.yaml` and the payment ledger
#[derive(Clone)]
pub struct AgreementRepository {
    connection: CsvConnection,
}

impl AgreementRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn load_agreement(&self, client_id: &str, agreement_id: &str) -> Result<Option<Agreement>> {
        if !CsvConnection::is_safe_id(client_id) || !CsvConnection::is_safe_id(agreement_id) {
            return Ok(None);
        }

        let yaml_path = self.connection.agreement_file_path(client_id, agreement_id);
        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let record: shared::Agreement = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid agreement file {}", yaml_path.display()))?;

        Ok(Some(Agreement::from(record)))
    }

    fn save_agreement(&self, client_id: &str, agreement: &Agreement) -> Result<()> {
        if !CsvConnection::is_safe_id(client_id) || !CsvConnection::is_safe_id(&agreement.id) {
            return Err(anyhow::anyhow!(
                "Invalid agreement path: {}/{}",
                client_id,
                agreement.id
            ));
        }

        let yaml_path = self.connection.agreement_file_path(client_id, &agreement.id);
        let yaml_content = serde_yaml::to_string(&shared::Agreement::from(agreement.clone()))?;
        CsvConnection::write_atomic(&yaml_path, yaml_content.as_bytes())?;

        info!(
            "Saved agreement #{} ({}) for client {}",
            agreement.agreement_number, agreement.id, client_id
        );
        Ok(())
    }
}

#[async_trait]
impl AgreementStorage for AgreementRepository {
    async fn store_agreement(&self, client_id: &str, agreement: &Agreement) -> Result<()> {
        self.save_agreement(client_id, agreement)
    }

    async fn get_agreement(&self, client_id: &str, agreement_id: &str) -> Result<Option<Agreement>> {
        self.load_agreement(client_id, agreement_id)
    }

    async fn get_agreement_by_number(&self, client_id: &str, agreement_number: u32) -> Result<Option<Agreement>> {
        let agreements = self.list_agreements(client_id).await?;
        Ok(agreements
            .into_iter()
            .find(|a| a.agreement_number == agreement_number))
    }

    async fn list_agreements(&self, client_id: &str) -> Result<Vec<Agreement>> {
        if !CsvConnection::is_safe_id(client_id) {
            return Ok(Vec::new());
        }

        let directories =
            CsvConnection::list_record_directories(&self.connection.agreements_directory(client_id))?;

        let mut agreements = Vec::with_capacity(directories.len());
        for agreement_id in directories {
            match self.load_agreement(client_id, &agreement_id) {
                Ok(Some(agreement)) => agreements.push(agreement),
                Ok(None) => debug!("Directory {} holds no agreement", agreement_id),
                Err(e) => warn!("Error loading agreement {}: {}", agreement_id, e),
            }
        }

        agreements.sort_by(|a, b| b.agreement_number.cmp(&a.agreement_number));
        Ok(agreements)
    }

    async fn update_agreement(&self, client_id: &str, agreement: &Agreement) -> Result<()> {
        if self.load_agreement(client_id, &agreement.id)?.is_none() {
            return Err(anyhow::anyhow!("Agreement not found: {}", agreement.id));
        }
        self.save_agreement(client_id, agreement)
    }

    async fn delete_agreement(&self, client_id: &str, agreement_id: &str) -> Result<bool> {
        if !CsvConnection::is_safe_id(client_id) || !CsvConnection::is_safe_id(agreement_id) {
            return Ok(false);
        }

        let agreement_dir = self.connection.agreement_directory(client_id, agreement_id);
        if !agreement_dir.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&agreement_dir)?;
        info!("Deleted agreement directory: {:?}", agreement_dir);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn agreement(id: &str, number: u32) -> Agreement {
        Agreement {
            id: id.to_string(),
            agreement_number: number,
            service_codes: vec!["HOST".to_string(), "EMAIL".to_string()],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            duration_months: 12,
            end_date: NaiveDate::from_ymd_opt(2024, 12, 15),
            rate_per_month: Decimal::new(13000, 2),
            rate_per_year: Decimal::new(156000, 2),
            budget_per_month: Decimal::new(4999, 2),
        }
    }

    #[tokio::test]
    async fn test_store_and_get_agreement() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.agreement_repository();

        repo.store_agreement("client-1", &agreement("agreement-1", 1)).await.unwrap();

        let loaded = repo.get_agreement("client-1", "agreement-1").await.unwrap().unwrap();
        assert_eq!(loaded, agreement("agreement-1", 1));
    }

    #[tokio::test]
    async fn test_stored_yaml_uses_document_field_names() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.agreement_repository();

        repo.store_agreement("client-1", &agreement("agreement-1", 4)).await.unwrap();

        let yaml = fs::read_to_string(
            env.base_path
                .join("clients/client-1/agreements/agreement-1/agreement.yaml"),
        )
        .unwrap();
        assert!(yaml.contains("agreementNumber: 4"));
        assert!(yaml.contains("startDate:"));
        assert!(yaml.contains("01/15/2024"));
        assert!(yaml.contains("12/15/2024"));
        assert!(yaml.contains("serviceCode:"));
        assert!(yaml.contains("budgetPerMonth: 49.99"));
    }

    #[tokio::test]
    async fn test_list_and_find_by_number() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.agreement_repository();

        repo.store_agreement("client-1", &agreement("agreement-a", 1)).await.unwrap();
        repo.store_agreement("client-1", &agreement("agreement-b", 3)).await.unwrap();
        repo.store_agreement("client-1", &agreement("agreement-c", 2)).await.unwrap();
        repo.store_agreement("client-2", &agreement("agreement-d", 7)).await.unwrap();

        let numbers: Vec<u32> = repo
            .list_agreements("client-1")
            .await
            .unwrap()
            .iter()
            .map(|a| a.agreement_number)
            .collect();
        assert_eq!(numbers, vec![3, 2, 1]);

        let found = repo.get_agreement_by_number("client-1", 2).await.unwrap().unwrap();
        assert_eq!(found.id, "agreement-c");
        assert!(repo.get_agreement_by_number("client-1", 7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_for_unknown_client_is_empty() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.agreement_repository();
        assert!(repo.list_agreements("client-none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = env.agreement_repository();

        assert!(repo.update_agreement("client-1", &agreement("agreement-1", 1)).await.is_err());

        repo.store_agreement("client-1", &agreement("agreement-1", 1)).await.unwrap();
        let mut changed = agreement("agreement-1", 1);
        changed.duration_months = 6;
        repo.update_agreement("client-1", &changed).await.unwrap();
        assert_eq!(
            repo.get_agreement("client-1", "agreement-1").await.unwrap().unwrap().duration_months,
            6
        );

        assert!(repo.delete_agreement("client-1", "agreement-1").await.unwrap());
        assert!(!repo.delete_agreement("client-1", "agreement-1").await.unwrap());
    }
}
