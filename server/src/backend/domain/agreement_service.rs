//! Agreement management for a client. Every save re-derives the billing
//! fields from the catalog so stored figures never drift from the inputs.

use std::sync::Arc;

use anyhow::Result;
use log::{info, warn};

use crate::backend::domain::agreement_calculator::{
    coerce_duration, compute_agreement, parse_decimal, AgreementTerms,
};
use crate::backend::domain::client_service::ClientService;
use crate::backend::domain::commands::agreement::{AgreementResult, SaveAgreementCommand};
use crate::backend::domain::date_utils::parse_date;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::agreement::Agreement;
use crate::backend::domain::service_catalog::ServiceCatalog;
use crate::backend::storage::csv::{AgreementRepository, CsvConnection};
use crate::backend::storage::AgreementStorage;

#[derive(Clone)]
pub struct AgreementService {
    agreement_repository: AgreementRepository,
    client_service: ClientService,
    catalog: Arc<ServiceCatalog>,
}

impl AgreementService {
    pub fn new(connection: CsvConnection, client_service: ClientService, catalog: Arc<ServiceCatalog>) -> Self {
        Self {
            agreement_repository: AgreementRepository::new(connection),
            client_service,
            catalog,
        }
    }

    /// Compute the terms a command would produce without saving anything
    pub fn preview(&self, command: &SaveAgreementCommand) -> AgreementTerms {
        let start_date = command.start_date.as_deref().and_then(parse_date);
        compute_agreement(
            &self.catalog,
            &command.service_codes,
            start_date,
            Some(i64::from(coerce_duration(command.duration.as_deref()))),
            command.budget_per_month.as_deref().and_then(parse_decimal),
        )
    }

    pub async fn create_agreement(&self, client_id: &str, command: SaveAgreementCommand) -> Result<AgreementResult> {
        self.client_service.get_client(client_id).await?;
        self.warn_unknown_codes(&command.service_codes);

        let agreement_number = self.next_agreement_number(client_id).await?;
        let agreement = self.build(Agreement::generate_id(), agreement_number, command);

        self.agreement_repository.store_agreement(client_id, &agreement).await?;
        info!(
            "Created agreement #{} for client {}: {}/month",
            agreement.agreement_number, client_id, agreement.rate_per_month
        );

        Ok(AgreementResult {
            agreement,
            success_message: "Agreement created successfully".to_string(),
        })
    }

    pub async fn get_agreement(&self, client_id: &str, agreement_number: u32) -> Result<Agreement> {
        self.client_service.get_client(client_id).await?;
        self.agreement_repository
            .get_agreement_by_number(client_id, agreement_number)
            .await?
            .ok_or_else(|| DomainError::not_found("Agreement", agreement_number).into())
    }

    /// Newest agreement first
    pub async fn list_agreements(&self, client_id: &str) -> Result<Vec<Agreement>> {
        self.client_service.get_client(client_id).await?;
        let agreements = self.agreement_repository.list_agreements(client_id).await?;
        info!("Found {} agreements for client {}", agreements.len(), client_id);
        Ok(agreements)
    }

    /// Re-derive every computed field; id and number are kept
    pub async fn update_agreement(
        &self,
        client_id: &str,
        agreement_number: u32,
        command: SaveAgreementCommand,
    ) -> Result<AgreementResult> {
        let existing = self.get_agreement(client_id, agreement_number).await?;
        self.warn_unknown_codes(&command.service_codes);

        let agreement = self.build(existing.id, existing.agreement_number, command);
        self.agreement_repository.update_agreement(client_id, &agreement).await?;
        info!("Updated agreement #{} for client {}", agreement_number, client_id);

        Ok(AgreementResult {
            agreement,
            success_message: "Agreement updated successfully".to_string(),
        })
    }

    /// Delete an agreement and its payment ledger
    pub async fn delete_agreement(&self, client_id: &str, agreement_number: u32) -> Result<()> {
        let agreement = self.get_agreement(client_id, agreement_number).await?;
        if !self.agreement_repository.delete_agreement(client_id, &agreement.id).await? {
            return Err(DomainError::not_found("Agreement", agreement_number).into());
        }
        info!("Deleted agreement #{} for client {}", agreement_number, client_id);
        Ok(())
    }

    /// One more than the highest number in use, starting at 1
    pub async fn next_agreement_number(&self, client_id: &str) -> Result<u32> {
        let agreements = self.agreement_repository.list_agreements(client_id).await?;
        Ok(agreements
            .iter()
            .map(|a| a.agreement_number)
            .max()
            .map_or(1, |max| max.saturating_add(1)))
    }

    fn build(&self, id: String, agreement_number: u32, command: SaveAgreementCommand) -> Agreement {
        let terms = self.preview(&command);
        let start_date = command.start_date.as_deref().and_then(parse_date);
        Agreement::from_terms(id, agreement_number, command.service_codes, start_date, terms)
    }

    fn warn_unknown_codes(&self, service_codes: &[String]) {
        for code in service_codes {
            if let Err(e) = self.catalog.lookup(code) {
                warn!("Ignoring service on agreement: {}", e);
            }
        }
    }
}
