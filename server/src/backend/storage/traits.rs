//! # Storage Traits
//!
//! Storage abstraction for the hierarchical record store. The domain layer
//! talks to these traits only; the CSV/YAML implementation lives in
//! `storage::csv`.
//!
//! Records nest by owner:
//! `clients/{client}/agreements/{agreement}` with payments as ledger rows.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{agreement::Agreement, client::Client, payment::Payment};

/// Client storage operations
#[async_trait]
pub trait ClientStorage: Send + Sync {
    /// Store a new client
    async fn store_client(&self, client: &Client) -> Result<()>;

    /// Retrieve a client by ID
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>>;

    /// List all clients ordered by name
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// Overwrite an existing client
    async fn update_client(&self, client: &Client) -> Result<()>;

    /// Delete a client with all of its agreements and payments.
    /// Returns false if the client did not exist.
    async fn delete_client(&self, client_id: &str) -> Result<bool>;
}

/// Agreement storage operations, always scoped to one client
#[async_trait]
pub trait AgreementStorage: Send + Sync {
    async fn store_agreement(&self, client_id: &str, agreement: &Agreement) -> Result<()>;

    async fn get_agreement(&self, client_id: &str, agreement_id: &str) -> Result<Option<Agreement>>;

    /// Find an agreement by its per-client sequential number
    async fn get_agreement_by_number(&self, client_id: &str, agreement_number: u32) -> Result<Option<Agreement>>;

    /// List agreements ordered by agreement number, highest first
    async fn list_agreements(&self, client_id: &str) -> Result<Vec<Agreement>>;

    async fn update_agreement(&self, client_id: &str, agreement: &Agreement) -> Result<()>;

    /// Delete an agreement and its payments.
    /// Returns false if the agreement did not exist.
    async fn delete_agreement(&self, client_id: &str, agreement_id: &str) -> Result<bool>;
}

/// Payment storage operations, scoped to one agreement
#[async_trait]
pub trait PaymentStorage: Send + Sync {
    async fn store_payment(&self, client_id: &str, agreement_id: &str, payment: &Payment) -> Result<()>;

    async fn get_payment(&self, client_id: &str, agreement_id: &str, payment_id: &str) -> Result<Option<Payment>>;

    /// List payments in the order they were recorded
    async fn list_payments(&self, client_id: &str, agreement_id: &str) -> Result<Vec<Payment>>;

    async fn update_payment(&self, client_id: &str, agreement_id: &str, payment: &Payment) -> Result<()>;

    /// Returns false if the payment did not exist
    async fn delete_payment(&self, client_id: &str, agreement_id: &str, payment_id: &str) -> Result<bool>;
}
