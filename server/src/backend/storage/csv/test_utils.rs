//! Test environment with automatic cleanup.
//!
//! The temporary directory lives as long as the `TestEnvironment`, so test
//! data is removed even when a test panics.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use super::agreement_repository::AgreementRepository;
use super::client_repository::ClientRepository;
use super::connection::CsvConnection;
use super::payment_repository::PaymentRepository;
use crate::backend::domain::service_catalog::ServiceCatalog;
use crate::backend::AppState;

pub struct TestEnvironment {
    /// Kept alive until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn client_repository(&self) -> ClientRepository {
        ClientRepository::new(self.connection.clone())
    }

    pub fn agreement_repository(&self) -> AgreementRepository {
        AgreementRepository::new(self.connection.clone())
    }

    pub fn payment_repository(&self) -> PaymentRepository {
        PaymentRepository::new(self.connection.clone())
    }

    /// Full application state over this environment and the built-in catalog
    pub fn app_state(&self) -> AppState {
        AppState::new(self.connection.clone(), Arc::new(ServiceCatalog::builtin()))
    }
}
