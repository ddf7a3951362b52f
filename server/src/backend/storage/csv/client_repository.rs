use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fs;

use super::connection::CsvConnection;
use crate::backend::domain::models::client::Client;
use crate::backend::storage::ClientStorage;

/// Client repository: one directory per client holding `client.yaml`
#[derive(Clone)]
pub struct ClientRepository {
    connection: CsvConnection,
}

impl ClientRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Load a client from its directory, `None` if there is no client.yaml
    fn load_client(&self, client_id: &str) -> Result<Option<Client>> {
        if !CsvConnection::is_safe_id(client_id) {
            return Ok(None);
        }

        let yaml_path = self.connection.client_file_path(client_id);
        if !yaml_path.exists() {
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let record: shared::Client = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid client file {}", yaml_path.display()))?;

        Ok(Some(Client::from(record)))
    }

    fn save_client(&self, client: &Client) -> Result<()> {
        if !CsvConnection::is_safe_id(&client.id) {
            return Err(anyhow::anyhow!("Invalid client ID: {}", client.id));
        }

        let yaml_path = self.connection.client_file_path(&client.id);
        let yaml_content = serde_yaml::to_string(&shared::Client::from(client.clone()))?;
        CsvConnection::write_atomic(&yaml_path, yaml_content.as_bytes())?;

        info!("Saved client {} ({})", client.name, client.id);
        Ok(())
    }
}

#[async_trait]
impl ClientStorage for ClientRepository {
    async fn store_client(&self, client: &Client) -> Result<()> {
        self.save_client(client)
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        self.load_client(client_id)
    }

    async fn list_clients(&self) -> Result<Vec<Client>> {
        let directories = CsvConnection::list_record_directories(&self.connection.clients_directory())?;

        let mut clients = Vec::with_capacity(directories.len());
        for client_id in directories {
            match self.load_client(&client_id) {
                Ok(Some(client)) => clients.push(client),
                Ok(None) => debug!("Directory {} holds no client", client_id),
                Err(e) => warn!("Error loading client from {}: {}", client_id, e),
            }
        }

        clients.sort_by_cached_key(|c| c.name.to_lowercase());
        debug!("Discovered {} clients", clients.len());
        Ok(clients)
    }

    async fn update_client(&self, client: &Client) -> Result<()> {
        if self.load_client(&client.id)?.is_none() {
            return Err(anyhow::anyhow!("Client not found: {}", client.id));
        }
        self.save_client(client)
    }

    async fn delete_client(&self, client_id: &str) -> Result<bool> {
        if !CsvConnection::is_safe_id(client_id) {
            return Ok(false);
        }

        let client_dir = self.connection.client_directory(client_id);
        if !client_dir.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&client_dir)?;
        info!("Deleted client directory: {:?}", client_dir);
        Ok(true)
    }
}
