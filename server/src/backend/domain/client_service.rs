//! Client management: create, read, update and delete clients, and keep
//! each client's last payment date current.

use anyhow::Result;
use chrono::NaiveDate;
use log::{info, warn};

use crate::backend::domain::agreement_calculator::coerce_budget;
use crate::backend::domain::commands::client::{ClientResult, SaveClientCommand};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::formatting::format_phone_number;
use crate::backend::domain::models::client::Client;
use crate::backend::storage::csv::{ClientRepository, CsvConnection};
use crate::backend::storage::ClientStorage;

const MAX_NAME_LENGTH: usize = 256;

#[derive(Clone)]
pub struct ClientService {
    client_repository: ClientRepository,
}

impl ClientService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            client_repository: ClientRepository::new(connection),
        }
    }

    pub async fn create_client(&self, command: SaveClientCommand) -> Result<ClientResult> {
        info!("Creating client: {}", command.name.trim());
        Self::validate(&command)?;

        let mut client = Client {
            id: Client::generate_id(),
            ..Default::default()
        };
        Self::apply(&mut client, command);

        self.client_repository.store_client(&client).await?;
        info!("Created client {} with ID {}", client.name, client.id);

        Ok(ClientResult {
            client,
            success_message: "Client created successfully".to_string(),
        })
    }

    pub async fn get_client(&self, client_id: &str) -> Result<Client> {
        match self.client_repository.get_client(client_id).await? {
            Some(client) => Ok(client),
            None => {
                warn!("Client not found: {}", client_id);
                Err(DomainError::not_found("Client", client_id).into())
            }
        }
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>> {
        let clients = self.client_repository.list_clients().await?;
        info!("Found {} clients", clients.len());
        Ok(clients)
    }

    /// Replace every editable field; the last payment date is kept
    pub async fn update_client(&self, client_id: &str, command: SaveClientCommand) -> Result<ClientResult> {
        info!("Updating client: {}", client_id);
        Self::validate(&command)?;

        let mut client = self.get_client(client_id).await?;
        Self::apply(&mut client, command);
        self.client_repository.update_client(&client).await?;

        Ok(ClientResult {
            client,
            success_message: "Client updated successfully".to_string(),
        })
    }

    /// Delete a client along with every agreement and payment it owns
    pub async fn delete_client(&self, client_id: &str) -> Result<()> {
        info!("Deleting client: {}", client_id);
        if !self.client_repository.delete_client(client_id).await? {
            return Err(DomainError::not_found("Client", client_id).into());
        }
        Ok(())
    }

    /// Move the client's last payment date forward if `date` is later
    pub async fn note_payment_date(&self, client_id: &str, date: NaiveDate) -> Result<()> {
        let mut client = self.get_client(client_id).await?;
        if client.last_payment_date.map_or(true, |last| date > last) {
            client.last_payment_date = Some(date);
            self.client_repository.update_client(&client).await?;
            info!("Client {} last payment date is now {}", client_id, date);
        }
        Ok(())
    }

    fn validate(command: &SaveClientCommand) -> Result<(), DomainError> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Client name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::Validation(format!(
                "Client name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }

    fn apply(client: &mut Client, command: SaveClientCommand) {
        client.name = command.name.trim().to_string();
        client.address = command.address;
        client.address2 = command.address2;
        client.city = command.city;
        client.state = command.state;
        client.zip = command.zip;
        client.email = command.email;
        client.phone = format_phone_number(&command.phone);
        client.cell = format_phone_number(&command.cell);
        client.contact = command.contact;
        client.due_monthly = coerce_budget(command.due_monthly.as_deref());
    }
}
