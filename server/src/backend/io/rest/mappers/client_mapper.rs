use shared::{Client as ClientDto, SaveClientRequest};

use crate::backend::domain::commands::client::SaveClientCommand;
use crate::backend::domain::models::client::Client;

pub struct ClientMapper;

impl ClientMapper {
    pub fn to_dto(domain: Client) -> ClientDto {
        ClientDto::from(domain)
    }

    pub fn to_dto_list(clients: Vec<Client>) -> Vec<ClientDto> {
        clients.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_command(request: SaveClientRequest) -> SaveClientCommand {
        SaveClientCommand {
            name: request.name,
            address: request.address,
            address2: request.address2,
            city: request.city,
            state: request.state,
            zip: request.zip,
            email: request.email,
            phone: request.phone,
            cell: request.cell,
            contact: request.contact,
            due_monthly: request.due_monthly.map(|v| v.as_text()),
        }
    }
}
