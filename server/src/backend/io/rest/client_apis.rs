//! # REST API for Client Management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{ClientListResponse, ClientResponse, DeleteResponse, SaveClientRequest};

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::client_mapper::ClientMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/:client_id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

pub async fn list_clients(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/clients");

    match state.client_service.list_clients().await {
        Ok(clients) => {
            let response = ClientListResponse {
                clients: ClientMapper::to_dto_list(clients),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list clients", e),
    }
}

pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<SaveClientRequest>,
) -> impl IntoResponse {
    info!("POST /api/clients - request: {:?}", request);

    let command = ClientMapper::to_command(request);
    match state.client_service.create_client(command).await {
        Ok(result) => {
            let response = ClientResponse {
                client: ClientMapper::to_dto(result.client),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create client", e),
    }
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/clients/{}", client_id);

    match state.client_service.get_client(&client_id).await {
        Ok(client) => (StatusCode::OK, Json(ClientMapper::to_dto(client))).into_response(),
        Err(e) => error_response("get client", e),
    }
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(request): Json<SaveClientRequest>,
) -> impl IntoResponse {
    info!("PUT /api/clients/{} - request: {:?}", client_id, request);

    let command = ClientMapper::to_command(request);
    match state.client_service.update_client(&client_id, command).await {
        Ok(result) => {
            let response = ClientResponse {
                client: ClientMapper::to_dto(result.client),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update client", e),
    }
}

/// Delete a client together with its agreements and payments
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/clients/{}", client_id);

    match state.client_service.delete_client(&client_id).await {
        Ok(()) => {
            let response = DeleteResponse {
                success_message: "Client deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete client", e),
    }
}
