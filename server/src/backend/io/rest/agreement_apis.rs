//! # REST API for Agreements
//!
//! Agreements are addressed by their per-client sequential number, the
//! same number shown in the agreements grid.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{AgreementListResponse, AgreementResponse, DeleteResponse, SaveAgreementRequest};

use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::agreement_mapper::AgreementMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/clients/:client_id/agreements",
            get(list_agreements).post(create_agreement),
        )
        .route(
            "/clients/:client_id/agreements/:agreement_number",
            get(get_agreement).put(update_agreement).delete(delete_agreement),
        )
}

/// Agreements for a client, newest number first
pub async fn list_agreements(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/clients/{}/agreements", client_id);

    match state.agreement_service.list_agreements(&client_id).await {
        Ok(agreements) => {
            let response = AgreementListResponse {
                agreements: AgreementMapper::to_rows(agreements, &state.catalog),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list agreements", e),
    }
}

pub async fn create_agreement(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(request): Json<SaveAgreementRequest>,
) -> impl IntoResponse {
    info!("POST /api/clients/{}/agreements - request: {:?}", client_id, request);

    let command = AgreementMapper::to_command(request);
    match state.agreement_service.create_agreement(&client_id, command).await {
        Ok(result) => {
            let response = AgreementResponse {
                agreement: AgreementMapper::to_row(result.agreement, &state.catalog),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("create agreement", e),
    }
}

pub async fn get_agreement(
    State(state): State<AppState>,
    Path((client_id, agreement_number)): Path<(String, u32)>,
) -> impl IntoResponse {
    info!("GET /api/clients/{}/agreements/{}", client_id, agreement_number);

    match state.agreement_service.get_agreement(&client_id, agreement_number).await {
        Ok(agreement) => {
            (StatusCode::OK, Json(AgreementMapper::to_row(agreement, &state.catalog))).into_response()
        }
        Err(e) => error_response("get agreement", e),
    }
}

pub async fn update_agreement(
    State(state): State<AppState>,
    Path((client_id, agreement_number)): Path<(String, u32)>,
    Json(request): Json<SaveAgreementRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/clients/{}/agreements/{} - request: {:?}",
        client_id, agreement_number, request
    );

    let command = AgreementMapper::to_command(request);
    match state
        .agreement_service
        .update_agreement(&client_id, agreement_number, command)
        .await
    {
        Ok(result) => {
            let response = AgreementResponse {
                agreement: AgreementMapper::to_row(result.agreement, &state.catalog),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update agreement", e),
    }
}

/// Delete an agreement and its payments
pub async fn delete_agreement(
    State(state): State<AppState>,
    Path((client_id, agreement_number)): Path<(String, u32)>,
) -> impl IntoResponse {
    info!("DELETE /api/clients/{}/agreements/{}", client_id, agreement_number);

    match state.agreement_service.delete_agreement(&client_id, agreement_number).await {
        Ok(()) => {
            let response = DeleteResponse {
                success_message: "Agreement deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete agreement", e),
    }
}
