//! # REST API for Payments

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use log::info;
use shared::{DeleteResponse, PaymentListResponse, PaymentResponse, SavePaymentRequest};

use crate::backend::domain::formatting::format_money;
use crate::backend::io::rest::error_response;
use crate::backend::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/clients/:client_id/agreements/:agreement_number/payments",
            get(list_payments).post(create_payment),
        )
        .route(
            "/clients/:client_id/agreements/:agreement_number/payments/:payment_id",
            put(update_payment).delete(delete_payment),
        )
}

/// Payments oldest first, with the total paid
pub async fn list_payments(
    State(state): State<AppState>,
    Path((client_id, agreement_number)): Path<(String, u32)>,
) -> impl IntoResponse {
    info!("GET /api/clients/{}/agreements/{}/payments", client_id, agreement_number);

    match state.payment_service.list_payments(&client_id, agreement_number).await {
        Ok(result) => {
            let response = PaymentListResponse {
                payments: PaymentMapper::to_dto_list(result.payments),
                total_paid: result.total_paid,
                formatted_total: format_money(result.total_paid),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("list payments", e),
    }
}

pub async fn create_payment(
    State(state): State<AppState>,
    Path((client_id, agreement_number)): Path<(String, u32)>,
    Json(request): Json<SavePaymentRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/clients/{}/agreements/{}/payments - request: {:?}",
        client_id, agreement_number, request
    );

    let command = PaymentMapper::to_command(request);
    match state
        .payment_service
        .create_payment(&client_id, agreement_number, command)
        .await
    {
        Ok(result) => {
            let response = PaymentResponse {
                payment: PaymentMapper::to_dto(result.payment),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response("record payment", e),
    }
}

pub async fn update_payment(
    State(state): State<AppState>,
    Path((client_id, agreement_number, payment_id)): Path<(String, u32, String)>,
    Json(request): Json<SavePaymentRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/clients/{}/agreements/{}/payments/{} - request: {:?}",
        client_id, agreement_number, payment_id, request
    );

    let command = PaymentMapper::to_command(request);
    match state
        .payment_service
        .update_payment(&client_id, agreement_number, &payment_id, command)
        .await
    {
        Ok(result) => {
            let response = PaymentResponse {
                payment: PaymentMapper::to_dto(result.payment),
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("update payment", e),
    }
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path((client_id, agreement_number, payment_id)): Path<(String, u32, String)>,
) -> impl IntoResponse {
    info!(
        "DELETE /api/clients/{}/agreements/{}/payments/{}",
        client_id, agreement_number, payment_id
    );

    match state
        .payment_service
        .delete_payment(&client_id, agreement_number, &payment_id)
        .await
    {
        Ok(()) => {
            let response = DeleteResponse {
                success_message: "Payment deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("delete payment", e),
    }
}
