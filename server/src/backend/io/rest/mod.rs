//! # REST API Interface Layer
//!
//! HTTP endpoints over the domain services. Handlers map request DTOs to
//! domain commands, call one service, and map the result back. Errors are
//! translated to status codes in one place, [`error_response`].

pub mod agreement_apis;
pub mod catalog_apis;
pub mod client_apis;
pub mod mappers;
pub mod payment_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use log::error;
use shared::ErrorResponse;

use crate::backend::domain::errors::DomainError;

/// Translate a service error into a JSON error response.
/// `NotFound` is 404, `Validation` is 400, anything else is 500.
pub fn error_response(action: &str, err: anyhow::Error) -> Response {
    let status = match err.downcast_ref::<DomainError>() {
        Some(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("Failed to {}: {:#}", action, err);

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        format!("Failed to {}", action)
    } else {
        err.to_string()
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}
