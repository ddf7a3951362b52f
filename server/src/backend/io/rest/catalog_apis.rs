//! Service catalog listing and the agreement calculator preview.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{SaveAgreementRequest, ServiceListResponse};

use crate::backend::io::rest::mappers::agreement_mapper::AgreementMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(list_services))
        .route("/agreements/preview", post(preview_agreement))
}

/// Every catalog service, sorted by label
pub async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/services");

    let services = state.catalog.all().into_iter().cloned().collect();
    (StatusCode::OK, Json(ServiceListResponse { services }))
}

/// Compute agreement terms for form input without saving anything
pub async fn preview_agreement(
    State(state): State<AppState>,
    Json(request): Json<SaveAgreementRequest>,
) -> impl IntoResponse {
    info!("POST /api/agreements/preview - request: {:?}", request);

    let command = AgreementMapper::to_command(request);
    let terms = state.agreement_service.preview(&command);
    (StatusCode::OK, Json(AgreementMapper::to_terms_dto(&terms)))
}
