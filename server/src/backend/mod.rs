//! # Backend Module
//!
//! Everything behind the HTTP boundary, in three layers:
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (calculator, catalog, services)
//!     ↓
//! Storage Layer (YAML/CSV record store)
//! ```

pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::service_catalog::ServiceCatalog;
use crate::backend::domain::{AgreementService, ClientService, PaymentService};
use crate::backend::io::rest::{agreement_apis, catalog_apis, client_apis, payment_apis};
use crate::backend::storage::csv::CsvConnection;
use crate::config::AppConfig;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ServiceCatalog>,
    pub client_service: ClientService,
    pub agreement_service: AgreementService,
    pub payment_service: PaymentService,
}

impl AppState {
    pub fn new(connection: CsvConnection, catalog: Arc<ServiceCatalog>) -> Self {
        let client_service = ClientService::new(connection.clone());
        let agreement_service =
            AgreementService::new(connection.clone(), client_service.clone(), catalog.clone());
        let payment_service =
            PaymentService::new(connection, agreement_service.clone(), client_service.clone());

        Self {
            catalog,
            client_service,
            agreement_service,
            payment_service,
        }
    }
}

/// Load the catalog, open the record store and wire up the services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    let catalog = match &config.catalog_file {
        Some(path) => {
            info!("Loading service catalog from {}", path.display());
            ServiceCatalog::from_yaml_file(path)?
        }
        None => {
            info!("Using built-in service catalog");
            ServiceCatalog::builtin()
        }
    };
    info!("Service catalog has {} entries", catalog.len());

    let connection = CsvConnection::new(&config.data_directory)
        .with_context(|| format!("Cannot open data directory {}", config.data_directory.display()))?;
    info!("Record store ready at {}", connection.base_directory().display());

    Ok(AppState::new(connection, Arc::new(catalog)))
}

/// All API routes under `/api`, with CORS for the configured frontend origin
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin: {}", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(catalog_apis::router())
        .merge(client_apis::router())
        .merge(agreement_apis::router())
        .merge(payment_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
