pub mod agreement_calculator;
pub mod agreement_service;
pub mod client_service;
pub mod commands;
pub mod date_utils;
pub mod errors;
pub mod formatting;
pub mod models;
pub mod payment_recorder;
pub mod payment_service;
pub mod service_catalog;

pub use agreement_service::AgreementService;
pub use client_service::ClientService;
pub use payment_service::PaymentService;
