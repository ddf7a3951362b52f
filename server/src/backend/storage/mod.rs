//! # Storage Module
//!
//! Persistence for clients, agreements and payments.
//!
//! The domain layer depends on the traits in [`traits`]; the only backend
//! today is the file-based store in [`csv`], which keeps one directory per
//! client and per agreement:
//!
//! ```text
//! clients/{client_id}/client.yaml
//! clients/{client_id}/agreements/{agreement_id}/agreement.yaml
//! clients/{client_id}/agreements/{agreement_id}/payments.csv
//! ```

pub mod traits;
pub mod csv;

pub use traits::{AgreementStorage, ClientStorage, PaymentStorage};
