//! File-backed storage: YAML records in a directory tree, CSV ledgers for
//! payments.

pub mod connection;
pub mod client_repository;
pub mod agreement_repository;
pub mod payment_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use client_repository::ClientRepository;
pub use agreement_repository::AgreementRepository;
pub use payment_repository::PaymentRepository;
