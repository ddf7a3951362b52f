//! Conversions between the public DTOs in `shared` and domain types.
//! The storage layer also serializes through these, so the on-disk shape
//! is the same as the API shape.

pub mod client_mapper;
pub mod agreement_mapper;
pub mod payment_mapper;
