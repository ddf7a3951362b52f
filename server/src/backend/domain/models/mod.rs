pub mod client;
pub mod agreement;
pub mod payment;
