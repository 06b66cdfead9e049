//! Token issuance and grant dispatch.
//!
//! - [`issuer`] - the only component touching randomness and clocks
//! - [`service`] - grant-type dispatch behind the token endpoint

pub mod issuer;
pub mod service;

pub use issuer::TokenIssuer;
pub use service::TokenService;
