//! HTTP handlers for the OAuth 2.0 endpoints.
//!
//! This module provides Axum handlers for the engine's two wire
//! operations.
//!
//! # Available Handlers
//!
//! - [`authorize`] - Authorization endpoint (`GET /authorize`)
//! - [`token`] - Token endpoint (`POST /token`)

pub mod authorize;
pub mod token;

pub use authorize::{AuthenticatedUser, AuthorizeState, authorize_handler};
pub use token::{TokenState, token_handler};
