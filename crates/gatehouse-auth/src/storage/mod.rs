//! Storage traits for authorization data.
//!
//! The engine owns no state; every mutable entity lives behind one of
//! these traits:
//!
//! - [`ClientStorage`] - registered client applications
//! - [`UserStorage`] - resource owners and credential verification
//! - [`CodeStorage`] - single-use authorization codes
//! - [`TokenStorage`] - issued access/refresh token records
//!
//! # Implementations
//!
//! Implementations live in separate crates:
//!
//! - `gatehouse-db-memory` - DashMap-backed in-memory backend

pub mod client;
pub mod code;
pub mod token;
pub mod user;

pub use client::ClientStorage;
pub use code::CodeStorage;
pub use token::TokenStorage;
pub use user::UserStorage;
