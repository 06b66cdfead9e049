//! # gatehouse-db-memory
//!
//! In-memory storage backend for the Gatehouse authorization server.
//!
//! Implements the four storage traits from `gatehouse-auth` on top of
//! `DashMap`. The single-use contracts (authorization codes, refresh
//! token rotation) are satisfied with `DashMap::remove_if`, which
//! removes the entry under the shard lock so that two concurrent
//! consumers of the same code or refresh token cannot both win.
//!
//! Intended for tests, demos, and single-instance deployments; nothing
//! survives a restart.

pub mod client;
pub mod code;
pub mod token;
pub mod user;

pub use client::MemoryClientStorage;
pub use code::MemoryCodeStorage;
pub use token::MemoryTokenStorage;
pub use user::MemoryUserStorage;
