//! Domain types for the authorization engine.
//!
//! All four entities are owned by their external stores; the engine never
//! mutates a record in place and holds no long-lived state of its own.

pub mod application;
pub mod code;
pub mod grant;
pub mod token;
pub mod user;

pub use application::{Application, ClientType};
pub use code::AuthorizationCode;
pub use grant::GrantType;
pub use token::AccessToken;
pub use user::User;
