//! Resource owner domain type.

use serde::{Deserialize, Serialize};

/// The resource owner.
///
/// Opaque to the engine beyond existence and id equality; whatever other
/// identity attributes the identity store exposes ride along untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier.
    pub id: String,

    /// Display name, if the identity store exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl User {
    /// Creates a user with only an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
        }
    }
}
