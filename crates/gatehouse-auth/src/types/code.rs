//! Authorization code domain type.

use serde::{Deserialize, Serialize};

/// A single-use exchange token binding a user's consent to a client and
/// scope.
///
/// Created by the authorization endpoint on consent and destroyed by the
/// token endpoint immediately after a successful exchange. A code is
/// valid for exactly one exchange; any subsequent use must fail with
/// `invalid_grant`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCode {
    /// Unique, unguessable code value. Opaque: encodes none of the other
    /// fields.
    pub code: String,

    /// Client the code was issued to.
    pub client_id: String,

    /// Resource owner who consented.
    pub user_id: String,

    /// Granted scope, opaque to the engine.
    pub scope: String,
}
