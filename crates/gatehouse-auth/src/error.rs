//! Authorization engine error types.
//!
//! Two disjoint error classes flow through the engine:
//!
//! - **Protocol errors** - expected, client-correctable failures that carry
//!   an OAuth 2.0 error code and a human-readable description. They are
//!   rendered as JSON bodies (or, for the authorize endpoint, inline 400
//!   responses) and are never logged as system failures.
//! - **Server errors** - configuration problems on stored registration
//!   data, storage failures, and anything unexpected. These must never be
//!   converted into a client-facing redirect and surface as 5xx responses.

use std::fmt;

/// Errors that can occur while processing authorization or token requests.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The client is unknown or its credentials are invalid.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The client authenticated but is not allowed to use this flow,
    /// e.g. a confidential client presented the wrong secret.
    #[error("Unauthorized client: {message}")]
    UnauthorizedClient {
        /// Description of why the client is unauthorized.
        message: String,
    },

    /// The authorization code, credentials, or refresh token backing the
    /// grant is invalid, already consumed, or was issued to another client.
    #[error("Invalid grant: {message}")]
    InvalidGrant {
        /// Description of why the grant is invalid.
        message: String,
    },

    /// The request is malformed or references unknown entities.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The authorization server does not support the requested response type.
    #[error("Unsupported response type: {response_type}")]
    UnsupportedResponseType {
        /// The unsupported response type.
        response_type: String,
    },

    /// The authorization server does not support the requested grant type,
    /// or the client type is barred from it.
    #[error("Unsupported grant type: {message}")]
    UnsupportedGrantType {
        /// Description of the rejected grant type.
        message: String,
    },

    /// A stored Application record is corrupt (bad redirect URI shape or
    /// unknown client type). Indicates broken registration data, not a
    /// client mistake.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// A storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `UnauthorizedClient` error.
    #[must_use]
    pub fn unauthorized_client(message: impl Into<String>) -> Self {
        Self::UnauthorizedClient {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidGrant` error.
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::InvalidGrant {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedResponseType` error.
    #[must_use]
    pub fn unsupported_response_type(response_type: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            response_type: response_type.into(),
        }
    }

    /// Creates a new `UnsupportedGrantType` error.
    #[must_use]
    pub fn unsupported_grant_type(message: impl Into<String>) -> Self {
        Self::UnsupportedGrantType {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a protocol error (client-correctable,
    /// rendered as a 400-class response with an OAuth error code).
    #[must_use]
    pub fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidClient { .. }
                | Self::UnauthorizedClient { .. }
                | Self::InvalidGrant { .. }
                | Self::InvalidRequest { .. }
                | Self::UnsupportedResponseType { .. }
                | Self::UnsupportedGrantType { .. }
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::Storage { .. } | Self::Internal { .. }
        )
    }

    /// Returns the OAuth 2.0 error code for this error.
    ///
    /// Server errors map to `server_error`; the token endpoint boundary
    /// collapses them further to `unexpected` so no internal detail leaks.
    #[must_use]
    pub fn oauth_error_code(&self) -> &'static str {
        match self {
            Self::InvalidClient { .. } => "invalid_client",
            Self::UnauthorizedClient { .. } => "unauthorized_client",
            Self::InvalidGrant { .. } => "invalid_grant",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::UnsupportedResponseType { .. } => "unsupported_response_type",
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::Configuration { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                "server_error"
            }
        }
    }

    /// Returns the human-readable description carried by this error.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::InvalidClient { message }
            | Self::UnauthorizedClient { message }
            | Self::InvalidGrant { message }
            | Self::InvalidRequest { message }
            | Self::UnsupportedGrantType { message }
            | Self::Configuration { message }
            | Self::Storage { message }
            | Self::Internal { message } => message.clone(),
            Self::UnsupportedResponseType { response_type } => {
                format!("Response type '{response_type}' is not supported")
            }
        }
    }
}

/// Categories of engine errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Client authentication failures.
    Authentication,
    /// Grant artifact failures (codes, credentials, refresh tokens).
    Grant,
    /// Request validation failures.
    Validation,
    /// Corrupt registration data.
    Configuration,
    /// Storage backend failures.
    Infrastructure,
    /// Internal server errors.
    Internal,
}

impl AuthError {
    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidClient { .. } | Self::UnauthorizedClient { .. } => {
                ErrorCategory::Authentication
            }
            Self::InvalidGrant { .. } => ErrorCategory::Grant,
            Self::InvalidRequest { .. }
            | Self::UnsupportedResponseType { .. }
            | Self::UnsupportedGrantType { .. } => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Storage { .. } => ErrorCategory::Infrastructure,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authentication => write!(f, "authentication"),
            Self::Grant => write!(f, "grant"),
            Self::Validation => write!(f, "validation"),
            Self::Configuration => write!(f, "configuration"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
