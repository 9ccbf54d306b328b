//! Error types for the Eventide backend
//!
//! One error hierarchy shared by the store, the relay, and the API layer.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! The taxonomy follows the failure semantics of the persistence and relay
//! layers: storage corruption is unrecovered and surfaces from the read path;
//! a missing document is never an error (callers supply a default); domain
//! failures (role mismatch, declined payment) are explicit variants so the
//! API layer can convert them to user-facing notices.

use crate::types::UserRole;
use std::io;
use thiserror::Error;

/// Result type alias for Eventide operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Eventide backend
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (reading or writing a collection file)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Persisted document exists but cannot be parsed
    #[error("corrupt document in collection {collection}: {detail}")]
    Corruption {
        /// Storage key of the unparseable collection
        collection: String,
        /// Parser diagnostic
        detail: String,
    },

    /// Serialization failure on the write path
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A referenced entity does not exist
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Entity kind ("user", "event", "booking", ...)
        kind: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Login attempted with a role other than the account's registered role
    #[error("incorrect role: this account is registered as a {actual:?}, not {requested:?}")]
    RoleMismatch {
        /// Role the caller asked to sign in as
        requested: UserRole,
        /// Role stored on the account
        actual: UserRole,
    },

    /// Credentials rejected by the identity provider
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Identity provider could not be reached
    ///
    /// With demo identity enabled in the backend config, login converts
    /// this into the fixed demo session instead of failing.
    #[error("identity provider unreachable: {0}")]
    ProviderUnreachable(String),

    /// A required field was missing from the request
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The mock payment gateway declined the charge
    #[error("payment declined")]
    PaymentDeclined,

    /// Operation requires an authenticated session
    #[error("no active session")]
    NoSession,

    /// Invalid operation or state
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl Error {
    /// Construct a `NotFound` error
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Construct a `Corruption` error
    pub fn corruption(collection: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::Corruption {
            collection: collection.into(),
            detail: detail.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_corruption() {
        let err = Error::corruption("eventide_users_v2", "expected value at line 1");
        let msg = err.to_string();
        assert!(msg.contains("eventide_users_v2"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn display_not_found() {
        let err = Error::not_found("booking", "bk-42");
        assert_eq!(err.to_string(), "booking not found: bk-42");
    }

    #[test]
    fn display_role_mismatch() {
        let err = Error::RoleMismatch {
            requested: UserRole::Vendor,
            actual: UserRole::Client,
        };
        let msg = err.to_string();
        assert!(msg.contains("Client"));
        assert!(msg.contains("Vendor"));
    }

    #[test]
    fn io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
