//! Error types for the session-multiplexing core

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Main error type for session lifecycle operations
///
/// Failures raised by the transport layer (`AuthenticationFailed`,
/// `Transport`, `UnknownHandle`) are surfaced verbatim. Failures from the
/// query engine during session setup (`DatabaseNotFound`, `Query`) abort the
/// open that triggered them.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Credential validation rejected by the transport layer
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Transport-level handle allocation or release failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// USE directive referenced a database the engine does not know
    #[error("Database not found: {0}")]
    DatabaseNotFound(String),

    /// Statement execution failed in the engine backend
    #[error("Query error: {0}")]
    Query(String),

    /// Transport rejected an operation on a handle it has no session for
    #[error("Unknown session handle: {0}")]
    UnknownHandle(String),

    /// Raised by event listener implementations; the session manager logs
    /// and swallows these, they never abort a session lifecycle operation
    #[error("Listener error: {0}")]
    Listener(String),
}
