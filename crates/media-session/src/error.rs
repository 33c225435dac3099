//! Error handling for the session layer

use thiserror::Error;

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Errors surfaced by the session layer.
///
/// Backend-side failures never appear here: they are reported through
/// asynchronous events, symmetric with success responses. These variants
/// cover the synchronous edges only (enqueueing into a stopped session,
/// registry lookups, handshake timeouts).
#[derive(Error, Debug)]
pub enum SessionError {
    /// No session registered under this id
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: u32 },

    /// The session's actor has stopped; its inbox is gone
    #[error("Session {session_id} is no longer accepting messages")]
    SessionStopped { session_id: u32 },

    /// The remote endpoint never delivered its capabilities
    #[error("Capability handshake timed out after {timeout_millis}ms")]
    HandshakeTimeout { timeout_millis: u64 },

    /// The handshake channel was dropped before completing
    #[error("Capability handshake channel closed")]
    HandshakeClosed,
}

/// Failure reported by a client callback implementation. Caught and logged
/// by the session actor, never propagated.
#[derive(Error, Debug)]
#[error("Callback delivery failed: {reason}")]
pub struct CallbackError {
    pub reason: String,
}

impl CallbackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}
