//! Error handling for configuration translation and wire framing

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while encoding, decoding or translating session
/// configuration objects.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Wire payload could not be encoded
    #[error("Failed to encode wire payload: {0}")]
    WireEncode(String),

    /// Wire payload could not be decoded
    #[error("Failed to decode wire payload: {0}")]
    WireDecode(String),

    /// A remote address string did not parse as `ip:port`
    #[error("Invalid remote address: {address}")]
    InvalidAddress { address: String },
}
