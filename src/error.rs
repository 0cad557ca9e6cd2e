//! Error types for DYPlayer
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using PlayerError
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Unified error type for DYPlayer operations
#[derive(Debug, Error)]
pub enum PlayerError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    // -------------------------------------------------------------------------
    // Command Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Payload too large: {len} bytes (max {max})")]
    InvalidPayloadLength { len: usize, max: usize },

    #[error("Empty path: nothing to send")]
    EmptyPath,

    #[error("Invalid sound code {0:?}: expected exactly two ASCII characters")]
    InvalidSoundCode(String),

    // -------------------------------------------------------------------------
    // Reply Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Checksum mismatch: expected 0x{expected:02x}, got 0x{actual:02x}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("Unknown {kind} code: 0x{code:02x}")]
    UnknownEnumValue { kind: &'static str, code: u8 },
}

impl PlayerError {
    /// Whether the failure came from a noisy or silent link.
    ///
    /// The module state is unknown after such a failure and the query is
    /// safe to repeat.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PlayerError::ShortRead { .. } | PlayerError::ChecksumMismatch { .. }
        )
    }
}
