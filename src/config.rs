//! Configuration for DYPlayer
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

// =============================================================================
// Fixed Line Settings
// =============================================================================

/// Baud rate the module is hard-wired to
pub const BAUD_RATE: u32 = 9600;

/// Data bits per UART character
pub const DATA_BITS: u8 = 8;

/// Stop bits per UART character (no parity)
pub const STOP_BITS: u8 = 1;

/// Main configuration for a player connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Serial Configuration
    // -------------------------------------------------------------------------
    /// Serial device the module is attached to (e.g. `/dev/ttyUSB0`, `COM3`)
    pub port: String,

    // -------------------------------------------------------------------------
    // Timing Configuration
    // -------------------------------------------------------------------------
    /// Maximum wait for the first byte of a reply (milliseconds)
    pub timeout_ms: u64,

    /// Maximum gap between two bytes of a reply (milliseconds)
    pub timeout_char_ms: u64,

    // -------------------------------------------------------------------------
    // Buffer Configuration
    // -------------------------------------------------------------------------
    /// Initial capacity of the reply scratch buffer (in bytes)
    pub rx_buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_string(),
            timeout_ms: 1000,
            timeout_char_ms: 100,
            rx_buffer_size: 10,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// First-byte timeout as a Duration
    pub fn first_byte_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Inter-byte timeout as a Duration
    pub fn inter_byte_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_char_ms)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the serial device path
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.config.port = port.into();
        self
    }

    /// Set the first-byte timeout (in milliseconds)
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config.timeout_ms = ms;
        self
    }

    /// Set the inter-byte timeout (in milliseconds)
    pub fn timeout_char_ms(mut self, ms: u64) -> Self {
        self.config.timeout_char_ms = ms;
        self
    }

    /// Set the initial reply scratch capacity (in bytes)
    pub fn rx_buffer_size(mut self, size: usize) -> Self {
        self.config.rx_buffer_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
