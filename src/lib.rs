//! # DYPlayer
//!
//! A driver for DY-SV17F style MP3 player modules attached over UART:
//! - Byte-exact command frames with an additive checksum trailer
//! - Path encoding into the module's 8.8.8+4 directory/file format
//! - Fixed-length reply validation with typed decoding
//! - Injected transports (real serial port or in-memory)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Player                              │
//! │              (one exclusive transport handle)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Command
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Protocol Codec                          │
//! │     (frames, checksums, path encoding, reply decoding)       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bytes
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Serial    │          │   Memory    │
//!   │ (9600 8N1)  │          │  (tests)    │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use dyplayer::{Config, CycleMode, Player, SerialTransport};
//!
//! # fn main() -> dyplayer::Result<()> {
//! let config = Config::builder().port("/dev/ttyUSB0").build();
//! let mut player = Player::with_config(SerialTransport::open(&config)?, &config);
//! player.set_volume(15)?;
//! player.set_cycle_mode(CycleMode::Repeat)?;
//! player.play()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod transport;
pub mod player;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PlayerError, Result};
pub use config::Config;
pub use player::Player;
pub use protocol::{Command, CycleMode, Device, Equalizer, PlayState, PreviousDirPolicy, SoundCode};
pub use transport::{MemoryTransport, SerialTransport, Transport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of DYPlayer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
