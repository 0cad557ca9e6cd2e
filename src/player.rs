//! Player Module
//!
//! The driver facade: one exclusive transport, one command at a time.
//!
//! ## Exchange
//! 1. Drain stale inbound bytes
//! 2. Write the frame and wait for the transmitter to finish
//! 3. For queries, read the fixed-length reply into the scratch buffer
//! 4. Decode it; enum queries fall back to their `Fail` variant

use crate::config::Config;
use crate::error::{PlayerError, Result};
use crate::protocol::{
    encode_command, read_reply, write_frame, Command, CycleMode, Device, Equalizer, PlayState,
    PreviousDirPolicy, Reply, ReplyKind, SoundCode,
};
use crate::transport::Transport;

/// Driver for a DY-SV17F style module
///
/// ## Failure Semantics
/// - Transport I/O errors always propagate
/// - Enum queries (`check_play_state`, `get_playing_device`) turn a short
///   or corrupt reply into `Fail`
/// - Numeric queries return `ShortRead` / `ChecksumMismatch` so callers can
///   tell a real zero from an unknown value
pub struct Player<T: Transport> {
    /// Exclusive handle to the link
    transport: T,

    /// Reply scratch space, reused across queries
    scratch: Vec<u8>,
}

impl<T: Transport> Player<T> {
    /// Create a player with the default scratch capacity
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, &Config::default())
    }

    /// Create a player sized from a config
    pub fn with_config(transport: T, config: &Config) -> Self {
        Self {
            transport,
            scratch: vec![0u8; config.rx_buffer_size],
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give back the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    // =========================================================================
    // Raw Exchange
    // =========================================================================

    /// Send a command and, if it has one, read its reply
    ///
    /// An empty playlist sends nothing and returns `Ok(None)`.
    pub fn execute(&mut self, command: &Command) -> Result<Option<Reply>> {
        let frame = match encode_command(command)? {
            Some(frame) => frame,
            None => {
                tracing::debug!("Nothing to send for {:?}", command.opcode());
                return Ok(None);
            }
        };

        write_frame(&mut self.transport, &frame)?;

        match command.reply_kind() {
            Some(kind) => read_reply(&mut self.transport, &mut self.scratch, kind).map(Some),
            None => Ok(None),
        }
    }

    fn send(&mut self, command: Command) -> Result<()> {
        self.execute(&command).map(|_| ())
    }

    fn query_status(&mut self, command: Command) -> Result<u8> {
        let reply = self.query(command, ReplyKind::Status)?;
        reply.status().ok_or(PlayerError::ShortRead {
            expected: ReplyKind::Status.wire_len(),
            actual: reply.len(),
        })
    }

    fn query_value(&mut self, command: Command) -> Result<u16> {
        let reply = self.query(command, ReplyKind::Value)?;
        reply.value_u16().ok_or(PlayerError::ShortRead {
            expected: ReplyKind::Value.wire_len(),
            actual: reply.len(),
        })
    }

    fn query(&mut self, command: Command, kind: ReplyKind) -> Result<Reply> {
        debug_assert_eq!(command.reply_kind(), Some(kind));
        match self.execute(&command)? {
            Some(reply) => Ok(reply),
            None => Err(PlayerError::ShortRead {
                expected: kind.wire_len(),
                actual: 0,
            }),
        }
    }

    // =========================================================================
    // Playback Control
    // =========================================================================

    /// Play the selected sound from the start
    pub fn play(&mut self) -> Result<()> {
        self.send(Command::Play)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.send(Command::Pause)
    }

    pub fn stop(&mut self) -> Result<()> {
        self.send(Command::Stop)
    }

    pub fn previous(&mut self) -> Result<()> {
        self.send(Command::Previous)
    }

    pub fn next(&mut self) -> Result<()> {
        self.send(Command::Next)
    }

    /// Play a sound by number (`1` plays `00001.mp3`)
    pub fn play_specified(&mut self, number: u16) -> Result<()> {
        self.send(Command::PlaySpecified { number })
    }

    /// Play a sound by device and path, e.g. `/00001.mp3`
    ///
    /// Paths hold up to two 8-byte directories and an 8-byte file name
    /// with a 4-byte extension. An empty path fails with `EmptyPath`.
    pub fn play_device_path(&mut self, device: Device, path: &str) -> Result<()> {
        self.send(Command::PlayDevicePath {
            device,
            path: path.to_string(),
        })
    }

    /// Select the previous directory and start its first or last sound
    pub fn previous_dir(&mut self, policy: PreviousDirPolicy) -> Result<()> {
        self.send(Command::PreviousDir { policy })
    }

    /// Select a sound without playing it
    pub fn select(&mut self, number: u16) -> Result<()> {
        self.send(Command::Select { number })
    }

    // =========================================================================
    // Interludes & Playlists
    // =========================================================================

    /// Interrupt playback with a sound by number, then resume
    pub fn interlude_specified(&mut self, device: Device, number: u16) -> Result<()> {
        self.send(Command::InterludeSpecified { device, number })
    }

    /// Interrupt playback with a sound by path, then resume
    pub fn interlude_device_path(&mut self, device: Device, path: &str) -> Result<()> {
        self.send(Command::InterludeDevicePath {
            device,
            path: path.to_string(),
        })
    }

    /// Stop the interlude and resume; stops playback if no interlude is active
    pub fn stop_interlude(&mut self) -> Result<()> {
        self.send(Command::StopInterlude)
    }

    /// Play two-character sound names in order; an empty list sends nothing
    pub fn combination_play(&mut self, sounds: &[SoundCode]) -> Result<()> {
        self.send(Command::CombinationPlay {
            sounds: sounds.to_vec(),
        })
    }

    pub fn end_combination_play(&mut self) -> Result<()> {
        self.send(Command::EndCombinationPlay)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn set_cycle_mode(&mut self, mode: CycleMode) -> Result<()> {
        self.send(Command::SetCycleMode { mode })
    }

    /// Cycles to play in the repeating modes (0, 1 and 4)
    pub fn set_cycle_times(&mut self, cycles: u16) -> Result<()> {
        self.send(Command::SetCycleTimes { cycles })
    }

    pub fn set_eq(&mut self, eq: Equalizer) -> Result<()> {
        self.send(Command::SetEq { eq })
    }

    /// Volume between 0 and 30, default 20 if never set
    pub fn set_volume(&mut self, volume: u8) -> Result<()> {
        self.send(Command::SetVolume { volume })
    }

    pub fn volume_increase(&mut self) -> Result<()> {
        self.send(Command::VolumeIncrease)
    }

    pub fn volume_decrease(&mut self) -> Result<()> {
        self.send(Command::VolumeDecrease)
    }

    pub fn set_playing_device(&mut self, device: Device) -> Result<()> {
        self.send(Command::SetPlayingDevice { device })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Current play state, `Fail` if the reply was unusable
    pub fn check_play_state(&mut self) -> Result<PlayState> {
        match self.query_status(Command::QueryPlayState) {
            Ok(code) => {
                let state = PlayState::from_reply_code(code);
                if state == PlayState::Fail {
                    tracing::warn!("Unknown play state code 0x{:02x}", code);
                }
                Ok(state)
            }
            Err(e) if e.is_transient() => {
                tracing::warn!("Play state query failed: {}", e);
                Ok(PlayState::Fail)
            }
            Err(e) => Err(e),
        }
    }

    /// Storage device in use, `Fail` if the reply was unusable
    pub fn get_playing_device(&mut self) -> Result<Device> {
        match self.query_status(Command::GetPlayingDevice) {
            Ok(code) => {
                let device = Device::from_reply_code(code);
                if device == Device::Fail {
                    tracing::warn!("Unknown device code 0x{:02x}", code);
                }
                Ok(device)
            }
            Err(e) if e.is_transient() => {
                tracing::warn!("Device query failed: {}", e);
                Ok(Device::Fail)
            }
            Err(e) => Err(e),
        }
    }

    /// Number of sounds on the current device
    pub fn get_sound_count(&mut self) -> Result<u16> {
        self.query_value(Command::GetSoundCount)
    }

    /// Number of the sound currently playing
    pub fn get_playing_sound(&mut self) -> Result<u16> {
        self.query_value(Command::GetPlayingSound)
    }

    /// Number of the first sound in the current directory
    pub fn get_first_in_dir(&mut self) -> Result<u16> {
        self.query_value(Command::GetFirstInDir)
    }

    /// Sounds in the current directory, excluding subdirectories
    pub fn get_sound_count_dir(&mut self) -> Result<u16> {
        self.query_value(Command::GetSoundCountDir)
    }
}
