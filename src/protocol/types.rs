//! Protocol enumerations
//!
//! Small integer codes shared by commands and replies. Codes read back
//! from the module never fail to decode: anything unrecognised becomes the
//! `Fail` variant of the relevant enumeration.

use std::fmt;
use std::str::FromStr;

use crate::error::{PlayerError, Result};

// =============================================================================
// Storage Device
// =============================================================================

/// Storage device the module plays from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Device {
    /// USB storage device
    Usb = 0x00,
    /// SD card
    Sd = 0x01,
    /// On-board flash
    Flash = 0x02,
    /// The device could not be determined
    Fail = 0xFE,
    /// No storage device present
    NoDevice = 0xFF,
}

impl Device {
    /// Wire code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Map a reply byte, unknown codes collapse to `Fail`
    pub fn from_reply_code(code: u8) -> Self {
        match code {
            0x00 => Device::Usb,
            0x01 => Device::Sd,
            0x02 => Device::Flash,
            0xFF => Device::NoDevice,
            _ => Device::Fail,
        }
    }

    /// Whether this is a real, selectable storage device
    pub fn is_storage(self) -> bool {
        matches!(self, Device::Usb | Device::Sd | Device::Flash)
    }
}

impl TryFrom<u8> for Device {
    type Error = PlayerError;

    /// Only selectable devices are accepted when building commands
    fn try_from(code: u8) -> Result<Self> {
        match Device::from_reply_code(code) {
            device if device.is_storage() => Ok(device),
            _ => Err(PlayerError::UnknownEnumValue { kind: "device", code }),
        }
    }
}

// =============================================================================
// Play State
// =============================================================================

/// Playback state reported by the module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
    /// The reply was missing, corrupt or carried an unknown code
    Fail,
}

impl PlayState {
    /// Wire code, `None` for `Fail`
    pub fn code(self) -> Option<u8> {
        match self {
            PlayState::Stopped => Some(0),
            PlayState::Playing => Some(1),
            PlayState::Paused => Some(2),
            PlayState::Fail => None,
        }
    }

    /// Map a reply byte, unknown codes collapse to `Fail`
    pub fn from_reply_code(code: u8) -> Self {
        match code {
            0 => PlayState::Stopped,
            1 => PlayState::Playing,
            2 => PlayState::Paused,
            _ => PlayState::Fail,
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayState::Stopped => "stopped",
            PlayState::Playing => "playing",
            PlayState::Paused => "paused",
            PlayState::Fail => "unknown (communication failed)",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Equalizer
// =============================================================================

/// Equalizer presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Equalizer {
    Normal = 0,
    Pop = 1,
    Rock = 2,
    Jazz = 3,
    Classic = 4,
}

impl Equalizer {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Equalizer {
    type Error = PlayerError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Equalizer::Normal),
            1 => Ok(Equalizer::Pop),
            2 => Ok(Equalizer::Rock),
            3 => Ok(Equalizer::Jazz),
            4 => Ok(Equalizer::Classic),
            _ => Err(PlayerError::UnknownEnumValue { kind: "equalizer", code }),
        }
    }
}

// =============================================================================
// Cycle Mode
// =============================================================================

/// Playback cycle modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CycleMode {
    /// Play all sounds in sequence and repeat
    Repeat = 0,
    /// Repeat the current sound
    RepeatOne = 1,
    /// Play the current sound once and stop
    OneOff = 2,
    /// Play random sounds
    Random = 3,
    /// Repeat the current directory
    RepeatDir = 4,
    /// Play random sounds from the current directory
    RandomDir = 5,
    /// Play the current directory in sequence
    SequenceDir = 6,
    /// Play all sounds in sequence and stop
    Sequence = 7,
}

impl CycleMode {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Modes that honour the cycle-times setting
    pub fn is_repeating(self) -> bool {
        matches!(self, CycleMode::Repeat | CycleMode::RepeatOne | CycleMode::RepeatDir)
    }
}

impl TryFrom<u8> for CycleMode {
    type Error = PlayerError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(CycleMode::Repeat),
            1 => Ok(CycleMode::RepeatOne),
            2 => Ok(CycleMode::OneOff),
            3 => Ok(CycleMode::Random),
            4 => Ok(CycleMode::RepeatDir),
            5 => Ok(CycleMode::RandomDir),
            6 => Ok(CycleMode::SequenceDir),
            7 => Ok(CycleMode::Sequence),
            _ => Err(PlayerError::UnknownEnumValue { kind: "cycle mode", code }),
        }
    }
}

// =============================================================================
// Previous Directory Policy
// =============================================================================

/// Which sound to start when stepping back a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PreviousDirPolicy {
    FirstSound = 0,
    LastSound = 1,
}

impl TryFrom<u8> for PreviousDirPolicy {
    type Error = PlayerError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(PreviousDirPolicy::FirstSound),
            1 => Ok(PreviousDirPolicy::LastSound),
            _ => Err(PlayerError::UnknownEnumValue { kind: "previous dir policy", code }),
        }
    }
}

// =============================================================================
// Sound Code
// =============================================================================

/// Two-character sound name used by combination play (e.g. `"01"` for `01.mp3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundCode([u8; 2]);

impl SoundCode {
    pub fn new(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl FromStr for SoundCode {
    type Err = PlayerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.as_bytes() {
            [a, b] if a.is_ascii() && b.is_ascii() => Ok(Self([*a, *b])),
            _ => Err(PlayerError::InvalidSoundCode(s.to_string())),
        }
    }
}

impl TryFrom<&str> for SoundCode {
    type Error = PlayerError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for SoundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}
