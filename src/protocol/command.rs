//! Command definitions
//!
//! Opcodes and the high-level operations sent to the module.

use super::reply::ReplyKind;
use super::types::{CycleMode, Device, Equalizer, PreviousDirPolicy, SoundCode};

/// Command opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    QueryPlayState = 0x01,
    Play = 0x02,
    Pause = 0x03,
    Stop = 0x04,
    Previous = 0x05,
    Next = 0x06,
    PlaySpecified = 0x07,
    PlayDevicePath = 0x08,
    GetPlayingDevice = 0x0A,
    /// Also carries interlude-by-number when the payload is 3 bytes
    SetPlayingDevice = 0x0B,
    GetSoundCount = 0x0C,
    GetPlayingSound = 0x0D,
    PreviousDirLastSound = 0x0E,
    PreviousDirFirstSound = 0x0F,
    StopInterlude = 0x10,
    GetFirstInDir = 0x11,
    GetSoundCountDir = 0x12,
    SetVolume = 0x13,
    VolumeIncrease = 0x14,
    VolumeDecrease = 0x15,
    InterludeDevicePath = 0x17,
    SetCycleMode = 0x18,
    SetCycleTimes = 0x19,
    SetEq = 0x1A,
    CombinationPlay = 0x1B,
    EndCombinationPlay = 0x1C,
    Select = 0x1F,
}

impl Opcode {
    /// Precomputed checksum of the zero-payload frame `[0xAA, op, 0x00]`
    pub fn fixed_checksum(self) -> Option<u8> {
        let crc = match self {
            Opcode::QueryPlayState => 0xAB,
            Opcode::Play => 0xAC,
            Opcode::Pause => 0xAD,
            Opcode::Stop => 0xAE,
            Opcode::Previous => 0xAF,
            Opcode::Next => 0xB0,
            Opcode::GetPlayingDevice => 0xB4,
            Opcode::GetSoundCount => 0xB6,
            Opcode::GetPlayingSound => 0xB7,
            Opcode::PreviousDirLastSound => 0xB8,
            Opcode::PreviousDirFirstSound => 0xB9,
            Opcode::StopInterlude => 0xBA,
            Opcode::GetFirstInDir => 0xBB,
            Opcode::GetSoundCountDir => 0xBC,
            Opcode::VolumeIncrease => 0xBE,
            Opcode::VolumeDecrease => 0xBF,
            Opcode::EndCombinationPlay => 0xC6,
            _ => return None,
        };
        Some(crc)
    }

    /// Reply the module sends back, if any
    pub fn reply_kind(self) -> Option<ReplyKind> {
        match self {
            Opcode::QueryPlayState | Opcode::GetPlayingDevice => Some(ReplyKind::Status),
            Opcode::GetSoundCount
            | Opcode::GetPlayingSound
            | Opcode::GetFirstInDir
            | Opcode::GetSoundCountDir => Some(ReplyKind::Value),
            _ => None,
        }
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as u8
    }
}

/// A module operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask for the current play state
    QueryPlayState,

    /// Play the selected sound from the start
    Play,

    Pause,

    Stop,

    Previous,

    Next,

    /// Play by number (`1` plays `00001.mp3`)
    PlaySpecified { number: u16 },

    /// Play by device and path (e.g. `/00001.mp3`)
    PlayDevicePath { device: Device, path: String },

    /// Step back a directory and start its first or last sound
    PreviousDir { policy: PreviousDirPolicy },

    /// Interrupt playback with a sound by number, then resume
    InterludeSpecified { device: Device, number: u16 },

    /// Interrupt playback with a sound by path, then resume
    InterludeDevicePath { device: Device, path: String },

    /// Stop the interlude and resume (stops playback if no interlude is active)
    StopInterlude,

    /// Play a playlist of two-character sound names in order
    CombinationPlay { sounds: Vec<SoundCode> },

    EndCombinationPlay,

    SetCycleMode { mode: CycleMode },

    /// Number of cycles for the repeating cycle modes
    SetCycleTimes { cycles: u16 },

    SetEq { eq: Equalizer },

    /// Select a sound without playing it
    Select { number: u16 },

    VolumeIncrease,

    VolumeDecrease,

    /// Volume 0..=30 (module default 20), not range-checked here
    SetVolume { volume: u8 },

    /// Number of the first sound in the current directory
    GetFirstInDir,

    /// Sounds in the current directory, excluding subdirectories
    GetSoundCountDir,

    GetPlayingDevice,

    SetPlayingDevice { device: Device },

    /// Sounds on the current storage device
    GetSoundCount,

    /// Number of the sound currently playing
    GetPlayingSound,
}

impl Command {
    /// Get the opcode
    pub fn opcode(&self) -> Opcode {
        match self {
            Command::QueryPlayState => Opcode::QueryPlayState,
            Command::Play => Opcode::Play,
            Command::Pause => Opcode::Pause,
            Command::Stop => Opcode::Stop,
            Command::Previous => Opcode::Previous,
            Command::Next => Opcode::Next,
            Command::PlaySpecified { .. } => Opcode::PlaySpecified,
            Command::PlayDevicePath { .. } => Opcode::PlayDevicePath,
            Command::PreviousDir { policy: PreviousDirPolicy::LastSound } => {
                Opcode::PreviousDirLastSound
            }
            Command::PreviousDir { policy: PreviousDirPolicy::FirstSound } => {
                Opcode::PreviousDirFirstSound
            }
            Command::InterludeSpecified { .. } => Opcode::SetPlayingDevice,
            Command::InterludeDevicePath { .. } => Opcode::InterludeDevicePath,
            Command::StopInterlude => Opcode::StopInterlude,
            Command::CombinationPlay { .. } => Opcode::CombinationPlay,
            Command::EndCombinationPlay => Opcode::EndCombinationPlay,
            Command::SetCycleMode { .. } => Opcode::SetCycleMode,
            Command::SetCycleTimes { .. } => Opcode::SetCycleTimes,
            Command::SetEq { .. } => Opcode::SetEq,
            Command::Select { .. } => Opcode::Select,
            Command::VolumeIncrease => Opcode::VolumeIncrease,
            Command::VolumeDecrease => Opcode::VolumeDecrease,
            Command::SetVolume { .. } => Opcode::SetVolume,
            Command::GetFirstInDir => Opcode::GetFirstInDir,
            Command::GetSoundCountDir => Opcode::GetSoundCountDir,
            Command::GetPlayingDevice => Opcode::GetPlayingDevice,
            Command::SetPlayingDevice { .. } => Opcode::SetPlayingDevice,
            Command::GetSoundCount => Opcode::GetSoundCount,
            Command::GetPlayingSound => Opcode::GetPlayingSound,
        }
    }

    /// Reply expected after sending this command
    pub fn reply_kind(&self) -> Option<ReplyKind> {
        match self {
            // shares its opcode with set-device, neither replies
            Command::InterludeSpecified { .. } => None,
            _ => self.opcode().reply_kind(),
        }
    }
}
