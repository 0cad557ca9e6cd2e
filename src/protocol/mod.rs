//! Protocol Module
//!
//! Defines the UART protocol spoken by DY-SV17F style MP3 modules.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────┬──────────┐
//! │ 0xAA (1) │  Op (1)  │ Len (1)  │  Payload (Len)   │ CRC (1)  │
//! └──────────┴──────────┴──────────┴──────────────────┴──────────┘
//! ```
//!
//! ### Commands (selection)
//! - 0x01: QUERY STATE  - reply: status (5 bytes)
//! - 0x02: PLAY         - payload: empty
//! - 0x07: PLAY NUMBER  - payload: number (2, big-endian)
//! - 0x08: PLAY PATH    - payload: path encoding
//! - 0x0C: SOUND COUNT  - reply: u16 (6 bytes)
//! - 0x13: SET VOLUME   - payload: volume (1)
//! - 0x1B: COMBINATION  - payload: 2-byte sound names
//!
//! ### Replies
//! - Status replies are 5 bytes, value replies 6 bytes
//! - The last byte is always the additive checksum

mod command;
mod reply;
mod types;
mod codec;

pub use command::{Command, Opcode};
pub use reply::{Reply, ReplyKind, REPLY_PAYLOAD_OFFSET};
pub use types::{CycleMode, Device, Equalizer, PlayState, PreviousDirPolicy, SoundCode};
pub use codec::{
    build_combination, build_path_frame, checksum, decode_reply, encode_command, encode_path,
    read_reply, write_frame, Frame, FRAME_HEADER, HEADER_SIZE, MAX_PAYLOAD_LEN, PATH_PLACEHOLDER,
};
