//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Command Frame
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────┬──────────┐
//! │ 0xAA (1) │  Op (1)  │ Len (1)  │  Payload (Len)   │ CRC (1)  │
//! └──────────┴──────────┴──────────┴──────────────────┴──────────┘
//! ```
//!
//! CRC is the sum of every preceding byte, modulo 256.
//!
//! ### Path Payload
//! ```text
//! ┌──────────┬──────────┬──────────┬───────────────────────────┐
//! │ Len (1)  │ Dev (1)  │ path[0]  │ path[1..] ('.','/' → '*') │
//! └──────────┴──────────┴──────────┴───────────────────────────┘
//! ```
//!
//! ### Reply Frame
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────────────┬──────────┐
//! │ 0xAA (1) │  Op (1)  │ Len (1)  │  1 or 2 bytes    │ CRC (1)  │
//! └──────────┴──────────┴──────────┴──────────────────┴──────────┘
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use super::{Command, Device, Opcode, Reply, ReplyKind, SoundCode};
use crate::error::{PlayerError, Result};
use crate::transport::Transport;

/// First byte of every frame
pub const FRAME_HEADER: u8 = 0xAA;

/// Header, opcode and length bytes
pub const HEADER_SIZE: usize = 3;

/// Largest payload the length byte can describe
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize;

/// Byte the firmware expects in place of '.' and '/' inside paths
pub const PATH_PLACEHOLDER: u8 = b'*';

/// Additive checksum: sum of all bytes modulo 256
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

// =============================================================================
// Frame Building
// =============================================================================

/// One complete outbound frame, header through checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Build `[0xAA, opcode, len] + payload + [checksum]`
    pub fn build(opcode: impl Into<u8>, payload: &[u8]) -> Result<Self> {
        let buf = Self::header(opcode.into(), payload)?;
        Ok(Self::seal(buf))
    }

    /// Build with a precomputed checksum, skipping the summation
    pub fn build_with_checksum(opcode: impl Into<u8>, payload: &[u8], crc: u8) -> Result<Self> {
        let mut buf = Self::header(opcode.into(), payload)?;
        debug_assert_eq!(checksum(&buf), crc, "precomputed checksum is wrong");
        buf.put_u8(crc);
        Ok(Self { bytes: buf.freeze() })
    }

    fn header(opcode: u8, payload: &[u8]) -> Result<BytesMut> {
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(PlayerError::InvalidPayloadLength {
                len: payload.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }

        let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len() + 1);
        buf.put_u8(FRAME_HEADER);
        buf.put_u8(opcode);
        buf.put_u8(payload.len() as u8);
        buf.put_slice(payload);
        Ok(buf)
    }

    /// Append the running checksum over everything in `buf`
    fn seal(mut buf: BytesMut) -> Self {
        let crc = checksum(&buf);
        buf.put_u8(crc);
        Self { bytes: buf.freeze() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn opcode(&self) -> u8 {
        self.bytes[1]
    }

    /// Bytes between the length byte and the checksum
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - 1]
    }

    pub fn checksum(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

// =============================================================================
// Path Encoding
// =============================================================================

/// Encode a slash-separated path into `[len, device, path bytes..]`
///
/// The first byte is copied as-is; every later '.' or '/' becomes
/// [`PATH_PLACEHOLDER`] and everything else is ASCII upper-cased. The
/// length byte counts one extra per '/' except a leading root slash. Slot
/// sizes (8.8.8+4) are left to the firmware.
pub fn encode_path(device: Device, path: &str) -> Result<Vec<u8>> {
    let raw = path.as_bytes();
    let (&first, rest) = raw.split_first().ok_or(PlayerError::EmptyPath)?;

    let slashes = raw.iter().filter(|&&b| b == b'/').count();
    let new_len = raw.len() + slashes - usize::from(first == b'/');
    let len_byte = u8::try_from(new_len + 1).map_err(|_| PlayerError::InvalidPayloadLength {
        len: new_len + 1,
        max: MAX_PAYLOAD_LEN,
    })?;

    let mut payload = Vec::with_capacity(2 + raw.len());
    payload.push(len_byte);
    payload.push(device.code());
    payload.push(first);
    payload.extend(rest.iter().map(|&b| match b {
        b'.' | b'/' => PATH_PLACEHOLDER,
        other => other.to_ascii_uppercase(),
    }));

    Ok(payload)
}

/// Frame a path command: `[0xAA, opcode] + encode_path(..) + [checksum]`
pub fn build_path_frame(opcode: impl Into<u8>, device: Device, path: &str) -> Result<Frame> {
    let payload = encode_path(device, path)?;

    let mut buf = BytesMut::with_capacity(2 + payload.len() + 1);
    buf.put_u8(FRAME_HEADER);
    buf.put_u8(opcode.into());
    buf.put_slice(&payload);
    Ok(Frame::seal(buf))
}

// =============================================================================
// Combination Play
// =============================================================================

/// Frame a combination-play playlist
///
/// Returns `None` for an empty playlist; nothing should be sent.
pub fn build_combination(sounds: &[SoundCode]) -> Result<Option<Frame>> {
    if sounds.is_empty() {
        return Ok(None);
    }

    let payload: Vec<u8> = sounds.iter().flat_map(|s| s.as_bytes().iter().copied()).collect();
    Frame::build(Opcode::CombinationPlay, &payload).map(Some)
}

// =============================================================================
// Command Encoding
// =============================================================================

/// Encode a command to a frame
///
/// `Ok(None)` means the command is a no-op (empty playlist).
pub fn encode_command(command: &Command) -> Result<Option<Frame>> {
    let opcode = command.opcode();

    let frame = match command {
        Command::PlaySpecified { number } | Command::Select { number } => {
            Frame::build(opcode, &number.to_be_bytes())?
        }
        Command::SetCycleTimes { cycles } => Frame::build(opcode, &cycles.to_be_bytes())?,
        Command::PlayDevicePath { device, path } | Command::InterludeDevicePath { device, path } => {
            build_path_frame(opcode, *device, path)?
        }
        Command::InterludeSpecified { device, number } => {
            let [hi, lo] = number.to_be_bytes();
            Frame::build(opcode, &[device.code(), hi, lo])?
        }
        Command::CombinationPlay { sounds } => return build_combination(sounds),
        Command::SetCycleMode { mode } => Frame::build(opcode, &[mode.code()])?,
        Command::SetEq { eq } => Frame::build(opcode, &[eq.code()])?,
        Command::SetVolume { volume } => Frame::build(opcode, &[*volume])?,
        Command::SetPlayingDevice { device } => Frame::build(opcode, &[device.code()])?,
        _ => match opcode.fixed_checksum() {
            Some(crc) => Frame::build_with_checksum(opcode, &[], crc)?,
            None => Frame::build(opcode, &[])?,
        },
    };

    Ok(Some(frame))
}

// =============================================================================
// Reply Decoding
// =============================================================================

/// Validate a fixed-length reply
///
/// Only the first `expected_len` bytes are considered.
pub fn decode_reply(raw: &[u8], expected_len: usize) -> Result<Reply> {
    if expected_len == 0 || raw.len() < expected_len {
        return Err(PlayerError::ShortRead {
            expected: expected_len,
            actual: raw.len(),
        });
    }

    let frame = &raw[..expected_len];
    let (&received, body) = frame.split_last().ok_or(PlayerError::ShortRead {
        expected: expected_len,
        actual: raw.len(),
    })?;

    let computed = checksum(body);
    if computed != received {
        return Err(PlayerError::ChecksumMismatch {
            expected: computed,
            actual: received,
        });
    }

    Ok(Reply::new(Bytes::copy_from_slice(frame)))
}

// =============================================================================
// Transport I/O helpers
// =============================================================================

/// Write a frame to a transport
///
/// Stale inbound bytes are drained first so the next reply read lines up
/// with this command.
pub fn write_frame<T: Transport + ?Sized>(transport: &mut T, frame: &Frame) -> Result<()> {
    let stale = transport.drain()?;
    if stale > 0 {
        tracing::debug!("Discarded {} stale bytes before opcode 0x{:02x}", stale, frame.opcode());
    }

    tracing::trace!("-> {:02x?}", frame.as_bytes());
    transport.write(frame.as_bytes())?;
    transport.wait_until_write_complete()?;
    Ok(())
}

/// Read and validate a reply using a caller-owned scratch buffer
///
/// The scratch buffer grows to fit and is reused across calls.
pub fn read_reply<T: Transport + ?Sized>(
    transport: &mut T,
    scratch: &mut Vec<u8>,
    kind: ReplyKind,
) -> Result<Reply> {
    let expected_len = kind.wire_len();
    if scratch.len() < expected_len {
        scratch.resize(expected_len, 0);
    }

    let buf = &mut scratch[..expected_len];
    buf.fill(0);
    let read = transport.read_into(buf)?;
    tracing::trace!("<- {:02x?}", &buf[..read]);

    decode_reply(&buf[..read], expected_len)
}
