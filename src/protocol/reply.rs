//! Reply definitions
//!
//! Fixed-length frames read back from the module.

use bytes::Bytes;

/// Offset of the first payload byte (after header, opcode and length echo)
pub const REPLY_PAYLOAD_OFFSET: usize = 3;

/// Shape of a reply, which fixes its length on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// One status byte: `[0xAA, op, 0x01, status, crc]`
    Status,
    /// Big-endian u16: `[0xAA, op, 0x02, hi, lo, crc]`
    Value,
}

impl ReplyKind {
    /// Total reply length including the checksum
    pub fn wire_len(self) -> usize {
        match self {
            ReplyKind::Status => 5,
            ReplyKind::Value => 6,
        }
    }
}

/// A checksum-validated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    bytes: Bytes,
}

impl Reply {
    pub(crate) fn new(bytes: Bytes) -> Self {
        Self { bytes }
    }

    /// Raw reply bytes, checksum included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Opcode echoed by the module
    pub fn opcode(&self) -> Option<u8> {
        self.bytes.get(1).copied()
    }

    /// Payload between the three leading bytes and the checksum
    pub fn payload(&self) -> &[u8] {
        let end = self.bytes.len().saturating_sub(1);
        self.bytes.get(REPLY_PAYLOAD_OFFSET..end).unwrap_or(&[])
    }

    /// Single status byte
    pub fn status(&self) -> Option<u8> {
        self.payload().first().copied()
    }

    /// Big-endian 16-bit value
    pub fn value_u16(&self) -> Option<u16> {
        match self.payload() {
            [hi, lo, ..] => Some(((*hi as u16) << 8) | *lo as u16),
            _ => None,
        }
    }

    /// Trailing checksum byte
    pub fn checksum(&self) -> Option<u8> {
        self.bytes.last().copied()
    }
}
