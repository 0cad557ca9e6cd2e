//! Transport Module
//!
//! Byte-level link to the module. The protocol layer only ever hands a
//! transport complete frames and asks it for a fixed number of bytes.
//!
//! ## Implementations
//! - [`SerialTransport`]: a real UART (9600 baud, 8N1)
//! - [`MemoryTransport`]: in-memory source/sink with scripted replies

mod memory;
mod serial;

pub use memory::MemoryTransport;
pub use serial::SerialTransport;

use crate::error::Result;

/// Send/receive capability over a serial link
///
/// Access is serialized: one command in flight at a time, enforced by
/// `&mut self`.
pub trait Transport {
    /// Write all bytes
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Read up to `buf.len()` bytes, returning how many arrived before the
    /// transport's timeouts expired
    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Bytes already received and not yet read
    fn bytes_available(&mut self) -> Result<usize>;

    /// Block until every written byte has left the transmitter
    fn wait_until_write_complete(&mut self) -> Result<()>;

    /// Discard whatever is waiting in the receive buffer
    fn drain(&mut self) -> Result<usize> {
        let available = self.bytes_available()?;
        if available == 0 {
            return Ok(0);
        }

        let mut discard = vec![0u8; available];
        self.read_into(&mut discard)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write(bytes)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read_into(buf)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn wait_until_write_complete(&mut self) -> Result<()> {
        (**self).wait_until_write_complete()
    }

    fn drain(&mut self) -> Result<usize> {
        (**self).drain()
    }
}
