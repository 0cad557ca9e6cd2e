//! In-memory transport
//!
//! Scripted replies are released into the receive buffer when the next
//! frame is written, the way a real module answers a query. Clones share
//! state, so a test can keep a handle while a player owns the transport.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Transport;
use crate::error::Result;

#[derive(Debug, Default)]
struct MemoryState {
    /// Bytes waiting to be read
    rx: VecDeque<u8>,

    /// Replies released one per write
    scripted: VecDeque<Vec<u8>>,

    /// Everything written so far
    tx: Vec<u8>,

    /// Number of write calls
    writes: usize,

    /// Number of completed-write waits
    write_completions: usize,
}

/// In-memory byte source/sink
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes to arrive after the next write
    pub fn respond_with(&self, reply: &[u8]) {
        self.state.lock().scripted.push_back(reply.to_vec());
    }

    /// Make bytes available immediately, as if left over from an earlier exchange
    pub fn inject(&self, bytes: &[u8]) {
        self.state.lock().rx.extend(bytes.iter().copied());
    }

    /// Everything written so far
    pub fn written(&self) -> Vec<u8> {
        self.state.lock().tx.clone()
    }

    /// Take and clear the written bytes
    pub fn take_written(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.lock().tx)
    }

    /// Number of write calls so far
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    /// Number of completed-write waits so far
    pub fn write_completions(&self) -> usize {
        self.state.lock().write_completions
    }

    /// Bytes still waiting to be read
    pub fn pending(&self) -> usize {
        self.state.lock().rx.len()
    }
}

impl Transport for MemoryTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut state = self.state.lock();
        state.tx.extend_from_slice(bytes);
        state.writes += 1;

        if let Some(reply) = state.scripted.pop_front() {
            state.rx.extend(reply);
        }
        Ok(())
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut state = self.state.lock();
        let count = buf.len().min(state.rx.len());
        for (slot, byte) in buf.iter_mut().zip(state.rx.drain(..count)) {
            *slot = byte;
        }
        Ok(count)
    }

    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.state.lock().rx.len())
    }

    fn wait_until_write_complete(&mut self) -> Result<()> {
        self.state.lock().write_completions += 1;
        Ok(())
    }
}
