//! Transport Tests
//!
//! Tests for the in-memory transport and the transport I/O helpers.

use dyplayer::protocol::{read_reply, write_frame, Frame, Opcode, ReplyKind};
use dyplayer::{MemoryTransport, PlayerError, Transport};

// =============================================================================
// MemoryTransport Tests
// =============================================================================

#[test]
fn test_scripted_reply_released_on_write() {
    let mut link = MemoryTransport::new();
    link.respond_with(&[1, 2, 3]);

    assert_eq!(link.bytes_available().unwrap(), 0);
    link.write(&[0xAA]).unwrap();
    assert_eq!(link.bytes_available().unwrap(), 3);
}

#[test]
fn test_scripted_replies_in_order() {
    let mut link = MemoryTransport::new();
    link.respond_with(&[1]);
    link.respond_with(&[2, 2]);

    let mut buf = [0u8; 4];

    link.write(&[0xAA]).unwrap();
    assert_eq!(link.read_into(&mut buf).unwrap(), 1);
    assert_eq!(buf[0], 1);

    link.write(&[0xAA]).unwrap();
    assert_eq!(link.read_into(&mut buf).unwrap(), 2);
    assert_eq!(&buf[..2], &[2, 2]);

    // script exhausted
    link.write(&[0xAA]).unwrap();
    assert_eq!(link.read_into(&mut buf).unwrap(), 0);
}

#[test]
fn test_partial_read() {
    let mut link = MemoryTransport::new();
    link.inject(&[9, 8, 7, 6, 5]);

    let mut buf = [0u8; 2];
    assert_eq!(link.read_into(&mut buf).unwrap(), 2);
    assert_eq!(buf, [9, 8]);
    assert_eq!(link.pending(), 3);
}

#[test]
fn test_default_drain() {
    let mut link = MemoryTransport::new();
    assert_eq!(link.drain().unwrap(), 0);

    link.inject(&[1, 2, 3, 4]);
    assert_eq!(link.drain().unwrap(), 4);
    assert_eq!(link.pending(), 0);
}

#[test]
fn test_clones_share_state() {
    let handle = MemoryTransport::new();
    let mut owned = handle.clone();

    owned.write(&[0x01, 0x02]).unwrap();
    assert_eq!(handle.written(), vec![0x01, 0x02]);
    assert_eq!(handle.take_written(), vec![0x01, 0x02]);
    assert!(owned.written().is_empty());
}

#[test]
fn test_boxed_transport() {
    let handle = MemoryTransport::new();
    let mut boxed: Box<dyn Transport> = Box::new(handle.clone());

    handle.inject(&[0xFF]);
    assert_eq!(boxed.bytes_available().unwrap(), 1);
    assert_eq!(boxed.drain().unwrap(), 1);

    boxed.write(&[0x10]).unwrap();
    boxed.wait_until_write_complete().unwrap();
    assert_eq!(handle.written(), vec![0x10]);
    assert_eq!(handle.write_completions(), 1);
}

// =============================================================================
// I/O Helper Tests
// =============================================================================

#[test]
fn test_write_frame_drains_then_writes() {
    let mut link = MemoryTransport::new();
    link.inject(&[0xDE, 0xAD]);

    let frame = Frame::build(Opcode::Play, &[]).unwrap();
    write_frame(&mut link, &frame).unwrap();

    assert_eq!(link.pending(), 0);
    assert_eq!(link.written(), vec![0xAA, 0x02, 0x00, 0xAC]);
    assert_eq!(link.write_completions(), 1);
}

#[test]
fn test_read_reply_reuses_scratch() {
    let mut link = MemoryTransport::new();
    let mut scratch = Vec::new();

    link.inject(&[0xAA, 0x01, 0x01, 0x00, 0xAC]);
    let reply = read_reply(&mut link, &mut scratch, ReplyKind::Status).unwrap();
    assert_eq!(reply.status(), Some(0x00));
    assert_eq!(scratch.len(), 5);

    link.inject(&[0xAA, 0x0C, 0x02, 0x00, 0x03, 0xBB]);
    let reply = read_reply(&mut link, &mut scratch, ReplyKind::Value).unwrap();
    assert_eq!(reply.value_u16(), Some(3));
    assert_eq!(scratch.len(), 6);
}

#[test]
fn test_read_reply_does_not_see_previous_contents() {
    let mut link = MemoryTransport::new();
    let mut scratch = vec![0xAA, 0x01, 0x01, 0x00, 0xAC, 0x00];

    // the stale scratch holds a valid reply; only 2 fresh bytes arrive
    link.inject(&[0xAA, 0x01]);
    let result = read_reply(&mut link, &mut scratch, ReplyKind::Status);
    assert!(matches!(
        result,
        Err(PlayerError::ShortRead { expected: 5, actual: 2 })
    ));
}

// =============================================================================
// SerialTransport Tests (pseudo-terminal pair)
// =============================================================================

#[cfg(unix)]
mod serial {
    use std::io::{Read, Write};
    use std::thread;
    use std::time::{Duration, Instant};

    use dyplayer::{Config, SerialTransport, Transport};
    use serialport::{SerialPort, TTYPort};

    const FIRST_BYTE_MS: u64 = 300;
    const INTER_BYTE_MS: u64 = 50;

    /// Returns the module side of the link and a transport on the other end
    fn setup_pair() -> (TTYPort, SerialTransport) {
        let (module, host) = TTYPort::pair().expect("open pty pair");
        let config = Config::builder()
            .timeout_ms(FIRST_BYTE_MS)
            .timeout_char_ms(INTER_BYTE_MS)
            .build();
        (module, SerialTransport::from_port(Box::new(host), &config))
    }

    #[test]
    fn test_partial_reply_returns_bytes_received() {
        let (mut module, mut transport) = setup_pair();

        module.write_all(&[0xAA, 0x0C, 0x02]).unwrap();

        let mut buf = [0u8; 6];
        let read = transport.read_into(&mut buf).unwrap();
        assert_eq!(read, 3);
        assert_eq!(&buf[..3], &[0xAA, 0x0C, 0x02]);
    }

    #[test]
    fn test_idle_line_waits_first_byte_timeout() {
        let (_module, mut transport) = setup_pair();

        let mut buf = [0u8; 5];
        let start = Instant::now();
        let read = transport.read_into(&mut buf).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(read, 0);
        assert!(elapsed >= Duration::from_millis(FIRST_BYTE_MS - 50), "{:?}", elapsed);
        assert!(elapsed < Duration::from_secs(5), "{:?}", elapsed);
    }

    #[test]
    fn test_drain_discards_waiting_bytes() {
        let (mut module, mut transport) = setup_pair();

        module.write_all(&[0x01, 0x02, 0x03]).unwrap();
        thread::sleep(Duration::from_millis(100));

        assert_eq!(transport.bytes_available().unwrap(), 3);
        assert_eq!(transport.drain().unwrap(), 3);
        assert_eq!(transport.bytes_available().unwrap(), 0);
    }

    #[test]
    fn test_write_reaches_module() {
        let (mut module, mut transport) = setup_pair();

        let frame = [0xAA, 0x02, 0x00, 0xAC];
        transport.write(&frame).unwrap();
        transport.wait_until_write_complete().unwrap();

        module.set_timeout(Duration::from_secs(1)).unwrap();
        let mut received = [0u8; 4];
        module.read_exact(&mut received).unwrap();
        assert_eq!(received, frame);
    }
}
