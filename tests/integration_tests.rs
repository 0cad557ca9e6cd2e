//! Integration tests for DYPlayer
//!
//! A scripted module answers a full session through the public API.

use dyplayer::protocol::checksum;
use dyplayer::{
    Config, CycleMode, Device, Equalizer, MemoryTransport, PlayState, Player, PlayerError,
    PreviousDirPolicy, SoundCode,
};

fn with_checksum(bytes: &[u8]) -> Vec<u8> {
    let mut out = bytes.to_vec();
    out.push(checksum(bytes));
    out
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_demo_session() {
    let link = MemoryTransport::new();
    let mut player = Player::new(link.clone());

    player.set_volume(15).unwrap();
    player.set_cycle_mode(CycleMode::Repeat).unwrap();
    player.play().unwrap();

    assert_eq!(
        link.written(),
        vec![
            0xAA, 0x13, 0x01, 0x0F, 0xCD, // volume 15
            0xAA, 0x18, 0x01, 0x00, 0xC3, // repeat all
            0xAA, 0x02, 0x00, 0xAC, // play
        ]
    );
}

#[test]
fn test_browse_session() {
    let link = MemoryTransport::new();
    let config = Config::builder().timeout_ms(50).timeout_char_ms(5).build();
    let mut player = Player::with_config(link.clone(), &config);

    // which device, how many sounds, then play the last one
    link.respond_with(&with_checksum(&[0xAA, 0x0A, 0x01, 0x01]));
    let device = player.get_playing_device().unwrap();
    assert_eq!(device, Device::Sd);

    link.respond_with(&with_checksum(&[0xAA, 0x0C, 0x02, 0x00, 0x2A]));
    let count = player.get_sound_count().unwrap();
    assert_eq!(count, 42);

    player.play_specified(count).unwrap();

    link.respond_with(&with_checksum(&[0xAA, 0x01, 0x01, 0x01]));
    assert_eq!(player.check_play_state().unwrap(), PlayState::Playing);

    link.respond_with(&with_checksum(&[0xAA, 0x0D, 0x02, 0x00, 0x2A]));
    assert_eq!(player.get_playing_sound().unwrap(), 42);

    player.set_eq(Equalizer::Rock).unwrap();
    player.previous_dir(PreviousDirPolicy::FirstSound).unwrap();

    link.respond_with(&with_checksum(&[0xAA, 0x11, 0x02, 0x00, 0x10]));
    assert_eq!(player.get_first_in_dir().unwrap(), 16);

    link.respond_with(&with_checksum(&[0xAA, 0x12, 0x02, 0x00, 0x04]));
    assert_eq!(player.get_sound_count_dir().unwrap(), 4);

    assert_eq!(link.write_count(), 9);
    assert_eq!(link.pending(), 0);
}

#[test]
fn test_playlist_session() {
    let link = MemoryTransport::new();
    let mut player = Player::new(link.clone());

    let playlist: Vec<SoundCode> = ["03", "01", "02"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();

    player.combination_play(&playlist).unwrap();
    player.interlude_device_path(Device::Flash, "/ALERTS/BEEP.MP3").unwrap();
    player.stop_interlude().unwrap();
    player.end_combination_play().unwrap();

    let written = link.written();
    let playlist_frame = with_checksum(&[0xAA, 0x1B, 0x06, b'0', b'3', b'0', b'1', b'0', b'2']);
    assert_eq!(&written[..playlist_frame.len()], playlist_frame.as_slice());
    assert_eq!(&written[written.len() - 8..], &[0xAA, 0x10, 0x00, 0xBA, 0xAA, 0x1C, 0x00, 0xC6]);
}

#[test]
fn test_noisy_link_does_not_abort_session() {
    let link = MemoryTransport::new();
    let mut player = Player::new(link.clone());

    // garbage reply, then silence, then a good one
    link.respond_with(&[0x00, 0x00, 0x00, 0x00, 0x01]);
    assert_eq!(player.check_play_state().unwrap(), PlayState::Fail);

    assert_eq!(player.check_play_state().unwrap(), PlayState::Fail);

    link.respond_with(&with_checksum(&[0xAA, 0x01, 0x01, 0x00]));
    assert_eq!(player.check_play_state().unwrap(), PlayState::Stopped);

    let err = player.get_sound_count().unwrap_err();
    assert!(err.is_transient());
}

// =============================================================================
// Enumeration Tests
// =============================================================================

#[test]
fn test_outbound_enum_codes() {
    assert_eq!(Device::try_from(0x01).unwrap(), Device::Sd);
    assert!(matches!(
        Device::try_from(0xFE),
        Err(PlayerError::UnknownEnumValue { kind: "device", code: 0xFE })
    ));
    assert!(Device::try_from(0xFF).is_err());

    assert_eq!(Equalizer::try_from(4).unwrap(), Equalizer::Classic);
    assert!(Equalizer::try_from(5).is_err());

    assert_eq!(CycleMode::try_from(7).unwrap(), CycleMode::Sequence);
    assert!(CycleMode::try_from(8).is_err());
    assert!(CycleMode::Repeat.is_repeating());
    assert!(CycleMode::RepeatDir.is_repeating());
    assert!(!CycleMode::Random.is_repeating());

    assert_eq!(PreviousDirPolicy::try_from(1).unwrap(), PreviousDirPolicy::LastSound);
    assert!(PreviousDirPolicy::try_from(2).is_err());
}

#[test]
fn test_reply_enum_codes() {
    assert_eq!(PlayState::from_reply_code(0x7F), PlayState::Fail);
    assert_eq!(PlayState::Paused.code(), Some(2));
    assert_eq!(PlayState::Fail.code(), None);

    assert_eq!(Device::from_reply_code(0x02), Device::Flash);
    assert_eq!(Device::from_reply_code(0xFE), Device::Fail);
    assert_eq!(Device::from_reply_code(0x10), Device::Fail);
    assert_eq!(Device::NoDevice.code(), 0xFF);
}

#[test]
fn test_config_defaults_and_builder() {
    let config = Config::default();
    assert_eq!(config.timeout_ms, 1000);
    assert_eq!(config.timeout_char_ms, 100);
    assert_eq!(config.rx_buffer_size, 10);

    let config = Config::builder()
        .port("/dev/ttyAMA0")
        .timeout_ms(250)
        .timeout_char_ms(20)
        .rx_buffer_size(16)
        .build();
    assert_eq!(config.port, "/dev/ttyAMA0");
    assert_eq!(config.first_byte_timeout().as_millis(), 250);
    assert_eq!(config.inter_byte_timeout().as_millis(), 20);
    assert_eq!(config.rx_buffer_size, 16);
}
