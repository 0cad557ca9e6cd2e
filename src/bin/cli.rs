//! DYPlayer CLI
//!
//! Command-line interface for driving a module over a serial port.

use clap::{Parser, Subcommand, ValueEnum};
use dyplayer::{
    Config, CycleMode, Device, Equalizer, Player, PreviousDirPolicy, SerialTransport, SoundCode,
};
use tracing_subscriber::{fmt, EnvFilter};

/// DYPlayer CLI
#[derive(Parser, Debug)]
#[command(name = "dyplayer-cli")]
#[command(about = "Control a DY-SV17F style MP3 module over UART")]
#[command(version)]
struct Args {
    /// Serial device
    #[arg(short, long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Wait for the first reply byte (milliseconds)
    #[arg(short, long, default_value = "1000")]
    timeout_ms: u64,

    /// Wait between reply bytes (milliseconds)
    #[arg(short = 'c', long, default_value = "100")]
    timeout_char_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the selected sound from the start
    Play,
    /// Pause playback
    Pause,
    /// Stop playback
    Stop,
    /// Play the previous sound
    Previous,
    /// Play the next sound
    Next,
    /// Play a sound by number
    PlayNumber { number: u16 },
    /// Play a sound by device and path (e.g. /00001.mp3)
    PlayPath {
        #[arg(value_enum)]
        device: DeviceArg,
        path: String,
    },
    /// Step back a directory
    PreviousDir {
        #[arg(value_enum, default_value = "first")]
        start: StartArg,
    },
    /// Interrupt playback with a sound by number
    Interlude {
        #[arg(value_enum)]
        device: DeviceArg,
        number: u16,
    },
    /// Interrupt playback with a sound by path
    InterludePath {
        #[arg(value_enum)]
        device: DeviceArg,
        path: String,
    },
    /// Stop the interlude and resume
    StopInterlude,
    /// Play two-character sound names in order (e.g. 01 02 05)
    Combination { sounds: Vec<String> },
    /// End combination play
    EndCombination,
    /// Print the play state
    State,
    /// Set the cycle mode
    CycleMode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Set the number of cycles for repeating modes
    CycleTimes { cycles: u16 },
    /// Set the equalizer preset
    Equalizer {
        #[arg(value_enum)]
        preset: EqArg,
    },
    /// Select a sound without playing it
    Select { number: u16 },
    /// Increase the volume by one step
    VolumeUp,
    /// Decrease the volume by one step
    VolumeDown,
    /// Set the volume (0-30)
    Volume {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=30))]
        level: u8,
    },
    /// Print the first sound number in the current directory
    FirstInDir,
    /// Print the sound count of the current directory
    CountDir,
    /// Print the storage device in use
    Device,
    /// Switch storage device
    SetDevice {
        #[arg(value_enum)]
        device: DeviceArg,
    },
    /// Print the sound count of the current device
    Count,
    /// Print the number of the sound playing
    Playing,
    /// Volume 15, repeat all, play
    Demo,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DeviceArg {
    Usb,
    Sd,
    Flash,
}

impl From<DeviceArg> for Device {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Usb => Device::Usb,
            DeviceArg::Sd => Device::Sd,
            DeviceArg::Flash => Device::Flash,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StartArg {
    First,
    Last,
}

impl From<StartArg> for PreviousDirPolicy {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::First => PreviousDirPolicy::FirstSound,
            StartArg::Last => PreviousDirPolicy::LastSound,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Repeat,
    RepeatOne,
    OneOff,
    Random,
    RepeatDir,
    RandomDir,
    SequenceDir,
    Sequence,
}

impl From<ModeArg> for CycleMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Repeat => CycleMode::Repeat,
            ModeArg::RepeatOne => CycleMode::RepeatOne,
            ModeArg::OneOff => CycleMode::OneOff,
            ModeArg::Random => CycleMode::Random,
            ModeArg::RepeatDir => CycleMode::RepeatDir,
            ModeArg::RandomDir => CycleMode::RandomDir,
            ModeArg::SequenceDir => CycleMode::SequenceDir,
            ModeArg::Sequence => CycleMode::Sequence,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EqArg {
    Normal,
    Pop,
    Rock,
    Jazz,
    Classic,
}

impl From<EqArg> for Equalizer {
    fn from(arg: EqArg) -> Self {
        match arg {
            EqArg::Normal => Equalizer::Normal,
            EqArg::Pop => Equalizer::Pop,
            EqArg::Rock => Equalizer::Rock,
            EqArg::Jazz => Equalizer::Jazz,
            EqArg::Classic => Equalizer::Classic,
        }
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dyplayer=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let config = Config::builder()
        .port(&args.port)
        .timeout_ms(args.timeout_ms)
        .timeout_char_ms(args.timeout_char_ms)
        .build();

    let transport = match SerialTransport::open(&config) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Failed to open {}: {}", config.port, e);
            std::process::exit(1);
        }
    };

    let mut player = Player::with_config(transport, &config);

    if let Err(e) = run(&mut player, args.command) {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(player: &mut Player<SerialTransport>, command: Commands) -> dyplayer::Result<()> {
    match command {
        Commands::Play => player.play()?,
        Commands::Pause => player.pause()?,
        Commands::Stop => player.stop()?,
        Commands::Previous => player.previous()?,
        Commands::Next => player.next()?,
        Commands::PlayNumber { number } => player.play_specified(number)?,
        Commands::PlayPath { device, path } => player.play_device_path(device.into(), &path)?,
        Commands::PreviousDir { start } => player.previous_dir(start.into())?,
        Commands::Interlude { device, number } => player.interlude_specified(device.into(), number)?,
        Commands::InterludePath { device, path } => {
            player.interlude_device_path(device.into(), &path)?
        }
        Commands::StopInterlude => player.stop_interlude()?,
        Commands::Combination { sounds } => {
            let sounds = sounds
                .iter()
                .map(|s| s.parse::<SoundCode>())
                .collect::<dyplayer::Result<Vec<_>>>()?;
            player.combination_play(&sounds)?
        }
        Commands::EndCombination => player.end_combination_play()?,
        Commands::State => println!("{}", player.check_play_state()?),
        Commands::CycleMode { mode } => player.set_cycle_mode(mode.into())?,
        Commands::CycleTimes { cycles } => player.set_cycle_times(cycles)?,
        Commands::Equalizer { preset } => player.set_eq(preset.into())?,
        Commands::Select { number } => player.select(number)?,
        Commands::VolumeUp => player.volume_increase()?,
        Commands::VolumeDown => player.volume_decrease()?,
        Commands::Volume { level } => player.set_volume(level)?,
        Commands::FirstInDir => println!("{}", player.get_first_in_dir()?),
        Commands::CountDir => println!("{}", player.get_sound_count_dir()?),
        Commands::Device => println!("{:?}", player.get_playing_device()?),
        Commands::SetDevice { device } => player.set_playing_device(device.into())?,
        Commands::Count => println!("{}", player.get_sound_count()?),
        Commands::Playing => println!("{}", player.get_playing_sound()?),
        Commands::Demo => {
            player.set_volume(15)?;
            player.set_cycle_mode(CycleMode::Repeat)?;
            player.play()?;
            tracing::info!("Playing all sounds on repeat");
        }
    }

    Ok(())
}
