#![deny(static_mut_refs)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hidapi::HidApi;

use hid_sidewinder_protocol::{InputEvent, LedButton, LedState};
use sidewinder_device::{enumerate, DeviceSession, ReadMode};

/// Inspect and drive a SideWinder Strategic Commander.
#[derive(Parser)]
#[command(name = "sidewinder", about = "Strategic Commander HID utility")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected Strategic Commanders
    List,
    /// Stream decoded input events to stdout
    Watch {
        /// Stop after this many seconds (default: run until interrupted)
        #[arg(long)]
        duration: Option<u64>,
    },
    /// Set one LED
    Led {
        /// LED to change
        led: LedArg,
        /// New state
        state: LedStateArg,
    },
    /// Set the blink interval shared by all LEDs
    Blink {
        /// On time in device units
        on_time: u8,
        /// Off time in device units
        off_time: u8,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LedArg {
    Button1,
    Button2,
    Button3,
    Button4,
    Button5,
    Button6,
    Rec,
}

impl From<LedArg> for LedButton {
    fn from(arg: LedArg) -> Self {
        match arg {
            LedArg::Button1 => LedButton::Button1,
            LedArg::Button2 => LedButton::Button2,
            LedArg::Button3 => LedButton::Button3,
            LedArg::Button4 => LedButton::Button4,
            LedArg::Button5 => LedButton::Button5,
            LedArg::Button6 => LedButton::Button6,
            LedArg::Rec => LedButton::Rec,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum LedStateArg {
    Off,
    On,
    Blink,
}

impl From<LedStateArg> for LedState {
    fn from(arg: LedStateArg) -> Self {
        match arg {
            LedStateArg::Off => LedState::Off,
            LedStateArg::On => LedState::On,
            LedStateArg::Blink => LedState::Blink,
        }
    }
}

fn list_devices(api: &HidApi) -> Result<()> {
    let paths = enumerate(api);
    if paths.is_empty() {
        println!("No Strategic Commander found.");
        return Ok(());
    }
    for path in paths {
        println!("{}", path.to_string_lossy());
    }
    Ok(())
}

fn watch(api: &HidApi, duration: Option<u64>) -> Result<()> {
    let mut session = DeviceSession::open(api).context("Failed to open device")?;
    let deadline = duration.map(|secs| Instant::now() + Duration::from_secs(secs));

    println!("Watching for input events (Ctrl-C to stop)...");
    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Ok(());
            }
        }
        // Bounded read so the duration check stays responsive.
        for event in session.poll_events(ReadMode::Timeout(250))? {
            print_event(&event);
        }
    }
}

fn print_event(event: &InputEvent) {
    match event {
        InputEvent::Slider { position } => println!("slider   {position:?}"),
        InputEvent::Axis { axis, value } => println!("axis {axis:?}   {value:+}"),
        InputEvent::Button { button, pressed } => {
            let action = if *pressed { "pressed" } else { "released" };
            println!("button   {button:?} {action}");
        }
    }
}

fn set_led(api: &HidApi, led: LedArg, state: LedStateArg) -> Result<()> {
    let mut session = DeviceSession::open(api).context("Failed to open device")?;
    session
        .set_led(led.into(), state.into())
        .context("Failed to set LED")?;
    Ok(())
}

fn set_blink(api: &HidApi, on_time: u8, off_time: u8) -> Result<()> {
    let mut session = DeviceSession::open(api).context("Failed to open device")?;
    session
        .set_blink_interval(on_time, off_time)
        .context("Failed to set blink interval")?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let api = HidApi::new().context("Failed to initialize hidapi")?;

    match cli.command {
        Commands::List => list_devices(&api),
        Commands::Watch { duration } => watch(&api, duration),
        Commands::Led { led, state } => set_led(&api, led, state),
        Commands::Blink { on_time, off_time } => set_blink(&api, on_time, off_time),
    }
}
