use clap::Parser;
use tracing_subscriber::EnvFilter;

use trackdrive_runtime::config::{BRIDGE_PORT, LOOP_HZ};
use trackdrive_runtime::hal::{SerialPinIo, SweepPins};

/// Joystick differential-drive runtime
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Serial port of the pin-bridge board
    #[arg(long, default_value = BRIDGE_PORT)]
    port: String,

    /// Drive a simulated stick that sweeps the whole deflection envelope
    /// instead of real hardware
    #[arg(long)]
    sim: bool,

    /// Control loop rate in Hz
    #[arg(long, default_value_t = LOOP_HZ, value_parser = clap::value_parser!(u64).range(1..=1000))]
    hz: u64,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init(); // installs the subscriber globally

    let args = Args::parse();

    let result = if args.sim {
        trackdrive_runtime::runtime::run(SweepPins::new(), args.hz).await
    } else {
        match SerialPinIo::open(&args.port) {
            Ok(pins) => trackdrive_runtime::runtime::run(pins, args.hz).await,
            Err(e) => Err(e.into()),
        }
    };

    if let Err(e) = result {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
