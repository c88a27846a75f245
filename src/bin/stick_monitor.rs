// Stick monitor: READ-ONLY check that the joystick bridge is alive
//
// Streams raw axis readings and the wheel commands they would produce.
// No pin is ever configured or written, so the motors cannot move.
//
// Usage: cargo run --bin stick_monitor -- [port]

use std::thread::sleep;
use std::time::Duration;

use trackdrive_runtime::config::{BRIDGE_PORT, CHANNEL_X, CHANNEL_Y};
use trackdrive_runtime::drive::stick_to_wheels;
use trackdrive_runtime::hal::{PinIo, SerialPinIo};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debug".parse().unwrap()),
        )
        .init();

    // Get port from args or use default
    let port = std::env::args()
        .nth(1)
        .unwrap_or_else(|| BRIDGE_PORT.to_string());

    println!("Stick monitor (read-only) on {}", port);
    println!("Press Ctrl+C to exit");
    println!();

    let mut pins = match SerialPinIo::open(&port) {
        Ok(pins) => pins,
        Err(e) => {
            println!("Failed to open serial port: {}", e);
            println!();
            println!("Troubleshooting:");
            println!("  - Check the port path is correct");
            println!("  - Verify the USB cable is connected");
            println!("  - Check the bridge board has power");
            return Err(e.into());
        }
    };

    loop {
        let x = pins.read_analog(CHANNEL_X)?;
        let y = pins.read_analog(CHANNEL_Y)?;
        let wheels = stick_to_wheels(x, y)?;

        println!(
            "x={:4} y={:4}  ->  left {:?} {:3}   right {:?} {:3}",
            x, y, wheels.left.direction, wheels.left.duty, wheels.right.direction,
            wheels.right.duty
        );

        sleep(Duration::from_millis(100));
    }
}
