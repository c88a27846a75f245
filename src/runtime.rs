// 50 Hz control loop with fault degradation
//
// On an I/O fault the loop stops the motors and keeps polling: a transient
// serial error or an unplugged bridge should not kill the runtime, and the
// motors stay off until the stick is readable again.

use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::config::{TOPIC_HEALTH, TOPIC_RT_WHEELS};
use crate::drive::DriveController;
use crate::hal::PinIo;
use crate::messages::{RuntimeHealth, WheelTelemetry};

pub async fn run<P: PinIo>(
    pins: P,
    hz: u64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up telemetry publishers...");
    let pub_wheels = session.declare_publisher(TOPIC_RT_WHEELS).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut controller = DriveController::new(pins);
    controller.initialize()?;

    let mut tick = interval(Duration::from_millis(1000 / hz));
    let mut health = RuntimeHealth::Ok;

    info!("Runtime started: {}Hz loop", hz);
    info!("Publishing to: {}, {}", TOPIC_RT_WHEELS, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Run one read-mix-write cycle
        let telemetry = match controller.cycle() {
            Ok(wheels) => {
                if health != RuntimeHealth::Ok {
                    info!("Stick I/O recovered");
                }
                health = RuntimeHealth::Ok;
                WheelTelemetry::from(&wheels)
            }
            Err(e) => {
                if health != RuntimeHealth::IoFault {
                    warn!("Cycle failed ({}), stopping motors", e);
                }
                health = RuntimeHealth::IoFault;
                // Best effort while the bus is down
                let _ = controller.stop();
                WheelTelemetry::default()
            }
        };

        // 2. Publish actuation
        let telemetry_json = serde_json::to_string(&telemetry)?;
        pub_wheels.put(telemetry_json).await?;

        // 3. Publish health
        let health_json = serde_json::to_string(&health)?;
        pub_health.put(health_json).await?;
    }
}
