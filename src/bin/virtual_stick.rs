// Virtual stick: drive the controller from the keyboard against the stub
//
// WASD deflects the stick, R/F changes the deflection step, Q quits.
// The axes recenter when no key arrives for a short while, like letting
// go of a spring-return stick.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::info;

use trackdrive_runtime::config::{AXIS_CENTER, AXIS_MAX, AXIS_MIN, CHANNEL_X, CHANNEL_Y};
use trackdrive_runtime::drive::DriveController;
use trackdrive_runtime::hal::StubPins;

const STEPS: [i32; 3] = [128, 256, 512]; // deflection from center
const INPUT_TIMEOUT_MS: u64 = 150; // recenter after this much time with no input

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    info!("Controls: WASD=stick, R/F=step, Q=quit");
    info!("Step: LOW");

    let mut controller = DriveController::new(StubPins::new());
    controller.initialize()?;

    enable_raw_mode()?;
    let result = run_stick(&mut controller);
    disable_raw_mode()?;

    result
}

fn run_stick(
    controller: &mut DriveController<StubPins>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut step_idx: usize = 0;

    // Persistent stick position
    let mut x = AXIS_CENTER;
    let mut y = AXIS_CENTER;
    let mut last_input = Instant::now();

    loop {
        // Poll for key with 20ms timeout (50Hz effective rate)
        if event::poll(Duration::from_millis(20))? {
            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                let pressed = kind == KeyEventKind::Press || kind == KeyEventKind::Repeat;

                match code {
                    // Stick deflection - update position and refresh timestamp
                    KeyCode::Char('w') if pressed => {
                        y = AXIS_CENTER + STEPS[step_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('s') if pressed => {
                        y = AXIS_CENTER - STEPS[step_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('a') if pressed => {
                        x = AXIS_CENTER - STEPS[step_idx];
                        last_input = Instant::now();
                    }
                    KeyCode::Char('d') if pressed => {
                        x = AXIS_CENTER + STEPS[step_idx];
                        last_input = Instant::now();
                    }

                    // Step control
                    KeyCode::Char('r') if pressed => {
                        step_idx = (step_idx + 1).min(2);
                        print_step(step_idx);
                    }
                    KeyCode::Char('f') if pressed => {
                        step_idx = step_idx.saturating_sub(1);
                        print_step(step_idx);
                    }

                    // Quit
                    KeyCode::Char('q') | KeyCode::Esc if pressed => break,

                    _ => {}
                }
            }
        }

        // Recenter if no input for INPUT_TIMEOUT_MS
        if last_input.elapsed() > Duration::from_millis(INPUT_TIMEOUT_MS) {
            x = AXIS_CENTER;
            y = AXIS_CENTER;
        }

        let x_raw = x.clamp(AXIS_MIN, AXIS_MAX) as u16;
        let y_raw = y.clamp(AXIS_MIN, AXIS_MAX) as u16;
        controller.pins_mut().set_analog(CHANNEL_X, x_raw);
        controller.pins_mut().set_analog(CHANNEL_Y, y_raw);

        let wheels = controller.cycle()?;
        print!(
            "\rx={:4} y={:4}   left {:?} {:3}   right {:?} {:3}    ",
            x_raw,
            y_raw,
            wheels.left.direction,
            wheels.left.duty,
            wheels.right.direction,
            wheels.right.duty
        );
        io::stdout().flush()?;
    }

    println!();
    Ok(())
}

fn print_step(idx: usize) {
    let label = ["LOW", "MED", "HIGH"][idx];
    info!("Step: {}", label);
}
