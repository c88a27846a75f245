// Drive controller for the tracked base
//
// Binds the mixer to the H-bridge pins: a one-time initialize() marks
// every motor pin as an output, then each cycle() samples the stick,
// mixes, and rewrites both motor channels.

use tracing::{debug, info, warn};

use super::mixer::{Direction, MotorCommand, WheelDrive, stick_to_wheels};
use super::remap::InvalidRange;
use crate::config::{
    CHANNEL_X, CHANNEL_Y, LEFT_EN, LEFT_IN1, LEFT_IN2, RIGHT_EN, RIGHT_IN1, RIGHT_IN2,
};
use crate::hal::{HalError, Level, PinIo, PinMode};

/// Error types for the drive controller
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error(transparent)]
    Hal(#[from] HalError),

    #[error(transparent)]
    Range(#[from] InvalidRange),
}

/// One H-bridge channel: direction pin pair plus PWM enable pin
struct MotorPins {
    in1: u8,
    in2: u8,
    en: u8,
}

/// Joystick drive controller over an injected pin interface
pub struct DriveController<P: PinIo> {
    pins: P,
    left: MotorPins,
    right: MotorPins,
}

impl<P: PinIo> DriveController<P> {
    pub fn new(pins: P) -> Self {
        Self {
            pins,
            left: MotorPins {
                in1: LEFT_IN1,
                in2: LEFT_IN2,
                en: LEFT_EN,
            },
            right: MotorPins {
                in1: RIGHT_IN1,
                in2: RIGHT_IN2,
                en: RIGHT_EN,
            },
        }
    }

    /// Configure every motor pin as an output and command an immediate stop.
    ///
    /// Must run before the first cycle(): the pin interface rejects writes
    /// to unconfigured pins.
    pub fn initialize(&mut self) -> Result<(), DriveError> {
        info!("Configuring motor pins for output");
        for pin in [
            self.left.in1,
            self.left.in2,
            self.left.en,
            self.right.in1,
            self.right.in2,
            self.right.en,
        ] {
            self.pins.configure(pin, PinMode::Output)?;
        }

        self.apply(&WheelDrive::stop())?;
        info!("Drive controller initialized");
        Ok(())
    }

    /// One control cycle: sample both axes, mix, drive both motors.
    ///
    /// Returns the wheel commands that were applied.
    pub fn cycle(&mut self) -> Result<WheelDrive, DriveError> {
        let x = self.pins.read_analog(CHANNEL_X)?;
        let y = self.pins.read_analog(CHANNEL_Y)?;

        let wheels = stick_to_wheels(x, y)?;
        debug!(
            "Cycle: x={} y={} -> left {:?}/{} right {:?}/{}",
            x, y, wheels.left.direction, wheels.left.duty, wheels.right.direction,
            wheels.right.duty
        );

        self.apply(&wheels)?;
        Ok(wheels)
    }

    /// Zero both duty cycles immediately
    pub fn stop(&mut self) -> Result<(), DriveError> {
        self.apply(&WheelDrive::stop())
    }

    /// The injected pin interface (tests and the virtual stick preset
    /// analog readings through this)
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    fn apply(&mut self, wheels: &WheelDrive) -> Result<(), DriveError> {
        Self::drive_motor(&mut self.pins, &self.left, &wheels.left)?;
        Self::drive_motor(&mut self.pins, &self.right, &wheels.right)?;
        Ok(())
    }

    fn drive_motor(
        pins: &mut P,
        motor: &MotorPins,
        cmd: &MotorCommand,
    ) -> Result<(), DriveError> {
        let (in1, in2) = match cmd.direction {
            Direction::Forward => (Level::Low, Level::High),
            Direction::Backward => (Level::High, Level::Low),
        };

        pins.write_digital(motor.in1, in1)?;
        pins.write_digital(motor.in2, in2)?;
        pins.write_pwm(motor.en, cmd.duty)?;
        Ok(())
    }
}

impl<P: PinIo> Drop for DriveController<P> {
    fn drop(&mut self) {
        // Try to stop motors when the controller goes away (safety measure)
        if let Err(e) = self.stop() {
            warn!("Failed to stop motors on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AXIS_CENTER;
    use crate::hal::StubPins;

    const CENTER: u16 = AXIS_CENTER as u16;

    fn initialized() -> DriveController<StubPins> {
        let mut controller = DriveController::new(StubPins::new());
        controller.initialize().unwrap();
        controller
    }

    fn set_stick(controller: &mut DriveController<StubPins>, x: u16, y: u16) {
        controller.pins_mut().set_analog(CHANNEL_X, x);
        controller.pins_mut().set_analog(CHANNEL_Y, y);
    }

    #[test]
    fn test_neutral_stick_motors_off() {
        let mut controller = initialized();
        set_stick(&mut controller, CENTER, CENTER);

        controller.cycle().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 0);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 0);
    }

    #[test]
    fn test_full_forward_both_motors_forward() {
        let mut controller = initialized();
        set_stick(&mut controller, CENTER, 1023);

        controller.cycle().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 255);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 255);

        // Forward pattern on both direction pairs
        assert_eq!(controller.pins().digital(LEFT_IN1), Level::Low);
        assert_eq!(controller.pins().digital(LEFT_IN2), Level::High);
        assert_eq!(controller.pins().digital(RIGHT_IN1), Level::Low);
        assert_eq!(controller.pins().digital(RIGHT_IN2), Level::High);
    }

    #[test]
    fn test_full_backward_flips_the_direction_pairs() {
        let mut controller = initialized();
        set_stick(&mut controller, CENTER, 0);

        controller.cycle().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 255);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 255);
        assert_eq!(controller.pins().digital(LEFT_IN1), Level::High);
        assert_eq!(controller.pins().digital(LEFT_IN2), Level::Low);
        assert_eq!(controller.pins().digital(RIGHT_IN1), Level::High);
        assert_eq!(controller.pins().digital(RIGHT_IN2), Level::Low);
    }

    #[test]
    fn test_forward_left_left_motor_off_right_forward() {
        let mut controller = initialized();
        set_stick(&mut controller, 0, 1023);

        controller.cycle().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 0);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 255);
        assert_eq!(controller.pins().digital(RIGHT_IN1), Level::Low);
    }

    #[test]
    fn test_forward_right_left_motor_forward_right_off() {
        let mut controller = initialized();
        set_stick(&mut controller, 1023, 1023);

        controller.cycle().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 255);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 0);
        assert_eq!(controller.pins().digital(LEFT_IN1), Level::Low);
    }

    #[test]
    fn test_cycle_without_initialize_is_rejected() {
        let mut controller = DriveController::new(StubPins::new());
        set_stick(&mut controller, CENTER, CENTER);

        assert!(matches!(
            controller.cycle(),
            Err(DriveError::Hal(HalError::ChannelModeMismatch { .. }))
        ));
    }

    #[test]
    fn test_initialize_covers_every_pin_the_cycle_writes() {
        // The stub rejects writes to unconfigured pins, so a clean cycle
        // after initialize() proves setup covered them all, for any
        // combination of sensor input
        let mut controller = initialized();
        for x in [0, 256, CENTER, 768, 1023, 2046] {
            for y in [0, 256, CENTER, 768, 1023, 2046] {
                set_stick(&mut controller, x, y);
                controller.cycle().unwrap();
            }
        }
    }

    #[test]
    fn test_stop_zeroes_both_duties() {
        let mut controller = initialized();
        set_stick(&mut controller, CENTER, 1023);
        controller.cycle().unwrap();

        controller.stop().unwrap();

        assert_eq!(controller.pins().pwm(LEFT_EN), 0);
        assert_eq!(controller.pins().pwm(RIGHT_EN), 0);
    }
}
