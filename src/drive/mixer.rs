// Differential mixing for a two-track drive
//
// Converts a raw joystick sample (X steering, Y throttle) into per-wheel
// PWM duty and rotation direction. Steering pulls the inside wheel's duty
// toward zero while the outside wheel keeps the throttle magnitude; the
// inside wheel is never reversed.

use super::remap::{InvalidRange, remap};
use crate::config::{AXIS_MAX, AXIS_MIN, DUTY_MAX};

/// Commanded rotation direction of one motor.
///
/// Wire encoding on the direction pin pair: Forward drives (in1 low,
/// in2 high), Backward the opposite. Neutral throttle keeps the Forward
/// pattern with zero duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Duty and direction for one motor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorCommand {
    pub direction: Direction,
    pub duty: u8,
}

/// Per-cycle command pair for the two tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelDrive {
    pub left: MotorCommand,
    pub right: MotorCommand,
}

impl WheelDrive {
    /// Both wheels at zero duty
    pub fn stop() -> Self {
        Self::default()
    }
}

/// Mix a joystick sample into wheel commands using the configured axis
/// and duty ranges.
pub fn stick_to_wheels(x: u16, y: u16) -> Result<WheelDrive, InvalidRange> {
    stick_to_wheels_with_params(x, y, AXIS_MIN, AXIS_MAX, DUTY_MAX)
}

/// Mix with custom ranges.
///
/// `y` maps to a signed throttle in -duty_max..=duty_max, `x` to a signed
/// steering bias in the same range. Both wheels start at the throttle
/// magnitude; a negative bias (left) reduces the left wheel, a positive
/// bias (right) reduces the right wheel. Final duties clamp to
/// 0..=duty_max; the remapped values themselves are never clamped, so
/// out-of-range samples extrapolate before the clamp catches them.
/// `duty_max` must be in 0..=255.
pub fn stick_to_wheels_with_params(
    x: u16,
    y: u16,
    axis_low: i32,
    axis_high: i32,
    duty_max: i32,
) -> Result<WheelDrive, InvalidRange> {
    let throttle = remap(i32::from(y), axis_low, axis_high, -duty_max, duty_max)?;
    let steer = remap(i32::from(x), axis_low, axis_high, -duty_max, duty_max)?;

    let direction = if throttle >= 0 {
        Direction::Forward
    } else {
        Direction::Backward
    };

    let mut left = throttle.abs();
    let mut right = throttle.abs();
    if steer < 0 {
        left += steer;
    } else {
        right -= steer;
    }

    Ok(WheelDrive {
        left: MotorCommand {
            direction,
            duty: clamp_duty(left, duty_max),
        },
        right: MotorCommand {
            direction,
            duty: clamp_duty(right, duty_max),
        },
    })
}

fn clamp_duty(value: i32, duty_max: i32) -> u8 {
    value.clamp(0, duty_max) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AXIS_CENTER;

    const CENTER: u16 = AXIS_CENTER as u16;

    #[test]
    fn test_neutral_stick_stops_both_wheels() {
        let wheels = stick_to_wheels(CENTER, CENTER).unwrap();
        assert_eq!(wheels.left.duty, 0);
        assert_eq!(wheels.right.duty, 0);
    }

    #[test]
    fn test_full_forward_drives_both_wheels_forward() {
        let wheels = stick_to_wheels(CENTER, 1023).unwrap();
        assert_eq!(wheels.left.duty, 255);
        assert_eq!(wheels.right.duty, 255);
        assert_eq!(wheels.left.direction, Direction::Forward);
        assert_eq!(wheels.right.direction, Direction::Forward);
    }

    #[test]
    fn test_full_backward_drives_both_wheels_backward() {
        let wheels = stick_to_wheels(CENTER, 0).unwrap();
        assert_eq!(wheels.left.duty, 255);
        assert_eq!(wheels.right.duty, 255);
        assert_eq!(wheels.left.direction, Direction::Backward);
        assert_eq!(wheels.right.direction, Direction::Backward);
    }

    #[test]
    fn test_full_left_zeroes_the_left_wheel() {
        let wheels = stick_to_wheels(0, 1023).unwrap();
        assert_eq!(wheels.left.duty, 0);
        assert_eq!(wheels.right.duty, 255);
        assert_eq!(wheels.right.direction, Direction::Forward);
    }

    #[test]
    fn test_full_right_zeroes_the_right_wheel() {
        let wheels = stick_to_wheels(1023, 1023).unwrap();
        assert_eq!(wheels.left.duty, 255);
        assert_eq!(wheels.left.direction, Direction::Forward);
        assert_eq!(wheels.right.duty, 0);
    }

    #[test]
    fn test_partial_right_reduces_only_the_right_wheel() {
        // x=768 remaps to a steering bias of 127
        let wheels = stick_to_wheels(768, 1023).unwrap();
        assert_eq!(wheels.left.duty, 255);
        assert_eq!(wheels.right.duty, 128);
    }

    #[test]
    fn test_steering_applies_while_reversing() {
        let wheels = stick_to_wheels(0, 0).unwrap();
        assert_eq!(wheels.left.duty, 0);
        assert_eq!(wheels.right.duty, 255);
        assert_eq!(wheels.right.direction, Direction::Backward);
    }

    #[test]
    fn test_steering_alone_commands_no_motion() {
        // The inside wheel is reduced, never reversed, so a centered
        // throttle cannot produce a point turn
        let wheels = stick_to_wheels(1023, CENTER).unwrap();
        assert_eq!(wheels.left.duty, 0);
        assert_eq!(wheels.right.duty, 0);
    }

    #[test]
    fn test_out_of_range_sample_clamps_at_full_duty() {
        // Readings past the nominal axis range extrapolate linearly and
        // the final clamp caps the duty
        let wheels = stick_to_wheels(CENTER, 2046).unwrap();
        assert_eq!(wheels.left.duty, 255);
        assert_eq!(wheels.right.duty, 255);
        assert_eq!(wheels.left.direction, Direction::Forward);
    }

    #[test]
    fn test_zero_width_axis_range_is_rejected() {
        assert!(stick_to_wheels_with_params(512, 512, 512, 512, 255).is_err());
    }
}
