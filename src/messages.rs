// Telemetry types published by the runtime

use serde::{Deserialize, Serialize};

use crate::drive::{Direction, MotorCommand, WheelDrive};

/// Wire form of a motor's rotation direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MotorState {
    #[default]
    Forward,
    Backward,
}

/// Actuation applied to one motor channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct MotorTelemetry {
    pub duty: u8,
    pub direction: MotorState,
}

// Actuation output from runtime -> observers
// Has default values (stopped, forward) because a faulted cycle still
// publishes something
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct WheelTelemetry {
    pub left: MotorTelemetry,
    pub right: MotorTelemetry,
}

impl From<&MotorCommand> for MotorTelemetry {
    fn from(cmd: &MotorCommand) -> Self {
        Self {
            duty: cmd.duty,
            direction: match cmd.direction {
                Direction::Forward => MotorState::Forward,
                Direction::Backward => MotorState::Backward,
            },
        }
    }
}

impl From<&WheelDrive> for WheelTelemetry {
    fn from(wheels: &WheelDrive) -> Self {
        Self {
            left: MotorTelemetry::from(&wheels.left),
            right: MotorTelemetry::from(&wheels.right),
        }
    }
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    IoFault,
}
