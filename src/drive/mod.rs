// Joystick-to-differential-drive control
//
// Provides:
// - Integer range remapping (ADC counts -> signed duty)
// - Differential mixing (stick position -> per-wheel command)
// - Drive controller binding the mix to the H-bridge pins

mod controller;
pub mod mixer;
pub mod remap;

pub use controller::{DriveController, DriveError};
pub use mixer::{Direction, MotorCommand, WheelDrive, stick_to_wheels};
pub use remap::{InvalidRange, remap};
