// Joystick-to-differential-drive runtime for a small tracked robot
//
// Reads a two-axis analog stick through an injectable pin interface, mixes
// the axes into per-wheel PWM/direction commands, drives a dual H-bridge,
// and publishes actuation and health telemetry over Zenoh.

pub mod config;
pub mod drive;
pub mod hal;
pub mod messages;
pub mod runtime;
