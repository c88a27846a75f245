// Pin-level hardware interface
//
// The drive code talks to the board through the PinIo trait, so the same
// control loop runs against real hardware (the serial pin bridge) and the
// in-memory stub used by tests and simulation mode.

pub mod serial;
pub mod stub;

pub use serial::SerialPinIo;
pub use stub::{StubPins, SweepPins};

/// Digital pin direction, set once during initialization.
/// Pins power up as inputs until configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Logic level on a digital pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Error types for pin I/O
#[derive(Debug, thiserror::Error)]
pub enum HalError {
    #[error("pin {pin} is not configured as an output")]
    ChannelModeMismatch { pin: u8 },

    #[error("no such channel: {channel}")]
    UnknownChannel { channel: u8 },

    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid response from bridge: {reason}")]
    InvalidResponse { reason: String },

    #[error("checksum mismatch in bridge response")]
    ChecksumMismatch,

    #[error("timeout waiting for bridge response")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, HalError>;

/// Capability set the control loop needs from the hardware platform.
///
/// Analog input channels and digital/PWM pins are separate namespaces,
/// as on the bridge board. Both write paths reject pins that were not
/// configured as outputs.
pub trait PinIo {
    /// Set a digital pin's direction.
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<()>;

    /// Read one analog channel (10-bit, 0..=1023).
    fn read_analog(&mut self, channel: u8) -> Result<u16>;

    /// Write a PWM duty cycle to an output pin.
    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<()>;

    /// Drive a digital output pin to a level.
    fn write_digital(&mut self, pin: u8, level: Level) -> Result<()>;
}
