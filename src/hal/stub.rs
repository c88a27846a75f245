// In-memory pin I/O backing the tests and simulation mode
//
// Mirrors the bridge board: a bank of analog input channels and a bank of
// digital pins that power up as inputs. Writes to pins never configured as
// outputs are rejected, which is what lets the tests prove initialization
// covered every pin the control cycle touches.

use super::{HalError, Level, PinIo, PinMode, Result};
use crate::config::{ANALOG_CHANNEL_COUNT, AXIS_CENTER, AXIS_MAX, CHANNEL_X, CHANNEL_Y, DIGITAL_PIN_COUNT};

pub struct StubPins {
    analog: [u16; ANALOG_CHANNEL_COUNT],
    modes: [PinMode; DIGITAL_PIN_COUNT],
    pwm: [u8; DIGITAL_PIN_COUNT],
    levels: [Level; DIGITAL_PIN_COUNT],
}

impl StubPins {
    /// Fresh board state: all pins inputs, all outputs quiet, both axis
    /// channels resting at stick center.
    pub fn new() -> Self {
        Self {
            analog: [AXIS_CENTER as u16; ANALOG_CHANNEL_COUNT],
            modes: [PinMode::Input; DIGITAL_PIN_COUNT],
            pwm: [0; DIGITAL_PIN_COUNT],
            levels: [Level::Low; DIGITAL_PIN_COUNT],
        }
    }

    /// Preset an analog channel's next reading.
    ///
    /// Panics if `channel` is out of range; callers use the channel
    /// constants from `config`.
    pub fn set_analog(&mut self, channel: u8, value: u16) {
        self.analog[channel as usize] = value;
    }

    /// Last PWM duty written to a pin
    pub fn pwm(&self, pin: u8) -> u8 {
        self.pwm[pin as usize]
    }

    /// Last digital level written to a pin
    pub fn digital(&self, pin: u8) -> Level {
        self.levels[pin as usize]
    }

    /// Configured mode of a pin
    pub fn mode(&self, pin: u8) -> PinMode {
        self.modes[pin as usize]
    }

    fn check_output(&self, pin: u8) -> Result<()> {
        match self.modes.get(pin as usize) {
            None => Err(HalError::UnknownChannel { channel: pin }),
            Some(PinMode::Input) => Err(HalError::ChannelModeMismatch { pin }),
            Some(PinMode::Output) => Ok(()),
        }
    }
}

impl Default for StubPins {
    fn default() -> Self {
        Self::new()
    }
}

impl PinIo for StubPins {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        if pin as usize >= DIGITAL_PIN_COUNT {
            return Err(HalError::UnknownChannel { channel: pin });
        }
        self.modes[pin as usize] = mode;
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> Result<u16> {
        self.analog
            .get(channel as usize)
            .copied()
            .ok_or(HalError::UnknownChannel { channel })
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<()> {
        self.check_output(pin)?;
        self.pwm[pin as usize] = duty;
        Ok(())
    }

    fn write_digital(&mut self, pin: u8, level: Level) -> Result<()> {
        self.check_output(pin)?;
        self.levels[pin as usize] = level;
        Ok(())
    }
}

// Sweep periods in control ticks. Different periods for the two axes so
// the stick wanders through the whole forward/backward/left/right envelope
// instead of retracing one diagonal.
const X_SWEEP_TICKS: u32 = 500;
const Y_SWEEP_TICKS: u32 = 300;

/// Stub with animated axes for simulation mode.
///
/// Each axis follows a triangle wave across the full ADC range, so a run
/// without hardware continuously exercises the mixer and the motor writes.
/// Outputs land in the wrapped `StubPins` as usual.
pub struct SweepPins {
    pins: StubPins,
    tick: u32,
}

impl SweepPins {
    pub fn new() -> Self {
        Self {
            pins: StubPins::new(),
            tick: 0,
        }
    }
}

impl Default for SweepPins {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangle wave over 0..=AXIS_MAX with the given period in ticks
fn triangle(tick: u32, period: u32) -> u16 {
    let half = period / 2;
    let phase = tick % period;
    let pos = if phase < half { phase } else { period - phase };
    ((pos * AXIS_MAX as u32) / half) as u16
}

impl PinIo for SweepPins {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        self.pins.configure(pin, mode)
    }

    fn read_analog(&mut self, channel: u8) -> Result<u16> {
        // The cycle samples X first; advance the stick once per sample pair
        if channel == CHANNEL_X {
            self.tick += 1;
        }
        let value = match channel {
            CHANNEL_X => triangle(self.tick, X_SWEEP_TICKS),
            CHANNEL_Y => triangle(self.tick, Y_SWEEP_TICKS),
            _ => return Err(HalError::UnknownChannel { channel }),
        };
        self.pins.set_analog(channel, value);
        self.pins.read_analog(channel)
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<()> {
        self.pins.write_pwm(pin, duty)
    }

    fn write_digital(&mut self, pin: u8, level: Level) -> Result<()> {
        self.pins.write_digital(pin, level)
    }
}
