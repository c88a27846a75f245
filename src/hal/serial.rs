// Serial pin bridge
//
// Fixed-length frame format, both directions:
//   [0xA5, 0x5A, Opcode, Channel, ValueLo, ValueHi, Checksum]
// Checksum is the complement of the byte sum after the header.
// Writes are fire-and-forget; ReadAnalog gets a response frame echoing
// the opcode and channel with the reading in the value bytes.

use std::io::{Read, Write};
use std::time::Duration;

use serialport::{self, SerialPort};
use tracing::debug;

use super::{HalError, Level, PinIo, PinMode, Result};
use crate::config::{ANALOG_CHANNEL_COUNT, DIGITAL_PIN_COUNT};

/// Default serial configuration for the bridge board
pub const DEFAULT_BAUDRATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT_MS: u64 = 100;

/// Frame header bytes
const HEADER: [u8; 2] = [0xA5, 0x5A];

/// Frame length including header and checksum
const FRAME_LEN: usize = 7;

/// Bridge instruction set
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opcode {
    SetMode = 0x01,
    ReadAnalog = 0x02,
    WritePwm = 0x03,
    WriteDigital = 0x04,
}

/// Pin I/O over a USB-serial pin-bridge board.
///
/// Configured pin modes are tracked locally so mode-mismatch writes fail
/// fast without a bus round trip.
pub struct SerialPinIo {
    port: Box<dyn SerialPort>,
    modes: [PinMode; DIGITAL_PIN_COUNT],
}

impl SerialPinIo {
    /// Open a new connection to the bridge board
    pub fn open(port_name: &str) -> Result<Self> {
        Self::open_with_baudrate(port_name, DEFAULT_BAUDRATE)
    }

    /// Open with custom baudrate
    pub fn open_with_baudrate(port_name: &str, baudrate: u32) -> Result<Self> {
        let port = serialport::new(port_name, baudrate)
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .open()?;

        Ok(Self {
            port,
            modes: [PinMode::Input; DIGITAL_PIN_COUNT],
        })
    }

    /// Calculate checksum over the frame body (everything after the header)
    fn checksum(body: &[u8]) -> u8 {
        let sum: u16 = body.iter().map(|&b| b as u16).sum();
        (!sum & 0xFF) as u8
    }

    /// Build a complete frame with header and checksum
    fn build_frame(opcode: Opcode, channel: u8, value: u16) -> [u8; FRAME_LEN] {
        let mut frame = [0u8; FRAME_LEN];
        frame[..2].copy_from_slice(&HEADER);
        frame[2] = opcode as u8;
        frame[3] = channel;
        frame[4] = (value & 0xFF) as u8;
        frame[5] = (value >> 8) as u8;
        frame[6] = Self::checksum(&frame[2..6]);
        frame
    }

    fn send_frame(&mut self, frame: &[u8; FRAME_LEN]) -> Result<()> {
        self.port.write_all(frame)?;
        self.port.flush()?;
        Ok(())
    }

    /// Read one response frame, returning (opcode, channel, value)
    fn read_frame(&mut self) -> Result<(u8, u8, u16)> {
        let mut header = [0u8; 2];
        self.port.read_exact(&mut header).map_err(|e| {
            if e.kind() == std::io::ErrorKind::TimedOut {
                HalError::Timeout
            } else {
                HalError::Io(e)
            }
        })?;

        if header != HEADER {
            return Err(HalError::InvalidResponse {
                reason: format!("invalid header: {:02X?}", header),
            });
        }

        let mut body = [0u8; FRAME_LEN - 2];
        self.port.read_exact(&mut body)?;

        let expected = Self::checksum(&body[..4]);
        if body[4] != expected {
            return Err(HalError::ChecksumMismatch);
        }

        let value = u16::from_le_bytes([body[2], body[3]]);
        Ok((body[0], body[1], value))
    }

    fn check_output(&self, pin: u8) -> Result<()> {
        match self.modes.get(pin as usize) {
            None => Err(HalError::UnknownChannel { channel: pin }),
            Some(PinMode::Input) => Err(HalError::ChannelModeMismatch { pin }),
            Some(PinMode::Output) => Ok(()),
        }
    }
}

impl PinIo for SerialPinIo {
    fn configure(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        if pin as usize >= DIGITAL_PIN_COUNT {
            return Err(HalError::UnknownChannel { channel: pin });
        }

        let value = match mode {
            PinMode::Input => 0,
            PinMode::Output => 1,
        };
        debug!("Configure pin {} as {:?}", pin, mode);
        let frame = Self::build_frame(Opcode::SetMode, pin, value);
        self.send_frame(&frame)?;

        self.modes[pin as usize] = mode;
        Ok(())
    }

    fn read_analog(&mut self, channel: u8) -> Result<u16> {
        if channel as usize >= ANALOG_CHANNEL_COUNT {
            return Err(HalError::UnknownChannel { channel });
        }

        let frame = Self::build_frame(Opcode::ReadAnalog, channel, 0);
        self.send_frame(&frame)?;

        let (opcode, echo_channel, value) = self.read_frame()?;
        if opcode != Opcode::ReadAnalog as u8 || echo_channel != channel {
            return Err(HalError::InvalidResponse {
                reason: format!(
                    "expected analog echo for channel {}, got opcode {} channel {}",
                    channel, opcode, echo_channel
                ),
            });
        }
        Ok(value)
    }

    fn write_pwm(&mut self, pin: u8, duty: u8) -> Result<()> {
        self.check_output(pin)?;
        debug!("Write PWM to pin {}: duty={}", pin, duty);
        let frame = Self::build_frame(Opcode::WritePwm, pin, duty as u16);
        self.send_frame(&frame)
    }

    fn write_digital(&mut self, pin: u8, level: Level) -> Result<()> {
        self.check_output(pin)?;
        let value = match level {
            Level::Low => 0,
            Level::High => 1,
        };
        debug!("Write digital to pin {}: level={:?}", pin, level);
        let frame = Self::build_frame(Opcode::WriteDigital, pin, value);
        self.send_frame(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        // Opcode=ReadAnalog, channel=1, value=0
        let body = [0x02u8, 1, 0, 0];
        // ~(2+1+0+0) = ~3 = 252
        assert_eq!(SerialPinIo::checksum(&body), 252);
    }

    #[test]
    fn test_checksum_wraps_byte_sum() {
        let body = [0xFFu8, 0xFF, 0xFF, 0xFF];
        // sum = 1020, low byte 0xFC, complement 0x03
        assert_eq!(SerialPinIo::checksum(&body), 0x03);
    }

    #[test]
    fn test_build_frame() {
        let frame = SerialPinIo::build_frame(Opcode::WritePwm, 10, 255);
        assert_eq!(frame.len(), FRAME_LEN);
        assert_eq!(frame[0], 0xA5);
        assert_eq!(frame[1], 0x5A);
        assert_eq!(frame[2], 0x03); // WritePwm
        assert_eq!(frame[3], 10); // pin
        assert_eq!(frame[4], 255); // value low byte
        assert_eq!(frame[5], 0); // value high byte
        assert_eq!(frame[6], SerialPinIo::checksum(&frame[2..6]));
    }

    #[test]
    fn test_build_frame_value_little_endian() {
        let frame = SerialPinIo::build_frame(Opcode::ReadAnalog, 1, 0x0201);
        assert_eq!(frame[4], 0x01);
        assert_eq!(frame[5], 0x02);
    }
}
