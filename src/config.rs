// Loop rate, joystick channels, motor pin map, telemetry topics

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Zenoh topics
pub const TOPIC_RT_WHEELS: &str = "trackdrive/rt/wheels"; // actuation
pub const TOPIC_HEALTH: &str = "trackdrive/state/health"; // health status

// Joystick analog channels
pub const CHANNEL_X: u8 = 0;
pub const CHANNEL_Y: u8 = 1;

// Joystick ADC range (10-bit, spring-return stick rests at center)
pub const AXIS_MIN: i32 = 0;
pub const AXIS_MAX: i32 = 1023;
pub const AXIS_CENTER: i32 = 512;

// PWM duty range
pub const DUTY_MAX: i32 = 255;

// H-bridge pin map: two direction pins plus one PWM enable pin per side
pub const LEFT_IN1: u8 = 9;
pub const LEFT_IN2: u8 = 8;
pub const LEFT_EN: u8 = 10;
pub const RIGHT_IN1: u8 = 7;
pub const RIGHT_IN2: u8 = 6;
pub const RIGHT_EN: u8 = 5;

// Channel counts on the pin-bridge board
pub const DIGITAL_PIN_COUNT: usize = 11;
pub const ANALOG_CHANNEL_COUNT: usize = 2;

// Serial port for the pin-bridge board
pub const BRIDGE_PORT: &str = "/dev/ttyUSB0";
