//! HAL constants.
//!
//! Default values for the controller configuration and the limits of the
//! Roboclaw packet-serial protocol.

/// Name of the built-in software driver.
pub const SIMULATION_DRIVER: &str = "simulation";

/// Lowest valid packet-serial unit address.
pub const MIN_UNIT_ADDRESS: u8 = 0x80;

/// Highest valid packet-serial unit address.
pub const MAX_UNIT_ADDRESS: u8 = 0x87;

/// Default serial device.
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyO3";

/// Default serial baud rate.
pub const DEFAULT_BAUD_RATE: u32 = 38_400;

/// Default GPIO value file driving the units' reset line.
pub const DEFAULT_RESET_GPIO_PATH: &str = "/sys/class/gpio/gpio136/value";

/// Default GPIO value file of the activity LED.
pub const DEFAULT_ACTIVITY_LED_PATH: &str = "/sys/class/gpio/gpio139/value";

/// Default GPIO value file of the battery alarm LED.
pub const DEFAULT_BATTERY_LED_PATH: &str = "/sys/class/gpio/gpio137/value";

/// Default time the units need after a hardware reset [ms].
pub const DEFAULT_RESET_DELAY_MS: u64 = 260;

/// Default address of the front unit.
pub const DEFAULT_FRONT_ADDRESS: u8 = 128;

/// Default address of the rear unit.
pub const DEFAULT_REAR_ADDRESS: u8 = 129;

/// Default maximum encoder speed [pulses/s].
pub const DEFAULT_MAX_QPPS: u32 = 13_800;

/// Default PID proportional constant.
pub const DEFAULT_P_CONST: u32 = 65_536;

/// Default PID integral constant.
pub const DEFAULT_I_CONST: u32 = 32_768;

/// Default PID derivative constant.
pub const DEFAULT_D_CONST: u32 = 16_384;

/// Default encoder pulses per wheel revolution.
pub const DEFAULT_PULSES_PER_REVOLUTION: u32 = 1865;

/// Default wheel radius [mm].
pub const DEFAULT_WHEEL_RADIUS_MM: u32 = 60;

/// Default critical temperature [0.1 °C].
pub const DEFAULT_TEMPERATURE_CRITICAL: u16 = 700;

/// Default cool-down temperature [0.1 °C].
pub const DEFAULT_TEMPERATURE_DROP: u16 = 600;

/// Default dead-man stop timeout [ms].
pub const DEFAULT_STOP_IDLE_TIMEOUT_MS: u64 = 1000;

/// Default idle reset timeout [ms].
pub const DEFAULT_RESET_IDLE_TIMEOUT_MS: u64 = 10_000;

/// Default watchdog polling period [ms].
pub const DEFAULT_WATCHDOG_TICK_MS: u64 = 100;
