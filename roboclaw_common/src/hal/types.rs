//! HAL value types.
//!
//! This module defines the data exchanged with a [`MotorDriver`]:
//! - `MotorsSpeed` - Four wheel speeds (device or physical units)
//! - `UnitPair` - One reading per addressed unit (front, rear)
//! - `FaultStatus` - Roboclaw error register bits
//! - `Indicator` - Status LEDs on the board
//!
//! [`MotorDriver`]: crate::hal::driver::MotorDriver

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a client attached to the message pipe.
pub type ClientId = i32;

/// Speeds of the four wheels.
///
/// Physical units (mm/s) at the protocol boundary, pulses per second at the
/// device boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotorsSpeed {
    /// Front-left wheel.
    pub front_left: i32,
    /// Front-right wheel.
    pub front_right: i32,
    /// Rear-left wheel.
    pub rear_left: i32,
    /// Rear-right wheel.
    pub rear_right: i32,
}

impl MotorsSpeed {
    /// All wheels stopped.
    pub const ZERO: Self = Self::uniform(0);

    /// Same speed on every wheel.
    pub const fn uniform(speed: i32) -> Self {
        Self {
            front_left: speed,
            front_right: speed,
            rear_left: speed,
            rear_right: speed,
        }
    }

    /// Apply `f` to every wheel.
    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        Self {
            front_left: f(self.front_left),
            front_right: f(self.front_right),
            rear_left: f(self.rear_left),
            rear_right: f(self.rear_right),
        }
    }

    /// Wheels in front-left, front-right, rear-left, rear-right order.
    pub const fn as_array(&self) -> [i32; 4] {
        [self.front_left, self.front_right, self.rear_left, self.rear_right]
    }
}

/// Addressed motor-controller unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Unit driving the front wheels.
    Front,
    /// Unit driving the rear wheels.
    Rear,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Front => f.write_str("front"),
            Unit::Rear => f.write_str("rear"),
        }
    }
}

/// One value per unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitPair<T> {
    /// Front unit value.
    pub front: T,
    /// Rear unit value.
    pub rear: T,
}

impl<T> UnitPair<T> {
    /// Pair from front and rear values.
    pub const fn new(front: T, rear: T) -> Self {
        Self { front, rear }
    }

    /// True if `pred` holds for either unit.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        pred(&self.front) || pred(&self.rear)
    }

    /// True if `pred` holds for both units.
    pub fn all(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        pred(&self.front) && pred(&self.rear)
    }

    /// Values tagged with their unit.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, &T)> {
        [(Unit::Front, &self.front), (Unit::Rear, &self.rear)].into_iter()
    }
}

/// Temperatures of both units [0.1 °C].
pub type Temperatures = UnitPair<u16>;

bitflags! {
    /// Roboclaw error status register.
    ///
    /// An empty set is the normal status.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FaultStatus: u8 {
        /// Motor 1 overcurrent.
        const M1_OVERCURRENT     = 0x01;
        /// Motor 2 overcurrent.
        const M2_OVERCURRENT     = 0x02;
        /// Emergency stop latch.
        const E_STOP             = 0x04;
        /// Over-temperature latch.
        const TEMPERATURE        = 0x08;
        /// Main battery voltage too high.
        const MAIN_BATTERY_HIGH  = 0x10;
        /// Main battery voltage too low.
        const MAIN_BATTERY_LOW   = 0x20;
        /// Logic battery voltage too high.
        const LOGIC_BATTERY_HIGH = 0x40;
        /// Logic battery voltage too low.
        const LOGIC_BATTERY_LOW  = 0x80;
    }
}

impl FaultStatus {
    /// Mask of overcurrent bits (recovered by a reset).
    pub const OVERCURRENT_MASK: Self = Self::from_bits_truncate(
        Self::M1_OVERCURRENT.bits() | Self::M2_OVERCURRENT.bits(),
    );

    /// Normal status (no fault bits).
    pub const NORMAL: Self = Self::empty();

    /// Returns true when no fault bit is set.
    #[inline]
    pub const fn is_normal(&self) -> bool {
        self.is_empty()
    }

    /// Returns true if either motor reports overcurrent.
    #[inline]
    pub const fn has_overcurrent(&self) -> bool {
        self.intersects(Self::OVERCURRENT_MASK)
    }

    /// Returns true if the main battery is reported low.
    #[inline]
    pub const fn has_main_battery_low(&self) -> bool {
        self.contains(Self::MAIN_BATTERY_LOW)
    }

    /// Human-readable description of the set bits.
    pub fn describe(&self) -> String {
        if self.is_normal() {
            return "no error".to_string();
        }
        FAULT_DESCRIPTIONS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, text)| *text)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for FaultStatus {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Register bits in ascending order with their log descriptions.
const FAULT_DESCRIPTIONS: [(FaultStatus, &str); 8] = [
    (FaultStatus::M1_OVERCURRENT, "m1 overcurrent"),
    (FaultStatus::M2_OVERCURRENT, "m2 overcurrent"),
    (FaultStatus::E_STOP, "emergency stop"),
    (FaultStatus::TEMPERATURE, "temperature high"),
    (FaultStatus::MAIN_BATTERY_HIGH, "main battery high"),
    (FaultStatus::MAIN_BATTERY_LOW, "main battery low"),
    (FaultStatus::LOGIC_BATTERY_HIGH, "logic battery high"),
    (FaultStatus::LOGIC_BATTERY_LOW, "logic battery low"),
];

/// Fault registers of both units.
pub type FaultPair = UnitPair<FaultStatus>;

/// Status LEDs on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// Lit while the supervisor handles a message.
    Activity,
    /// Lit once the main battery is confirmed low.
    BatteryAlarm,
}
