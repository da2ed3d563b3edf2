//! Per-channel state store
//!
//! Owns every channel record for the lifetime of the node. Records are
//! mutated by the mode state machine on command and by the pulse animator
//! on tick.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::config::ChannelDefaults;
use crate::mode::Mode;

/// Number of physical output channels
pub const CHANNEL_COUNT: usize = 2;

/// Sign of the next pulse brightness step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseDirection {
    Rising,
    Falling,
}

impl PulseDirection {
    /// Signed step applied to the pulse value
    pub const fn step(self) -> i16 {
        match self {
            Self::Rising => 1,
            Self::Falling => -1,
        }
    }
}

/// State of a single output channel
#[derive(Debug, Clone)]
pub struct OutputChannel {
    pin: u8,
    pub(crate) mode: Mode,
    pub(crate) pwm_level: u8,
    pub(crate) pulse_period: Duration,
    pub(crate) pulse_value: u8,
    pub(crate) pulse_direction: PulseDirection,
    pub(crate) last_step: Instant,
}

impl OutputChannel {
    /// Create a channel in `Off` mode bound to `pin`
    pub const fn new(pin: u8, defaults: &ChannelDefaults) -> Self {
        Self {
            pin,
            mode: Mode::Off,
            pwm_level: defaults.pwm_level,
            pulse_period: defaults.pulse_period,
            pulse_value: 0,
            pulse_direction: PulseDirection::Rising,
            last_step: Instant::from_ticks(0),
        }
    }

    pub const fn pin(&self) -> u8 {
        self.pin
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn pwm_level(&self) -> u8 {
        self.pwm_level
    }

    pub const fn pulse_period(&self) -> Duration {
        self.pulse_period
    }

    pub const fn pulse_value(&self) -> u8 {
        self.pulse_value
    }

    pub const fn pulse_direction(&self) -> PulseDirection {
        self.pulse_direction
    }

    pub const fn last_step(&self) -> Instant {
        self.last_step
    }

    /// Reset the animation to start dark and ramp up from `now`
    pub(crate) fn reset_pulse(&mut self, now: Instant) {
        self.pulse_value = 0;
        self.pulse_direction = PulseDirection::Rising;
        self.last_step = now;
    }

    /// Write the output level the current mode holds the pin at
    pub(crate) fn drive<D: OutputDriver>(&self, driver: &mut D) {
        match self.mode {
            Mode::Off => driver.set_level(self.pin, false),
            Mode::On => driver.set_level(self.pin, true),
            Mode::Pwm => driver.set_duty(self.pin, self.pwm_level),
            Mode::Pulse => driver.set_duty(self.pin, self.pulse_value),
        }
    }
}

/// Fixed-size store of all output channels
#[derive(Debug, Clone)]
pub struct ChannelStore {
    channels: [OutputChannel; CHANNEL_COUNT],
}

impl ChannelStore {
    /// Create all channels in `Off` mode
    pub fn new(pins: [u8; CHANNEL_COUNT], defaults: &ChannelDefaults) -> Self {
        Self {
            channels: pins.map(|pin| OutputChannel::new(pin, defaults)),
        }
    }

    /// Channel by zero-based index, `None` when out of range
    pub fn get(&self, index: i32) -> Option<&OutputChannel> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.channels.get(index))
    }

    pub(crate) fn get_mut(&mut self, index: i32) -> Option<&mut OutputChannel> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.channels.get_mut(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputChannel> {
        self.channels.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut OutputChannel> {
        self.channels.iter_mut()
    }

    /// Force every output low without touching channel state
    pub(crate) fn force_low<D: OutputDriver>(&self, driver: &mut D) {
        for channel in &self.channels {
            driver.set_level(channel.pin, false);
        }
    }

    /// Re-drive every output to its mode's level
    pub(crate) fn restore<D: OutputDriver>(&self, driver: &mut D) {
        for channel in &self.channels {
            channel.drive(driver);
        }
    }
}
