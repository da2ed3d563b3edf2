//! Channel modes and the command state machine
//!
//! A mode change advances a channel one step around the cycle
//! `Off -> On -> Pwm -> Pulse -> Off`. Entering a mode drives the pin
//! once to that mode's steady level; entering `Pulse` instead seeds the
//! animation. A potentiometer change tunes the current mode in place.

use core::fmt;

use embassy_time::{Duration, Instant};
use log::{debug, info, warn};

use crate::OutputDriver;
use crate::command::Command;
use crate::store::{ChannelStore, OutputChannel};

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_ON: &str = "on";
const MODE_NAME_PWM: &str = "pwm";
const MODE_NAME_PULSE: &str = "pulse";

const MODE_ID_OFF: u8 = 0;
const MODE_ID_ON: u8 = 1;
const MODE_ID_PWM: u8 = 2;
const MODE_ID_PULSE: u8 = 3;

const MODE_COUNT: u8 = 4;

/// Potentiometer readings are four times wider than the duty range
const POT_SCALE: u32 = 4;

/// How a channel's output is driven
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Off = MODE_ID_OFF,
    On = MODE_ID_ON,
    Pwm = MODE_ID_PWM,
    Pulse = MODE_ID_PULSE,
}

impl Mode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_OFF => Self::Off,
            MODE_ID_ON => Self::On,
            MODE_ID_PWM => Self::Pwm,
            MODE_ID_PULSE => Self::Pulse,
            _ => return None,
        })
    }

    /// Next mode in the cycle
    pub const fn next(self) -> Self {
        match Self::from_raw((self as u8 + 1) % MODE_COUNT) {
            Some(mode) => mode,
            None => Self::Off,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::On => MODE_NAME_ON,
            Self::Pwm => MODE_NAME_PWM,
            Self::Pulse => MODE_NAME_PULSE,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a command cannot be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Command targets a channel that does not exist
    ChannelOutOfRange { channel: i32 },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChannelOutOfRange { channel } => {
                write!(f, "channel index {} out of range", channel)
            }
        }
    }
}

/// Apply a decoded command to its channel
///
/// Returns the channel's mode after the command. An out-of-range channel
/// leaves every channel untouched.
pub fn apply<D: OutputDriver>(
    store: &mut ChannelStore,
    command: Command,
    now: Instant,
    driver: &mut D,
) -> Result<Mode, DispatchError> {
    let index = command.channel();
    let Some(channel) = store.get_mut(index) else {
        let error = DispatchError::ChannelOutOfRange { channel: index };
        warn!("[mode] dropping command: {}", error);
        return Err(error);
    };

    match command {
        Command::ModeChange { .. } => {
            let mode = channel.mode.next();
            enter(channel, mode, now, driver);
            info!("[mode] channel {} -> {}", index, mode);
        }
        Command::PotChange { value, .. } => {
            adjust(channel, value, driver);
        }
    }

    Ok(channel.mode)
}

/// Switch the channel to `mode` and fire its entry action
fn enter<D: OutputDriver>(channel: &mut OutputChannel, mode: Mode, now: Instant, driver: &mut D) {
    channel.mode = mode;
    match mode {
        Mode::Off | Mode::On | Mode::Pwm => channel.drive(driver),
        Mode::Pulse => channel.reset_pulse(now),
    }
}

/// Apply a potentiometer reading to the channel's current mode
fn adjust<D: OutputDriver>(channel: &mut OutputChannel, value: u32, driver: &mut D) {
    let scaled = value / POT_SCALE;
    match channel.mode {
        Mode::Pwm => {
            channel.pwm_level = u8::try_from(scaled).unwrap_or(u8::MAX);
            channel.drive(driver);
            debug!("[mode] pin {} pwm level {}", channel.pin(), channel.pwm_level);
        }
        Mode::Pulse => {
            // Takes effect on the next natural step
            channel.pulse_period = Duration::from_millis(u64::from(scaled));
            debug!("[mode] pin {} pulse period {}ms", channel.pin(), scaled);
        }
        Mode::Off | Mode::On => {}
    }
}
