#![no_std]

pub mod command;
pub mod config;
pub mod inbox;
pub mod mode;
pub mod node;
pub mod power;
pub mod pulse;
pub mod store;

use core::fmt;

pub use command::{Command, DecodeError, decode};
pub use config::{ChannelDefaults, NodeConfig, SleepTimings};
pub use inbox::{Frame, Inbox, InboxReceiver, InboxSender};
pub use mode::{DispatchError, Mode};
pub use node::{LightNode, halt};
pub use power::{PowerState, SleepSchedule};
pub use store::{CHANNEL_COUNT, ChannelStore, OutputChannel, PulseDirection};
pub use embassy_time::{Duration, Instant};

/// Abstract output pin driver
///
/// Implement this trait to support different hardware platforms.
/// Pins are identified by the raw hardware number stored in each channel.
pub trait OutputDriver {
    /// Drive a pin fully low or fully high
    fn set_level(&mut self, pin: u8, high: bool);

    /// Drive a pin with a proportional duty cycle (0-255)
    fn set_duty(&mut self, pin: u8, duty: u8);
}

/// Message delivered by the radio transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Received {
    /// Number of payload bytes written into the buffer
    pub len: usize,
    /// Address of the sending node
    pub sender: u8,
}

/// Reliable datagram transport.
///
/// Anything returned from [`Radio::try_receive`] has already been
/// acknowledged to the sender.
pub trait Radio {
    /// Bring up the radio link
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Non-blocking receive into `buf`
    ///
    /// Returns `None` when no message is available.
    fn try_receive(&mut self, buf: &mut [u8]) -> Option<Received>;
}

/// Real-time clock peripheral
pub trait RealTimeClock {
    fn init(&mut self) -> Result<(), InitError> {
        Ok(())
    }

    /// Current hour of the day (0-23)
    fn current_hour(&mut self) -> u8;
}

/// Sleep switch input and low-power suspend primitive
pub trait PowerControl {
    /// Whether the physical sleep enable input is asserted
    fn sleep_enabled(&mut self) -> bool;

    /// Block for `duration` in the lowest available power state
    ///
    /// `duration` never exceeds the configured single-cycle maximum.
    fn suspend(&mut self, duration: Duration);
}

/// Peripheral initialization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// Radio transport did not come up
    Radio,
    /// Real-time clock did not respond
    Clock,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radio => f.write_str("radio init failed"),
            Self::Clock => f.write_str("clock init failed"),
        }
    }
}

/// Install `esp-println` as the `log` backend
#[cfg(feature = "esp32-log")]
pub fn init_logger(level: log::LevelFilter) {
    esp_println::logger::init_logger(level);
}
