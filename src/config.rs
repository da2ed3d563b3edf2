//! Node configuration

use embassy_time::Duration;

use crate::power::SleepSchedule;
use crate::store::CHANNEL_COUNT;

/// Default PWM output pins, one per channel
pub const DEFAULT_PINS: [u8; CHANNEL_COUNT] = [5, 6];

/// Startup values applied to every channel
#[derive(Debug, Clone, Copy)]
pub struct ChannelDefaults {
    /// Fixed brightness used in PWM mode
    pub pwm_level: u8,
    /// Time between pulse brightness steps
    pub pulse_period: Duration,
}

impl Default for ChannelDefaults {
    fn default() -> Self {
        Self {
            pwm_level: 255,
            pulse_period: Duration::from_millis(1024),
        }
    }
}

/// Power-saving suspend timings
///
/// The platform primitive can only suspend for a bounded time, so a sleep
/// period is `cycles` back-to-back suspends of `cycle` each.
#[derive(Debug, Clone, Copy)]
pub struct SleepTimings {
    /// Duration of a single suspend call
    pub cycle: Duration,
    /// Number of suspend calls per sleep period
    pub cycles: u8,
}

impl SleepTimings {
    /// Total time spent suspended per sleep period
    pub fn total(self) -> Duration {
        self.cycle * u32::from(self.cycles)
    }
}

impl Default for SleepTimings {
    fn default() -> Self {
        Self {
            cycle: Duration::from_secs(8),
            cycles: 8,
        }
    }
}

/// Configuration for the light node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub pins: [u8; CHANNEL_COUNT],
    pub channel: ChannelDefaults,
    pub schedule: SleepSchedule,
    pub sleep: SleepTimings,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            pins: DEFAULT_PINS,
            channel: ChannelDefaults::default(),
            schedule: SleepSchedule::default(),
            sleep: SleepTimings::default(),
        }
    }
}
