//! Power-saving policy
//!
//! The node is either awake (polling the radio and animating) or sleeping
//! (outputs forced low, suspended). The state is recomputed on every tick
//! from the sleep switch and the wall-clock hour; nothing is persisted.

/// Hour the default awake window opens
pub const DEFAULT_AWAKE_FROM: u8 = 17;
/// Hour the default awake window closes (midnight)
pub const DEFAULT_AWAKE_UNTIL: u8 = 24;

/// Power state of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    #[default]
    Awake,
    Sleeping,
}

impl PowerState {
    /// Next state for the given sleep switch input and hour of day
    pub const fn next(sleep_enabled: bool, hour: u8, schedule: &SleepSchedule) -> Self {
        if sleep_enabled && !schedule.is_awake_hour(hour) {
            Self::Sleeping
        } else {
            Self::Awake
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Awake => "awake",
            Self::Sleeping => "sleeping",
        }
    }
}

/// Hours during which the node stays awake even with the sleep switch on
///
/// The window is `[awake_from, awake_until)`. A window whose end is before
/// its start wraps past midnight, e.g. `17..2` keeps the node awake until
/// 02:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepSchedule {
    pub awake_from: u8,
    pub awake_until: u8,
}

impl SleepSchedule {
    pub const fn new(awake_from: u8, awake_until: u8) -> Self {
        Self {
            awake_from,
            awake_until,
        }
    }

    /// Whether `hour` falls inside the awake window
    pub const fn is_awake_hour(&self, hour: u8) -> bool {
        if self.awake_from <= self.awake_until {
            hour >= self.awake_from && hour < self.awake_until
        } else {
            hour >= self.awake_from || hour < self.awake_until
        }
    }
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_AWAKE_FROM, DEFAULT_AWAKE_UNTIL)
    }
}
