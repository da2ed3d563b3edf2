//! Pulse animation
//!
//! Channels in `Pulse` mode breathe in a triangle wave between 0 and 255,
//! one unit per `pulse_period`. A full cycle takes roughly
//! `510 * pulse_period`.

use embassy_time::Instant;

use crate::OutputDriver;
use crate::mode::Mode;
use crate::store::{ChannelStore, OutputChannel, PulseDirection};

/// Advance every pulsing channel whose step is due
///
/// Returns the number of channels that stepped.
pub fn tick<D: OutputDriver>(store: &mut ChannelStore, now: Instant, driver: &mut D) -> usize {
    store
        .iter_mut()
        .filter(|channel| channel.mode == Mode::Pulse)
        .map(|channel| step(channel, now, driver))
        .filter(|&stepped| stepped)
        .count()
}

/// Advance a single channel by one brightness unit if its period elapsed
///
/// The step timestamp only moves when a step happens, so ticks shorter
/// than the period never accumulate drift.
pub fn step<D: OutputDriver>(channel: &mut OutputChannel, now: Instant, driver: &mut D) -> bool {
    let Some(elapsed) = now.checked_duration_since(channel.last_step) else {
        return false;
    };
    if elapsed <= channel.pulse_period {
        return false;
    }

    let next = i16::from(channel.pulse_value) + channel.pulse_direction.step();
    if next >= i16::from(u8::MAX) {
        channel.pulse_value = u8::MAX;
        channel.pulse_direction = PulseDirection::Falling;
    } else if next <= 0 {
        channel.pulse_value = 0;
        channel.pulse_direction = PulseDirection::Rising;
    } else {
        channel.pulse_value = u8::try_from(next).unwrap_or(u8::MAX);
    }

    driver.set_duty(channel.pin(), channel.pulse_value);
    channel.last_step = now;
    true
}
