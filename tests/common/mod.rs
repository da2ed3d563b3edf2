#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use myrtio_radio_light::{
    Duration, InitError, OutputDriver, PowerControl, Radio, RealTimeClock, Received,
};

/// Single pin write observed by [`RecordingDriver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinWrite {
    Level(u8, bool),
    Duty(u8, u8),
}

/// Output driver that records every write
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub writes: Vec<PinWrite>,
}

impl RecordingDriver {
    /// Most recent write to `pin`
    pub fn last(&self, pin: u8) -> Option<PinWrite> {
        self.writes
            .iter()
            .rev()
            .find(|write| match write {
                PinWrite::Level(p, _) | PinWrite::Duty(p, _) => *p == pin,
            })
            .copied()
    }
}

impl OutputDriver for RecordingDriver {
    fn set_level(&mut self, pin: u8, high: bool) {
        self.writes.push(PinWrite::Level(pin, high));
    }

    fn set_duty(&mut self, pin: u8, duty: u8) {
        self.writes.push(PinWrite::Duty(pin, duty));
    }
}

/// Clock whose hour can be changed while the node owns it
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    pub hour: Rc<Cell<u8>>,
    pub fail: bool,
}

impl RealTimeClock for FakeClock {
    fn init(&mut self) -> Result<(), InitError> {
        if self.fail {
            Err(InitError::Clock)
        } else {
            Ok(())
        }
    }

    fn current_hour(&mut self) -> u8 {
        self.hour.get()
    }
}

/// Sleep switch and suspend recorder
#[derive(Debug, Clone, Default)]
pub struct FakePower {
    pub sleep_enabled: Rc<Cell<bool>>,
    pub suspended: Vec<Duration>,
}

impl PowerControl for FakePower {
    fn sleep_enabled(&mut self) -> bool {
        self.sleep_enabled.get()
    }

    fn suspend(&mut self, duration: Duration) {
        self.suspended.push(duration);
    }
}

/// Radio that never comes up
#[derive(Debug, Default)]
pub struct DeadRadio;

impl Radio for DeadRadio {
    fn init(&mut self) -> Result<(), InitError> {
        Err(InitError::Radio)
    }

    fn try_receive(&mut self, _buf: &mut [u8]) -> Option<Received> {
        None
    }
}
