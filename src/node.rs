//! Control loop of the light node
//!
//! Single-threaded and non-blocking except for the power-saving suspend.
//! The caller owns the loop through [`LightNode::run`], or drives it tick
//! by tick with [`LightNode::tick`].
//!
//! # Usage
//!
//! ```ignore
//! let mut node = LightNode::new(pins, radio, rtc, power, &NodeConfig::default());
//! node.run();
//! ```

use embassy_time::Instant;
use log::{debug, error, info, warn};

use crate::command::{FRAME_SIZE, decode};
use crate::config::{NodeConfig, SleepTimings};
use crate::power::{PowerState, SleepSchedule};
use crate::store::ChannelStore;
use crate::{InitError, OutputDriver, PowerControl, Radio, RealTimeClock, mode, pulse};

/// Radio-controlled light node
pub struct LightNode<D, R, C, P> {
    // Hardware
    driver: D,
    radio: R,
    clock: C,
    power: P,

    // Configuration
    schedule: SleepSchedule,
    sleep: SleepTimings,

    // Internal state
    store: ChannelStore,
    state: PowerState,
}

impl<D, R, C, P> LightNode<D, R, C, P>
where
    D: OutputDriver,
    R: Radio,
    C: RealTimeClock,
    P: PowerControl,
{
    /// Create a node with every channel off
    pub fn new(driver: D, radio: R, clock: C, power: P, config: &NodeConfig) -> Self {
        Self {
            driver,
            radio,
            clock,
            power,
            schedule: config.schedule,
            sleep: config.sleep,
            store: ChannelStore::new(config.pins, &config.channel),
            state: PowerState::Awake,
        }
    }

    /// Bring up the peripherals and drive every output to its initial level
    pub fn start(&mut self) -> Result<(), InitError> {
        self.radio.init()?;
        self.clock.init()?;
        self.store.restore(&mut self.driver);
        info!("[node] started");
        Ok(())
    }

    /// Start the node and run the control loop forever
    ///
    /// A peripheral that fails to initialize halts the node with every
    /// output low.
    pub fn run(mut self) -> ! {
        if let Err(err) = self.start() {
            error!("[node] {}, halting", err);
            self.store.force_low(&mut self.driver);
            halt();
        }

        loop {
            self.tick(Instant::now());
        }
    }

    /// Run one iteration of the control loop
    ///
    /// When awake, a pending command is dispatched before pulses are
    /// animated, so a channel entering `Pulse` is animated in the same
    /// tick. When sleeping, outputs are forced low and the call blocks
    /// for the whole sleep period.
    pub fn tick(&mut self, now: Instant) -> PowerState {
        let hour = self.clock.current_hour();
        let next = PowerState::next(self.power.sleep_enabled(), hour, &self.schedule);
        if next != self.state {
            info!(
                "[node] {} -> {} at hour {}",
                self.state.as_str(),
                next.as_str(),
                hour
            );
            if next == PowerState::Awake {
                self.store.restore(&mut self.driver);
            }
            self.state = next;
        }

        match next {
            PowerState::Sleeping => self.sleep(),
            PowerState::Awake => {
                self.poll(now);
                pulse::tick(&mut self.store, now, &mut self.driver);
            }
        }

        next
    }

    /// Receive and dispatch at most one pending command
    fn poll(&mut self, now: Instant) {
        let mut buf = [0u8; FRAME_SIZE];
        let Some(received) = self.radio.try_receive(&mut buf) else {
            return;
        };
        let frame = &buf[..received.len.min(FRAME_SIZE)];

        match decode(frame) {
            Ok(command) => {
                debug!("[node] {:?} from {}", command, received.sender);
                if let Err(err) = mode::apply(&mut self.store, command, now, &mut self.driver) {
                    debug!("[node] command from {} not applied: {}", received.sender, err);
                }
            }
            Err(err) => {
                warn!("[node] dropping frame from {}: {}", received.sender, err);
            }
        }
    }

    fn sleep(&mut self) {
        self.store.force_low(&mut self.driver);
        debug!("[node] suspending for {}ms", self.sleep.total().as_millis());
        for _ in 0..self.sleep.cycles {
            self.power.suspend(self.sleep.cycle);
        }
    }

    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    pub fn power_state(&self) -> PowerState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn power(&self) -> &P {
        &self.power
    }
}

/// Stop forever
///
/// Used when the node cannot operate safely, e.g. with a dead radio link.
pub fn halt() -> ! {
    loop {
        core::hint::spin_loop();
    }
}
