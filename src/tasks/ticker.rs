//! One-second tick source for the countdown

use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use super::{EngineEvent, EventSender};

/// Interval between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Recurring callback the engine starts and stops
pub trait Clock {
    /// Begin delivering ticks; a no-op when ticks are already scheduled
    fn schedule(&mut self);

    /// Stop delivering ticks
    fn cancel(&mut self);

    /// Check whether a tick from `generation` still belongs to the live schedule
    fn accepts(&self, _generation: u64) -> bool {
        true
    }
}

/// Tokio interval task that feeds `EngineEvent::Tick` into the event channel
///
/// Each schedule gets a fresh generation number so ticks queued before a
/// cancel can be recognised and dropped.
#[derive(Debug)]
pub struct Ticker {
    events: EventSender,
    period: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new(events: EventSender) -> Self {
        Self::with_period(events, TICK_PERIOD)
    }

    pub fn with_period(events: EventSender, period: Duration) -> Self {
        Self {
            events,
            period,
            generation: 0,
            handle: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Clock for Ticker {
    fn schedule(&mut self) {
        if self.handle.is_some() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let events = self.events.clone();

        debug!("Scheduling ticks (generation {})", generation);
        self.handle = Some(tokio::spawn(async move {
            // First tick lands one full period after scheduling
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if events.send(EngineEvent::Tick { generation }).is_err() {
                    debug!("Engine event channel closed, stopping ticks");
                    break;
                }
            }
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Cancelled ticks (generation {})", self.generation);
        }
    }

    fn accepts(&self, generation: u64) -> bool {
        self.handle.is_some() && generation == self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
