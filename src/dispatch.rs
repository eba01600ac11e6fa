use std::thread;
use std::time::{Duration, Instant};

use crate::event_log::EventLog;
use crate::event_source::{DeviceSource, EventKind, RawEvent};
use crate::indicator::ClickIndicator;

/// Continuation signal returned to the host scheduler after each idle tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleSignal {
    Continue,
    Stop,
}

/// Bridges the pull-based device source into the GUI's cooperative idle
/// mechanism.
///
/// Each tick polls the source at most once, preserving FIFO order without any
/// locking, then sleeps briefly to bound CPU usage when idle. Once `Stop` has
/// been returned the dispatcher is terminal; re-invoking it repeats no side
/// effects.
pub struct IdleDispatcher {
    source: DeviceSource,
    log: Option<EventLog>,
    quit_requested: bool,
    finished: bool,
    last_event: Option<RawEvent>,
    idle_sleep: Duration,
}

impl IdleDispatcher {
    pub fn new(source: DeviceSource, log: EventLog) -> Self {
        Self {
            source,
            log: Some(log),
            quit_requested: false,
            finished: false,
            last_event: None,
            idle_sleep: Duration::from_millis(1),
        }
    }

    /// Shorten (or remove) the idle sleep; used by tests that drive many
    /// ticks in a row.
    pub fn set_idle_sleep(&mut self, sleep: Duration) {
        self.idle_sleep = sleep;
    }

    /// Ask for an orderly shutdown on the next tick.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The most recent event routed through the loop, for rendering.
    pub fn last_event(&self) -> Option<&RawEvent> {
        self.last_event.as_ref()
    }

    /// One idle tick: poll once, log and route the event if there was one,
    /// advance the indicator timer, sleep, and report whether the host should
    /// keep calling.
    pub fn tick(&mut self, indicator: &mut ClickIndicator, now: Instant) -> IdleSignal {
        if self.finished {
            return IdleSignal::Stop;
        }
        if self.quit_requested || self.source.has_failed() {
            if self.source.has_failed() {
                tracing::error!("device source failed, shutting down");
            }
            self.shutdown();
            return IdleSignal::Stop;
        }

        if let Some(event) = self.source.poll() {
            // The log is always open until `finished`, which returned above.
            let write = self.log.as_mut().map(|log| log.record(&event));
            if let Some(Err(err)) = write {
                // Event durability is the point of the log; losing it ends
                // the session rather than silently dropping the trail.
                tracing::error!(%err, "event log write failed, shutting down");
                self.shutdown();
                return IdleSignal::Stop;
            }
            if event.kind == EventKind::Button && event.value == 1 {
                indicator.trigger(now);
            }
            self.last_event = Some(event);
        }
        indicator.tick(now);

        if !self.idle_sleep.is_zero() {
            thread::sleep(self.idle_sleep);
        }
        IdleSignal::Continue
    }

    /// Stop the device source, then flush and close the diagnostic log, in
    /// that order. Idempotent; persisting the window position is the caller's
    /// final step.
    pub fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.source.stop();
        if let Some(log) = self.log.take() {
            if let Err(err) = log.close() {
                tracing::warn!(%err, "failed to close event log");
            }
        }
        self.finished = true;
        tracing::info!("dispatch loop finished");
    }
}
