use std::time::{Duration, Instant};

/// Timer for the "visible click" indicator window.
///
/// A single deadline updated in place: re-triggering before the deadline
/// extends visibility instead of queueing a second hide, so rapid clicking
/// never flickers. A non-positive timeout disables the feature entirely
/// rather than flashing the window for zero duration.
#[derive(Debug)]
pub struct ClickIndicator {
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    visible: bool,
}

impl ClickIndicator {
    pub fn new(timeout_secs: f32) -> Self {
        let timeout = (timeout_secs > 0.0).then(|| Duration::from_secs_f32(timeout_secs));
        Self {
            timeout,
            deadline: None,
            visible: false,
        }
    }

    pub fn enabled(&self) -> bool {
        self.timeout.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Arm (or re-arm) the hide deadline to `now + timeout` and show the
    /// window. Returns `true` when the window is visible afterwards.
    pub fn trigger(&mut self, now: Instant) -> bool {
        let Some(timeout) = self.timeout else {
            return false;
        };
        self.deadline = Some(now + timeout);
        self.visible = true;
        true
    }

    /// Hide once the deadline has elapsed. Returns `true` exactly when this
    /// tick transitioned the window from shown to hidden.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.visible && now >= deadline => {
                self.visible = false;
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
