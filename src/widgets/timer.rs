use std::time::{Duration, Instant};

/// Single deferred-close deadline owned by one menu.
///
/// Arming replaces any pending deadline, so at most one close attempt is ever
/// outstanding. Firing only reports that the deadline passed; the caller
/// re-evaluates hover/focus state at that moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl CloseTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn arm(&mut self, now: Instant) {
        let deadline = now + self.delay;
        if let Some(prev) = self.deadline.replace(deadline) {
            tracing::trace!(
                shifted_ms = deadline.saturating_duration_since(prev).as_millis() as u64,
                "close timer rearmed"
            );
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Clears and returns true once `now` has reached the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 50 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "close timer fired late"
            );
        }
        self.deadline = None;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/timer.rs"]
mod tests;
