use std::time::{Duration, Instant};

/// A tick waiting to fire, tagged with the session that scheduled it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScheduledTick {
    pub generation: u64,
    pub due: Instant,
}

/// Holds at most one pending tick.
///
/// Scheduling replaces whatever was pending, so a new session drops the old
/// session's tick. A tick that slips through anyway is rejected by its
/// generation when it runs.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    pending: Option<ScheduledTick>,
}

impl TickScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a tick `delay_ms` from `now`. Non-positive delays fire on the
    /// next poll. A delay beyond what `Instant` can represent never fires.
    pub fn schedule(&mut self, generation: u64, delay_ms: i64, now: Instant) {
        let delay = Duration::from_millis(u64::try_from(delay_ms).unwrap_or(0));
        self.pending = now
            .checked_add(delay)
            .map(|due| ScheduledTick { generation, due });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn pending(&self) -> Option<ScheduledTick> {
        self.pending
    }

    /// Removes and returns the pending tick once it is due.
    pub fn take_due(&mut self, now: Instant) -> Option<ScheduledTick> {
        match self.pending {
            Some(tick) if tick.due <= now => self.pending.take(),
            _ => None,
        }
    }

    /// Removes and returns the pending tick regardless of its due time.
    pub fn take_pending(&mut self) -> Option<ScheduledTick> {
        self.pending.take()
    }

    /// Time left until the pending tick fires, zero when overdue.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|tick| tick.due.saturating_duration_since(now))
    }
}
