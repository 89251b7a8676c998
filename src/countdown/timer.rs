use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Interval between recomputations of a countdown.
pub const TICK: Duration = Duration::from_secs(1);

/// What a countdown does once it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopPolicy {
    /// Start over from the full duration one tick later.
    #[default]
    Loop,
    /// Stay at zero and stop ticking.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

/// Remaining-time computation for one registration.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration_secs: u64,
    started_at: Instant,
    policy: LoopPolicy,
    state: CountdownState,
}

impl Countdown {
    pub const fn new(duration_secs: u64, now: Instant, policy: LoopPolicy) -> Self {
        Self {
            duration_secs,
            started_at: now,
            policy,
            state: CountdownState::Running,
        }
    }

    pub const fn state(&self) -> CountdownState {
        self.state
    }

    /// Recompute the remaining whole seconds at `now`.
    ///
    /// Elapsed time is truncated to whole seconds. On reaching zero the
    /// start reference moves one tick past `now` under [`LoopPolicy::Loop`],
    /// so the next tick shows the full duration again.
    pub fn tick(&mut self, now: Instant) -> u64 {
        if self.state == CountdownState::Expired {
            return 0;
        }

        let elapsed = now.saturating_duration_since(self.started_at).as_secs();
        let remaining = self.duration_secs.saturating_sub(elapsed);
        if remaining == 0 {
            match self.policy {
                LoopPolicy::Loop => self.started_at = now + TICK,
                LoopPolicy::Stop => self.state = CountdownState::Expired,
            }
        }
        remaining
    }
}

/// Format whole seconds as zero-padded `MM:SS`.
pub fn format_remaining(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
