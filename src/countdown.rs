//! Countdown engine: live `MM:SS` displays of remaining time, one
//! independent task per registration.
//!
//! Each registration recomputes its remaining time once per [`TICK`] from
//! the wall clock and reports it to the host page as a [`CountdownFrame`].
//! Registrations share no state. They run until cancelled through their
//! [`CountdownHandle`] or until the engine shuts down with the page.

mod timer;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

pub use timer::{Countdown, CountdownState, LoopPolicy, TICK, format_remaining};

/// Remaining time of one registration, addressed to its display target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownFrame {
    pub target: String,
    pub remaining_secs: u64,
}

impl CountdownFrame {
    pub fn text(&self) -> String {
        format_remaining(self.remaining_secs)
    }
}

/// Deregistration handle returned by [`CountdownEngine::start`].
///
/// Dropping the handle leaves the countdown running.
#[derive(Debug)]
pub struct CountdownHandle {
    target: String,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl CountdownHandle {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cancel(&self) {
        debug!(element = %self.target, "Cancelling countdown");
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub struct CountdownEngine {
    frames_tx: UnboundedSender<CountdownFrame>,
    cancellation_token: CancellationToken,
    policy: LoopPolicy,
}

impl CountdownEngine {
    pub fn new(frames_tx: UnboundedSender<CountdownFrame>) -> Self {
        Self {
            frames_tx,
            cancellation_token: CancellationToken::new(),
            policy: LoopPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: LoopPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start counting down `duration_secs` into `target` with the engine's
    /// default policy. Must be called from within a tokio runtime.
    pub fn start(&self, duration_secs: u64, target: impl Into<String>) -> CountdownHandle {
        self.start_with(duration_secs, target, self.policy)
    }

    pub fn start_with(
        &self,
        duration_secs: u64,
        target: impl Into<String>,
        policy: LoopPolicy,
    ) -> CountdownHandle {
        let target = target.into();
        let token = self.cancellation_token.child_token();
        let task = tokio::spawn(Self::run(
            Countdown::new(duration_secs, Instant::now(), policy),
            target.clone(),
            self.frames_tx.clone(),
            token.clone(),
        ));
        debug!(element = %target, duration_secs, ?policy, "Started countdown");
        CountdownHandle {
            target,
            token,
            task,
        }
    }

    /// Cancel every registration started by this engine.
    pub fn shutdown(&self) {
        self.cancellation_token.cancel();
    }

    async fn run(
        mut countdown: Countdown,
        target: String,
        frames_tx: UnboundedSender<CountdownFrame>,
        cancellation_token: CancellationToken,
    ) {
        let mut tick_interval = interval(TICK);
        // One current frame after a stall or suspend, not a burst of stale ones.
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = cancellation_token.cancelled() => break,
                _ = tick_interval.tick() => {
                    let remaining_secs = countdown.tick(Instant::now());
                    trace!(element = %target, remaining_secs, "Countdown tick");
                    let frame = CountdownFrame {
                        target: target.clone(),
                        remaining_secs,
                    };
                    if frames_tx.send(frame).is_err() {
                        break;
                    }
                    if countdown.state() == CountdownState::Expired {
                        debug!(element = %target, "Countdown expired");
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
