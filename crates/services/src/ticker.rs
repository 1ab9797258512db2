use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::driver::SessionEvent;
use crate::error::SessionError;

/// Real time between two clock ticks. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPeriod(Duration);

impl TickPeriod {
    /// One tick per second.
    pub const SECOND: Self = Self(Duration::from_secs(1));

    /// # Errors
    ///
    /// Returns `SessionError::InvalidTickPeriod` for a zero duration.
    pub fn new(period: Duration) -> Result<Self, SessionError> {
        if period.is_zero() {
            return Err(SessionError::InvalidTickPeriod);
        }
        Ok(Self(period))
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }
}

impl Default for TickPeriod {
    fn default() -> Self {
        Self::SECOND
    }
}

/// Periodic tick source for one arming of the session clock.
///
/// Every tick carries the generation it was started for. The task is aborted
/// when the `Ticker` is dropped.
#[derive(Debug)]
pub(crate) struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a ticker on the current tokio runtime.
    ///
    /// The first tick fires one `period` after spawning.
    pub(crate) fn spawn(
        events: mpsc::WeakSender<SessionEvent>,
        generation: u64,
        period: TickPeriod,
    ) -> Self {
        let period = period.as_duration();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(sender) = events.upgrade() else {
                    break;
                };
                if sender.send(SessionEvent::Tick { generation }).await.is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
