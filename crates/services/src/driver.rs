//! Async host for a `QuizSession`.
//!
//! One task owns the session and applies events strictly in arrival order.
//! Presentation code talks to it through a cloneable `SessionHandle` and
//! renders from the published snapshots.

use tokio::sync::{mpsc, oneshot, watch};

use quiz_core::{MatchResult, QuizSession, SessionSnapshot};

use crate::error::SessionError;
use crate::ticker::{TickPeriod, Ticker};

const EVENT_BUFFER: usize = 64;

#[derive(Debug)]
pub(crate) enum SessionEvent {
    Start {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Reset {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Submit {
        text: String,
        reply: oneshot::Sender<MatchResult>,
    },
    Tick {
        generation: u64,
    },
}

/// Cloneable handle to a running session driver.
///
/// The driver stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Start (or restart after a finished round) the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the driver has stopped.
    pub async fn start(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Start { reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Reset the session and return the cleared snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the driver has stopped.
    pub async fn reset(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Reset { reply }).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Submit a typed guess.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if the driver has stopped.
    pub async fn submit(&self, text: impl Into<String>) -> Result<MatchResult, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionEvent::Submit {
            text: text.into(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every applied event.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    async fn send(&self, event: SessionEvent) -> Result<(), SessionError> {
        self.events
            .send(event)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

/// Spawn a driver task for `session` on the current tokio runtime.
///
/// `tick_period` is the real time between two clock ticks, one second in
/// production.
#[must_use]
pub fn spawn_session(session: QuizSession, tick_period: TickPeriod) -> SessionHandle {
    let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
    let (snapshots_tx, snapshots_rx) = watch::channel(session.snapshot());

    let runner = SessionRunner {
        session,
        events: events_tx.downgrade(),
        snapshots: snapshots_tx,
        ticker: None,
        tick_period,
    };
    tokio::spawn(runner.run(events_rx));

    SessionHandle {
        events: events_tx,
        snapshots: snapshots_rx,
    }
}

struct SessionRunner {
    session: QuizSession,
    events: mpsc::WeakSender<SessionEvent>,
    snapshots: watch::Sender<SessionSnapshot>,
    ticker: Option<Ticker>,
    tick_period: TickPeriod,
}

impl SessionRunner {
    async fn run(mut self, mut events: mpsc::Receiver<SessionEvent>) {
        tracing::debug!("session driver started");
        while let Some(event) = events.recv().await {
            self.apply(event);
        }
        self.ticker = None;
        tracing::debug!("session driver stopped");
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Start { reply } => {
                self.session.start();
                let snapshot = self.settle();
                let _ = reply.send(snapshot);
            }
            SessionEvent::Reset { reply } => {
                self.session.reset();
                let snapshot = self.settle();
                let _ = reply.send(snapshot);
            }
            SessionEvent::Submit { text, reply } => {
                let result = self.session.submit_input(&text);
                self.settle();
                let _ = reply.send(result);
            }
            SessionEvent::Tick { generation } => {
                if generation != self.session.clock_generation() {
                    tracing::trace!(generation, "dropping stale tick");
                    return;
                }
                self.session.on_tick();
                self.settle();
            }
        }
    }

    /// Align the ticker with the session clock and publish a snapshot.
    fn settle(&mut self) -> SessionSnapshot {
        let generation = self.session.clock_generation();
        let current = self.ticker.as_ref().map(Ticker::generation);
        if current != Some(generation) {
            // Dropping the old ticker aborts it.
            self.ticker = None;
            if self.session.is_clock_armed() {
                self.ticker = Some(Ticker::spawn(
                    self.events.clone(),
                    generation,
                    self.tick_period,
                ));
            }
        }

        let snapshot = self.session.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}
