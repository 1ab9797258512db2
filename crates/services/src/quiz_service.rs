use std::sync::Arc;

use quiz_core::QuizSession;
use quiz_core::model::{QuizData, QuizSettings};

use crate::driver::{SessionHandle, spawn_session};
use crate::error::FetchError;
use crate::ticker::TickPeriod;
use crate::{Clock, QuizFetcher};

/// Loads a quiz and opens a driven session for it.
#[derive(Clone)]
pub struct QuizService {
    fetcher: Arc<dyn QuizFetcher>,
    settings: QuizSettings,
    clock: Clock,
    tick_period: TickPeriod,
}

impl QuizService {
    #[must_use]
    pub fn new(fetcher: Arc<dyn QuizFetcher>) -> Self {
        Self {
            fetcher,
            settings: QuizSettings::default(),
            clock: Clock::default(),
            tick_period: TickPeriod::SECOND,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_tick_period(mut self, tick_period: TickPeriod) -> Self {
        self.tick_period = tick_period;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Fetch the quiz without opening a session.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the quiz cannot be retrieved or parsed.
    pub async fn load_quiz(&self) -> Result<QuizData, FetchError> {
        self.fetcher.fetch_quiz().await.inspect_err(|err| {
            tracing::error!(error = %err, "failed to load quiz");
        })
    }

    /// Fetch the quiz and spawn a driver for a fresh session.
    ///
    /// No session exists when the fetch fails.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` when the quiz cannot be retrieved or parsed.
    pub async fn open_session(&self) -> Result<SessionHandle, FetchError> {
        let quiz = self.load_quiz().await?;
        let session = QuizSession::new(quiz, self.settings).with_clock(self.clock);
        Ok(spawn_session(session, self.tick_period))
    }
}
