use chrono::{DateTime, Utc};

use crate::clock::{ClockEvent, Countdown, SessionClock};
use crate::model::{AnswerSet, NormalizedAnswer, QuizData, QuizSettings};
use crate::time::{Clock, format_mm_ss};

//
// ─── STATUS & RESULTS ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    Running,
    Won,
    Lost,
}

impl SessionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Outcome of a single submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// The guess matched a remaining answer.
    Accepted,
    /// The session is running but the guess matched nothing left.
    Rejected,
    /// The session is not running; the guess was ignored.
    NotAccepted,
}

impl MatchResult {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Recorded when a play-through ends in `Won` or `Lost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub status: SessionStatus,
    pub found: usize,
    pub total: usize,
    pub attempts: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Owned copy of every projection, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub prompt: String,
    pub status: SessionStatus,
    pub remaining_secs: u32,
    pub remaining_display: String,
    pub progress_display: String,
    pub found_answers: Vec<String>,
    pub found_count: usize,
    pub total_count: usize,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one timed quiz.
///
/// The host forwards events (`start`, `reset`, `submit_input`, `on_tick`) one
/// at a time and renders from the read-only projections afterwards. Calls
/// that are invalid for the current status are ignored rather than rejected.
#[derive(Debug)]
pub struct QuizSession<C = Countdown> {
    quiz: QuizData,
    settings: QuizSettings,
    clock: Clock,
    countdown: C,
    answers: AnswerSet,
    found: Vec<String>,
    total: usize,
    attempts: u32,
    status: SessionStatus,
    started_at: Option<DateTime<Utc>>,
    summary: Option<SessionSummary>,
}

impl QuizSession<Countdown> {
    #[must_use]
    pub fn new(quiz: QuizData, settings: QuizSettings) -> Self {
        let countdown = Countdown::new(settings.duration_secs());
        Self::with_countdown(quiz, settings, countdown)
    }
}

impl<C: SessionClock> QuizSession<C> {
    /// Build a session around a custom `SessionClock`.
    #[must_use]
    pub fn with_countdown(quiz: QuizData, settings: QuizSettings, mut countdown: C) -> Self {
        countdown.rewind(settings.duration_secs());
        let answers = AnswerSet::from_answers(quiz.acceptable_answers());
        let total = answers.len();
        Self {
            quiz,
            settings,
            clock: Clock::default(),
            countdown,
            answers,
            found: Vec::new(),
            total,
            attempts: 0,
            status: SessionStatus::NotStarted,
            started_at: None,
            summary: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Begin a play-through.
    ///
    /// Ignored while already running. Starting from `Won` or `Lost` first
    /// re-initializes the session the same way `reset` does.
    pub fn start(&mut self) {
        match self.status {
            SessionStatus::Running => {
                tracing::debug!("start ignored: session already running");
                return;
            }
            SessionStatus::Won | SessionStatus::Lost => self.reinitialize(),
            SessionStatus::NotStarted => {}
        }

        self.status = SessionStatus::Running;
        self.started_at = Some(self.clock.now());
        self.countdown.arm(self.settings.duration_secs());
        tracing::info!(
            total = self.total,
            duration_secs = self.settings.duration_secs(),
            "quiz session started"
        );

        // A quiz without answers is won as soon as it starts.
        self.check_win();
    }

    /// Stop the play-through and restore the initial state.
    pub fn reset(&mut self) -> SessionSnapshot {
        if self.status != SessionStatus::NotStarted {
            tracing::info!(status = ?self.status, "quiz session reset");
        }
        self.reinitialize();
        self.status = SessionStatus::NotStarted;
        self.snapshot()
    }

    /// Check a typed guess against the remaining answers.
    pub fn submit_input(&mut self, raw: &str) -> MatchResult {
        if self.status != SessionStatus::Running {
            return MatchResult::NotAccepted;
        }

        self.attempts = self.attempts.saturating_add(1);
        let guess = NormalizedAnswer::new(raw);
        if !self.answers.remove(&guess) {
            return MatchResult::Rejected;
        }

        self.found.push(guess.display());
        debug_assert_eq!(self.answers.len() + self.found.len(), self.total);
        tracing::debug!(
            found = self.found.len(),
            total = self.total,
            "answer accepted"
        );

        self.check_win();
        MatchResult::Accepted
    }

    /// Apply one elapsed second.
    pub fn on_tick(&mut self) -> ClockEvent {
        if self.status != SessionStatus::Running {
            return ClockEvent::Idle;
        }

        let event = self.countdown.tick();
        if event == ClockEvent::Expired {
            self.finish(SessionStatus::Lost);
            tracing::info!(
                found = self.found.len(),
                total = self.total,
                "quiz session lost: time finished"
            );
        }
        event
    }

    fn check_win(&mut self) {
        if self.status == SessionStatus::Running && self.found.len() == self.total {
            self.finish(SessionStatus::Won);
            tracing::info!(total = self.total, "quiz session won");
        }
    }

    fn finish(&mut self, status: SessionStatus) {
        self.countdown.cancel();
        self.status = status;
        let finished_at = self.clock.now();
        self.summary = Some(SessionSummary {
            status,
            found: self.found.len(),
            total: self.total,
            attempts: self.attempts,
            started_at: self.started_at.unwrap_or(finished_at),
            finished_at,
        });
    }

    fn reinitialize(&mut self) {
        self.countdown.rewind(self.settings.duration_secs());
        self.answers.reinitialize(self.quiz.acceptable_answers());
        self.found.clear();
        self.attempts = 0;
        self.started_at = None;
        self.summary = None;
    }

    //
    // ─── PROJECTIONS ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        self.quiz.prompt()
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Remaining time as `mm:ss`.
    #[must_use]
    pub fn remaining_display(&self) -> String {
        format_mm_ss(self.remaining_secs())
    }

    /// Progress as `found/total`, each side zero-padded to the configured width.
    #[must_use]
    pub fn progress_display(&self) -> String {
        let width = self.settings.progress_width();
        format!(
            "{found:0width$}/{total:0width$}",
            found = self.found.len(),
            total = self.total,
        )
    }

    /// Found answers in the order they were discovered.
    #[must_use]
    pub fn found_answers(&self) -> &[String] {
        &self.found
    }

    #[must_use]
    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// Number of unique acceptable answers.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Answers not found yet, sorted.
    #[must_use]
    pub fn remaining_answers(&self) -> Vec<&str> {
        self.answers.iter().map(NormalizedAnswer::as_str).collect()
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Arming epoch of the countdown, see `SessionClock::generation`.
    #[must_use]
    pub fn clock_generation(&self) -> u64 {
        self.countdown.generation()
    }

    #[must_use]
    pub fn is_clock_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            prompt: self.quiz.prompt().to_owned(),
            status: self.status,
            remaining_secs: self.remaining_secs(),
            remaining_display: self.remaining_display(),
            progress_display: self.progress_display(),
            found_answers: self.found.clone(),
            found_count: self.found.len(),
            total_count: self.total,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
