#![forbid(unsafe_code)]

pub mod clock;
pub mod model;
pub mod session;
pub mod time;

pub use clock::{ClockEvent, Countdown, SessionClock};
pub use session::{MatchResult, QuizSession, SessionSnapshot, SessionStatus, SessionSummary};
pub use time::Clock;
