#![forbid(unsafe_code)]

pub mod driver;
pub mod error;
pub mod fetcher;
pub mod quiz_service;
pub mod ticker;

pub use quiz_core::Clock;

pub use driver::{SessionHandle, spawn_session};
pub use error::{FetchError, SessionError};
pub use fetcher::{FetchConfig, HttpQuizFetcher, QuizFetcher};
pub use quiz_service::QuizService;
pub use ticker::TickPeriod;
