mod answer;
mod quiz;
mod settings;

pub use answer::{AnswerSet, NormalizedAnswer};
pub use quiz::{QuizData, QuizDataError};
pub use settings::{QuizSettings, SettingsError};
