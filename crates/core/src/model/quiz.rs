use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizDataError {
    #[error("malformed quiz payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Wire shape of the quiz resource. Both fields may be absent or `null`.
#[derive(Debug, Default, Deserialize)]
struct QuizPayload {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<Vec<String>>,
}

/// A prompt and the answers accepted for it, exactly as fetched.
///
/// Answers keep their original casing and duplicates; normalization happens
/// when a session builds its `AnswerSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizData {
    prompt: String,
    acceptable_answers: Vec<String>,
}

impl QuizData {
    #[must_use]
    pub fn new(prompt: impl Into<String>, acceptable_answers: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            acceptable_answers,
        }
    }

    /// Parse a fetched JSON payload.
    ///
    /// A missing or `null` `question` becomes an empty prompt and a missing or
    /// `null` `answer` becomes an empty answer list.
    ///
    /// # Errors
    ///
    /// Returns `QuizDataError::MalformedPayload` if the bytes are not a JSON
    /// object of the expected shape.
    pub fn from_json(bytes: &[u8]) -> Result<Self, QuizDataError> {
        let payload: QuizPayload = serde_json::from_slice(bytes)?;
        Ok(Self {
            prompt: payload.question.unwrap_or_default(),
            acceptable_answers: payload.answer.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn acceptable_answers(&self) -> &[String] {
        &self.acceptable_answers
    }
}
