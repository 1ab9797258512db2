use std::env;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use quiz_core::model::QuizData;

use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchConfig {
    pub base_url: String,
    pub quiz_id: u64,
    pub timeout: Duration,
}

impl FetchConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:8080";
    pub const DEFAULT_QUIZ_ID: u64 = 1;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Read `QUIZ_API_BASE_URL`, `QUIZ_ID` and `QUIZ_FETCH_TIMEOUT_SECS`.
    ///
    /// Unset, blank or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let base_url = env::var("QUIZ_API_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.base_url);
        let quiz_id = env::var("QUIZ_ID")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(defaults.quiz_id);
        let timeout = env::var("QUIZ_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.timeout, Duration::from_secs);
        Self {
            base_url,
            quiz_id,
            timeout,
        }
    }

    /// Address of the quiz resource: `{base_url}/quiz/{quiz_id}`.
    #[must_use]
    pub fn quiz_url(&self) -> String {
        format!(
            "{}/quiz/{}",
            self.base_url.trim().trim_end_matches('/'),
            self.quiz_id
        )
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.into(),
            quiz_id: Self::DEFAULT_QUIZ_ID,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Source of quiz data.
#[async_trait]
pub trait QuizFetcher: Send + Sync {
    /// Retrieve and parse one quiz.
    async fn fetch_quiz(&self) -> Result<QuizData, FetchError>;
}

/// Fetches the quiz resource over HTTP.
#[derive(Clone, Debug)]
pub struct HttpQuizFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpQuizFetcher {
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl QuizFetcher for HttpQuizFetcher {
    async fn fetch_quiz(&self) -> Result<QuizData, FetchError> {
        let url = self.config.quiz_url();
        tracing::debug!(%url, "requesting quiz");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::warn!(%url, status = %response.status(), "quiz request rejected");
            return Err(FetchError::HttpStatus(response.status()));
        }

        let body = response.bytes().await?;
        let quiz = QuizData::from_json(&body)?;
        tracing::info!(answers = quiz.acceptable_answers().len(), "quiz loaded");
        Ok(quiz)
    }
}
