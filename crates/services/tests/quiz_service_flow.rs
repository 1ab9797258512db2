use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{QuizData, QuizDataError, QuizSettings};
use quiz_core::time::fixed_clock;
use quiz_core::{MatchResult, SessionStatus};
use services::{FetchError, QuizFetcher, QuizService, TickPeriod};

struct StaticFetcher {
    payload: &'static [u8],
}

#[async_trait]
impl QuizFetcher for StaticFetcher {
    async fn fetch_quiz(&self) -> Result<QuizData, FetchError> {
        Ok(QuizData::from_json(self.payload)?)
    }
}

fn service(payload: &'static [u8]) -> QuizService {
    QuizService::new(Arc::new(StaticFetcher { payload }))
        .with_settings(QuizSettings::with_duration(30).unwrap())
        .with_clock(fixed_clock())
        .with_tick_period(TickPeriod::SECOND)
}

#[tokio::test]
async fn opens_a_session_for_the_fetched_quiz() {
    let service = service(
        br#"{"question":"What are all the java keywords?","answer":["abstract","assert","boolean","Boolean"]}"#,
    );

    let handle = service.open_session().await.unwrap();
    let initial = handle.snapshot();
    assert_eq!(initial.prompt, "What are all the java keywords?");
    assert_eq!(initial.status, SessionStatus::NotStarted);
    assert_eq!(initial.progress_display, "00/03");
    assert_eq!(initial.remaining_display, "00:30");

    handle.start().await.unwrap();
    assert_eq!(handle.submit("Assert").await.unwrap(), MatchResult::Accepted);
    assert_eq!(handle.submit("assert").await.unwrap(), MatchResult::Rejected);
    assert_eq!(handle.snapshot().found_answers, ["Assert"]);
}

#[tokio::test]
async fn payload_without_answers_is_an_instant_win() {
    let service = service(br#"{"question":null}"#);
    let handle = service.open_session().await.unwrap();

    assert_eq!(handle.snapshot().prompt, "");
    let started = handle.start().await.unwrap();
    assert_eq!(started.status, SessionStatus::Won);
}

#[tokio::test]
async fn malformed_payload_opens_no_session() {
    let service = service(b"<html>502 Bad Gateway</html>");
    let err = service.open_session().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Payload(QuizDataError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn load_quiz_keeps_original_answers() {
    let service = service(br#"{"question":"Q","answer":["While","while"]}"#);
    let quiz = service.load_quiz().await.unwrap();
    assert_eq!(quiz.acceptable_answers(), ["While", "while"]);
    assert_eq!(service.settings().duration_secs(), 30);
}
