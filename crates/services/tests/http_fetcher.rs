use std::net::SocketAddr;
use std::time::Duration;

use quiz_core::model::QuizDataError;
use services::{FetchConfig, FetchError, HttpQuizFetcher, QuizFetcher};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one canned HTTP response and returns the request line it received.
async fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        let request = String::from_utf8_lossy(&request).into_owned();
        request.lines().next().unwrap_or_default().to_owned()
    });

    (addr, server)
}

fn fetcher(addr: SocketAddr, quiz_id: u64) -> HttpQuizFetcher {
    HttpQuizFetcher::new(FetchConfig {
        base_url: format!("http://{addr}/"),
        quiz_id,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn fetches_and_parses_the_quiz_resource() {
    let (addr, server) = serve_once(
        "200 OK",
        r#"{"question":"What are all the java keywords?","answer":["abstract","assert"]}"#,
    )
    .await;

    let quiz = fetcher(addr, 1).fetch_quiz().await.unwrap();
    assert_eq!(quiz.prompt(), "What are all the java keywords?");
    assert_eq!(quiz.acceptable_answers(), ["abstract", "assert"]);
    assert_eq!(server.await.unwrap(), "GET /quiz/1 HTTP/1.1");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (addr, server) = serve_once("503 Service Unavailable", "").await;

    let err = fetcher(addr, 2).fetch_quiz().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::HttpStatus(status) if status.as_u16() == 503
    ));
    assert_eq!(server.await.unwrap(), "GET /quiz/2 HTTP/1.1");
}

#[tokio::test]
async fn non_json_body_is_a_payload_error() {
    let (addr, server) = serve_once("200 OK", "<html>maintenance</html>").await;

    let err = fetcher(addr, 1).fetch_quiz().await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Payload(QuizDataError::MalformedPayload(_))
    ));
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(addr, 1).fetch_quiz().await.unwrap_err();
    assert!(matches!(err, FetchError::Http(_)));
}
