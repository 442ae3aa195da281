//! Tests for the Gemini REST client against a local stub server.

use feuilleton_core::GenerateRequest;
use feuilleton_error::{FeuilletonErrorKind, GeminiErrorKind};
use feuilleton_interface::StoryDriver;
use feuilleton_models::{GeminiClient, GeminiConfig, RetryPolicy};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;

/// Request bodies received by the stub, in order.
type Received = Arc<Mutex<Vec<String>>>;

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                return String::from_utf8_lossy(&buf[header_end + 4..]).into_owned();
            }
        }
    }
    String::new()
}

/// Serve one canned `(status, body)` reply per connection.
async fn stub_server(replies: Vec<(u16, String)>) -> (String, Arc<AtomicUsize>, Received) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let received: Received = Arc::new(Mutex::new(Vec::new()));

    let counter = hits.clone();
    let bodies = received.clone();
    tokio::spawn(async move {
        for (status, body) in replies {
            let (mut socket, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            let request_body = read_request(&mut socket).await;
            bodies.lock().await.push(request_body);
            let reply = format!(
                "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), hits, received)
}

fn ok_body(text: &str) -> String {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}

fn client(api_base: &str, retry: RetryPolicy) -> GeminiClient {
    let config = GeminiConfig::default()
        .with_api_base(api_base)
        .with_temperature(Some(0.5f32))
        .with_request_timeout_secs(5u64);
    GeminiClient::new("test-key", config, retry).unwrap()
}

fn request(prompt: &str) -> GenerateRequest {
    GenerateRequest::builder().prompt(prompt).build().unwrap()
}

fn fast_retries() -> RetryPolicy {
    RetryPolicy::default()
        .with_initial_backoff_ms(1u64)
        .with_max_delay_secs(1u64)
        .with_max_retries(3usize)
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let (base, hits, received) = stub_server(vec![(200, ok_body("Chapter one."))]).await;

    let response = client(&base, fast_retries())
        .generate(&request("Write chapter one."))
        .await
        .unwrap();

    assert_eq!(response.text, "Chapter one.");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let body: serde_json::Value = serde_json::from_str(&received.lock().await[0]).unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Write chapter one.");
    assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
}

#[tokio::test]
async fn test_transient_status_is_retried() {
    let (base, hits, _) = stub_server(vec![
        (503, r#"{"error": "overloaded"}"#.to_string()),
        (429, r#"{"error": "slow down"}"#.to_string()),
        (200, ok_body("Finally.")),
    ])
    .await;

    let response = client(&base, fast_retries())
        .generate(&request("Try hard."))
        .await
        .unwrap();

    assert_eq!(response.text, "Finally.");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_permanent_status_is_not_retried() {
    let (base, hits, _) = stub_server(vec![
        (400, r#"{"error": "bad request"}"#.to_string()),
        (200, ok_body("never sent")),
    ])
    .await;

    let err = client(&base, fast_retries())
        .generate(&request("Broken."))
        .await
        .unwrap_err();

    match err.kind() {
        FeuilletonErrorKind::Gemini(e) => assert!(matches!(
            e.kind,
            GeminiErrorKind::HttpError {
                status_code: 400,
                ..
            }
        )),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_disabled_retry_fails_fast() {
    let (base, hits, _) = stub_server(vec![(503, "{}".to_string())]).await;

    let result = client(&base, RetryPolicy::no_retry())
        .generate(&request("Once."))
        .await;

    assert!(result.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_blocked_prompt_is_an_empty_response_error() {
    let body = json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string();
    let (base, _, _) = stub_server(vec![(200, body)]).await;

    let err = client(&base, fast_retries())
        .generate(&request("Something unsafe."))
        .await
        .unwrap_err();

    match err.kind() {
        FeuilletonErrorKind::Gemini(e) => {
            assert!(matches!(&e.kind, GeminiErrorKind::EmptyResponse(reason) if reason.contains("SAFETY")))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_request_settings_override_config() {
    let gemini = client("http://localhost:1", RetryPolicy::no_retry());
    let req = GenerateRequest::builder()
        .prompt("p")
        .temperature(Some(1.0f32))
        .max_tokens(Some(64u32))
        .build()
        .unwrap();

    let body = serde_json::to_value(gemini.convert_request(&req).unwrap()).unwrap();
    assert_eq!(body["generationConfig"]["temperature"], json!(1.0));
    assert_eq!(body["generationConfig"]["maxOutputTokens"], json!(64));
    assert!(body["generationConfig"].get("topK").is_none());
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_live_gemini_call() {
    let _ = dotenvy::dotenv();
    let gemini = GeminiClient::from_env(GeminiConfig::default(), RetryPolicy::default()).unwrap();
    let response = gemini
        .generate(&request("Reply with the single word: lantern"))
        .await
        .unwrap();
    assert!(!response.text.is_empty());
}
