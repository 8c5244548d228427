//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::thread;

use assert_cmd::Command;
use tempfile::TempDir;

/// How the stub completion endpoint answers.
#[derive(Clone, Copy)]
pub enum StubBehavior {
    /// Classify by keyword; `???` always gets a non-JSON reply.
    Keywords,
    /// Every request fails with HTTP 500.
    ServerError,
}

/// Starts an OpenAI-compatible stub on a random port and returns its base URL.
///
/// The server thread lives until the test process exits.
pub fn start_stub_server(behavior: StubBehavior) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            handle_connection(stream, behavior);
        }
    });

    format!("http://{addr}")
}

fn handle_connection(stream: TcpStream, behavior: StubBehavior) {
    let mut reader = BufReader::new(stream);
    let mut content_length = 0;

    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 {
            return;
        }
        let header = header.trim_end();
        if header.is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0; content_length];
    if reader.read_exact(&mut body).is_err() {
        return;
    }
    let body = String::from_utf8_lossy(&body);

    let response = match behavior {
        StubBehavior::ServerError => {
            http_response("500 Internal Server Error", "text/plain", "boom")
        }
        StubBehavior::Keywords => {
            let reply = if body.contains("???") {
                "I cannot tell.".to_string()
            } else if body.contains("I love this!") {
                "{\n  \"sentiment\": \"positive\"\n}".to_string()
            } else if body.contains("I hate waiting") {
                "{\n  \"sentiment\": \"negative\"\n}".to_string()
            } else {
                "{\n  \"sentiment\": \"neutral\"\n}".to_string()
            };
            http_response("200 OK", "text/event-stream", &sse_body(&reply))
        }
    };

    let mut stream = reader.into_inner();
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Splits `reply` into two streamed deltas followed by `[DONE]`.
fn sse_body(reply: &str) -> String {
    let split = reply.len() / 2;
    let split = (split..reply.len())
        .find(|i| reply.is_char_boundary(*i))
        .unwrap_or(reply.len());
    let (head, tail) = reply.split_at(split);

    let mut body = String::from("data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n");
    for part in [head, tail] {
        let event = serde_json::json!({ "choices": [{ "delta": { "content": part } }] });
        body.push_str(&format!("data: {event}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn http_response(status: &str, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

/// Writes a config file pointing the `stub` provider at `endpoint`.
pub fn write_stub_config(config_home: &Path, endpoint: &str) {
    let dir = config_home.join("sentiment");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        format!(
            r#"[sentiment]
provider = "stub"
model = "stub-model"
max_retries = 0
retry_pause_ms = 0

[providers.stub]
endpoint = "{endpoint}"
models = ["stub-model"]
"#
        ),
    )
    .unwrap();
}

/// The binary with an isolated config directory and no OpenAI environment.
#[allow(deprecated)]
pub fn sentiment(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sentiment").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_MODEL")
        .env_remove("OPENAI_ENDPOINT")
        .env_remove("RUST_LOG");
    for proxy in [
        "HTTP_PROXY",
        "HTTPS_PROXY",
        "ALL_PROXY",
        "http_proxy",
        "https_proxy",
        "all_proxy",
    ] {
        cmd.env_remove(proxy);
    }
    cmd
}
