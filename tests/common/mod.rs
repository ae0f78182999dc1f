#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

pub const TOKEN: &str = "ghp_integration_token";
pub const ACCOUNT: &str = "octocat";
pub const EMAIL: &str = "octocat@example.com";

pub fn journal_bot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("journal-bot").unwrap();
    for var in [
        "GITHUB_TOKEN",
        "GITHUB_USERNAME",
        "GITHUB_EMAIL",
        "JOURNAL_BOT_ROOT",
        "JOURNAL_BOT_REPOSITORY",
        "JOURNAL_BOT_API_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Command with credentials set and the API pointed at `api_url`.
pub fn authed_cmd(root: &Path, api_url: &str) -> Command {
    let mut cmd = journal_bot_cmd();
    cmd.arg("--root")
        .arg(root)
        .env("GITHUB_TOKEN", TOKEN)
        .env("GITHUB_USERNAME", ACCOUNT)
        .env("GITHUB_EMAIL", EMAIL)
        .env("JOURNAL_BOT_API_URL", api_url);
    cmd
}

/// A URL on the loopback interface with nothing listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path portion of the request target, without the query string
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StubState {
    /// path -> (blob sha, base64 content)
    objects: HashMap<String, (String, String)>,
    /// Paths that resolve to a directory listing
    directories: HashSet<String>,
    requests: Vec<RecordedRequest>,
    writes: usize,
}

/// In-process stand-in for a hosted repository contents API.
///
/// Keeps one object per path so create-then-update flows behave like the
/// real service. `lookup_status`/`put_status` force a fixed error reply.
pub struct StubContentsApi {
    pub base_url: String,
    state: Arc<Mutex<StubState>>,
}

impl StubContentsApi {
    pub fn start() -> Self {
        Self::start_with(None, None)
    }

    pub fn start_with(lookup_status: Option<u16>, put_status: Option<u16>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let state = Arc::new(Mutex::new(StubState::default()));

        let server_state = state.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                handle(stream, &server_state, lookup_status, put_status);
            }
        });

        StubContentsApi { base_url, state }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Make `path` answer lookups with a directory listing.
    pub fn add_directory(&self, path: &str) {
        self.state
            .lock()
            .unwrap()
            .directories
            .insert(path.to_string());
    }

    pub fn object_count(&self) -> usize {
        self.state.lock().unwrap().objects.len()
    }

    /// Decoded content stored at a repository path
    pub fn content_of(&self, path: &str) -> Option<String> {
        use base64::Engine;
        let state = self.state.lock().unwrap();
        let (_, encoded) = state.objects.get(path)?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        Some(String::from_utf8(bytes).unwrap())
    }
}

fn handle(
    stream: TcpStream,
    state: &Mutex<StubState>,
    lookup_status: Option<u16>,
    put_status: Option<u16>,
) {
    let mut reader = BufReader::new(&stream);

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() || line == "\r\n" || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value),
                _ => {}
            }
        }
    }

    let mut body_bytes = vec![0u8; content_length];
    if content_length > 0 && reader.read_exact(&mut body_bytes).is_err() {
        return;
    }
    let body: Option<Value> = serde_json::from_slice(&body_bytes).ok();

    let (path, query) = match target.split_once('?') {
        Some((p, q)) => (p.to_string(), q.to_string()),
        None => (target.clone(), String::new()),
    };

    let (status, reply) = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            query,
            authorization,
            body: body.clone(),
        });
        route(&mut state, &method, &path, body, lookup_status, put_status)
    };

    let payload = reply.to_string();
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    );
    let mut out = &stream;
    let _ = out.write_all(response.as_bytes());
    let _ = out.flush();
}

fn route(
    state: &mut StubState,
    method: &str,
    path: &str,
    body: Option<Value>,
    lookup_status: Option<u16>,
    put_status: Option<u16>,
) -> (u16, Value) {
    let Some((_, repo_path)) = path.split_once("/contents/") else {
        return (404, json!({ "message": "Not Found" }));
    };
    let repo_path = repo_path.to_string();

    match method {
        "GET" => {
            if let Some(status) = lookup_status {
                return (status, json!({ "message": "Bad credentials" }));
            }
            if state.directories.contains(&repo_path) {
                return (200, json!([{ "name": "2024-03-01.md", "type": "file" }]));
            }
            match state.objects.get(&repo_path) {
                Some((sha, _)) => (200, json!({ "path": repo_path, "sha": sha })),
                None => (404, json!({ "message": "Not Found" })),
            }
        }
        "PUT" => {
            if let Some(status) = put_status {
                return (status, json!({ "message": "Write rejected" }));
            }
            let body = body.unwrap_or(Value::Null);
            let sent_sha = body["sha"].as_str().map(str::to_string);
            let current = state.objects.get(&repo_path).map(|(sha, _)| sha.clone());
            if current != sent_sha {
                return (409, json!({ "message": "sha does not match" }));
            }

            state.writes += 1;
            let blob = format!("blob{}", state.writes);
            let commit = format!("commit{}", state.writes);
            let content = body["content"].as_str().unwrap_or_default().to_string();
            state
                .objects
                .insert(repo_path.clone(), (blob.clone(), content));

            let status = if current.is_some() { 200 } else { 201 };
            (
                status,
                json!({
                    "content": { "path": repo_path, "sha": blob },
                    "commit": {
                        "sha": commit,
                        "html_url": format!("https://example.test/commit/{}", commit),
                    },
                }),
            )
        }
        _ => (405, json!({ "message": "Method Not Allowed" })),
    }
}
