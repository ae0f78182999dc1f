//! Hosted repository contents API

use crate::error::{JournalBotError, Result};
use crate::infrastructure::Credentials;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An object that already exists at a remote path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub path: String,
    /// Blob identifier the remote needs to accept an update
    pub sha: String,
}

/// Create-or-update request for one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest<'a> {
    pub path: &'a str,
    pub content: &'a str,
    pub message: &'a str,
    /// `Some` to update an existing object, `None` to create
    pub sha: Option<&'a str>,
}

/// Reference to the commit a write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub sha: String,
    pub url: Option<String>,
}

/// The two operations the publisher needs from a hosted repository
pub trait RemoteContents {
    /// Look up the object at `path`. Absence is `Ok(None)`.
    fn lookup(&self, path: &str) -> Result<Option<RemoteObject>>;

    /// Create or update the object at `request.path`.
    fn put(&self, request: &PutRequest<'_>) -> Result<CommitRef>;
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Signature<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct PutBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    committer: Signature<'a>,
    author: Signature<'a>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
struct CommitInfo {
    sha: String,
    #[serde(default)]
    html_url: Option<String>,
}

/// GitHub REST contents API client
pub struct GitHubContents {
    client: Client,
    api_url: Url,
    repository: String,
    branch: String,
    credentials: Credentials,
}

impl GitHubContents {
    pub fn new(
        api_url: &str,
        repository: &str,
        branch: &str,
        credentials: Credentials,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("journal-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                JournalBotError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        let api_url = Url::parse(api_url.trim_end_matches('/')).map_err(|e| {
            JournalBotError::Configuration(format!("Invalid api_url '{}': {}", api_url, e))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(JournalBotError::Configuration(format!(
                "Invalid api_url '{}': not a base URL",
                api_url
            )));
        }

        Ok(GitHubContents {
            client,
            api_url,
            repository: repository.to_string(),
            branch: branch.to_string(),
            credentials,
        })
    }

    /// Contents endpoint for `path`. Every segment is percent-encoded, so
    /// reserved characters such as `#` or `?` stay part of the path.
    fn contents_url(&self, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "repos",
                    self.credentials.account.as_str(),
                    self.repository.as_str(),
                    "contents",
                ])
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.credentials.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

impl RemoteContents for GitHubContents {
    fn lookup(&self, path: &str) -> Result<Option<RemoteObject>> {
        let url = self.contents_url(path);
        debug!("GET {}", url);

        let resp = self
            .authorized(self.client.get(url.clone()))
            .query(&[("ref", self.branch.as_str())])
            .send()
            .map_err(transport_error)?;

        let status = resp.status();
        debug!("GET {} -> {}", url, status);

        match status {
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                JournalBotError::Authentication(format!("HTTP {}: {}", status, body_of(resp))),
            ),
            s if s.is_success() => {
                let text = resp.text().map_err(transport_error)?;
                // A directory listing comes back as a JSON array.
                let content: ContentResponse = serde_json::from_str(&text).map_err(|_| {
                    JournalBotError::RemoteWrite(format!(
                        "{} exists on the remote but is not a file",
                        path
                    ))
                })?;
                Ok(Some(RemoteObject {
                    path: path.to_string(),
                    sha: content.sha,
                }))
            }
            s if s.is_server_error() => Err(JournalBotError::Network(format!(
                "HTTP {} while looking up {}",
                s, path
            ))),
            s => Err(JournalBotError::RemoteWrite(format!(
                "lookup of {} rejected with HTTP {}: {}",
                path,
                s,
                body_of(resp)
            ))),
        }
    }

    fn put(&self, request: &PutRequest<'_>) -> Result<CommitRef> {
        let url = self.contents_url(request.path);
        let signature = Signature {
            name: &self.credentials.account,
            email: &self.credentials.email,
        };
        let body = PutBody {
            message: request.message,
            content: BASE64.encode(request.content.as_bytes()),
            branch: &self.branch,
            sha: request.sha,
            committer: signature,
            author: signature,
        };
        debug!(
            "PUT {} ({} bytes, update={})",
            url,
            request.content.len(),
            request.sha.is_some()
        );

        let resp = self
            .authorized(self.client.put(url.clone()))
            .json(&body)
            .send()
            .map_err(transport_error)?;

        let status = resp.status();
        debug!("PUT {} -> {}", url, status);

        match status {
            StatusCode::UNAUTHORIZED => Err(JournalBotError::Authentication(format!(
                "HTTP {}: {}",
                status,
                body_of(resp)
            ))),
            s if s.is_success() => {
                let parsed: PutResponse = resp.json().map_err(|e| {
                    JournalBotError::Network(format!("failed to read commit response: {}", e))
                })?;
                Ok(CommitRef {
                    sha: parsed.commit.sha,
                    url: parsed.commit.html_url,
                })
            }
            s if s.is_server_error() => Err(JournalBotError::Network(format!(
                "HTTP {} while writing {}",
                s, request.path
            ))),
            s => Err(JournalBotError::RemoteWrite(format!(
                "HTTP {}: {}",
                s,
                body_of(resp)
            ))),
        }
    }
}

fn transport_error(e: reqwest::Error) -> JournalBotError {
    JournalBotError::Network(e.to_string())
}

fn body_of(resp: Response) -> String {
    resp.text()
        .ok()
        .and_then(|text| {
            serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .or(Some(text))
        })
        .unwrap_or_default()
}
