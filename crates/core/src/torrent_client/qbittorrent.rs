//! qBittorrent torrent client implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::SET_COOKIE, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::ServerConfig;

use super::{TorrentClient, TorrentClientError, TorrentFile, TorrentInfo, TorrentState};

/// How requests are authenticated once logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    /// Session cookie held by the cookie store.
    Cookie,
    /// Login returned no session cookie; send credentials on every request.
    Basic,
}

/// qBittorrent client implementation.
pub struct QBittorrentClient {
    client: Client,
    config: ServerConfig,
    /// Current auth mode (cleared on session expiry).
    session: Arc<RwLock<Option<AuthMode>>>,
}

impl QBittorrentClient {
    /// Create a new qBittorrent client.
    ///
    /// Certificate verification is only relaxed when `insecure_tls` is set,
    /// and only for this client's connections.
    pub fn new(config: ServerConfig) -> Result<Self, TorrentClientError> {
        if config.insecure_tls {
            warn!(
                "TLS certificate verification disabled for {}",
                config.url
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| {
                TorrentClientError::Internal(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            config,
            session: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Login and record how subsequent requests authenticate.
    async fn login(&self) -> Result<AuthMode, TorrentClientError> {
        let url = format!("{}/api/v2/auth/login", self.base_url());

        let params = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        let has_cookie = response.headers().contains_key(SET_COOKIE);
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::FORBIDDEN || body.trim() == "Fails." {
            return Err(TorrentClientError::AuthenticationFailed(
                "Invalid credentials".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(TorrentClientError::AuthenticationFailed(format!(
                "HTTP {}: {}",
                status,
                snippet(&body)
            )));
        }

        let mode = if has_cookie {
            debug!("qBittorrent login successful");
            AuthMode::Cookie
        } else {
            warn!("qBittorrent login returned no session cookie, using HTTP basic auth");
            AuthMode::Basic
        };

        *self.session.write().await = Some(mode);
        Ok(mode)
    }

    /// Ensure we have a valid session, logging in if needed.
    async fn ensure_authenticated(&self) -> Result<AuthMode, TorrentClientError> {
        if let Some(mode) = *self.session.read().await {
            return Ok(mode);
        }
        self.login().await
    }

    fn build_request(
        &self,
        method: Method,
        url: &str,
        form: Option<&[(&str, &str)]>,
        mode: AuthMode,
    ) -> RequestBuilder {
        let mut request = self.client.request(method, url);
        if let Some(params) = form {
            request = request.form(params);
        }
        if mode == AuthMode::Basic {
            request = request.basic_auth(&self.config.username, Some(&self.config.password));
        }
        request
    }

    /// Make an authenticated request, re-authenticating once if the session expired.
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        form: Option<&[(&str, &str)]>,
    ) -> Result<String, TorrentClientError> {
        let mode = self.ensure_authenticated().await?;

        let url = format!("{}{}", self.base_url(), endpoint);
        debug!(%method, %url, "qBittorrent request");

        let response = self
            .build_request(method.clone(), &url, form, mode)
            .send()
            .await
            .map_err(map_request_error)?;

        if response.status() == StatusCode::FORBIDDEN {
            warn!("qBittorrent session expired, re-authenticating");
            *self.session.write().await = None;
            let mode = self.login().await?;

            let response = self
                .build_request(method, &url, form, mode)
                .send()
                .await
                .map_err(map_request_error)?;

            return read_body(response).await;
        }

        read_body(response).await
    }
}

/// Map a transport-level reqwest failure.
fn map_request_error(e: reqwest::Error) -> TorrentClientError {
    if e.is_timeout() {
        TorrentClientError::Timeout
    } else if e.is_connect() {
        TorrentClientError::ConnectionFailed(e.to_string())
    } else {
        TorrentClientError::ApiError(e.to_string())
    }
}

async fn read_body(response: Response) -> Result<String, TorrentClientError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TorrentClientError::ApiError(e.to_string()))?;

    if status == StatusCode::NOT_FOUND {
        return Err(TorrentClientError::TorrentNotFound(snippet(&body)));
    }
    if !status.is_success() {
        return Err(TorrentClientError::ApiError(format!(
            "HTTP {}: {}",
            status,
            snippet(&body)
        )));
    }

    Ok(body)
}

fn snippet(body: &str) -> String {
    body.chars().take(100).collect()
}

/// qBittorrent torrent info response.
#[derive(Debug, Deserialize)]
struct QBTorrentInfo {
    hash: String,
    name: String,
    state: String,
    #[serde(default)]
    progress: f64,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    amount_left: i64,
    #[serde(default)]
    save_path: String,
    #[serde(default)]
    category: String,
}

impl QBTorrentInfo {
    fn into_torrent_info(self) -> TorrentInfo {
        TorrentInfo {
            hash: self.hash.to_lowercase(),
            name: self.name,
            state: parse_qb_state(&self.state),
            progress: self.progress,
            size_bytes: self.size.max(0) as u64,
            amount_left: self.amount_left.max(0) as u64,
            save_path: if self.save_path.is_empty() {
                None
            } else {
                Some(self.save_path)
            },
            category: if self.category.is_empty() {
                None
            } else {
                Some(self.category)
            },
        }
    }
}

/// qBittorrent torrent file response.
#[derive(Debug, Deserialize)]
struct QBTorrentFile {
    /// Missing on WebUI API versions before 2.8.2.
    index: Option<u32>,
    name: String,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    progress: f64,
    priority: i32,
}

impl QBTorrentFile {
    fn into_torrent_file(self, position: usize) -> TorrentFile {
        TorrentFile {
            index: self.index.unwrap_or(position as u32),
            name: self.name,
            size_bytes: self.size.max(0) as u64,
            progress: self.progress,
            priority: self.priority,
        }
    }
}

/// Parse qBittorrent state string to TorrentState.
fn parse_qb_state(state: &str) -> TorrentState {
    match state {
        "downloading" | "forcedDL" | "allocating" => TorrentState::Downloading,
        "metaDL" | "forcedMetaDL" => TorrentState::MetaDownload,
        "uploading" | "forcedUP" => TorrentState::Seeding,
        "pausedDL" | "pausedUP" | "stoppedDL" | "stoppedUP" => TorrentState::Paused,
        "checkingDL" | "checkingUP" | "checkingResumeData" => TorrentState::Checking,
        "moving" => TorrentState::Moving,
        "queuedDL" | "queuedUP" => TorrentState::Queued,
        "stalledDL" | "stalledUP" => TorrentState::Stalled,
        "missingFiles" => TorrentState::MissingFiles,
        "error" => TorrentState::Error,
        _ => TorrentState::Unknown,
    }
}

#[async_trait]
impl TorrentClient for QBittorrentClient {
    fn name(&self) -> &str {
        "qbittorrent"
    }

    async fn list_torrents(&self) -> Result<Vec<TorrentInfo>, TorrentClientError> {
        let response = self
            .request(Method::GET, "/api/v2/torrents/info", None)
            .await?;

        let torrents: Vec<QBTorrentInfo> = serde_json::from_str(&response).map_err(|e| {
            TorrentClientError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        Ok(torrents
            .into_iter()
            .map(QBTorrentInfo::into_torrent_info)
            .collect())
    }

    async fn list_files(&self, hash: &str) -> Result<Vec<TorrentFile>, TorrentClientError> {
        let hash_lower = hash.to_lowercase();
        let endpoint = format!(
            "/api/v2/torrents/files?hash={}",
            urlencoding::encode(&hash_lower)
        );

        let response = self
            .request(Method::GET, &endpoint, None)
            .await
            .map_err(|e| match e {
                TorrentClientError::TorrentNotFound(_) => {
                    TorrentClientError::TorrentNotFound(hash.to_string())
                }
                other => other,
            })?;

        let files: Vec<QBTorrentFile> = serde_json::from_str(&response).map_err(|e| {
            TorrentClientError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        Ok(files
            .into_iter()
            .enumerate()
            .map(|(position, f)| f.into_torrent_file(position))
            .collect())
    }

    async fn remove_torrent(&self, hash: &str, delete_files: bool) -> Result<(), TorrentClientError> {
        let hash_lower = hash.to_lowercase();
        let delete_str = if delete_files { "true" } else { "false" };

        let params = [("hashes", hash_lower.as_str()), ("deleteFiles", delete_str)];

        self.request(Method::POST, "/api/v2/torrents/delete", Some(&params[..]))
            .await?;

        Ok(())
    }
}
