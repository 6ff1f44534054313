use crate::api::models::{
    AuthStatus, CloudLibrary, Comment, Credentials, ErrorBody, LoginResponse, LyricsPayload,
    NewComment, Track, TrackDetail,
};
use anyhow::Context;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Cookie the server uses to identify a logged-in session.
pub const SESSION_COOKIE: &str = "user_id";

/// A non-2xx answer from the server, carrying its `{error}` message when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "server returned {}", self.status)
        } else {
            f.write_str(&self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base: Url,
    jar: Arc<Jar>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    /// Builds a client for `base_url`. A known session id is replayed as the
    /// session cookie so requests are authenticated from the start.
    pub fn new(base_url: &str, timeout: Duration, session_id: Option<&str>) -> anyhow::Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("invalid server url: {base_url}"))?;

        let jar = Arc::new(Jar::default());
        if let Some(id) = session_id.filter(|id| !id.is_empty()) {
            jar.add_cookie_str(&format!("{SESSION_COOKIE}={id}; Path=/"), &base);
        }

        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .build()
            .context("build reqwest client")?;

        Ok(Self {
            inner: Arc::new(Inner { http, base, jar }),
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base.as_str().trim_end_matches('/')
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url(), path_and_query)
    }

    /// `Cookie:` header value for clients outside reqwest (the media player).
    pub fn cookie_header(&self) -> Option<String> {
        self.inner
            .jar
            .cookies(&self.inner.base)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    pub fn cover_url(&self, id: &str) -> String {
        self.url(&format!("/api/cover?id={}", urlencoding::encode(id)))
    }

    pub fn audio_url(&self, id: &str) -> String {
        self.url(&format!("/api/audio?id={}", urlencoding::encode(id)))
    }

    pub fn cloud_stream_url(&self, id: &str) -> String {
        self.url(&format!("/api/cloud/stream?id={}", urlencoding::encode(id)))
    }

    pub async fn list_music(&self) -> anyhow::Result<Vec<Track>> {
        let resp = self
            .inner
            .http
            .get(self.url("/api/music"))
            .send()
            .await
            .context("send music list request")?;
        decode(resp, "music list").await
    }

    /// Asks the server to rescan its library. The response body is ignored.
    pub async fn rescan(&self) -> anyhow::Result<()> {
        let resp = self
            .inner
            .http
            .get(self.url("/api/rescan"))
            .send()
            .await
            .context("send rescan request")?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn track(&self, id: &str) -> anyhow::Result<TrackDetail> {
        let resp = self
            .inner
            .http
            .get(self.url(&format!("/api/track?id={}", urlencoding::encode(id))))
            .send()
            .await
            .context("send track request")?;
        decode(resp, "track").await
    }

    pub async fn lyrics(&self, id: &str) -> anyhow::Result<String> {
        self.fetch_lyrics("/api/lyrics", id).await
    }

    pub async fn lyrics_raw(&self, id: &str) -> anyhow::Result<String> {
        self.fetch_lyrics("/api/lyrics_raw", id).await
    }

    async fn fetch_lyrics(&self, endpoint: &str, id: &str) -> anyhow::Result<String> {
        let resp = self
            .inner
            .http
            .get(self.url(&format!("{endpoint}?id={}", urlencoding::encode(id))))
            .send()
            .await
            .context("send lyrics request")?;
        let payload: LyricsPayload = decode(resp, "lyrics").await?;
        Ok(payload.lyrics)
    }

    pub async fn cloud_music(&self) -> anyhow::Result<CloudLibrary> {
        let resp = self
            .inner
            .http
            .get(self.url("/api/cloud/music"))
            .send()
            .await
            .context("send cloud music request")?;
        decode(resp, "cloud music").await
    }

    pub async fn check_auth(&self) -> anyhow::Result<AuthStatus> {
        let resp = self
            .inner
            .http
            .get(self.url("/api/check_auth"))
            .send()
            .await
            .context("send check_auth request")?;
        decode(resp, "check_auth").await
    }

    pub async fn login(&self, account: &str, password: &str) -> anyhow::Result<LoginResponse> {
        self.submit_credentials("/api/login", account, password).await
    }

    pub async fn register(&self, account: &str, password: &str) -> anyhow::Result<LoginResponse> {
        self.submit_credentials("/api/register", account, password).await
    }

    async fn submit_credentials(
        &self,
        endpoint: &str,
        account: &str,
        password: &str,
    ) -> anyhow::Result<LoginResponse> {
        let resp = self
            .inner
            .http
            .post(self.url(endpoint))
            .json(&Credentials { account, password })
            .send()
            .await
            .with_context(|| format!("send {endpoint} request"))?;
        decode(resp, endpoint).await
    }

    pub async fn logout(&self) -> anyhow::Result<()> {
        let resp = self
            .inner
            .http
            .post(self.url("/api/logout"))
            .send()
            .await
            .context("send logout request")?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn comments(&self, song_id: &str) -> anyhow::Result<Vec<Comment>> {
        let resp = self
            .inner
            .http
            .get(self.url(&format!(
                "/api/comments?song_id={}",
                urlencoding::encode(song_id)
            )))
            .send()
            .await
            .context("send comments request")?;
        decode(resp, "comments").await
    }

    pub async fn post_comment(&self, song_id: &str, content: &str) -> anyhow::Result<Comment> {
        let resp = self
            .inner
            .http
            .post(self.url("/api/comments"))
            .json(&NewComment::new(song_id, content))
            .send()
            .await
            .context("send comment")?;
        decode(resp, "posted comment").await
    }
}

async fn check_status(resp: Response) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|e| e.error)
        .unwrap_or_default();
    Err(ApiError { status, message }.into())
}

async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> anyhow::Result<T> {
    check_status(resp)
        .await?
        .json()
        .await
        .with_context(|| format!("parse {what} json"))
}

/// The message to show a user for a failed action.
pub fn user_message(err: &anyhow::Error, fallback: &str) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(api) if !api.message.is_empty() => api.message.clone(),
        _ => fallback.to_string(),
    }
}
