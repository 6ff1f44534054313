//! Lyrics for the track on screen
//!
//! This module provides:
//! - Time-tag parser for timed and plain lyrics
//! - Synchronizer that follows playback and drives the lyrics viewport

pub mod parser;
pub mod sync;

use crate::api::ApiClient;

pub use parser::ParsedLyrics;
pub use sync::LyricSync;

/// Fetch lyrics for a track, preferring the raw (time-tagged) text.
pub async fn fetch_lyrics(api: &ApiClient, track_id: &str) -> anyhow::Result<ParsedLyrics> {
    match api.lyrics_raw(track_id).await {
        Ok(raw) if !raw.trim().is_empty() => return Ok(ParsedLyrics::parse(&raw)),
        Ok(_) => {}
        Err(e) => tracing::debug!(track_id, error = %format!("{e:#}"), "raw lyrics unavailable"),
    }

    let text = api.lyrics(track_id).await?;
    Ok(ParsedLyrics::parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::parser::LyricsMode;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_falls_back_to_formatted_lyrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lyrics_raw"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/lyrics"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lyrics": "first\nsecond"})))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        let lyrics = fetch_lyrics(&api, "1").await.unwrap();
        assert_eq!(lyrics.mode, LyricsMode::Plain);
        assert_eq!(lyrics.len(), 2);
    }

    #[tokio::test]
    async fn test_prefers_raw_lyrics() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/lyrics_raw"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lyrics": "[00:01.00]a\n[00:02.00]b"})))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        let lyrics = fetch_lyrics(&api, "1").await.unwrap();
        assert!(lyrics.is_tagged());
        assert_eq!(lyrics.len(), 2);
    }
}
