use crate::api::client::ApiClient;
use crate::api::models::Track;
use serde::{Deserialize, Serialize};

/// Where tracks are listed and streamed from. Chosen once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSource {
    /// The server's scanned library
    #[default]
    Local,
    /// Uploads of the logged-in user
    Cloud,
}

impl StreamSource {
    pub fn label(self) -> &'static str {
        match self {
            StreamSource::Local => "Library",
            StreamSource::Cloud => "Cloud",
        }
    }

    pub fn resolve_stream_url(self, api: &ApiClient, track_id: &str) -> String {
        match self {
            StreamSource::Local => api.audio_url(track_id),
            StreamSource::Cloud => api.cloud_stream_url(track_id),
        }
    }

    /// Extra HTTP headers the media player must send with the stream request.
    pub fn stream_headers(self, api: &ApiClient) -> Vec<String> {
        match self {
            StreamSource::Local => Vec::new(),
            StreamSource::Cloud => api
                .cookie_header()
                .map(|cookie| vec![format!("Cookie: {cookie}")])
                .unwrap_or_default(),
        }
    }

    pub async fn list_tracks(self, api: &ApiClient) -> anyhow::Result<Vec<Track>> {
        match self {
            StreamSource::Local => api.list_music().await,
            StreamSource::Cloud => Ok(api.cloud_music().await?.cloud_music),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_resolve_stream_url_per_source() {
        let api = ApiClient::new("http://srv", Duration::from_secs(1), Some("u1")).unwrap();
        assert_eq!(StreamSource::Local.resolve_stream_url(&api, "4"), "http://srv/api/audio?id=4");
        assert_eq!(
            StreamSource::Cloud.resolve_stream_url(&api, "abc"),
            "http://srv/api/cloud/stream?id=abc"
        );
        assert!(StreamSource::Local.stream_headers(&api).is_empty());
        assert_eq!(StreamSource::Cloud.stream_headers(&api), vec!["Cookie: user_id=u1".to_string()]);
    }

    #[test]
    fn test_source_config_names() {
        #[derive(Deserialize)]
        struct Wrap {
            source: StreamSource,
        }
        let w: Wrap = toml::from_str(r#"source = "cloud""#).unwrap();
        assert_eq!(w.source, StreamSource::Cloud);
    }

    #[tokio::test]
    async fn test_cloud_source_lists_uploads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/cloud/music"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cloud_music": [{"id": "up-1", "title": "Mine", "artist": "Me", "album": ""}],
                "local_music": [{"id": "9", "title": "Theirs"}],
                "total_count": 2
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        let tracks = StreamSource::Cloud.list_tracks(&api).await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "up-1");
    }
}
