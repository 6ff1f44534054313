use serde::{Deserialize, Deserializer, Serialize};

/// A track as listed by `/api/music` or `/api/cloud/music`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub has_cover: bool,
    #[serde(default)]
    pub has_lyrics: bool,
}

impl Track {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Unknown title"
        } else {
            &self.title
        }
    }

    pub fn display_artist(&self) -> &str {
        if self.artist.is_empty() {
            "Unknown artist"
        } else {
            &self.artist
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TrackDetail {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LyricsPayload {
    #[serde(default)]
    pub lyrics: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudLibrary {
    #[serde(default)]
    pub cloud_music: Vec<Track>,
    #[serde(default)]
    pub local_music: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials<'a> {
    pub account: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

impl Comment {
    pub fn author(&self) -> &str {
        self.nickname
            .as_deref()
            .or(self.username.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or("Anonymous")
    }

    /// `created_at` as `YYYY-MM-DD HH:MM`, or verbatim when not RFC 3339.
    pub fn posted_at(&self) -> String {
        use time::format_description::well_known::Rfc3339;
        use time::macros::format_description;

        match time::OffsetDateTime::parse(&self.created_at, &Rfc3339) {
            Ok(at) => at
                .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .unwrap_or_else(|_| self.created_at.clone()),
            Err(_) => self.created_at.clone(),
        }
    }
}

/// Body of `POST /api/comments`. Numeric ids go out as numbers.
#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub song_id: serde_json::Value,
    pub content: &'a str,
}

impl<'a> NewComment<'a> {
    pub fn new(song_id: &str, content: &'a str) -> Self {
        let song_id = song_id
            .parse::<i64>()
            .map(serde_json::Value::from)
            .unwrap_or_else(|_| serde_json::Value::from(song_id));
        Self { song_id, content }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}

/// The persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub nickname: String,
    pub email: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_id_accepts_number_and_string() {
        let local: Track =
            serde_json::from_str(r#"{"id":7,"title":"A","artist":"B","album":"C","hasCover":true,"hasLyrics":false}"#)
                .unwrap();
        assert_eq!(local.id, "7");
        assert!(local.has_cover);
        assert!(!local.has_lyrics);

        let cloud: Track = serde_json::from_str(r#"{"id":"9f1c","title":"X","file_name":"x.mp3"}"#).unwrap();
        assert_eq!(cloud.id, "9f1c");
        assert_eq!(cloud.artist, "");
    }

    #[test]
    fn test_comment_author_fallback() {
        let c: Comment = serde_json::from_str(r#"{"username":"bob","content":"hi"}"#).unwrap();
        assert_eq!(c.author(), "bob");
        let c: Comment = serde_json::from_str(r#"{"nickname":"amy","username":"bob"}"#).unwrap();
        assert_eq!(c.author(), "amy");
        assert_eq!(Comment::default().author(), "Anonymous");
    }

    #[test]
    fn test_comment_timestamp_format() {
        let c = Comment {
            created_at: "2024-03-05T14:07:00Z".into(),
            ..Default::default()
        };
        assert_eq!(c.posted_at(), "2024-03-05 14:07");

        let odd = Comment {
            created_at: "yesterday".into(),
            ..Default::default()
        };
        assert_eq!(odd.posted_at(), "yesterday");
    }

    #[test]
    fn test_new_comment_song_id_encoding() {
        let body = serde_json::to_value(NewComment::new("12", "nice")).unwrap();
        assert_eq!(body["song_id"], serde_json::json!(12));
        let body = serde_json::to_value(NewComment::new("abc", "nice")).unwrap();
        assert_eq!(body["song_id"], serde_json::json!("abc"));
    }
}
