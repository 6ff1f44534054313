use crate::api::{Comment, Track, TrackDetail};
use crate::auth::AuthEvent;
use crate::lyrics::ParsedLyrics;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    Network(NetworkEvent),
    Auth(AuthEvent),
    CarouselTick,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Playing,
    Paused,
    TimeTick { seconds: f64 },
    Duration { seconds: f64 },
    Ended,
    Error(String),
}

/// Results of spawned fetches. Per-track results carry the track id so
/// late arrivals for a track the user already left can be dropped.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    /// Failure worth a toast; screens fall back to their placeholders
    Error(String),
    /// User-initiated action failed; shown as a blocking alert
    ActionFailed(String),
    LibraryLoaded { tracks: Vec<Track> },
    TrackDetail { track_id: String, detail: TrackDetail },
    LyricsLoaded { track_id: String, lyrics: ParsedLyrics },
    LyricsUnavailable { track_id: String },
    CommentsLoaded { track_id: String, comments: Vec<Comment> },
    CommentPosted { track_id: String, comment: Comment },
}
