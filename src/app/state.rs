use crate::api::{Comment, CurrentUser, StreamSource, Track, TrackDetail};
use crate::app::carousel::Carousel;
use crate::lyrics::LyricSync;
use crate::player::PlaybackController;
use crate::queue::Playlist;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Song,
    Account,
    Help,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Song, Screen::Account, Screen::Help];

    pub fn next(self) -> Self {
        match self {
            Screen::Home => Screen::Song,
            Screen::Song => Screen::Account,
            Screen::Account => Screen::Help,
            Screen::Help => Screen::Home,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Screen::Home => Screen::Help,
            Screen::Song => Screen::Home,
            Screen::Account => Screen::Song,
            Screen::Help => Screen::Account,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Screen::Home)
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Song => "song",
            Screen::Account => "account",
            Screen::Help => "help",
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .unwrap_or(Screen::Home)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SongFocus {
    #[default]
    Lyrics,
    Comments,
    CommentInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountMode {
    #[default]
    Login,
    Register,
}

impl AccountMode {
    pub fn toggle(self) -> Self {
        match self {
            AccountMode::Login => AccountMode::Register,
            AccountMode::Register => AccountMode::Login,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountMode::Login => "Log in",
            AccountMode::Register => "Register",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccountField {
    #[default]
    Account,
    Password,
}

#[derive(Debug, Clone, Default)]
pub struct AccountForm {
    pub mode: AccountMode,
    pub field: AccountField,
    pub account: String,
    pub password: String,
    pub submitting: bool,
}

impl AccountForm {
    pub fn active_input(&mut self) -> &mut String {
        match self.field {
            AccountField::Account => &mut self.account,
            AccountField::Password => &mut self.password,
        }
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            AccountField::Account => AccountField::Password,
            AccountField::Password => AccountField::Account,
        };
    }

    pub fn reset(&mut self) {
        let mode = self.mode;
        *self = Self {
            mode,
            ..Default::default()
        };
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            created_at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > Duration::from_secs(3)
    }
}

/// Modal message that holds input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
}

/// Selection and scroll position over the home track list.
#[derive(Debug, Clone, Default)]
pub struct ListCursor {
    pub selected: usize,
    pub scroll_offset: usize,
    pub loading: bool,
    pub loaded: bool,
}

impl ListCursor {
    pub fn select_prev(&mut self, by: usize) {
        self.selected = self.selected.saturating_sub(by);
    }

    pub fn select_next(&mut self, by: usize, len: usize) {
        if len > 0 {
            self.selected = (self.selected + by).min(len - 1);
        }
    }

    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn update_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected - visible_height + 1;
        }
    }
}

/// Everything the song detail screen shows for the current track.
#[derive(Debug, Clone, Default)]
pub struct SongView {
    pub track: Option<Track>,
    pub detail: Option<TrackDetail>,
    pub lyrics: Option<LyricSync>,
    pub lyrics_loading: bool,
    pub comments: Vec<Comment>,
    pub comments_loading: bool,
    pub comments_scroll: usize,
    pub comment_draft: String,
    pub posting_comment: bool,
    pub focus: SongFocus,
}

impl SongView {
    pub fn track_id(&self) -> Option<&str> {
        self.track.as_ref().map(|t| t.id.as_str())
    }

    pub fn is_current(&self, track_id: &str) -> bool {
        self.track_id() == Some(track_id)
    }

    pub fn title(&self) -> &str {
        match (&self.detail, &self.track) {
            (Some(d), _) if !d.title.is_empty() => &d.title,
            (_, Some(t)) => t.display_title(),
            _ => "",
        }
    }

    pub fn artist(&self) -> &str {
        match (&self.detail, &self.track) {
            (Some(d), _) if !d.artist.is_empty() => &d.artist,
            (_, Some(t)) => t.display_artist(),
            _ => "",
        }
    }

    pub fn album(&self) -> &str {
        match (&self.detail, &self.track) {
            (Some(d), _) if !d.album.is_empty() => &d.album,
            (_, Some(t)) => &t.album,
            _ => "",
        }
    }
}

/// Screen regions recorded during draw so mouse events can be mapped back.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub lyrics: Option<Rect>,
    pub progress: Option<Rect>,
}

impl HitAreas {
    pub fn lyrics_row(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.lyrics?;
        contains(area, column, row).then(|| (row - area.y) as usize)
    }

    /// Fraction of the progress bar left of `column`.
    pub fn progress_fraction(&self, column: u16, row: u16) -> Option<f64> {
        let area = self.progress?;
        if !contains(area, column, row) || area.width == 0 {
            return None;
        }
        let offset = column.saturating_sub(area.x) as f64;
        Some((offset / area.width.saturating_sub(1).max(1) as f64).clamp(0.0, 1.0))
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,

    pub screen: Screen,
    pub sidebar_selected: usize,

    pub source: StreamSource,
    pub playlist: Playlist,
    pub library: ListCursor,
    pub carousel: Carousel,

    pub song: SongView,
    pub playback: PlaybackController,

    pub user: Option<CurrentUser>,
    pub account: AccountForm,

    pub hit: HitAreas,
    pub alert: Option<Alert>,
    pub toast: Option<Toast>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StreamSource::default(), PlaybackController::default())
    }
}

impl AppState {
    pub fn new(source: StreamSource, playback: PlaybackController) -> Self {
        Self {
            should_quit: false,
            tick: 0,
            screen: Screen::Home,
            sidebar_selected: 0,
            source,
            playlist: Playlist::default(),
            library: ListCursor::default(),
            carousel: Carousel::default(),
            song: SongView::default(),
            playback,
            user: None,
            account: AccountForm::default(),
            hit: HitAreas::default(),
            alert: None,
            toast: None,
            status: String::new(),
        }
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.sidebar_selected = screen.index();
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.playlist.get(self.library.selected)
    }

    /// Track shown in the player bar. Falls back to the song screen's track
    /// when it is not part of the loaded library.
    pub fn now_playing_track(&self) -> Option<&Track> {
        self.playlist.current_track().or(self.song.track.as_ref())
    }

    /// True while keystrokes go to a text field instead of the keymap.
    pub fn is_typing(&self) -> bool {
        match self.screen {
            Screen::Account => self.user.is_none(),
            Screen::Song => self.song.focus == SongFocus::CommentInput,
            _ => false,
        }
    }
}
