pub mod actions;
pub mod carousel;
pub mod events;
pub mod state;
pub mod tasks;

use crate::api::{ApiClient, ApiError, StreamSource, Track, user_message};
use crate::auth::{self, AuthEvent, AuthService};
use crate::config::Config;
use crate::input;
use crate::lyrics::{self, LyricSync, ParsedLyrics};
use crate::player::{EndOfTrack, MediaCommand, MpvHandle, PlaybackController};
use crate::queue::{Direction, Navigation};
use crate::tui::{self, TuiTerminal};
use actions::Action;
use carousel::{Carousel, ROTATE_EVERY};
use events::{Event, NetworkEvent, PlayerEvent};
use lru::LruCache;
use state::{AccountMode, Alert, AppState, Screen, SongFocus, SongView, Toast};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::{broadcast, mpsc};

const SEEK_STEP_SECS: f64 = 10.0;
const SEEK_BAR_STEP_SECS: f64 = 5.0;
const VOLUME_STEP: f64 = 0.05;
const PAGE_SIZE: usize = 10;
const LYRICS_CACHE_SIZE: usize = 32;

pub struct App {
    cfg: Config,
    config_path: PathBuf,
    state: AppState,
    api: ApiClient,
    auth: AuthService,
    mpv: Option<MpvHandle>,
    lyrics_cache: LruCache<String, ParsedLyrics>,
}

impl App {
    pub fn new(cfg: Config, config_path: PathBuf, api: ApiClient, auth: AuthService) -> Self {
        let playback = PlaybackController::new(cfg.player.volume, cfg.player.playback);
        let mut state = AppState::new(cfg.server.source, playback);
        state.user = auth.current_user();

        if let Some(name) = &cfg.ui.last_screen {
            state.set_screen(Screen::from_name(name));
        }

        let capacity = NonZeroUsize::new(LYRICS_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);

        Self {
            cfg,
            config_path,
            state,
            api,
            auth,
            mpv: None,
            lyrics_cache: LruCache::new(capacity),
        }
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());
        self.spawn_auth_forwarder(&tx);

        let mpv_log = self.cfg.paths.data_dir.join("mpv.log");
        match MpvHandle::spawn(
            tx.clone(),
            self.cfg.player.audio_device.as_deref(),
            Some(&mpv_log),
        )
        .await
        {
            Ok(h) => self.mpv = Some(h),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "mpv unavailable");
                self.state.toast = Some(Toast::error(format!("mpv disabled: {e:#}")));
            }
        }

        tui::draw(terminal, &mut self.state)?;

        // Library listing does not wait for the rescan.
        let api = self.api.clone();
        tasks::spawn_background("rescan", async move { api.rescan().await });
        self.spawn_load_library(&tx);

        let auth = self.auth.clone();
        tasks::spawn_background("check_auth", async move { auth.refresh().await.map(|_| ()) });

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx).await;
                    }
                }
                Event::Player(pe) => self.handle_player(pe, &tx).await,
                Event::Network(ne) => self.handle_network(ne, &tx),
                Event::Auth(ae) => self.handle_auth(ae, &tx).await,
                Event::CarouselTick => self.state.carousel.next(),
            }

            if self.state.should_quit {
                break;
            }

            self.state.tick = self.state.tick.wrapping_add(1);
            tui::draw(terminal, &mut self.state)?;
        }

        self.save_state_on_quit();
        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.player.volume = self.state.playback.state().volume;
        self.cfg.ui.last_screen = Some(self.state.screen.name().to_string());
        if let Err(e) = crate::config::save(&self.cfg, Some(&self.config_path)) {
            tracing::warn!(error = %format!("{e:#}"), "could not save config");
        }
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::NextScreen => self.state.set_screen(self.state.screen.next()),
            Action::PrevScreen => self.state.set_screen(self.state.screen.prev()),
            Action::SetScreen(screen) => self.state.set_screen(screen),
            Action::SidebarUp => {
                let idx = self.state.sidebar_selected.saturating_sub(1);
                self.state.set_screen(Screen::from_index(idx));
            }
            Action::SidebarDown => {
                let idx = (self.state.sidebar_selected + 1).min(Screen::ALL.len() - 1);
                self.state.set_screen(Screen::from_index(idx));
            }

            Action::ListUp => self.move_selection(-1),
            Action::ListDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-(PAGE_SIZE as isize)),
            Action::PageDown => self.move_selection(PAGE_SIZE as isize),
            Action::GoTop => self.move_selection(isize::MIN / 2),
            Action::GoBottom => self.move_selection(isize::MAX / 2),
            Action::Activate => {
                if let Some(track) = self.state.selected_track().cloned() {
                    self.open_track(track, true, tx).await;
                }
            }
            Action::Refresh => match self.state.screen {
                Screen::Home => {
                    let api = self.api.clone();
                    tasks::spawn_background("rescan", async move { api.rescan().await });
                    self.spawn_load_library(tx);
                }
                Screen::Song => {
                    if let Some(id) = self.state.song.track_id().map(str::to_string) {
                        self.lyrics_cache.pop(&id);
                        self.load_lyrics(&id, tx);
                        self.spawn_load_comments(&id, tx);
                    }
                }
                Screen::Account => {
                    let auth = self.auth.clone();
                    tasks::spawn_background("check_auth", async move {
                        auth.refresh().await.map(|_| ())
                    });
                }
                Screen::Help => {}
            },

            Action::CarouselNext => self.state.carousel.next(),
            Action::CarouselPrev => self.state.carousel.prev(),
            Action::PlayCarouselSlide => {
                if let Some(track) = self.state.carousel.current().cloned() {
                    self.open_track(track, true, tx).await;
                }
            }

            Action::TogglePause => {
                let cmd = self.state.playback.toggle_play_pause();
                self.apply_media(cmd).await;
            }
            Action::VolumeUp => {
                let cmd = self.state.playback.nudge_volume(VOLUME_STEP);
                self.apply_media(Some(cmd)).await;
            }
            Action::VolumeDown => {
                let cmd = self.state.playback.nudge_volume(-VOLUME_STEP);
                self.apply_media(Some(cmd)).await;
            }
            Action::ToggleMute => {
                let cmd = self.state.playback.toggle_mute();
                self.apply_media(Some(cmd)).await;
            }
            Action::SeekForward => {
                let cmd = self.state.playback.seek_relative(SEEK_STEP_SECS);
                self.apply_media(cmd).await;
                self.sync_lyrics();
            }
            Action::SeekBack => {
                let cmd = self.state.playback.seek_relative(-SEEK_STEP_SECS);
                self.apply_media(cmd).await;
                self.sync_lyrics();
            }
            Action::PlayNext => self.navigate(Direction::Next, tx).await,
            Action::PlayPrev => self.navigate(Direction::Previous, tx).await,

            Action::BeginSeek => self.state.playback.begin_user_seek(),
            Action::SeekBarStep(delta) => {
                let bar = self.state.playback.state().seek_bar_secs;
                self.state.playback.move_seek_bar(bar + delta * SEEK_BAR_STEP_SECS);
            }
            Action::SeekBarTo(fraction) => {
                self.state.playback.begin_user_seek();
                let duration = self.state.playback.state().duration_secs;
                self.state.playback.move_seek_bar(fraction * duration);
            }
            Action::CommitSeek => {
                let cmd = self.state.playback.end_user_seek();
                self.apply_media(cmd).await;
                self.sync_lyrics();
            }

            Action::LyricsScroll(delta) => {
                if let Some(sync) = self.state.song.lyrics.as_mut() {
                    sync.manual_scroll(delta, Instant::now());
                }
            }
            Action::LyricsClickRow(row) => {
                let index = self
                    .state
                    .song
                    .lyrics
                    .as_ref()
                    .and_then(|sync| sync.line_at_row(row));
                if let Some(index) = index {
                    self.seek_to_line(index).await;
                }
            }
            Action::SeekToCenterLine => {
                let index = self
                    .state
                    .song
                    .lyrics
                    .as_ref()
                    .and_then(|sync| sync.line_at_row(sync.viewport() / 2));
                if let Some(index) = index {
                    self.seek_to_line(index).await;
                }
            }

            Action::SongFocusNext => {
                self.state.song.focus = match self.state.song.focus {
                    SongFocus::Lyrics => SongFocus::Comments,
                    SongFocus::Comments | SongFocus::CommentInput => SongFocus::Lyrics,
                };
            }
            Action::StartComment => {
                if self.state.song.track.is_some() {
                    self.state.song.focus = SongFocus::CommentInput;
                }
            }
            Action::ReloadComments => {
                if let Some(id) = self.state.song.track_id().map(str::to_string) {
                    self.spawn_load_comments(&id, tx);
                }
            }

            Action::InputChar(c) => match self.state.screen {
                Screen::Account => self.state.account.active_input().push(c),
                Screen::Song => self.state.song.comment_draft.push(c),
                _ => {}
            },
            Action::Backspace => match self.state.screen {
                Screen::Account => {
                    self.state.account.active_input().pop();
                }
                Screen::Song => {
                    self.state.song.comment_draft.pop();
                }
                _ => {}
            },
            Action::Submit => match self.state.screen {
                Screen::Account => self.submit_credentials(tx),
                Screen::Song => self.submit_comment(tx),
                _ => {}
            },
            Action::Cancel => match self.state.screen {
                Screen::Song => self.state.song.focus = SongFocus::Lyrics,
                Screen::Account => self.state.set_screen(Screen::Home),
                _ => {}
            },
            Action::AccountFieldNext => self.state.account.next_field(),
            Action::ToggleAccountMode => {
                self.state.account.mode = self.state.account.mode.toggle();
            }
            Action::Logout => {
                if self.state.user.is_some() {
                    let auth = self.auth.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if let Err(e) = auth.logout().await {
                            let _ = tx
                                .send(Event::Network(NetworkEvent::ActionFailed(format!(
                                    "Logout failed: {e:#}"
                                ))))
                                .await;
                        }
                    });
                }
            }

            Action::DismissAlert => self.state.alert = None,
            Action::Resize => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let by = delta.unsigned_abs();
        match self.state.screen {
            Screen::Home => {
                let len = self.state.playlist.len();
                if delta < 0 {
                    self.state.library.select_prev(by);
                } else {
                    self.state.library.select_next(by, len);
                }
            }
            Screen::Song => match self.state.song.focus {
                SongFocus::Lyrics => {
                    if let Some(sync) = self.state.song.lyrics.as_mut() {
                        let len = sync.lyrics().len() as isize;
                        sync.manual_scroll(delta.clamp(-len, len), Instant::now());
                    }
                }
                SongFocus::Comments => {
                    let max = self.state.song.comments.len().saturating_sub(1);
                    let scroll = &mut self.state.song.comments_scroll;
                    *scroll = if delta < 0 {
                        scroll.saturating_sub(by)
                    } else {
                        scroll.saturating_add(by).min(max)
                    };
                }
                SongFocus::CommentInput => {}
            },
            Screen::Account | Screen::Help => {}
        }
    }

    async fn handle_player(&mut self, pe: PlayerEvent, tx: &mpsc::Sender<Event>) {
        match pe {
            PlayerEvent::Playing => self.state.playback.on_playing(),
            PlayerEvent::Paused => self.state.playback.on_paused(),
            PlayerEvent::TimeTick { seconds } => {
                self.state.playback.on_time_tick(seconds);
                self.sync_lyrics();
            }
            PlayerEvent::Duration { seconds } => {
                self.state.playback.on_duration(seconds);
                self.sync_lyrics();
            }
            PlayerEvent::Ended => match self.state.playback.on_ended() {
                EndOfTrack::Advance => self.navigate(Direction::Next, tx).await,
                EndOfTrack::Stop => self.state.status = "Playback ended".into(),
            },
            PlayerEvent::Error(e) => {
                tracing::warn!(error = %e, "player error");
                self.state.toast = Some(Toast::error(e));
            }
        }
    }

    fn handle_network(&mut self, ne: NetworkEvent, tx: &mpsc::Sender<Event>) {
        match ne {
            NetworkEvent::Error(e) => {
                self.state.library.loading = false;
                self.state.toast = Some(Toast::error(e.clone()));
                self.state.status = format!("Error: {e} (press r to retry)");
            }
            NetworkEvent::ActionFailed(message) => {
                self.state.account.submitting = false;
                self.state.song.posting_comment = false;
                self.state.alert = Some(Alert { message });
            }
            NetworkEvent::LibraryLoaded { tracks } => {
                let current = self.state.song.track_id().map(str::to_string);
                self.state.playlist.replace(tracks, current.as_deref());
                self.state.library.loading = false;
                self.state.library.loaded = true;
                self.state.library.clamp(self.state.playlist.len());
                self.state.status = format!(
                    "{}: {} tracks",
                    self.state.source.label(),
                    self.state.playlist.len()
                );

                let slides = Carousel::sample(self.state.playlist.tracks(), &mut rand::rng());
                if self.state.carousel.init(slides) {
                    spawn_carousel_timer(tx);
                }
            }
            NetworkEvent::TrackDetail { track_id, detail } => {
                if self.state.song.is_current(&track_id) {
                    self.state.song.detail = Some(detail);
                }
            }
            NetworkEvent::LyricsLoaded { track_id, lyrics } => {
                self.lyrics_cache.put(track_id.clone(), lyrics.clone());
                if self.state.song.is_current(&track_id) {
                    self.install_lyrics(lyrics);
                }
            }
            NetworkEvent::LyricsUnavailable { track_id } => {
                if self.state.song.is_current(&track_id) {
                    self.state.song.lyrics = None;
                    self.state.song.lyrics_loading = false;
                }
            }
            NetworkEvent::CommentsLoaded { track_id, comments } => {
                if self.state.song.is_current(&track_id) {
                    self.state.song.comments = comments;
                    self.state.song.comments_loading = false;
                    self.state.song.comments_scroll = 0;
                }
            }
            NetworkEvent::CommentPosted { track_id, comment } => {
                if self.state.song.is_current(&track_id) {
                    self.state.song.comments.insert(0, comment);
                    self.state.song.comment_draft.clear();
                    self.state.song.posting_comment = false;
                    self.state.song.comments_scroll = 0;
                    self.state.song.focus = SongFocus::Comments;
                    self.state.toast = Some(Toast::success("Comment posted"));
                }
            }
        }
    }

    async fn handle_auth(&mut self, event: AuthEvent, tx: &mpsc::Sender<Event>) {
        match event {
            AuthEvent::Login(user) => {
                self.state.toast = Some(Toast::success(format!("Welcome, {}", user.nickname)));
                self.state.user = Some(user);
                self.state.account.reset();
                self.reload_if_user_scoped(tx);
            }
            AuthEvent::Logout => {
                self.state.user = None;
                self.state.toast = Some(Toast::success("Logged out"));
                // Cloud streams are tied to the session.
                if self.state.source == StreamSource::Cloud && self.state.playback.state().loaded {
                    let cmd = self.state.playback.stop();
                    self.apply_media(Some(cmd)).await;
                }
                self.reload_if_user_scoped(tx);
            }
            AuthEvent::ProfileUpdated(user) => self.state.user = Some(user),
        }
    }

    fn reload_if_user_scoped(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.source == StreamSource::Cloud {
            self.spawn_load_library(tx);
        }
    }

    /// Make `track` current: load its stream and fetch its page data.
    async fn open_track(&mut self, track: Track, show_detail: bool, tx: &mpsc::Sender<Event>) {
        tracing::info!(track_id = %track.id, title = %track.title, "opening track");

        self.state.playlist.locate(&track.id);
        if let Some(index) = self.state.playlist.current_index() {
            self.state.library.selected = index;
        }
        self.state.song = SongView {
            track: Some(track.clone()),
            lyrics_loading: true,
            comments_loading: true,
            ..Default::default()
        };
        if show_detail {
            self.state.set_screen(Screen::Song);
        }

        let url = self.state.source.resolve_stream_url(&self.api, &track.id);
        let headers = self.state.source.stream_headers(&self.api);
        let commands = self.state.playback.load(url, headers);
        self.apply_media(commands).await;

        self.spawn_track_detail(&track.id, tx);
        self.load_lyrics(&track.id, tx);
        self.spawn_load_comments(&track.id, tx);
    }

    async fn navigate(&mut self, direction: Direction, tx: &mpsc::Sender<Event>) {
        let Some(nav) = self.state.playlist.navigate(direction, self.cfg.player.navigation) else {
            self.state.status = "Current track is not in the playlist".into();
            return;
        };
        tracing::debug!(?direction, track_id = %nav.track().id, "navigating");
        match nav {
            Navigation::SwapSource(track) => self.open_track(track, false, tx).await,
            Navigation::OpenDetail(track) => self.open_track(track, true, tx).await,
        }
    }

    async fn seek_to_line(&mut self, index: usize) {
        let target = self
            .state
            .song
            .lyrics
            .as_ref()
            .and_then(|sync| sync.seek_target(index));
        let Some(secs) = target else {
            return;
        };
        let seek = self.state.playback.seek(secs);
        let resume = self.state.playback.play_if_paused();
        self.apply_media(seek.into_iter().chain(resume)).await;
        self.sync_lyrics();
    }

    async fn apply_media(&mut self, commands: impl IntoIterator<Item = MediaCommand>) {
        let Some(mpv) = &self.mpv else {
            self.state.status = "mpv not available".into();
            return;
        };
        for cmd in commands {
            if let Err(e) = mpv.apply(&cmd).await {
                tracing::warn!(error = %format!("{e:#}"), ?cmd, "media command failed");
                self.state.status = format!("Player error: {e:#}");
                break;
            }
        }
    }

    fn sync_lyrics(&mut self) {
        let (current, duration) = {
            let s = self.state.playback.state();
            (s.current_secs, s.duration_secs)
        };
        if let Some(sync) = self.state.song.lyrics.as_mut() {
            sync.on_time_update(current, duration, Instant::now());
        }
    }

    fn install_lyrics(&mut self, lyrics: ParsedLyrics) {
        let mut sync = LyricSync::new(lyrics, self.cfg.lyrics.scroll_cooldown());
        let s = self.state.playback.state();
        sync.on_time_update(s.current_secs, s.duration_secs, Instant::now());
        self.state.song.lyrics = Some(sync);
        self.state.song.lyrics_loading = false;
    }

    fn load_lyrics(&mut self, track_id: &str, tx: &mpsc::Sender<Event>) {
        if let Some(cached) = self.lyrics_cache.get(track_id).cloned() {
            self.install_lyrics(cached);
            return;
        }

        self.state.song.lyrics_loading = true;
        let api = self.api.clone();
        let track_id = track_id.to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match lyrics::fetch_lyrics(&api, &track_id).await {
                Ok(lyrics) => NetworkEvent::LyricsLoaded { track_id, lyrics },
                Err(e) => {
                    tracing::warn!(track_id = %track_id, error = %format!("{e:#}"), "lyrics fetch failed");
                    NetworkEvent::LyricsUnavailable { track_id }
                }
            };
            let _ = tx.send(Event::Network(event)).await;
        });
    }

    fn spawn_load_library(&mut self, tx: &mpsc::Sender<Event>) {
        self.state.library.loading = true;
        self.state.status = "Loading tracks...".into();
        let api = self.api.clone();
        let source = self.state.source;
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match source.list_tracks(&api).await {
                Ok(tracks) => NetworkEvent::LibraryLoaded { tracks },
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "library fetch failed");
                    NetworkEvent::Error(format!("Could not load tracks: {e}"))
                }
            };
            let _ = tx.send(Event::Network(event)).await;
        });
    }

    fn spawn_track_detail(&self, track_id: &str, tx: &mpsc::Sender<Event>) {
        let api = self.api.clone();
        let track_id = track_id.to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.track(&track_id).await {
                Ok(detail) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::TrackDetail { track_id, detail }))
                        .await;
                }
                // The list entry already has enough to show.
                Err(e) => tracing::warn!(track_id = %track_id, error = %format!("{e:#}"), "track detail fetch failed"),
            }
        });
    }

    fn spawn_load_comments(&mut self, track_id: &str, tx: &mpsc::Sender<Event>) {
        self.state.song.comments_loading = true;
        let api = self.api.clone();
        let track_id = track_id.to_string();
        let tx = tx.clone();
        tokio::spawn(async move {
            let comments = match api.comments(&track_id).await {
                Ok(comments) => comments,
                Err(e) => {
                    tracing::warn!(track_id = %track_id, error = %format!("{e:#}"), "comments fetch failed");
                    Vec::new()
                }
            };
            let _ = tx
                .send(Event::Network(NetworkEvent::CommentsLoaded { track_id, comments }))
                .await;
        });
    }

    fn submit_credentials(&mut self, tx: &mpsc::Sender<Event>) {
        let form = &mut self.state.account;
        if form.submitting {
            return;
        }
        if let Err(e) = auth::validate_credentials(&form.account, &form.password) {
            self.state.alert = Some(Alert { message: e.to_string() });
            return;
        }
        form.submitting = true;

        let (account, password, mode) = (form.account.clone(), form.password.clone(), form.mode);
        let auth = self.auth.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = match mode {
                AccountMode::Login => auth.login(&account, &password).await,
                AccountMode::Register => auth.register(&account, &password).await,
            };
            // Success is announced through the auth event stream.
            if let Err(e) = result {
                tracing::warn!(error = %format!("{e:#}"), mode = mode.label(), "authentication failed");
                let fallback = match mode {
                    AccountMode::Login => "Login failed, please try again",
                    AccountMode::Register => "Registration failed, please try again",
                };
                let _ = tx
                    .send(Event::Network(NetworkEvent::ActionFailed(user_message(&e, fallback))))
                    .await;
            }
        });
    }

    fn submit_comment(&mut self, tx: &mpsc::Sender<Event>) {
        let Some(track_id) = self.state.song.track_id().map(str::to_string) else {
            return;
        };
        if self.state.song.posting_comment {
            return;
        }
        let content = self.state.song.comment_draft.trim().to_string();
        if content.is_empty() {
            self.state.alert = Some(Alert {
                message: "Comment cannot be empty".into(),
            });
            return;
        }
        self.state.song.posting_comment = true;

        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = match api.post_comment(&track_id, &content).await {
                Ok(comment) => NetworkEvent::CommentPosted { track_id, comment },
                Err(e) => {
                    tracing::warn!(track_id = %track_id, error = %format!("{e:#}"), "comment post failed");
                    let unauthorized = e
                        .downcast_ref::<ApiError>()
                        .is_some_and(ApiError::is_unauthorized);
                    let fallback = if unauthorized {
                        "Please log in to comment"
                    } else {
                        "Could not post comment"
                    };
                    NetworkEvent::ActionFailed(user_message(&e, fallback))
                }
            };
            let _ = tx.send(Event::Network(event)).await;
        });
    }

    fn spawn_auth_forwarder(&self, tx: &mpsc::Sender<Event>) {
        let mut rx = self.auth.subscribe();
        let tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => {
                        if tx.send(Event::Auth(event)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "auth events lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    }
}

fn spawn_carousel_timer(tx: &mpsc::Sender<Event>) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ROTATE_EVERY);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(Event::CarouselTick).await.is_err() {
                break;
            }
        }
    });
}
