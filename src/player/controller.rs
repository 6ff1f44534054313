//! Playback state machine. Every change to the media element goes through
//! the `MediaCommand`s this controller hands out.

use serde::{Deserialize, Serialize};

/// Volume restored when unmuting.
pub const DEFAULT_VOLUME: f64 = 0.8;

/// What happens when a track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    /// Advance through the playlist
    #[default]
    Continuous,
    /// Stop at the end of the track
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCommand {
    Load { url: String, headers: Vec<String> },
    SetPause(bool),
    Seek(f64),
    SetVolume(f64),
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfTrack {
    Advance,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeLevel {
    Muted,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_secs: f64,
    pub duration_secs: f64,
    pub playing: bool,
    pub volume: f64,
    pub user_seeking: bool,
    /// Position shown on the progress bar; detached from playback while seeking
    pub seek_bar_secs: f64,
    pub loaded: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_secs: 0.0,
            duration_secs: 0.0,
            playing: false,
            volume: DEFAULT_VOLUME,
            user_seeking: false,
            seek_bar_secs: 0.0,
            loaded: false,
        }
    }
}

impl PlaybackState {
    /// Progress bar ratio in `[0, 1]`.
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.seek_bar_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackController {
    state: PlaybackState,
    mode: PlaybackMode,
}

impl PlaybackController {
    pub fn new(volume: f64, mode: PlaybackMode) -> Self {
        Self {
            state: PlaybackState {
                volume: volume.clamp(0.0, 1.0),
                ..Default::default()
            },
            mode,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Start a new stream from the beginning.
    pub fn load(&mut self, url: String, headers: Vec<String>) -> Vec<MediaCommand> {
        self.state = PlaybackState {
            volume: self.state.volume,
            playing: true,
            loaded: true,
            ..Default::default()
        };
        vec![
            MediaCommand::Load { url, headers },
            MediaCommand::SetVolume(self.state.volume),
            MediaCommand::SetPause(false),
        ]
    }

    pub fn toggle_play_pause(&mut self) -> Option<MediaCommand> {
        if !self.state.loaded {
            return None;
        }
        self.state.playing = !self.state.playing;
        Some(MediaCommand::SetPause(!self.state.playing))
    }

    pub fn play_if_paused(&mut self) -> Option<MediaCommand> {
        if self.state.loaded && !self.state.playing {
            self.state.playing = true;
            Some(MediaCommand::SetPause(false))
        } else {
            None
        }
    }

    pub fn seek(&mut self, secs: f64) -> Option<MediaCommand> {
        if !self.state.loaded || !secs.is_finite() {
            return None;
        }
        let target = self.clamp_position(secs);
        self.state.current_secs = target;
        if !self.state.user_seeking {
            self.state.seek_bar_secs = target;
        }
        Some(MediaCommand::Seek(target))
    }

    pub fn seek_relative(&mut self, delta: f64) -> Option<MediaCommand> {
        self.seek(self.state.current_secs + delta)
    }

    pub fn set_volume(&mut self, volume: f64) -> MediaCommand {
        let volume = if volume.is_finite() { volume.clamp(0.0, 1.0) } else { 0.0 };
        self.state.volume = volume;
        MediaCommand::SetVolume(volume)
    }

    pub fn nudge_volume(&mut self, delta: f64) -> MediaCommand {
        let next = ((self.state.volume + delta) * 100.0).round() / 100.0;
        self.set_volume(next)
    }

    /// Mute when audible, otherwise restore the default level.
    pub fn toggle_mute(&mut self) -> MediaCommand {
        if self.state.volume > 0.0 {
            self.set_volume(0.0)
        } else {
            self.set_volume(DEFAULT_VOLUME)
        }
    }

    pub fn volume_level(&self) -> VolumeLevel {
        let v = self.state.volume;
        if v <= 0.0 {
            VolumeLevel::Muted
        } else if v < 0.3 {
            VolumeLevel::Low
        } else if v < 0.7 {
            VolumeLevel::Medium
        } else {
            VolumeLevel::High
        }
    }

    pub fn begin_user_seek(&mut self) {
        if self.state.loaded {
            self.state.user_seeking = true;
        }
    }

    /// Move the progress bar during a seek gesture without touching playback.
    pub fn move_seek_bar(&mut self, secs: f64) {
        if self.state.user_seeking && secs.is_finite() {
            self.state.seek_bar_secs = self.clamp_position(secs);
        }
    }

    /// Commit the progress bar position as the new playback position.
    pub fn end_user_seek(&mut self) -> Option<MediaCommand> {
        if !self.state.user_seeking {
            return None;
        }
        self.state.user_seeking = false;
        self.seek(self.state.seek_bar_secs)
    }

    pub fn on_time_tick(&mut self, secs: f64) {
        if !secs.is_finite() {
            return;
        }
        self.state.current_secs = secs.max(0.0);
        if !self.state.user_seeking {
            self.state.seek_bar_secs = self.state.current_secs;
        }
    }

    pub fn on_duration(&mut self, secs: f64) {
        if secs.is_finite() && secs >= 0.0 {
            self.state.duration_secs = secs;
        }
    }

    pub fn on_playing(&mut self) {
        self.state.playing = true;
    }

    pub fn on_paused(&mut self) {
        self.state.playing = false;
    }

    pub fn on_ended(&mut self) -> EndOfTrack {
        self.state.playing = false;
        self.state.user_seeking = false;
        match self.mode {
            PlaybackMode::Continuous => EndOfTrack::Advance,
            PlaybackMode::Single => EndOfTrack::Stop,
        }
    }

    pub fn stop(&mut self) -> MediaCommand {
        self.state = PlaybackState {
            volume: self.state.volume,
            ..Default::default()
        };
        MediaCommand::Stop
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        if self.state.duration_secs > 0.0 {
            secs.clamp(0.0, self.state.duration_secs)
        } else {
            secs.max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> PlaybackController {
        let mut c = PlaybackController::new(DEFAULT_VOLUME, PlaybackMode::Continuous);
        c.load("http://x/api/audio?id=1".into(), Vec::new());
        c.on_duration(200.0);
        c
    }

    #[test]
    fn test_load_starts_playback() {
        let mut c = PlaybackController::new(0.5, PlaybackMode::Continuous);
        let cmds = c.load("u".into(), Vec::new());
        assert_eq!(
            cmds,
            vec![
                MediaCommand::Load { url: "u".into(), headers: Vec::new() },
                MediaCommand::SetVolume(0.5),
                MediaCommand::SetPause(false),
            ]
        );
        assert!(c.state().playing);
    }

    #[test]
    fn test_toggle_play_pause() {
        let mut c = loaded();
        assert_eq!(c.toggle_play_pause(), Some(MediaCommand::SetPause(true)));
        assert!(!c.state().playing);
        assert_eq!(c.toggle_play_pause(), Some(MediaCommand::SetPause(false)));
        assert!(c.state().playing);
    }

    #[test]
    fn test_nothing_loaded_ignores_transport() {
        let mut c = PlaybackController::default();
        assert_eq!(c.toggle_play_pause(), None);
        assert_eq!(c.seek(3.0), None);
        c.begin_user_seek();
        assert!(!c.state().user_seeking);
    }

    #[test]
    fn test_seek_clamped_to_duration() {
        let mut c = loaded();
        assert_eq!(c.seek(500.0), Some(MediaCommand::Seek(200.0)));
        assert_eq!(c.seek(-4.0), Some(MediaCommand::Seek(0.0)));
    }

    #[test]
    fn test_volume_clamped() {
        let mut c = loaded();
        assert_eq!(c.set_volume(1.7), MediaCommand::SetVolume(1.0));
        assert_eq!(c.set_volume(-0.2), MediaCommand::SetVolume(0.0));
        assert_eq!(c.set_volume(f64::NAN), MediaCommand::SetVolume(0.0));
    }

    #[test]
    fn test_volume_levels() {
        let mut c = loaded();
        c.set_volume(0.0);
        assert_eq!(c.volume_level(), VolumeLevel::Muted);
        c.set_volume(0.29);
        assert_eq!(c.volume_level(), VolumeLevel::Low);
        c.set_volume(0.3);
        assert_eq!(c.volume_level(), VolumeLevel::Medium);
        c.set_volume(0.7);
        assert_eq!(c.volume_level(), VolumeLevel::High);
    }

    #[test]
    fn test_mute_toggle_restores_default() {
        let mut c = loaded();
        c.set_volume(0.35);
        assert_eq!(c.toggle_mute(), MediaCommand::SetVolume(0.0));
        assert_eq!(c.toggle_mute(), MediaCommand::SetVolume(0.8));
        assert_eq!(c.state().volume, 0.8);
    }

    #[test]
    fn test_ticks_do_not_move_bar_while_seeking() {
        let mut c = loaded();
        c.on_time_tick(10.0);
        assert_eq!(c.state().seek_bar_secs, 10.0);

        c.begin_user_seek();
        c.move_seek_bar(120.0);
        c.on_time_tick(11.0);
        c.on_time_tick(12.0);
        assert_eq!(c.state().seek_bar_secs, 120.0);
        assert_eq!(c.state().current_secs, 12.0);

        assert_eq!(c.end_user_seek(), Some(MediaCommand::Seek(120.0)));
        assert!(!c.state().user_seeking);
        c.on_time_tick(120.5);
        assert_eq!(c.state().seek_bar_secs, 120.5);
    }

    #[test]
    fn test_end_seek_without_begin_is_noop() {
        let mut c = loaded();
        assert_eq!(c.end_user_seek(), None);
    }

    #[test]
    fn test_seek_bar_ignored_outside_gesture() {
        let mut c = loaded();
        c.on_time_tick(5.0);
        c.move_seek_bar(90.0);
        assert_eq!(c.state().seek_bar_secs, 5.0);
    }

    #[test]
    fn test_end_of_track_by_mode() {
        let mut c = loaded();
        assert_eq!(c.on_ended(), EndOfTrack::Advance);
        let mut single = PlaybackController::new(0.5, PlaybackMode::Single);
        single.load("u".into(), Vec::new());
        assert_eq!(single.on_ended(), EndOfTrack::Stop);
        assert!(!single.state().playing);
    }

    #[test]
    fn test_play_if_paused() {
        let mut c = loaded();
        assert_eq!(c.play_if_paused(), None);
        c.toggle_play_pause();
        assert_eq!(c.play_if_paused(), Some(MediaCommand::SetPause(false)));
    }

    #[test]
    fn test_progress_ratio() {
        let mut c = loaded();
        c.on_time_tick(50.0);
        assert!((c.state().progress_ratio() - 0.25).abs() < 1e-9);
    }
}
