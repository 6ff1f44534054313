//! Keeps the active lyric line and the lyrics viewport in step with playback.

use std::time::{Duration, Instant};

use super::parser::{LyricsMode, ParsedLyrics};

pub const DEFAULT_SCROLL_COOLDOWN: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct LyricSync {
    lyrics: ParsedLyrics,
    active: Option<usize>,
    offset: usize,
    viewport: usize,
    last_manual_scroll: Option<Instant>,
    cooldown: Duration,
}

impl LyricSync {
    pub fn new(lyrics: ParsedLyrics, cooldown: Duration) -> Self {
        Self {
            lyrics,
            active: None,
            offset: 0,
            viewport: 0,
            last_manual_scroll: None,
            cooldown,
        }
    }

    pub fn lyrics(&self) -> &ParsedLyrics {
        &self.lyrics
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Which line should be highlighted at `current_secs`.
    pub fn active_index_at(&self, current_secs: f64, duration_secs: f64) -> Option<usize> {
        let count = self.lyrics.len();
        if count == 0 {
            return None;
        }

        match self.lyrics.mode {
            LyricsMode::Tagged => {
                let passed = self
                    .lyrics
                    .lines
                    .partition_point(|line| line.time_secs.is_some_and(|t| t <= current_secs));
                passed.checked_sub(1)
            }
            LyricsMode::Plain => {
                if !(duration_secs > 0.0) || !current_secs.is_finite() {
                    return Some(0);
                }
                let per_line = duration_secs / count as f64;
                let index = (current_secs.max(0.0) / per_line).floor() as usize;
                Some(index.min(count - 1))
            }
        }
    }

    /// Feed a playback time tick. Returns true when the active line changed.
    /// Outside the manual-scroll cooldown the view follows the active line
    /// on every tick.
    pub fn on_time_update(&mut self, current_secs: f64, duration_secs: f64, now: Instant) -> bool {
        let next = self.active_index_at(current_secs, duration_secs);
        let changed = next != self.active;
        self.active = next;
        self.auto_scroll(now);
        changed
    }

    /// Lines visible at once. Re-centers on the active line unless the user
    /// has scrolled by hand, in which case the offset is only re-clamped.
    pub fn set_viewport(&mut self, rows: usize) {
        if rows == self.viewport {
            return;
        }
        self.viewport = rows;
        if self.last_manual_scroll.is_none() {
            self.center_on_active();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// User scrolled the lyrics pane; auto-scroll pauses for the cooldown.
    pub fn manual_scroll(&mut self, delta: isize, now: Instant) {
        let max = self.max_offset() as isize;
        self.offset = (self.offset as isize + delta).clamp(0, max) as usize;
        self.last_manual_scroll = Some(now);
    }

    pub fn in_cooldown(&self, now: Instant) -> bool {
        self.last_manual_scroll
            .is_some_and(|at| now.saturating_duration_since(at) < self.cooldown)
    }

    /// Seek target for a clicked line; `None` when the line carries no time.
    pub fn seek_target(&self, index: usize) -> Option<f64> {
        self.lyrics.lines.get(index).and_then(|line| line.time_secs)
    }

    /// Maps a row inside the viewport to a line index.
    pub fn line_at_row(&self, row: usize) -> Option<usize> {
        let index = self.offset + row;
        (row < self.viewport.max(1) && index < self.lyrics.len()).then_some(index)
    }

    fn auto_scroll(&mut self, now: Instant) {
        if !self.in_cooldown(now) {
            self.center_on_active();
        }
    }

    fn center_on_active(&mut self) {
        if let Some(active) = self.active {
            self.offset = active
                .saturating_sub(self.viewport / 2)
                .min(self.max_offset());
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    fn max_offset(&self) -> usize {
        self.lyrics.len().saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(times: &[f64]) -> LyricSync {
        let text: String = times
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let whole = *t as u64;
                let cs = ((t - whole as f64) * 100.0).round() as u64;
                format!("[{:02}:{:02}.{:02}]line {i}\n", whole / 60, whole % 60, cs)
            })
            .collect();
        LyricSync::new(ParsedLyrics::parse(&text), DEFAULT_SCROLL_COOLDOWN)
    }

    fn plain(count: usize) -> LyricSync {
        let text: String = (0..count).map(|i| format!("row {i}\n")).collect();
        LyricSync::new(ParsedLyrics::parse(&text), DEFAULT_SCROLL_COOLDOWN)
    }

    #[test]
    fn test_tagged_active_line() {
        let sync = tagged(&[0.0, 5.0, 10.0]);
        assert_eq!(sync.active_index_at(7.3, 30.0), Some(1));
        assert_eq!(sync.active_index_at(5.0, 30.0), Some(1));
        assert_eq!(sync.active_index_at(0.0, 30.0), Some(0));
    }

    #[test]
    fn test_no_active_line_before_first_tag() {
        let sync = tagged(&[3.0, 6.0]);
        assert_eq!(sync.active_index_at(1.0, 30.0), None);
    }

    #[test]
    fn test_last_line_stays_active_after_end() {
        let sync = tagged(&[1.0, 2.0]);
        assert_eq!(sync.active_index_at(500.0, 30.0), Some(1));
    }

    #[test]
    fn test_tagged_index_monotonic_in_time() {
        let sync = tagged(&[0.5, 1.0, 4.25, 9.0, 12.0]);
        let mut last = None;
        for step in 0..300 {
            let t = step as f64 * 0.05;
            let idx = sync.active_index_at(t, 20.0);
            assert!(idx >= last);
            last = idx;
        }
    }

    #[test]
    fn test_plain_mode_estimates_position() {
        let sync = plain(4);
        assert_eq!(sync.active_index_at(50.0, 100.0), Some(2));
        assert_eq!(sync.active_index_at(0.0, 100.0), Some(0));
        assert_eq!(sync.active_index_at(100.0, 100.0), Some(3));
        assert_eq!(sync.active_index_at(250.0, 100.0), Some(3));
    }

    #[test]
    fn test_plain_mode_unknown_duration() {
        let sync = plain(3);
        assert_eq!(sync.active_index_at(12.0, 0.0), Some(0));
        assert_eq!(sync.active_index_at(12.0, f64::NAN), Some(0));
    }

    #[test]
    fn test_empty_lyrics_never_active() {
        let mut sync = LyricSync::new(ParsedLyrics::empty(), DEFAULT_SCROLL_COOLDOWN);
        assert!(!sync.on_time_update(5.0, 10.0, Instant::now()));
        assert_eq!(sync.active(), None);
    }

    #[test]
    fn test_auto_scroll_centers_active_line() {
        let times: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(5);
        sync.on_time_update(10.2, 30.0, Instant::now());
        assert_eq!(sync.active(), Some(10));
        assert_eq!(sync.scroll_offset(), 8);
    }

    #[test]
    fn test_auto_scroll_clamped_at_edges() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(4);
        let now = Instant::now();
        sync.on_time_update(1.0, 30.0, now);
        assert_eq!(sync.scroll_offset(), 0);
        sync.on_time_update(9.5, 30.0, now);
        assert_eq!(sync.scroll_offset(), 6);
    }

    #[test]
    fn test_manual_scroll_suppresses_auto_scroll_for_cooldown() {
        let times: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(5);
        let start = Instant::now();

        sync.manual_scroll(3, start);
        assert_eq!(sync.scroll_offset(), 3);

        sync.on_time_update(20.0, 60.0, start + Duration::from_millis(500));
        assert_eq!(sync.active(), Some(20));
        assert_eq!(sync.scroll_offset(), 3);

        sync.on_time_update(21.0, 60.0, start + Duration::from_millis(2100));
        assert_eq!(sync.scroll_offset(), 19);
    }

    #[test]
    fn test_recenters_after_cooldown_on_same_line() {
        let times: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(5);
        let start = Instant::now();
        sync.on_time_update(29.0, 60.0, start);
        assert_eq!(sync.scroll_offset(), 25);

        sync.manual_scroll(-25, start);
        assert_eq!(sync.scroll_offset(), 0);

        assert!(!sync.on_time_update(29.5, 60.0, start + Duration::from_millis(1500)));
        assert_eq!(sync.scroll_offset(), 0);

        assert!(!sync.on_time_update(29.6, 60.0, start + Duration::from_millis(2500)));
        assert_eq!(sync.active(), Some(29));
        assert_eq!(sync.scroll_offset(), 25);
    }

    #[test]
    fn test_viewport_set_after_lyrics_arrive_centers_active_line() {
        let times: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        // Lyrics installed mid-song before the pane has been drawn.
        sync.on_time_update(10.5, 30.0, Instant::now());
        assert_eq!(sync.viewport(), 0);

        sync.set_viewport(6);
        assert_eq!(sync.active(), Some(10));
        assert_eq!(sync.scroll_offset(), 7);
    }

    #[test]
    fn test_viewport_resize_reclamps_offset() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(2);
        sync.manual_scroll(100, Instant::now());
        assert_eq!(sync.scroll_offset(), 8);
        sync.set_viewport(6);
        assert_eq!(sync.scroll_offset(), 4);
    }

    #[test]
    fn test_seek_target_only_for_timed_lines() {
        let sync = tagged(&[1.0, 2.5]);
        assert_eq!(sync.seek_target(1), Some(2.5));
        assert_eq!(sync.seek_target(9), None);
        assert_eq!(plain(3).seek_target(1), None);
    }

    #[test]
    fn test_line_at_row() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut sync = tagged(&times);
        sync.set_viewport(4);
        sync.manual_scroll(2, Instant::now());
        assert_eq!(sync.line_at_row(0), Some(2));
        assert_eq!(sync.line_at_row(3), Some(5));
        assert_eq!(sync.line_at_row(4), None);
    }
}
