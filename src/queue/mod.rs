use crate::api::Track;
use serde::{Deserialize, Serialize};

/// How next/previous reaches the adjacent track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Swap the media source and keep the current screen
    #[default]
    InPlace,
    /// Open the adjacent track's detail screen
    DetailPage,
}

/// What the caller should do after a successful navigation.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    SwapSource(Track),
    OpenDetail(Track),
}

impl Navigation {
    pub fn track(&self) -> &Track {
        match self {
            Navigation::SwapSource(t) | Navigation::OpenDetail(t) => t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Flat, wrap-around playlist. `current` is `None` when the playing track
/// is not part of the list, which makes navigation a no-op.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: None,
        }
    }

    /// Replace the list and resolve `current_id` within it.
    pub fn replace(&mut self, tracks: Vec<Track>, current_id: Option<&str>) {
        self.tracks = tracks;
        self.current = None;
        if let Some(id) = current_id {
            self.locate(id);
        }
    }

    /// Point the cursor at the track with `id`; `None` if it isn't listed.
    pub fn locate(&mut self, id: &str) -> Option<usize> {
        self.current = self.tracks.iter().position(|t| t.id == id);
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn next_index(&self) -> Option<usize> {
        self.offset_index(1)
    }

    pub fn prev_index(&self) -> Option<usize> {
        self.offset_index(-1)
    }

    fn offset_index(&self, offset: isize) -> Option<usize> {
        let len = self.tracks.len() as isize;
        let current = self.current? as isize;
        if len == 0 {
            return None;
        }
        Some(((current + offset + len) % len) as usize)
    }

    /// Move to the adjacent track and report how to present it.
    pub fn navigate(&mut self, direction: Direction, mode: NavigationMode) -> Option<Navigation> {
        let index = match direction {
            Direction::Next => self.next_index(),
            Direction::Previous => self.prev_index(),
        }?;
        self.current = Some(index);
        let track = self.tracks[index].clone();
        Some(match mode {
            NavigationMode::InPlace => Navigation::SwapSource(track),
            NavigationMode::DetailPage => Navigation::OpenDetail(track),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Track {id}"),
            artist: "Artist".to_string(),
            ..Default::default()
        }
    }

    fn playlist(ids: &[&str]) -> Playlist {
        Playlist::new(ids.iter().map(|id| make_track(id)).collect())
    }

    #[test]
    fn test_locate_resolves_index() {
        let mut p = playlist(&["a", "b", "c"]);
        assert_eq!(p.locate("b"), Some(1));
        assert_eq!(p.current_track().map(|t| t.id.as_str()), Some("b"));
        assert_eq!(p.locate("zzz"), None);
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_next_wraps_to_first() {
        let mut p = playlist(&["a", "b", "c"]);
        p.locate("c");
        let nav = p.navigate(Direction::Next, NavigationMode::InPlace).unwrap();
        assert_eq!(nav, Navigation::SwapSource(make_track("a")));
        assert_eq!(p.current_index(), Some(0));
    }

    #[test]
    fn test_previous_wraps_to_last() {
        let mut p = playlist(&["a", "b", "c"]);
        p.locate("a");
        let nav = p.navigate(Direction::Previous, NavigationMode::DetailPage).unwrap();
        assert_eq!(nav, Navigation::OpenDetail(make_track("c")));
        assert_eq!(p.current_index(), Some(2));
    }

    #[test]
    fn test_single_track_wraps_to_itself() {
        let mut p = playlist(&["only"]);
        p.locate("only");
        assert_eq!(p.next_index(), Some(0));
        assert_eq!(p.prev_index(), Some(0));
    }

    #[test]
    fn test_unresolved_current_is_noop() {
        let mut p = playlist(&["a", "b"]);
        assert!(p.navigate(Direction::Next, NavigationMode::InPlace).is_none());
        p.locate("missing");
        assert!(p.navigate(Direction::Previous, NavigationMode::InPlace).is_none());
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_empty_playlist_is_noop() {
        let mut p = Playlist::default();
        p.locate("a");
        assert!(p.navigate(Direction::Next, NavigationMode::InPlace).is_none());
    }

    #[test]
    fn test_replace_re_resolves_current() {
        let mut p = playlist(&["a", "b"]);
        p.locate("b");
        p.replace(vec![make_track("x"), make_track("b"), make_track("y")], Some("b"));
        assert_eq!(p.current_index(), Some(1));
        p.replace(vec![make_track("x")], Some("b"));
        assert_eq!(p.current_index(), None);
    }

    #[test]
    fn test_full_cycle_returns_to_start() {
        let mut p = playlist(&["a", "b", "c", "d"]);
        p.locate("b");
        for _ in 0..4 {
            p.navigate(Direction::Next, NavigationMode::InPlace);
        }
        assert_eq!(p.current_index(), Some(1));
    }

    #[test]
    fn test_next_then_previous_round_trips() {
        let ids = ["a", "b", "c", "d", "e"];
        for len in 1..=ids.len() {
            for start in 0..len {
                let mut p = playlist(&ids[..len]);
                p.locate(ids[start]);
                p.navigate(Direction::Next, NavigationMode::InPlace).unwrap();
                p.navigate(Direction::Previous, NavigationMode::InPlace).unwrap();
                assert_eq!(p.current_index(), Some(start), "len {len} start {start}");

                p.navigate(Direction::Previous, NavigationMode::DetailPage).unwrap();
                p.navigate(Direction::Next, NavigationMode::DetailPage).unwrap();
                assert_eq!(p.current_index(), Some(start), "len {len} start {start}");
            }
        }
    }

    #[test]
    fn test_three_track_neighbours_of_last() {
        let mut p = playlist(&["a", "b", "c"]);
        p.locate("c");
        assert_eq!(p.next_index(), Some(0));
        assert_eq!(p.prev_index(), Some(1));

        p.navigate(Direction::Next, NavigationMode::InPlace);
        assert_eq!(p.current_track().map(|t| t.id.as_str()), Some("a"));

        p.locate("c");
        p.navigate(Direction::Previous, NavigationMode::InPlace);
        assert_eq!(p.current_track().map(|t| t.id.as_str()), Some("b"));
    }
}
